//! Skill charts for the review page
//!
//! Radar values are illustrative placeholders chosen by status, not
//! measurements of the candidate.

use serde::Serialize;

pub const MATCHING_COLOR: &str = "#00CC96";
pub const MISSING_COLOR: &str = "#EF553B";

pub const RADAR_LIMIT_PER_STATUS: usize = 5;
pub const MATCHING_CANDIDATE_LEVEL: u8 = 80;
pub const MATCHING_REQUIRED_LEVEL: u8 = 100;
pub const MISSING_CANDIDATE_LEVEL: u8 = 20;
pub const MISSING_REQUIRED_LEVEL: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkillStatus {
    Matching,
    Missing,
}

impl SkillStatus {
    pub fn color(self) -> &'static str {
        match self {
            SkillStatus::Matching => MATCHING_COLOR,
            SkillStatus::Missing => MISSING_COLOR,
        }
    }

    /// RGB triple of `color()`
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            SkillStatus::Matching => (0x00, 0xCC, 0x96),
            SkillStatus::Missing => (0xEF, 0x55, 0x3B),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub skill: String,
    pub status: SkillStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub entries: Vec<BarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub skill: String,
    pub status: SkillStatus,
    pub candidate: u8,
    pub required: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub title: String,
    pub axes: Vec<RadarAxis>,
}

/// Both charts together, as exported to JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCharts {
    pub bar: BarChart,
    pub radar: RadarChart,
}

pub fn bar_chart(matching: &[String], missing: &[String]) -> BarChart {
    let entries = matching
        .iter()
        .map(|s| (s, SkillStatus::Matching))
        .chain(missing.iter().map(|s| (s, SkillStatus::Missing)))
        .map(|(skill, status)| BarEntry {
            skill: skill.clone(),
            status,
        })
        .collect();

    BarChart {
        title: "Matching vs. Missing Skills".to_string(),
        entries,
    }
}

pub fn radar_chart(matching: &[String], missing: &[String]) -> RadarChart {
    let matching_axes = matching.iter().take(RADAR_LIMIT_PER_STATUS).map(|skill| RadarAxis {
        skill: skill.clone(),
        status: SkillStatus::Matching,
        candidate: MATCHING_CANDIDATE_LEVEL,
        required: MATCHING_REQUIRED_LEVEL,
    });
    let missing_axes = missing.iter().take(RADAR_LIMIT_PER_STATUS).map(|skill| RadarAxis {
        skill: skill.clone(),
        status: SkillStatus::Missing,
        candidate: MISSING_CANDIDATE_LEVEL,
        required: MISSING_REQUIRED_LEVEL,
    });

    RadarChart {
        title: "Skill Proficiency Comparison".to_string(),
        axes: matching_axes.chain(missing_axes).collect(),
    }
}

pub fn skill_charts(matching: &[String], missing: &[String]) -> SkillCharts {
    SkillCharts {
        bar: bar_chart(matching, missing),
        radar: radar_chart(matching, missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    #[test]
    fn test_bar_chart_has_every_skill_in_order() {
        let chart = bar_chart(&skills("m", 7), &skills("x", 2));
        assert_eq!(chart.entries.len(), 9);
        assert_eq!(chart.entries[0].skill, "m0");
        assert_eq!(chart.entries[6].status, SkillStatus::Matching);
        assert_eq!(chart.entries[7].skill, "x0");
        assert_eq!(chart.entries[8].status, SkillStatus::Missing);
    }

    #[test]
    fn test_radar_caps_each_status_at_five() {
        let chart = radar_chart(&skills("m", 7), &skills("x", 6));
        assert_eq!(chart.axes.len(), 10);
        assert_eq!(chart.axes.iter().filter(|a| a.status == SkillStatus::Matching).count(), 5);
        assert_eq!(chart.axes[4].skill, "m4");
        assert_eq!(chart.axes[5].skill, "x0");
    }

    #[test]
    fn test_radar_placeholder_levels() {
        let chart = radar_chart(&["Rust".to_string()], &["Kubernetes".to_string()]);
        assert_eq!((chart.axes[0].candidate, chart.axes[0].required), (80, 100));
        assert_eq!((chart.axes[1].candidate, chart.axes[1].required), (20, 80));
    }

    #[test]
    fn test_empty_lists_give_empty_charts() {
        let charts = skill_charts(&[], &[]);
        assert!(charts.bar.entries.is_empty());
        assert!(charts.radar.axes.is_empty());
    }

    #[test]
    fn test_charts_serialize_for_export() {
        let charts = skill_charts(&["Rust".to_string()], &[]);
        let json = serde_json::to_value(&charts).unwrap();
        assert_eq!(json["bar"]["entries"][0]["status"], "Matching");
        assert_eq!(json["radar"]["axes"][0]["candidate"], 80);
    }
}
