//! Terminal presentation: headers, score badges, charts, countdown

use crate::output::charts::{BarChart, RadarChart, SkillStatus};
use crate::output::document::{Block, ReportDocument};
use colored::{Color, Colorize};

const BAR_WIDTH: usize = 20;

pub struct ConsoleFormatter {
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn status_color(status: SkillStatus) -> Color {
        let (r, g, b) = status.rgb();
        Color::TrueColor { r, g, b }
    }

    pub fn header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    pub fn score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 90.0 => ("EXCELLENT", Color::Green),
            s if s >= 80.0 => ("VERY GOOD", Color::BrightGreen),
            s if s >= 70.0 => ("GOOD", Color::Yellow),
            s if s >= 60.0 => ("FAIR", Color::BrightYellow),
            s if s >= 50.0 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    pub fn score_line(&self, label: &str, score: f64) -> String {
        format!("{}: {:.2}/100 {}", label, score, self.score_badge(score))
    }

    pub fn notice(&self, text: &str) -> String {
        format!("⚠️  {}", self.colorize(text, Color::Yellow))
    }

    pub fn error(&self, text: &str) -> String {
        format!("❌ {}", self.colorize(text, Color::Red))
    }

    pub fn bar_chart(&self, chart: &BarChart) -> String {
        let mut out = self.header(&chart.title, 3);
        if chart.entries.is_empty() {
            out.push_str("  (no skills extracted)\n");
            return out;
        }

        let label_width = chart.entries.iter().map(|e| e.skill.chars().count()).max().unwrap_or(0);
        for entry in &chart.entries {
            let bar = "■".repeat(BAR_WIDTH / 2);
            let status = match entry.status {
                SkillStatus::Matching => "Matching",
                SkillStatus::Missing => "Missing",
            };
            let bar = if self.use_colors {
                bar.color(Self::status_color(entry.status)).to_string()
            } else {
                bar
            };
            out.push_str(&format!("  {:<width$}  {} {}\n", entry.skill, bar, status, width = label_width));
        }
        out
    }

    pub fn radar_chart(&self, chart: &RadarChart) -> String {
        let mut out = self.header(&chart.title, 3);
        if chart.axes.is_empty() {
            out.push_str("  (no skills extracted)\n");
            return out;
        }

        let label_width = chart.axes.iter().map(|a| a.skill.chars().count()).max().unwrap_or(0);
        for axis in &chart.axes {
            let candidate = level_bar(axis.candidate);
            let required = level_bar(axis.required);
            let candidate = if self.use_colors {
                candidate.color(Self::status_color(axis.status)).to_string()
            } else {
                candidate
            };
            out.push_str(&format!(
                "  {:<width$}  candidate {:<bw$} {:>3}  required {:<bw$} {:>3}\n",
                axis.skill,
                candidate,
                axis.candidate,
                required,
                axis.required,
                width = label_width,
                bw = BAR_WIDTH,
            ));
        }
        out.push_str("  (illustrative levels, not measured)\n");
        out
    }

    pub fn document(&self, doc: &ReportDocument) -> String {
        let mut out = self.header(&doc.title, 1);
        for block in &doc.blocks {
            match block {
                Block::Heading(text) => {
                    out.push_str(&self.colorize(text, Color::Cyan));
                    out.push('\n');
                }
                Block::Line(text) | Block::Paragraph(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Spacer => out.push('\n'),
            }
        }
        out
    }
}

fn level_bar(level: u8) -> String {
    let filled = (level as usize * BAR_WIDTH) / 100;
    "█".repeat(filled)
}

/// `M min S sec`, with negative remainders shown as zero.
pub fn format_remaining(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{} min {} sec", seconds / 60, seconds % 60)
}

/// Cut text to at most `max_chars` characters at a word boundary.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", &truncated[..cut])
}
