//! ATS (Applicant Tracking System) skill analysis
//!
//! The model is asked for three fixed headings with `- ` bullets underneath.
//! Parsing is strict about that layout: a heading the model renamed or a
//! bullet written as `*` leaves the corresponding list empty.

use crate::llm::gateway::Gateway;
use crate::llm::prompts;
use log::warn;
use serde::{Deserialize, Serialize};

pub const MATCHING_HEADING: &str = "*Matching Skills:*";
pub const MISSING_HEADING: &str = "*Missing Skills:*";
pub const SUGGESTIONS_HEADING: &str = "*Suggestions:*";
const BULLET: &str = "- ";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysis {
    /// Model output as received, for display
    pub raw: String,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Matching,
    Missing,
    Suggestions,
}

/// Split an ATS response into its three bulleted lists.
pub fn parse_ats_response(response: &str) -> AtsAnalysis {
    let mut analysis = AtsAnalysis {
        raw: response.to_string(),
        ..AtsAnalysis::default()
    };
    let mut section = Section::None;

    for line in response.lines().map(str::trim) {
        if line.starts_with(MATCHING_HEADING) {
            section = Section::Matching;
        } else if line.starts_with(MISSING_HEADING) {
            section = Section::Missing;
        } else if line.starts_with(SUGGESTIONS_HEADING) {
            section = Section::Suggestions;
        } else if let Some(item) = line.strip_prefix(BULLET) {
            let item = item.trim().to_string();
            match section {
                Section::Matching => analysis.matching_skills.push(item),
                Section::Missing => analysis.missing_skills.push(item),
                Section::Suggestions => analysis.suggestions.push(item),
                Section::None => {}
            }
        }
    }

    if !response.trim().is_empty()
        && analysis.matching_skills.is_empty()
        && analysis.missing_skills.is_empty()
        && analysis.suggestions.is_empty()
    {
        warn!("ATS response did not follow the requested layout; no skills extracted");
    }

    analysis
}

pub struct AtsAnalyzer;

impl AtsAnalyzer {
    pub async fn analyze(gateway: &mut Gateway, job_description: &str, resume_text: &str) -> AtsAnalysis {
        let response = gateway.generate(&prompts::ats_analysis(job_description, resume_text)).await;
        parse_ats_response(&response)
    }
}
