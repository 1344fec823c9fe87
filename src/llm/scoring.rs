//! Numeric scores read from model output

use crate::llm::gateway::Gateway;
use crate::llm::prompts;
use log::warn;

/// How parsed scores are post-processed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScorePolicy {
    pub clamp: bool,
}

impl ScorePolicy {
    pub fn apply(&self, score: f64) -> f64 {
        if self.clamp {
            score.clamp(0.0, 100.0)
        } else {
            score
        }
    }
}

/// Read the leading whitespace-delimited token as a float.
///
/// Falls back to 0.0 when the response is empty or the token is not a
/// number. The value is returned as written, so "150" stays 150.
pub fn parse_score(response: &str) -> f64 {
    let Some(token) = response.split_whitespace().next() else {
        warn!("Empty score response, defaulting to 0.0");
        return 0.0;
    };

    match token.parse::<f64>() {
        Ok(score) if score.is_nan() => {
            warn!("Score response parsed as NaN, defaulting to 0.0");
            0.0
        }
        Ok(score) => score,
        Err(_) => {
            warn!("Could not read a score from {:?}, defaulting to 0.0", token);
            0.0
        }
    }
}

/// Resume vs job description fit, 0-100. No gateway call for empty inputs.
pub async fn resume_score(gateway: &mut Gateway, resume_text: &str, job_description: &str, policy: ScorePolicy) -> f64 {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return 0.0;
    }
    let response = gateway.generate(&prompts::resume_score(resume_text, job_description)).await;
    policy.apply(parse_score(&response))
}

/// Answer quality on relevance, confidence and clarity, 0-100.
pub async fn answer_quality(gateway: &mut Gateway, question: &str, answer: &str, policy: ScorePolicy) -> f64 {
    if question.trim().is_empty() || answer.trim().is_empty() {
        return 0.0;
    }
    let response = gateway.generate(&prompts::answer_quality(question, answer)).await;
    policy.apply(parse_score(&response))
}
