//! Free-text generators: application content, interview questions, feedback

use crate::llm::gateway::Gateway;
use crate::llm::prompts;
use crate::session::QuestionType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const EMPTY_PARTIAL_ANSWER: &str = "Start typing your response to receive feedback.";
pub const NO_MISSING_SKILLS: &str =
    "No missing skills identified. Focus on strengthening your existing skills!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    LinkedInPost,
    HrMessage,
    Email,
    CoverLetter,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::LinkedInPost,
        ContentKind::HrMessage,
        ContentKind::Email,
        ContentKind::CoverLetter,
    ];
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentKind::LinkedInPost => "LinkedIn Post",
            ContentKind::HrMessage => "LinkedIn HR Message",
            ContentKind::Email => "Email",
            ContentKind::CoverLetter => "Cover Letter",
        };
        f.write_str(label)
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "linkedin-post" | "post" => Ok(ContentKind::LinkedInPost),
            "linkedin-hr-message" | "hr-message" | "hr" => Ok(ContentKind::HrMessage),
            "email" => Ok(ContentKind::Email),
            "cover-letter" | "cover" => Ok(ContentKind::CoverLetter),
            _ => Err(format!(
                "Invalid content type: {}. Supported: linkedin-post, hr-message, email, cover-letter",
                s
            )),
        }
    }
}

/// Candidate details interpolated into application content prompts.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub job_title: &'a str,
    pub resume_text: &'a str,
    pub job_description: &'a str,
}

pub async fn application_content(gateway: &mut Gateway, kind: ContentKind, candidate: Candidate<'_>) -> String {
    let prompt = prompts::application_content(
        kind,
        candidate.name,
        candidate.job_title,
        candidate.resume_text,
        candidate.job_description,
    );
    gateway.generate(&prompt).await
}

/// Next interview question, informed by every exchange so far.
pub async fn interview_question(
    gateway: &mut Gateway,
    candidate: Candidate<'_>,
    history: &[(String, String)],
    question_type: QuestionType,
) -> String {
    let prompt = prompts::interview_question(
        candidate.job_title,
        candidate.job_description,
        candidate.resume_text,
        history,
        question_type,
    );
    gateway.generate(&prompt).await
}

pub async fn best_possible_answer(gateway: &mut Gateway, question: &str) -> String {
    gateway.generate(&prompts::best_answer(question)).await
}

/// Coaching hint for an answer still being written.
pub async fn realtime_feedback(gateway: &mut Gateway, question: &str, partial_answer: &str) -> String {
    if partial_answer.trim().is_empty() {
        return EMPTY_PARTIAL_ANSWER.to_string();
    }
    gateway.generate(&prompts::realtime_feedback(question, partial_answer)).await
}

pub async fn overall_feedback(gateway: &mut Gateway, answers: &[String], scores: &[f64]) -> String {
    gateway.generate(&prompts::overall_feedback(answers, scores)).await
}

pub async fn skill_recommendations(gateway: &mut Gateway, missing_skills: &[String]) -> String {
    if missing_skills.is_empty() {
        return NO_MISSING_SKILLS.to_string();
    }
    gateway.generate(&prompts::skill_recommendations(missing_skills)).await
}
