//! The per-session record threaded through every page

use crate::llm::analyzer::AtsAnalysis;
use crate::llm::content::Candidate;
use crate::session::flow::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DURATION_MINUTES: u32 = 10;
pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Technical,
    Behavioral,
}

impl QuestionType {
    pub fn toggled(self) -> Self {
        match self {
            QuestionType::Technical => QuestionType::Behavioral,
            QuestionType::Behavioral => QuestionType::Technical,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Technical => f.write_str("Technical"),
            QuestionType::Behavioral => f.write_str("Behavioral"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" | "tech" => Ok(QuestionType::Technical),
            "behavioral" | "behavioural" => Ok(QuestionType::Behavioral),
            _ => Err(format!("Invalid question type: {}. Supported: technical, behavioral", s)),
        }
    }
}

/// Everything the review page computes once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeReview {
    pub resume_score: f64,
    pub ats: AtsAnalysis,
    pub recommendations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub page: Page,
    pub resume_text: String,
    pub job_title: String,
    pub job_description: String,
    pub user_name: String,
    pub interview_duration_minutes: u32,
    pub current_question: String,
    pub resume_score: f64,
    pub start_time: Option<DateTime<Utc>>,
    pub question_type: QuestionType,
    pub review: Option<ResumeReview>,
    conversation_history: Vec<(String, String)>,
    interview_log: Vec<String>,
    user_answers: Vec<String>,
    answer_scores: Vec<f64>,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MINUTES, QuestionType::default())
    }
}

impl SessionRecord {
    pub fn new(interview_duration_minutes: u32, question_type: QuestionType) -> Self {
        Self {
            page: Page::Setup,
            resume_text: String::new(),
            job_title: String::new(),
            job_description: String::new(),
            user_name: String::new(),
            interview_duration_minutes,
            current_question: String::new(),
            resume_score: 0.0,
            start_time: None,
            question_type,
            review: None,
            conversation_history: Vec::new(),
            interview_log: Vec::new(),
            user_answers: Vec::new(),
            answer_scores: Vec::new(),
        }
    }

    /// Append one answered question to all logs at once.
    pub fn record_answer(&mut self, question: String, answer: String, score: f64) {
        self.conversation_history.push((question.clone(), answer.clone()));
        self.interview_log.push(question);
        self.user_answers.push(answer);
        self.answer_scores.push(score);
    }

    pub fn conversation_history(&self) -> &[(String, String)] {
        &self.conversation_history
    }

    pub fn interview_log(&self) -> &[String] {
        &self.interview_log
    }

    pub fn user_answers(&self) -> &[String] {
        &self.user_answers
    }

    pub fn answer_scores(&self) -> &[f64] {
        &self.answer_scores
    }

    /// (question, answer, score) for every submitted answer, in order.
    pub fn answered(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.interview_log
            .iter()
            .zip(&self.user_answers)
            .zip(&self.answer_scores)
            .map(|((q, a), s)| (q.as_str(), a.as_str(), *s))
    }

    /// Mean answer score, 0 when nothing was answered.
    pub fn average_score(&self) -> f64 {
        if self.answer_scores.is_empty() {
            0.0
        } else {
            self.answer_scores.iter().sum::<f64>() / self.answer_scores.len() as f64
        }
    }

    pub fn candidate(&self) -> Candidate<'_> {
        Candidate {
            name: &self.user_name,
            job_title: &self.job_title,
            resume_text: &self.resume_text,
            job_description: &self.job_description,
        }
    }
}
