//! The session flow controller
//!
//! Owns the session record and the gateway, and is the only place the record
//! is mutated. Every operation checks the page it belongs to before touching
//! state, so a rejected action leaves the record exactly as it was.

use crate::config::Config;
use crate::error::{InterviewCoachError, Result};
use crate::llm::analyzer::AtsAnalyzer;
use crate::llm::content::{self, Candidate, ContentKind};
use crate::llm::gateway::Gateway;
use crate::llm::scoring::{self, ScorePolicy};
use crate::output::charts::{self, SkillCharts};
use crate::output::document::ReportDocument;
use crate::output::report;
use crate::session::clock::{Clock, SystemClock};
use crate::session::flow::{Action, Page};
use crate::session::record::{
    QuestionType, ResumeReview, SessionRecord, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
};
use chrono::Duration;
use log::{debug, info};

pub const EMPTY_ANSWER: &str = "Please provide a response before submitting.";

/// What the setup page collects.
#[derive(Debug, Clone, Default)]
pub struct SetupForm {
    pub user_name: String,
    pub job_title: String,
    pub job_description: String,
    pub resume_text: String,
    pub duration_minutes: u32,
}

impl SetupForm {
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            ("name", &self.user_name),
            ("job title", &self.job_title),
            ("job description", &self.job_description),
            ("resume", &self.resume_text),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(InterviewCoachError::MissingFields(missing));
        }

        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(InterviewCoachError::InvalidInput(format!(
                "Interview duration must be between {} and {} minutes, got {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, self.duration_minutes
            )));
        }

        Ok(())
    }

    fn candidate(&self) -> Candidate<'_> {
        Candidate {
            name: &self.user_name,
            job_title: &self.job_title,
            resume_text: &self.resume_text,
            job_description: &self.job_description,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Answer scored and logged; the interview continues with a new question
    Recorded { score: f64, next_question: String },
    /// Time ran out before the answer was taken; the session is on the summary page
    TimeExpired,
}

pub struct InterviewSession {
    record: SessionRecord,
    gateway: Gateway,
    clock: Box<dyn Clock>,
    policy: ScorePolicy,
    default_duration: u32,
    default_question_type: QuestionType,
}

impl InterviewSession {
    pub fn new(gateway: Gateway, config: &Config) -> Self {
        let default_duration = config.interview.default_duration_minutes;
        let default_question_type = config.interview.default_question_type;

        Self {
            record: SessionRecord::new(default_duration, default_question_type),
            gateway,
            clock: Box::new(SystemClock),
            policy: ScorePolicy {
                clamp: config.scoring.clamp_scores,
            },
            default_duration,
            default_question_type,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn page(&self) -> Page {
        self.record.page
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Gateway failures since the last call, for display.
    pub fn take_notices(&mut self) -> Vec<String> {
        self.gateway.take_notices()
    }

    fn check(&self, action: Action) -> Result<Page> {
        self.record.page.next(action).ok_or(InterviewCoachError::InvalidTransition {
            page: self.record.page,
            action: action.label(),
        })
    }

    fn expect_page(&self, page: Page, action: &'static str) -> Result<()> {
        if self.record.page == page {
            Ok(())
        } else {
            Err(InterviewCoachError::InvalidTransition {
                page: self.record.page,
                action,
            })
        }
    }

    fn advance(&mut self, action: Action) -> Result<Page> {
        let next = self.check(action)?;
        if next != self.record.page {
            info!("Session page: {} -> {}", self.record.page, next);
        }
        self.record.page = next;
        Ok(next)
    }

    // ----- Setup -----

    /// Optional application content on the setup page. Needs a resume and a
    /// job description; uses the form as typed so far.
    pub async fn generate_content(&mut self, kind: ContentKind, form: &SetupForm) -> Result<String> {
        self.expect_page(Page::Setup, "generate application content")?;
        if form.resume_text.trim().is_empty() || form.job_description.trim().is_empty() {
            return Err(InterviewCoachError::InvalidInput(
                "Application content needs a resume and a job description".to_string(),
            ));
        }
        Ok(content::application_content(&mut self.gateway, kind, form.candidate()).await)
    }

    /// Validate the form and move to the review page.
    pub fn proceed(&mut self, form: SetupForm) -> Result<()> {
        self.check(Action::Proceed)?;
        form.validate()?;

        self.record.user_name = form.user_name;
        self.record.job_title = form.job_title;
        self.record.job_description = form.job_description;
        self.record.resume_text = form.resume_text;
        self.record.interview_duration_minutes = form.duration_minutes;
        self.record.start_time = Some(self.clock.now());
        self.advance(Action::Proceed)?;
        Ok(())
    }

    // ----- Review -----

    /// Resume score, ATS analysis and recommendations. Computed on the first
    /// call and reused afterwards.
    pub async fn review(&mut self) -> Result<ResumeReview> {
        self.expect_page(Page::Review, "review the resume")?;
        if let Some(review) = &self.record.review {
            return Ok(review.clone());
        }

        let resume_score = scoring::resume_score(
            &mut self.gateway,
            &self.record.resume_text,
            &self.record.job_description,
            self.policy,
        )
        .await;
        let ats = AtsAnalyzer::analyze(&mut self.gateway, &self.record.job_description, &self.record.resume_text).await;
        let recommendations = content::skill_recommendations(&mut self.gateway, &ats.missing_skills).await;

        info!(
            "Resume review: score {:.2}, {} matching, {} missing skills",
            resume_score,
            ats.matching_skills.len(),
            ats.missing_skills.len()
        );

        let review = ResumeReview {
            resume_score,
            ats,
            recommendations,
        };
        self.record.resume_score = resume_score;
        self.record.review = Some(review.clone());
        Ok(review)
    }

    pub fn skill_charts(&self) -> Result<SkillCharts> {
        let review = self.computed_review()?;
        Ok(charts::skill_charts(&review.ats.matching_skills, &review.ats.missing_skills))
    }

    pub fn ats_report(&self) -> Result<ReportDocument> {
        let review = self.computed_review()?;
        Ok(report::ats_report(&self.record, review))
    }

    fn computed_review(&self) -> Result<&ResumeReview> {
        self.record
            .review
            .as_ref()
            .ok_or_else(|| InterviewCoachError::InvalidInput("The resume has not been reviewed yet".to_string()))
    }

    /// Move to the interview, restart the clock and ask the first question.
    pub async fn start_interview(&mut self) -> Result<String> {
        self.check(Action::StartInterview)?;

        let question = content::interview_question(
            &mut self.gateway,
            self.record.candidate(),
            &[],
            self.record.question_type,
        )
        .await;

        self.record.current_question = question.clone();
        self.record.start_time = Some(self.clock.now());
        self.advance(Action::StartInterview)?;
        Ok(question)
    }

    // ----- Interview -----

    /// Time left, derived from the start time and the configured duration.
    pub fn remaining(&self) -> Option<Duration> {
        let start = self.record.start_time?;
        let total = Duration::minutes(i64::from(self.record.interview_duration_minutes));
        Some(total - (self.clock.now() - start))
    }

    /// Re-evaluate the page: an interview whose time is up moves to the summary.
    pub fn tick(&mut self) -> Result<Page> {
        if self.record.page == Page::Interview {
            if let Some(remaining) = self.remaining() {
                if remaining <= Duration::zero() {
                    info!("Interview time is up");
                    return self.advance(Action::TimeExpired);
                }
            }
        }
        Ok(self.record.page)
    }

    /// Pick the template for the next generated question.
    pub fn set_question_type(&mut self, question_type: QuestionType) -> Result<()> {
        self.expect_page(Page::Interview, "change the question type")?;
        debug!("Question type set to {}", question_type);
        self.record.question_type = question_type;
        Ok(())
    }

    pub async fn live_feedback(&mut self, partial_answer: &str) -> Result<String> {
        self.expect_page(Page::Interview, "request feedback")?;
        Ok(content::realtime_feedback(&mut self.gateway, &self.record.current_question, partial_answer).await)
    }

    /// Score and log one answer, then ask the next question.
    pub async fn submit_answer(&mut self, answer: &str) -> Result<SubmitOutcome> {
        if self.tick()? == Page::Summary {
            return Ok(SubmitOutcome::TimeExpired);
        }
        self.check(Action::SubmitAnswer)?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(InterviewCoachError::InvalidInput(EMPTY_ANSWER.to_string()));
        }

        let question = self.record.current_question.clone();
        let score = scoring::answer_quality(&mut self.gateway, &question, answer, self.policy).await;
        self.record.record_answer(question, answer.to_string(), score);

        let next_question = content::interview_question(
            &mut self.gateway,
            self.record.candidate(),
            self.record.conversation_history(),
            self.record.question_type,
        )
        .await;
        self.record.current_question = next_question.clone();
        self.advance(Action::SubmitAnswer)?;

        debug!("Answer {} scored {:.2}", self.record.interview_log().len(), score);
        Ok(SubmitOutcome::Recorded { score, next_question })
    }

    // ----- Summary -----

    /// Build the summary report. Best answers and feedback go through the
    /// gateway memo, so asking again in the same session returns the same text.
    pub async fn summary_report(&mut self) -> Result<ReportDocument> {
        self.expect_page(Page::Summary, "build the summary report")?;
        Ok(report::interview_summary(&mut self.gateway, &self.record).await)
    }

    /// Discard the whole record and the gateway memo, and return to setup.
    pub fn restart(&mut self) -> Result<()> {
        self.check(Action::Restart)?;
        self.record = SessionRecord::new(self.default_duration, self.default_question_type);
        self.gateway.clear_cache();
        info!("Session restarted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::gateway::TextGenerator;
    use async_trait::async_trait;

    struct Fixed;

    #[async_trait]
    impl TextGenerator for Fixed {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("42".to_string())
        }
    }

    fn session() -> InterviewSession {
        let gateway = Gateway::new(Box::new(Fixed), std::time::Duration::from_secs(5));
        InterviewSession::new(gateway, &Config::default())
    }

    fn form() -> SetupForm {
        SetupForm {
            user_name: "Ada".to_string(),
            job_title: "Engineer".to_string(),
            job_description: "Build compilers".to_string(),
            resume_text: "Wrote the first program".to_string(),
            duration_minutes: 1,
        }
    }

    #[test]
    fn test_missing_fields_are_named_and_nothing_changes() {
        let mut session = session();
        let mut incomplete = form();
        incomplete.job_title = "  ".to_string();
        incomplete.resume_text.clear();

        match session.proceed(incomplete) {
            Err(InterviewCoachError::MissingFields(fields)) => assert_eq!(fields, ["job title", "resume"]),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(session.record(), &SessionRecord::default());
    }

    #[test]
    fn test_duration_bounds() {
        let mut session = session();
        let mut too_long = form();
        too_long.duration_minutes = 61;
        assert!(matches!(session.proceed(too_long), Err(InterviewCoachError::InvalidInput(_))));

        let mut zero = form();
        zero.duration_minutes = 0;
        assert!(session.proceed(zero).is_err());
        assert_eq!(session.page(), Page::Setup);
    }

    #[tokio::test]
    async fn test_out_of_order_actions_are_rejected() {
        let mut session = session();
        assert!(matches!(
            session.start_interview().await,
            Err(InterviewCoachError::InvalidTransition { page: Page::Setup, .. })
        ));
        assert!(session.submit_answer("hi").await.is_err());
        assert!(session.restart().is_err());
        assert!(session.summary_report().await.is_err());
        assert_eq!(session.record(), &SessionRecord::default());
    }

    #[tokio::test]
    async fn test_review_is_computed_once() {
        let mut session = session();
        session.proceed(form()).unwrap();

        let first = session.review().await.unwrap();
        let calls = session.gateway().backend_calls();
        let second = session.review().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.resume_score, 42.0);
        assert_eq!(session.gateway().backend_calls(), calls);
        assert!(session.ats_report().unwrap().to_plain_text().contains("Candidate: Ada"));
    }

    #[tokio::test]
    async fn test_empty_answer_is_rejected_without_logging() {
        let mut session = session();
        session.proceed(form()).unwrap();
        session.start_interview().await.unwrap();

        let err = session.submit_answer("   ").await.unwrap_err();
        assert!(err.to_string().contains(EMPTY_ANSWER));
        assert!(session.record().interview_log().is_empty());
        assert_eq!(session.page(), Page::Interview);
    }

    #[tokio::test]
    async fn test_content_generation_needs_resume_and_job() {
        let mut session = session();
        let mut partial = form();
        partial.job_description.clear();
        assert!(session.generate_content(ContentKind::Email, &partial).await.is_err());

        let text = session.generate_content(ContentKind::Email, &form()).await.unwrap();
        assert_eq!(text, "42");
        // content generation does not commit the form
        assert_eq!(session.page(), Page::Setup);
        assert!(session.record().user_name.is_empty());
    }
}
