//! Report assembly from session state

use crate::llm::content;
use crate::llm::gateway::Gateway;
use crate::output::document::ReportDocument;
use crate::session::record::{ResumeReview, SessionRecord};
use log::info;

/// ATS analysis document for the review page. No gateway calls.
pub fn ats_report(record: &SessionRecord, review: &ResumeReview) -> ReportDocument {
    let mut doc = ReportDocument::new("ATS Analysis");
    doc.heading(&format!("Candidate: {}", record.user_name))
        .heading(&format!("Job Title: {}", record.job_title))
        .line(&format!("Resume Match Score: {:.2}/100", review.resume_score))
        .spacer()
        .paragraph(&review.ats.raw)
        .spacer()
        .heading("Skill Improvement Recommendations:")
        .paragraph(&review.recommendations);
    doc
}

/// Full interview summary.
///
/// Makes one gateway call per answered question for the best possible
/// answer, plus one for the overall feedback. Nothing is reused from earlier
/// pages.
pub async fn interview_summary(gateway: &mut Gateway, record: &SessionRecord) -> ReportDocument {
    let mut doc = ReportDocument::new("Interview Summary");
    doc.line(&format!("Candidate: {}", record.user_name))
        .line(&format!("Job Title: {}", record.job_title))
        .line(&format!("Interview Time: {} minutes", record.interview_duration_minutes))
        .spacer();

    for (i, (question, answer, score)) in record.answered().enumerate() {
        let best = content::best_possible_answer(gateway, question).await;
        doc.heading(&format!("Question {}: {}", i + 1, question))
            .paragraph(&format!("Answer: {}", answer))
            .line(&format!("Score: {:.2}/100", score))
            .paragraph(&format!("Best Answer: {}", best))
            .spacer();
    }

    let feedback = content::overall_feedback(gateway, record.user_answers(), record.answer_scores()).await;
    doc.line(&format!("Overall Interview Score: {:.2}/100", record.average_score()))
        .paragraph(&format!("Feedback: {}", feedback));

    info!(
        "Assembled interview summary with {} answered questions",
        record.interview_log().len()
    );
    doc
}
