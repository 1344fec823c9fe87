//! Prompt templates for every gateway use-case

use crate::llm::content::ContentKind;
use crate::session::QuestionType;

const RESUME_SCORE_TEMPLATE: &str = "Evaluate the resume against the job description and provide a score (0-100).\n\nJob Description:\n{job}\n\nResume:\n{resume}\n\nOnly provide the numeric score.";

const ANSWER_QUALITY_TEMPLATE: &str = "Evaluate the quality of this response on relevance, confidence, and clarity (0-100).\n\nQuestion: {question}\n\nAnswer: {answer}\n\nProvide only the numeric score.";

const REALTIME_FEEDBACK_TEMPLATE: &str = "Provide a brief, actionable suggestion to improve this partial interview response for relevance, specificity, and structure.\n\nQuestion: {question}\n\nPartial Answer: {answer}";

const BEST_ANSWER_TEMPLATE: &str =
    "Provide the best possible answer for the following interview question:\n\nQuestion: {question}";

const FEEDBACK_HEADER: &str = "Provide constructive feedback based on the candidate's answers and scores.";

const TECHNICAL_QUESTION_TEMPLATE: &str = "You are an AI interviewer for a {title} role. The job description is: {job}.\n\nResume:\n{resume}\n\nPrevious conversation:\n{history}\n\nAsk one relevant technical interview question based on the resume, job description, and responses so far.";

const BEHAVIORAL_QUESTION_TEMPLATE: &str = "You are an AI interviewer for a {title} role. The job description is: {job}.\n\nResume:\n{resume}\n\nPrevious conversation:\n{history}\n\nGenerate a behavioral interview question (e.g., about teamwork, conflict resolution) based on the resume, job description, and responses so far.";

const LINKEDIN_POST_TEMPLATE: &str = "Generate a professional LinkedIn post for {name} applying for a {title} role. Highlight their qualifications from the resume and align with the job description. Keep it concise and engaging.\n\nResume:\n{resume}\n\nJob Description:\n{job}";

const HR_MESSAGE_TEMPLATE: &str = "Generate a professional LinkedIn message to an HR manager for {name} applying for a {title} role. Emphasize their fit based on the resume and job description. Keep it polite and succinct.\n\nResume:\n{resume}\n\nJob Description:\n{job}";

const EMAIL_TEMPLATE: &str = "Generate a formal job application email for {name} applying for a {title} role. Use the resume and job description to highlight qualifications. Include a subject line.\n\nResume:\n{resume}\n\nJob Description:\n{job}";

const COVER_LETTER_TEMPLATE: &str = "Generate a professional cover letter for {name} applying for a {title} role. Tailor it to the resume and job description, emphasizing relevant skills and enthusiasm.\n\nResume:\n{resume}\n\nJob Description:\n{job}";

const ATS_TEMPLATE: &str = r#"Perform an ATS analysis for the following job description and resume.

Job Description:
{job}

Resume:
{resume}

Provide the analysis in the following format and only consider the major skills.:

*Matching Skills:*
- Skill 1
- Skill 2
- ...

*Missing Skills:*
- Skill 1
- Skill 2
- ...

*Suggestions:*
- Suggestion 1
- Suggestion 2
- ...
"#;

const RECOMMENDATIONS_TEMPLATE: &str = "Provide personalized learning resource recommendations (e.g., online courses, tutorials) for the following missing skills. Keep it concise and include specific platforms like Coursera, YouTube, or Udemy.\n\nMissing Skills:\n{skills}";

/// Substitute `{key}` placeholders in a single pass.
///
/// Values are inserted verbatim and never re-scanned, so a resume that
/// happens to contain `{job}` stays as written. Unknown placeholders are
/// left untouched.
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + params.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match params.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn resume_score(resume: &str, job: &str) -> String {
    render(RESUME_SCORE_TEMPLATE, &[("resume", resume), ("job", job)])
}

pub fn answer_quality(question: &str, answer: &str) -> String {
    render(ANSWER_QUALITY_TEMPLATE, &[("question", question), ("answer", answer)])
}

pub fn realtime_feedback(question: &str, partial_answer: &str) -> String {
    render(REALTIME_FEEDBACK_TEMPLATE, &[("question", question), ("answer", partial_answer)])
}

pub fn best_answer(question: &str) -> String {
    render(BEST_ANSWER_TEMPLATE, &[("question", question)])
}

pub fn overall_feedback(answers: &[String], scores: &[f64]) -> String {
    let mut prompt = FEEDBACK_HEADER.to_string();
    for (i, (answer, score)) in answers.iter().zip(scores).enumerate() {
        prompt.push_str(&format!("\n\nAnswer {}: {}\nScore: {}/100", i + 1, answer, score));
    }
    prompt
}

/// Serialize the interview so far as `Q:`/`A:` lines.
pub fn conversation_context(history: &[(String, String)]) -> String {
    history
        .iter()
        .map(|(q, a)| format!("Q: {}\nA: {}", q, a))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn interview_question(
    title: &str,
    job: &str,
    resume: &str,
    history: &[(String, String)],
    question_type: QuestionType,
) -> String {
    let template = match question_type {
        QuestionType::Technical => TECHNICAL_QUESTION_TEMPLATE,
        QuestionType::Behavioral => BEHAVIORAL_QUESTION_TEMPLATE,
    };
    let context = conversation_context(history);
    render(
        template,
        &[("title", title), ("job", job), ("resume", resume), ("history", &context)],
    )
}

pub fn application_content(kind: ContentKind, name: &str, title: &str, resume: &str, job: &str) -> String {
    let template = match kind {
        ContentKind::LinkedInPost => LINKEDIN_POST_TEMPLATE,
        ContentKind::HrMessage => HR_MESSAGE_TEMPLATE,
        ContentKind::Email => EMAIL_TEMPLATE,
        ContentKind::CoverLetter => COVER_LETTER_TEMPLATE,
    };
    render(
        template,
        &[("name", name), ("title", title), ("resume", resume), ("job", job)],
    )
}

pub fn ats_analysis(job: &str, resume: &str) -> String {
    render(ATS_TEMPLATE, &[("job", job), ("resume", resume)])
}

pub fn skill_recommendations(missing_skills: &[String]) -> String {
    let skills = missing_skills
        .iter()
        .map(|s| format!("- {}", s))
        .collect::<Vec<_>>()
        .join("\n");
    render(RECOMMENDATIONS_TEMPLATE, &[("skills", &skills)])
}
