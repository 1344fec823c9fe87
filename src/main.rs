//! Interview coach: resume review and timed mock interviews backed by a hosted language model

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use interview_coach::cli::{CandidateArgs, Cli, Commands, ConfigAction};
use interview_coach::config::Config;
use interview_coach::error::InterviewCoachError;
use interview_coach::input::{DocumentLoader, DocumentRole};
use interview_coach::llm::content::ContentKind;
use interview_coach::llm::{Gateway, GeminiClient};
use interview_coach::output::console::{format_remaining, truncate_text, ConsoleFormatter};
use interview_coach::output::pdf::write_pdf;
use interview_coach::output::ReportDocument;
use interview_coach::session::{InterviewSession, Page, QuestionType, SetupForm, SubmitOutcome};
use log::{error, info};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    dotenvy::dotenv().ok();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Interview {
            candidate,
            duration,
            question_type,
            content,
            out_dir,
        } => {
            if let Some(dir) = out_dir {
                config.output.output_dir = dir;
            }
            if let Some(question_type) = question_type {
                config.interview.default_question_type = question_type;
            }
            let preset = SetupPreset {
                candidate,
                duration,
                content,
            };
            run_interview(preset, &config).await?;
        }

        Commands::Analyze {
            candidate,
            out_dir,
            charts_json,
        } => {
            if let Some(dir) = out_dir {
                config.output.output_dir = dir;
            }
            run_analyze(candidate, charts_json, &config).await?;
        }

        Commands::Generate { kind, candidate } => {
            run_generate(kind, candidate, &config).await?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let text = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("⚙️  Current Configuration\n");
                println!("{}", text);
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn build_session(config: &Config) -> anyhow::Result<InterviewSession> {
    let api_key = config.api_key()?;
    let client = GeminiClient::new(&config.gateway, api_key)?;
    let gateway = Gateway::new(Box::new(client), Duration::from_secs(config.gateway.timeout_secs))
        .with_cache(config.gateway.enable_cache);
    info!("Using model {} at {}", config.gateway.model, config.gateway.endpoint);
    Ok(InterviewSession::new(gateway, config))
}

async fn with_spinner<T>(message: &str, work: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = work.await;
    spinner.finish_and_clear();
    result
}

fn show_notices(session: &mut InterviewSession, console: &ConsoleFormatter) {
    for notice in session.take_notices() {
        println!("{}", console.notice(&notice));
    }
}

/// Line-oriented reader over stdin. `None` means stdin was closed.
struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        use std::io::Write;
        print!("{} ", label);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }
}

struct SetupPreset {
    candidate: CandidateArgs,
    duration: Option<u32>,
    content: Option<ContentKind>,
}

/// Load the resume and job description named on the command line, leaving
/// the form fields empty when a file is missing or unreadable.
async fn load_documents(
    form: &mut SetupForm,
    candidate: &CandidateArgs,
    input: &mut DocumentLoader,
    console: &ConsoleFormatter,
) {
    if let Some(path) = &candidate.resume {
        match input.load(path, DocumentRole::Resume).await {
            Ok(text) => form.resume_text = text,
            Err(e) => println!("{}", console.error(&format!("Error reading resume: {}", e))),
        }
    }
    if let Some(path) = &candidate.job {
        match input.load(path, DocumentRole::JobDescription).await {
            Ok(text) => form.job_description = text,
            Err(e) => println!("{}", console.error(&format!("Error reading job description: {}", e))),
        }
    }
}

/// Prompt for every form field that is still empty. Returns `false` when
/// stdin closes.
async fn fill_form(
    form: &mut SetupForm,
    prompter: &mut Prompter,
    input: &mut DocumentLoader,
    console: &ConsoleFormatter,
    default_duration: u32,
) -> anyhow::Result<bool> {
    if form.user_name.is_empty() {
        let Some(name) = prompter.ask("Your Name:").await? else { return Ok(false) };
        form.user_name = name;
    }
    if form.job_title.is_empty() {
        let Some(title) = prompter.ask("Job Title:").await? else { return Ok(false) };
        form.job_title = title;
    }
    if form.job_description.trim().is_empty() {
        let Some(answer) = prompter
            .ask("Job Description (path to a .txt/.md file, or the text on one line):")
            .await?
        else {
            return Ok(false);
        };
        let path = PathBuf::from(&answer);
        form.job_description = if path.is_file() {
            match input.load(&path, DocumentRole::JobDescription).await {
                Ok(text) => text,
                Err(e) => {
                    println!("{}", console.error(&format!("Error reading job description: {}", e)));
                    String::new()
                }
            }
        } else {
            answer
        };
    }
    if form.resume_text.trim().is_empty() {
        let Some(answer) = prompter.ask("Resume file (PDF, TXT, MD):").await? else { return Ok(false) };
        if !answer.is_empty() {
            match input.load(Path::new(&answer), DocumentRole::Resume).await {
                Ok(text) => form.resume_text = text,
                Err(e) => println!("{}", console.error(&format!("Error reading resume: {}", e))),
            }
        }
    }
    if form.duration_minutes == 0 {
        let label = format!("Interview Duration (minutes, 1-60) [{}]:", default_duration);
        let Some(answer) = prompter.ask(&label).await? else { return Ok(false) };
        form.duration_minutes = if answer.is_empty() {
            default_duration
        } else {
            answer.parse().unwrap_or(0)
        };
    }
    Ok(true)
}

async fn run_setup(
    session: &mut InterviewSession,
    preset: Option<SetupPreset>,
    prompter: &mut Prompter,
    input: &mut DocumentLoader,
    console: &ConsoleFormatter,
    config: &Config,
) -> anyhow::Result<bool> {
    print!("{}", console.header("AI Interview Setup", 1));

    let mut form = SetupForm::default();
    let mut content = None;
    if let Some(preset) = preset {
        form.user_name = preset.candidate.name.clone().unwrap_or_default();
        form.job_title = preset.candidate.title.clone().unwrap_or_default();
        form.duration_minutes = preset.duration.unwrap_or(config.interview.default_duration_minutes);
        load_documents(&mut form, &preset.candidate, input, console).await;
        content = preset.content;
    }

    loop {
        if !fill_form(&mut form, prompter, input, console, config.interview.default_duration_minutes).await? {
            return Ok(false);
        }

        if let Some(kind) = content.take() {
            match with_spinner(&format!("Generating {}...", kind), session.generate_content(kind, &form)).await {
                Ok(text) => {
                    print!("{}", console.header(&format!("Generated {}", kind), 2));
                    println!("{}", text);
                }
                Err(e) => println!("{}", console.error(&e.to_string())),
            }
            show_notices(session, console);
        }

        match session.proceed(form.clone()) {
            Ok(()) => return Ok(true),
            Err(e @ InterviewCoachError::MissingFields(_)) => println!("{}", console.error(&e.to_string())),
            Err(e @ InterviewCoachError::InvalidInput(_)) => {
                println!("{}", console.error(&e.to_string()));
                form.duration_minutes = 0;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn run_review(
    session: &mut InterviewSession,
    console: &ConsoleFormatter,
    config: &Config,
    charts_json: Option<&Path>,
) -> anyhow::Result<()> {
    print!("{}", console.header("Resume Review", 1));
    {
        let record = session.record();
        println!("Candidate Name: {}", record.user_name);
        println!("Job Title: {}", record.job_title);
        println!("Job Description: {}", truncate_text(&record.job_description, 300));
        println!("\n📄 Resume Text:\n{}", truncate_text(&record.resume_text, 600));
    }

    let review = with_spinner("Reviewing resume...", session.review()).await?;
    show_notices(session, console);

    println!("\n{}", console.score_line("Resume Match Score", review.resume_score));

    print!("{}", console.header("ATS Analysis", 2));
    println!("{}", review.ats.raw);

    let charts = session.skill_charts()?;
    print!("{}", console.bar_chart(&charts.bar));
    print!("{}", console.radar_chart(&charts.radar));

    print!("{}", console.header("Skill Improvement Recommendations", 2));
    println!("{}", review.recommendations);

    if let Some(path) = charts_json {
        let json = serde_json::to_string_pretty(&charts)?;
        match std::fs::write(path, json) {
            Ok(()) => println!("📊 Chart data saved to {}", path.display()),
            Err(e) => println!("{}", console.error(&format!("Failed to write {}: {}", path.display(), e))),
        }
    }

    let report = session.ats_report()?;
    save_report(&report, &config.ats_report_path(), "ATS analysis", console);
    Ok(())
}

/// Write a PDF report. A failed write is shown and the session carries on.
fn save_report(report: &ReportDocument, path: &Path, label: &str, console: &ConsoleFormatter) -> bool {
    match write_pdf(report, path) {
        Ok(()) => {
            println!("\n💾 {} saved to {}", label, path.display());
            true
        }
        Err(e) => {
            println!("{}", console.error(&format!("Could not save {} to {}: {}", label, path.display(), e)));
            false
        }
    }
}

/// Returns `false` when stdin closes mid-interview.
async fn run_interview_page(
    session: &mut InterviewSession,
    prompter: &mut Prompter,
    console: &ConsoleFormatter,
) -> anyhow::Result<bool> {
    print!("{}", console.header("AI Interview", 1));
    println!("Type your answer and press Enter. Commands: :technical, :behavioral, :hint <draft answer>");

    let mut question = with_spinner("Preparing the first question...", session.start_interview()).await?;
    show_notices(session, console);

    loop {
        if session.tick()? == Page::Summary {
            println!("\n⏰ Time is up!");
            return Ok(true);
        }

        let remaining = session.remaining().map(|r| r.num_seconds()).unwrap_or(0);
        println!("\n⏱️  Time Remaining: {}", format_remaining(remaining));
        println!("Question Type: {}", session.record().question_type);
        print!("{}", console.header(&question, 3));

        let Some(line) = prompter.ask("Your Response:").await? else { return Ok(false) };

        if let Some(kind) = line.strip_prefix(':') {
            let (command, rest) = kind.split_once(' ').unwrap_or((kind, ""));
            match command {
                "hint" => {
                    let feedback = with_spinner("Thinking...", session.live_feedback(rest)).await?;
                    show_notices(session, console);
                    print!("{}", console.header("Real-Time Feedback", 3));
                    println!("{}", feedback);
                }
                other => match other.parse::<QuestionType>() {
                    Ok(question_type) => {
                        session.set_question_type(question_type)?;
                        println!("Next question will be {}", question_type);
                    }
                    Err(e) => println!("{}", console.error(&e)),
                },
            }
            continue;
        }

        match with_spinner("Scoring your answer...", session.submit_answer(&line)).await {
            Ok(SubmitOutcome::Recorded { score, next_question }) => {
                show_notices(session, console);
                println!("{}", console.score_line("Answer score", score));
                question = next_question;
            }
            Ok(SubmitOutcome::TimeExpired) => {
                println!("\n⏰ Time is up! That answer was not recorded.");
                return Ok(true);
            }
            Err(e @ InterviewCoachError::InvalidInput(_)) => println!("{}", console.error(&e.to_string())),
            Err(e) => return Err(e.into()),
        }
    }
}

async fn run_summary(session: &mut InterviewSession, console: &ConsoleFormatter, config: &Config) -> anyhow::Result<()> {
    let report = with_spinner("Writing your interview summary...", session.summary_report()).await?;
    show_notices(session, console);

    print!("{}", console.document(&report));

    save_report(&report, &config.summary_report_path(), "Interview summary", console);
    Ok(())
}

async fn run_interview(preset: SetupPreset, config: &Config) -> anyhow::Result<()> {
    let mut session = build_session(config)?;
    let console = ConsoleFormatter::new(config.output.color_output);
    let mut prompter = Prompter::new();
    let mut input = DocumentLoader::new();
    let mut preset = Some(preset);

    loop {
        if !run_setup(&mut session, preset.take(), &mut prompter, &mut input, &console, config).await? {
            return Ok(());
        }

        run_review(&mut session, &console, config, None).await?;
        if prompter.ask("\nPress Enter to start the interview...").await?.is_none() {
            return Ok(());
        }

        if !run_interview_page(&mut session, &mut prompter, &console).await? {
            return Ok(());
        }

        run_summary(&mut session, &console, config).await?;

        match prompter.ask("\nRestart the interview? [y/N]").await? {
            Some(answer) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") => {
                session.restart()?;
                input.clear();
            }
            _ => return Ok(()),
        }
    }
}

fn one_shot_form(candidate: &CandidateArgs, config: &Config) -> SetupForm {
    SetupForm {
        user_name: candidate.name.clone().unwrap_or_else(|| "Candidate".to_string()),
        job_title: candidate.title.clone().unwrap_or_else(|| "the advertised role".to_string()),
        job_description: String::new(),
        resume_text: String::new(),
        duration_minutes: config.interview.default_duration_minutes,
    }
}

async fn load_required_documents(form: &mut SetupForm, candidate: &CandidateArgs) -> anyhow::Result<()> {
    let resume = candidate.resume.as_ref().context("--resume is required")?;
    let job = candidate.job.as_ref().context("--job is required")?;

    let mut input = DocumentLoader::new();
    form.resume_text = input
        .load(resume, DocumentRole::Resume)
        .await
        .with_context(|| format!("Resume file: {}", resume.display()))?;
    form.job_description = input
        .load(job, DocumentRole::JobDescription)
        .await
        .with_context(|| format!("Job description file: {}", job.display()))?;
    Ok(())
}

async fn run_analyze(candidate: CandidateArgs, charts_json: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let mut form = one_shot_form(&candidate, config);
    load_required_documents(&mut form, &candidate).await?;

    let mut session = build_session(config)?;
    let console = ConsoleFormatter::new(config.output.color_output);
    session.proceed(form)?;
    run_review(&mut session, &console, config, charts_json.as_deref()).await
}

async fn run_generate(kind: ContentKind, candidate: CandidateArgs, config: &Config) -> anyhow::Result<()> {
    let mut form = one_shot_form(&candidate, config);
    load_required_documents(&mut form, &candidate).await?;

    let mut session = build_session(config)?;
    let console = ConsoleFormatter::new(config.output.color_output);
    let text = with_spinner(&format!("Generating {}...", kind), session.generate_content(kind, &form)).await?;
    show_notices(&mut session, &console);

    print!("{}", console.header(&kind.to_string(), 1));
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ReportDocument {
        let mut doc = ReportDocument::new("ATS Analysis");
        doc.line("Resume Match Score: 70.00/100");
        doc
    }

    #[test]
    fn test_unwritable_report_path_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a regular file").unwrap();
        let console = ConsoleFormatter::new(false);

        let saved = save_report(&report(), &blocker.join("sub").join("ats.pdf"), "ATS analysis", &console);
        assert!(!saved);
    }

    #[test]
    fn test_report_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("ats.pdf");
        let console = ConsoleFormatter::new(false);

        assert!(save_report(&report(), &path, "ATS analysis", &console));
        assert!(path.is_file());
    }
}
