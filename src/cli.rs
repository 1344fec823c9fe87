//! CLI interface for the interview coach

use crate::llm::content::ContentKind;
use crate::session::QuestionType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interview-coach")]
#[command(about = "AI-assisted interview practice")]
#[command(
    long_about = "Score a resume against a job description, find skill gaps, run a timed mock interview and export a scored summary"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full session: setup, resume review, timed interview, summary
    Interview {
        #[command(flatten)]
        candidate: CandidateArgs,

        /// Interview duration in minutes (1-60)
        #[arg(short, long)]
        duration: Option<u32>,

        /// First question type: technical or behavioral
        #[arg(short = 'q', long)]
        question_type: Option<QuestionType>,

        /// Also draft application content: linkedin-post, hr-message, email, cover-letter
        #[arg(long)]
        content: Option<ContentKind>,

        /// Directory for the PDF reports
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Resume review only: fit score, ATS skills, charts and the ATS report
    Analyze {
        #[command(flatten)]
        candidate: CandidateArgs,

        /// Directory for the PDF report
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Also write the chart data as JSON
        #[arg(long)]
        charts_json: Option<PathBuf>,
    },

    /// Draft application content from the resume and job description
    Generate {
        /// linkedin-post, hr-message, email or cover-letter
        kind: ContentKind,

        #[command(flatten)]
        candidate: CandidateArgs,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Clone, Default)]
pub struct CandidateArgs {
    /// Candidate name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Job title applied for
    #[arg(short, long)]
    pub title: Option<String>,

    /// Path to job description file (TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_interview_arguments_parse() {
        let cli = Cli::try_parse_from([
            "interview-coach",
            "interview",
            "--name",
            "Ada",
            "-t",
            "Engineer",
            "--resume",
            "cv.pdf",
            "-d",
            "15",
            "-q",
            "behavioral",
            "--content",
            "cover-letter",
        ])
        .unwrap();

        match cli.command {
            Commands::Interview {
                candidate,
                duration,
                question_type,
                content,
                ..
            } => {
                assert_eq!(candidate.name.as_deref(), Some("Ada"));
                assert_eq!(candidate.resume, Some(PathBuf::from("cv.pdf")));
                assert_eq!(duration, Some(15));
                assert_eq!(question_type, Some(QuestionType::Behavioral));
                assert_eq!(content, Some(ContentKind::CoverLetter));
            }
            _ => panic!("expected interview command"),
        }
    }

    #[test]
    fn test_unknown_content_kind_rejected() {
        assert!(Cli::try_parse_from(["interview-coach", "generate", "tweet"]).is_err());
    }
}
