use callcoach::persona::Difficulty;
use callcoach::roleplay::TrainingMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `callcoach` - CFR coaching for real estate sales calls.
#[derive(Parser, Debug)]
#[command(name = "callcoach")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(about = "Score, review and practice sales conversations with the CFR method.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single agent utterance against the CFR rubric
    Score {
        /// What the agent said
        #[arg(short, long)]
        text: String,

        /// What the client said just before
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Review a recorded call from a transcript JSON file
    Analyze {
        /// Transcript JSON (`segments` with start, end, text and optional speaker)
        #[arg(long)]
        transcript: PathBuf,

        /// Label agent and client segments by keyword before scoring
        #[arg(long)]
        identify_speakers: bool,

        /// Write the (labelled) transcript back out as JSON
        #[arg(long)]
        save_transcript: Option<PathBuf>,

        /// Write the coaching report to this file
        #[arg(long)]
        save_report: Option<PathBuf>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Practice against a simulated client (type `end` to finish)
    Train {
        /// Persona file path or id in the persona directory
        #[arg(short, long)]
        persona: String,

        /// beginner, medium or advanced (default from config)
        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,

        /// practice, scoring or challenge (default from config)
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<TrainingMode>,
    },

    /// List the personas available for training
    Personas,
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
    raw.parse()
        .map_err(|_| format!("unknown difficulty `{raw}` (beginner, medium, advanced)"))
}

fn parse_mode(raw: &str) -> Result<TrainingMode, String> {
    raw.parse()
        .map_err(|_| format!("unknown mode `{raw}` (practice, scoring, challenge)"))
}
