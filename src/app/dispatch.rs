use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use callcoach::Config;
use callcoach::analysis::CallAnalyzer;
use callcoach::persona::{Difficulty, list_personas, resolve_persona};
use callcoach::roleplay::{
    OPENING_LINE, RoleplaySession, RoleplaySummary, ScriptedReplyGenerator, TrainingMode,
    TurnOutcome,
};
use callcoach::rubric::TurnScore;
use callcoach::transcript::{JsonTranscriptFile, Transcriber};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Score { text, context } => run_score(&config, &text, context.as_deref()),

        Commands::Analyze {
            transcript,
            identify_speakers,
            save_transcript,
            save_report,
            json,
        } => {
            run_analyze(
                &config,
                AnalyzeArgs {
                    transcript,
                    identify_speakers,
                    save_transcript,
                    save_report,
                    json,
                },
            )
            .await
        }

        Commands::Train {
            persona,
            difficulty,
            mode,
        } => {
            let difficulty = difficulty.unwrap_or(config.training.difficulty);
            let mode = mode.unwrap_or(config.training.mode);
            run_train(&config, &persona, difficulty, mode).await
        }

        Commands::Personas => run_personas(&config),
    }
}

fn run_score(config: &Config, text: &str, context: Option<&str>) -> Result<()> {
    if text.trim().is_empty() {
        bail!("--text must not be empty");
    }
    let scorer = config.rubric.scorer().context("failed to build rubric scorer")?;
    let score = scorer.score(text, context);
    print_turn_score(&score);
    Ok(())
}

struct AnalyzeArgs {
    transcript: PathBuf,
    identify_speakers: bool,
    save_transcript: Option<PathBuf>,
    save_report: Option<PathBuf>,
    json: bool,
}

async fn run_analyze(config: &Config, args: AnalyzeArgs) -> Result<()> {
    let scorer = config.rubric.scorer().context("failed to build rubric scorer")?;
    let analyzer = CallAnalyzer::from_config(config, Arc::new(scorer));

    let source = JsonTranscriptFile;
    let mut transcript = source
        .transcribe(&args.transcript)
        .await
        .with_context(|| format!("{} source failed", source.name()))?;
    info!(
        path = %args.transcript.display(),
        segments = transcript.segments.len(),
        duration = transcript.duration,
        "transcript.loaded"
    );

    if args.identify_speakers {
        analyzer.identify_speakers(&mut transcript);
    }

    if let Some(path) = &args.save_transcript {
        let raw = serde_json::to_string_pretty(&transcript)
            .context("failed to serialize transcript")?;
        write_file(path, &raw).await?;
        println!("Transcript saved to {}", path.display());
    }

    let Some(report) = analyzer.analyze(transcript) else {
        bail!(
            "no agent turns found in {}; label speakers or pass --identify-speakers",
            args.transcript.display()
        );
    };

    let rendered = if args.json {
        report.to_json_pretty().context("failed to serialize report")?
    } else {
        report.render_text()
    };

    match &args.save_report {
        Some(path) => {
            write_file(path, &rendered).await?;
            println!("{}", report.totals.headline());
            println!("Report saved to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn run_train(
    config: &Config,
    reference: &str,
    difficulty: Difficulty,
    mode: TrainingMode,
) -> Result<()> {
    let persona_dir = config.training.persona_dir();
    let persona = resolve_persona(&persona_dir, reference)
        .with_context(|| format!("failed to load persona from {}", persona_dir.display()))?;
    let scorer = config.rubric.scorer().context("failed to build rubric scorer")?;

    println!("🎭 Training with: {} ({difficulty}, {mode} mode)", persona.label);
    println!("Type 'end' to finish the session.\n");

    let mut session = RoleplaySession::new(
        persona,
        difficulty,
        mode,
        Arc::new(scorer),
        Box::new(ScriptedReplyGenerator),
    );

    println!("You: {OPENING_LINE}");
    let outcome = session.respond(OPENING_LINE).await?;
    print_outcome(&outcome);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read from stdin")?
    {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("end") {
            break;
        }
        let outcome = session.respond(message).await?;
        print_outcome(&outcome);
    }

    match session.summary() {
        Some(summary) => print_session_summary(&summary),
        None => println!("\nNo scored turns this session."),
    }
    Ok(())
}

fn run_personas(config: &Config) -> Result<()> {
    let dir = config.training.persona_dir();
    let personas = list_personas(&dir)
        .with_context(|| format!("failed to list personas in {}", dir.display()))?;
    if personas.is_empty() {
        println!("No personas found in {}", dir.display());
        return Ok(());
    }
    println!("Personas in {}:", dir.display());
    for entry in personas {
        println!(
            "  {:<20} {} ({} objections)",
            entry.id, entry.label, entry.objections
        );
    }
    Ok(())
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

fn print_turn_score(score: &TurnScore) {
    println!("Score: {}/{}", score.total(), score.max_score());
    println!(
        "  Acknowledge/Affirm: {}  Isolate: {}  Handle: {}  Close: {}",
        score.acknowledge_affirm(),
        score.isolate(),
        score.handle(),
        score.close()
    );
    if !score.techniques_detected().is_empty() {
        let techniques: Vec<String> = score
            .techniques_detected()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("  Techniques: {}", techniques.join(", "));
    }
    if !score.magic_phrases_used().is_empty() {
        println!("  Magic phrases: {}", score.magic_phrases_used().join(", "));
    }
    for line in score.feedback() {
        println!("  {line}");
    }
}

fn print_outcome(outcome: &TurnOutcome) {
    if let Some(score) = &outcome.score {
        println!();
        print_turn_score(score);
    }
    for suggestion in &outcome.suggestions {
        println!("  💡 {suggestion}");
    }
    println!(
        "\nClient: {}\n[Cooperation: {}/10]\n",
        outcome.reply, outcome.cooperation
    );
}

fn print_session_summary(summary: &RoleplaySummary) {
    let session = &summary.session;
    println!("\n{}", "=".repeat(60));
    println!("SESSION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Turns scored: {}", session.totals.turns);
    println!("{}", session.totals.headline());
    println!("Final cooperation: {}/10", summary.final_cooperation);
    if !summary.objections_raised.is_empty() {
        println!("Objections raised: {}", summary.objections_raised.join(", "));
    }
    if !session.strengths.is_empty() {
        println!("\n✓ Strengths:");
        for line in &session.strengths {
            println!("  - {line}");
        }
    }
    if !session.improvements.is_empty() {
        println!("\n⚠️  Areas to improve:");
        for line in &session.improvements {
            println!("  - {line}");
        }
    }
}
