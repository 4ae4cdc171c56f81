//! CLI interface for ace-tutor

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog;
use crate::config::{Config, ModelsConfig};
use crate::profile::ProfileStore;
use crate::report::{self, ReportStore};
use crate::session::LessonSession;
use crate::tutor::GeminiClient;
use crate::types::{Feedback, Subject};

#[derive(Parser)]
#[command(name = "ace-tutor")]
#[command(about = "Adaptive NCEA Level 1 quiz tutor with AI-generated questions and feedback", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an adaptive practice session on a topic
    Practice {
        /// Subject: english or mathematics
        subject: Subject,
        /// Topic id (see `ace-tutor topics`)
        topic: String,
    },
    /// List all subjects and topics with current mastery
    Topics,
    /// Show learning progress
    Progress {
        /// Topic id to show session history for
        topic: Option<String>,
    },
    /// Manage saved session reports
    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Configure the tutor
    Config {
        /// Set Gemini API key
        #[arg(long)]
        set_api_key: Option<String>,
        /// Remove the stored API key
        #[arg(long)]
        delete_api_key: bool,
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set model for a role (usage: --set-model role model_id)
        #[arg(long, value_names = &["role", "model"], num_args = 2)]
        set_model: Option<Vec<String>>,
        /// Get model for a role
        #[arg(long)]
        get_model: Option<String>,
        /// List all model assignments
        #[arg(long)]
        list_models: bool,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// List saved reports, newest first
    List,
    /// Show one report in the terminal
    Show {
        /// Report id
        id: String,
    },
    /// Export a report as a Markdown document
    Export {
        /// Report id
        id: String,
        /// Output directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Practice { subject, topic } => run_practice(subject, &topic).await,
        Commands::Topics => show_topics(),
        Commands::Progress { topic } => show_progress(topic.as_deref()),
        Commands::Reports { command } => match command {
            ReportCommands::List => list_reports(),
            ReportCommands::Show { id } => show_report(&id),
            ReportCommands::Export { id, output } => export_report(&id, output),
        },
        Commands::Config {
            set_api_key,
            delete_api_key,
            show,
            set_model,
            get_model,
            list_models,
        } => {
            handle_config(set_api_key, delete_api_key, show, set_model, get_model, list_models)
        }
    }
}

fn stores(config: &Config) -> Result<(ProfileStore, ReportStore)> {
    let dir = config.store_dir()?;
    Ok((
        ProfileStore::with_dir(dir.clone())?,
        ReportStore::with_dir(dir)?,
    ))
}

/// Create an animated spinner for a long-latency remote call
fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.dim} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn run_practice(subject: Subject, topic_id: &str) -> Result<()> {
    let topic = match catalog::find_topic(subject, topic_id) {
        Some(topic) => topic.clone(),
        None => {
            println!("Unknown topic '{}' for {}. Available topics:", topic_id, subject);
            for t in catalog::topics_for(subject) {
                println!("  {:30} {}", t.id, t.name);
            }
            return Ok(());
        }
    };

    let config = Config::load()?;
    let (profiles, reports) = stores(&config)?;
    let backend = Arc::new(GeminiClient::from_config(&config)?);

    println!("\x1b[1m{} — {}\x1b[0m", subject, topic.name);
    println!("{}\n", topic.description);

    let pb = spinner("Generating your adaptive quiz...");
    let session = LessonSession::start(subject, topic, backend, profiles, reports).await;
    pb.finish_and_clear();

    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            println!("\x1b[31m{}\x1b[0m", e);
            return Ok(());
        }
    };

    let mut rl = rustyline::DefaultEditor::new()?;
    loop {
        let question = match session.current_question() {
            Some(q) => q.clone(),
            None => break,
        };

        println!(
            "\n\x1b[1mQuestion {}/{}\x1b[0m",
            session.question_number(),
            session.total_questions()
        );
        println!("{}", question.question_text);
        if question.image_data.is_some() {
            println!("\x1b[90m(This question has a diagram; it is included when the report is exported.)\x1b[0m");
        }

        // One answer per question; ':hint' asks for a hint, ':skip'
        // moves on without recording anything.
        let answered = loop {
            let line = match rl.readline("\x1b[32m❯\x1b[0m ") {
                Ok(line) => line,
                Err(rustyline::error::ReadlineError::Interrupted)
                | Err(rustyline::error::ReadlineError::Eof) => {
                    println!("Lesson abandoned.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            let input = line.trim();

            if input.is_empty() {
                continue;
            }
            if input == ":skip" {
                break false;
            }
            if input == ":hint" {
                let pb = spinner("Thinking of a hint...");
                let hint = session.hint().await;
                pb.finish_and_clear();
                println!("\x1b[33mHint:\x1b[0m {}", hint);
                continue;
            }

            let _ = rl.add_history_entry(input);
            let pb = spinner("Marking your answer...");
            let result = session.submit_answer(input).await;
            pb.finish_and_clear();

            match result {
                Ok(feedback) => {
                    print_feedback(&feedback);
                    break true;
                }
                Err(e) => {
                    // Grading failure is local to this answer; move on
                    // with no feedback recorded.
                    println!("\x1b[31m{}\x1b[0m", e);
                    break false;
                }
            }
        };

        if !answered {
            println!("\x1b[90mMoving on without feedback.\x1b[0m");
        }
        if !session.advance() {
            break;
        }
    }

    let pb = spinner("Analyzing your performance...");
    let updated = session.finish().await;
    pb.finish_and_clear();

    println!("\n\x1b[1;36mLesson complete!\x1b[0m");
    match updated {
        Some(progress) => println!(
            "Mastery for '{}' is now {:.0}% over {} session(s).",
            session.topic().name,
            progress.proficiency * 100.0,
            progress.history.len()
        ),
        None => println!("Great work! See you next session."),
    }

    if !session.entries().is_empty() {
        let line = rl.readline("Save this session as a report? [y/N] ")?;
        if line.trim().eq_ignore_ascii_case("y") {
            let report = session.save_report();
            println!(
                "Report {} saved. Export it with: ace-tutor reports export {}",
                report.id, report.id
            );
        }
    }

    Ok(())
}

fn print_feedback(feedback: &Feedback) {
    match feedback {
        Feedback::Narrative { well_done, to_improve } => {
            println!("\x1b[32mWhat you did well:\x1b[0m {}", well_done);
            println!("\x1b[34mHow to improve:\x1b[0m {}", to_improve);
        }
        Feedback::Evaluative { is_correct, explanation } => {
            if *is_correct {
                println!("\x1b[32mCorrect!\x1b[0m");
            } else {
                println!("\x1b[31mIncorrect.\x1b[0m");
            }
            println!("{}", explanation);
        }
    }
}

fn show_topics() -> Result<()> {
    let config = Config::load()?;
    let (profiles, _) = stores(&config)?;
    let profile = profiles.get();

    for &subject in Subject::all() {
        println!("\x1b[1m{}\x1b[0m", subject);
        for topic in catalog::topics_for(subject) {
            let mastery = profile
                .get(&topic.id)
                .filter(|p| !p.history.is_empty())
                .map(|p| format!("{:>3.0}%", p.proficiency * 100.0))
                .unwrap_or_else(|| "  — ".to_string());
            println!("  {}  {:30} {}", mastery, topic.id, topic.description);
        }
        println!();
    }
    Ok(())
}

fn show_progress(topic_id: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let (profiles, _) = stores(&config)?;
    let profile = profiles.get();

    if profile.is_empty() {
        println!("No completed sessions yet. Start one with: ace-tutor practice <subject> <topic>");
        return Ok(());
    }

    match topic_id {
        Some(id) => {
            let progress = match profile.get(id) {
                Some(p) => p,
                None => {
                    println!("No progress recorded for '{}'.", id);
                    return Ok(());
                }
            };
            let name = catalog::find_topic_anywhere(id)
                .map(|(_, t)| t.name.as_str())
                .unwrap_or(id);

            println!("\x1b[1m{}\x1b[0m — mastery {:.0}%", name, progress.proficiency * 100.0);
            if !progress.areas_for_improvement.is_empty() {
                println!("Areas to work on:");
                for area in &progress.areas_for_improvement {
                    println!("  - {}", area);
                }
            }
            println!("Session history:");
            for entry in &progress.history {
                println!(
                    "  {}  {:>3.0}%",
                    entry.date.format("%Y-%m-%d %H:%M"),
                    entry.score * 100.0
                );
            }
        }
        None => {
            for (id, progress) in &profile {
                let name = catalog::find_topic_anywhere(id)
                    .map(|(_, t)| t.name.as_str())
                    .unwrap_or(id.as_str());
                println!(
                    "{:>3.0}%  {:30} {} session(s)",
                    progress.proficiency * 100.0,
                    name,
                    progress.history.len()
                );
            }
        }
    }
    Ok(())
}

fn list_reports() -> Result<()> {
    let config = Config::load()?;
    let (_, reports) = stores(&config)?;
    let all = reports.get_all();

    if all.is_empty() {
        println!("No saved reports.");
        return Ok(());
    }

    for report in &all {
        println!(
            "{}  {}  {:12} {} ({} question(s))",
            report.id,
            report.date.format("%Y-%m-%d %H:%M"),
            report.subject.to_string(),
            report.topic_name,
            report.session_data.len()
        );
    }
    Ok(())
}

fn show_report(id: &str) -> Result<()> {
    let config = Config::load()?;
    let (_, reports) = stores(&config)?;

    match reports.find(id) {
        Some(report) => println!("{}", report::render_markdown(&report)),
        None => println!("No report with id '{}'.", id),
    }
    Ok(())
}

fn export_report(id: &str, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let (_, reports) = stores(&config)?;

    match reports.find(id) {
        Some(report) => {
            let dir = output.unwrap_or_else(|| PathBuf::from("."));
            let path = report::export_report(&report, &dir)?;
            println!("Exported to {}", path.display());
        }
        None => println!("No report with id '{}'.", id),
    }
    Ok(())
}

fn handle_config(
    set_api_key: Option<String>,
    delete_api_key: bool,
    show: bool,
    set_model: Option<Vec<String>>,
    get_model: Option<String>,
    list_models: bool,
) -> Result<()> {
    if let Some(key) = set_api_key {
        crate::security::set_api_key(&key)?;
        println!("API key stored securely.");
        return Ok(());
    }

    if delete_api_key {
        crate::security::delete_api_key()?;
        println!("API key removed.");
        return Ok(());
    }

    if let Some(pair) = set_model {
        let (role, model) = (&pair[0], &pair[1]);
        let mut config = Config::load()?;
        if !config.models.set(role, model.clone()) {
            anyhow::bail!(
                "Unknown role '{}'. Available roles: {}",
                role,
                ModelsConfig::roles().join(", ")
            );
        }
        config.save()?;
        println!("Model for '{}' set to: {}", role, model);
        return Ok(());
    }

    if let Some(role) = get_model {
        let config = Config::load()?;
        match config.models.get(&role) {
            Some(model) => println!("Model for '{}': {}", role, model),
            None => anyhow::bail!(
                "Unknown role '{}'. Available roles: {}",
                role,
                ModelsConfig::roles().join(", ")
            ),
        }
        return Ok(());
    }

    if list_models || show {
        let config = Config::load()?;
        println!("Model assignments:");
        println!("  quiz/summary: {}", config.models.quiz);
        println!("  feedback:     {}", config.models.feedback);
        println!("  fast/hint:    {}", config.models.fast);
        println!("  image:        {}", config.models.image);
        if show {
            println!("Config file:  {}", crate::config::config_path()?.display());
            println!("Data dir:     {}", config.store_dir()?.display());
            println!(
                "API key:      {}",
                if crate::security::has_api_key() { "configured" } else { "not set" }
            );
        }
        return Ok(());
    }

    println!("Nothing to do. See: ace-tutor config --help");
    Ok(())
}
