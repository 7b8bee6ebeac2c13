use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;

use crate::config::Config;
use crate::interaction::Interaction;
use crate::matching::animation::TICK;
use crate::models::ApplicationStatus;
use crate::state::AppState;
use crate::tabs::Tab;
use crate::tracker::{ApplicationForm, TableState};

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Track job applications and match your resume against job descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List tracked applications, newest first
    List,
    /// Add an application, then show the refreshed list
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "applied")]
        status: String,
        /// YYYY-MM-DD; defaults to today
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Delete an application by id
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Score a resume against a job description
    Analyze {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        jd: PathBuf,
    },
    /// Check that the backend is reachable
    Status,
}

/// Alerts on stderr, confirmations on stdin.
pub struct TerminalUi {
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Interaction for TerminalUi {
    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

pub async fn run(cli: Cli, config: &Config) -> Result<ExitCode> {
    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });
    let show_view = !matches!(cli.command, Command::Status);
    let ui: Arc<dyn Interaction> = Arc::new(TerminalUi::new(assume_yes));
    let mut state = AppState::build(config, ui.clone())
        .context("Failed to create HTTP client")?;

    let ok = execute(&mut state, ui.as_ref(), cli.command).await?;

    if show_view {
        print!("{}", state.render());
    }
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Runs one command against `state`. Returns whether it succeeded.
///
/// Tracker commands load the list first so the table shown afterwards is
/// real even when the add or delete does nothing.
async fn execute(state: &mut AppState, ui: &dyn Interaction, command: Command) -> Result<bool> {
    let ok = match command {
        Command::List => {
            state.tracker.list_applications().await;
            list_loaded(state)
        }
        Command::Add {
            company,
            role,
            status,
            date,
            notes,
        } => {
            state.tracker.list_applications().await;
            let mut form = ApplicationForm {
                company,
                role,
                status: ApplicationStatus::from(status),
                date_applied: date,
                notes,
            };
            state.tracker.add_application(&mut form).await.is_ok()
        }
        Command::Delete { id, .. } => {
            state.tracker.list_applications().await;
            state.tracker.delete_application(id).await.is_ok()
        }
        Command::Analyze { resume, jd } => {
            state.switch_tab(Tab::Matcher);
            let resume_text = read_text(&resume).await?;
            let jd_text = read_text(&jd).await?;
            analyze(state, &resume_text, &jd_text).await
        }
        Command::Status => match state.api.health().await {
            Ok(message) => {
                println!("{}: {message}", state.api.base_url());
                true
            }
            Err(e) => {
                error!("Health check failed: {e}");
                ui.alert(&format!(
                    "Backend at {} is not reachable",
                    state.api.base_url()
                ));
                false
            }
        },
    };
    Ok(ok)
}

fn list_loaded(state: &AppState) -> bool {
    !matches!(state.tracker.table(), TableState::Unreachable { .. })
}

/// Runs one analyze cycle and plays the score counter on a single line.
async fn analyze(state: &AppState, resume_text: &str, jd_text: &str) -> bool {
    match state.matcher.analyze_match(resume_text, jd_text).await {
        Ok(()) => {
            let mut out = io::stdout();
            while state.matcher.is_animating() {
                let _ = write!(out, "\rMatch score: {}%", state.matcher.state().displayed_score);
                let _ = out.flush();
                tokio::time::sleep(TICK).await;
            }
            let _ = write!(out, "\r");
            true
        }
        // Superseded by a newer request: not a failure of this run.
        Err(e) => e.is_cancelled(),
    }
}
