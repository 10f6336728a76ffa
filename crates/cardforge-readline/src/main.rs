use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

use cardforge_application::{CAPTION_INTERVAL, Effect, SessionEvent, SessionState};
use cardforge_core::config::{self, ForgeConfig};
use cardforge_core::error::ForgeError;
use cardforge_core::view::CardView;
use cardforge_interaction::CardForge;

mod paint;

/// Forge collectible cards from a theme with generative AI.
#[derive(Parser)]
#[command(name = "cardforge", version, about)]
struct Args {
    /// Text-generation model id
    #[arg(long, default_value = config::DEFAULT_TEXT_MODEL)]
    text_model: String,

    /// Image-generation model id
    #[arg(long, default_value = config::DEFAULT_IMAGE_MODEL)]
    image_model: String,

    /// Per-generation timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

/// Messages flowing from the REPL and background tasks to the controller.
enum ReplEvent {
    Session(SessionEvent),
    Shutdown,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec!["/help".to_string()],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_help() {
    println!("{}", "Describe a card concept and press Enter to forge it.".bright_black());
    println!(
        "{}",
        "  e.g. \"a cyberpunk dragon that steals artifacts\"".bright_black()
    );
    println!("{}", "Commands: '/help' shows this text, 'quit' or 'exit' leaves.".bright_black());
}

/// The main entry point for the CardForge REPL application.
///
/// Sets up a rustyline-based REPL that:
/// 1. Wires the live Gemini/Imagen agents behind the orchestrator
/// 2. Runs the session state machine in a controller task fed by an mpsc channel
/// 3. Rotates loading captions on a timer scoped to the in-flight forge
/// 4. Paints finished cards as ANSI truecolor output
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let forge_config = ForgeConfig::default()
        .with_text_model(args.text_model)
        .with_image_model(args.image_model)
        .with_timeout_secs(args.timeout_secs);

    // The credential is only validated by the provider; a missing key
    // surfaces as a generation failure, not a startup abort.
    let api_key = config::api_key_from_env().unwrap_or_else(|| {
        tracing::warn!(
            "{} is not set; generation will fail until it is provided",
            config::API_KEY_ENV
        );
        String::new()
    });

    let forge = Arc::new(CardForge::from_config(&forge_config, api_key));
    let timeout_secs = forge_config.timeout_secs;

    let (event_tx, mut event_rx) = mpsc::channel::<ReplEvent>(32);

    // ===== Controller Task =====
    // Owns the session state; every mutation goes through the reducer.
    let controller_tx = event_tx.clone();
    let controller = tokio::spawn(async move {
        let mut state = SessionState::new();
        let mut caption_ticker: Option<JoinHandle<()>> = None;

        while let Some(message) = event_rx.recv().await {
            let event = match message {
                ReplEvent::Session(event) => event,
                ReplEvent::Shutdown => break,
            };

            let was_loading = state.is_loading();
            let is_tick = matches!(event, SessionEvent::Tick);
            let dropped_submit = was_loading && matches!(event, SessionEvent::Submit(_));

            match state.apply(event) {
                Effect::StartGeneration(theme) => {
                    println!("{}", state.caption().bright_yellow());

                    // Caption rotation, scoped to this forge
                    let tick_tx = controller_tx.clone();
                    caption_ticker = Some(tokio::spawn(async move {
                        let mut interval = tokio::time::interval(CAPTION_INTERVAL);
                        interval.tick().await; // the first tick completes immediately
                        loop {
                            interval.tick().await;
                            if tick_tx
                                .send(ReplEvent::Session(SessionEvent::Tick))
                                .await
                                .is_err()
                            {
                                break;
                            }
                        }
                    }));

                    // The forge itself, bounded by the configured timeout
                    let gen_tx = controller_tx.clone();
                    let forge = Arc::clone(&forge);
                    tokio::spawn(async move {
                        let outcome =
                            match timeout(Duration::from_secs(timeout_secs), forge.forge(&theme))
                                .await
                            {
                                Ok(result) => result,
                                Err(_) => Err(ForgeError::Timeout {
                                    seconds: timeout_secs,
                                }),
                            };
                        let event = match outcome {
                            Ok(card) => SessionEvent::Succeeded(card),
                            Err(err) => SessionEvent::Failed(err),
                        };
                        let _ = gen_tx.send(ReplEvent::Session(event)).await;
                    });
                }
                Effect::None => {}
            }

            if dropped_submit {
                println!("{}", "A forge is already in flight; please wait.".bright_black());
            }

            if is_tick && state.is_loading() {
                println!("{}", state.caption().bright_yellow());
            }

            // Release the caption timer on every path that leaves Loading
            if was_loading && !state.is_loading() {
                if let Some(ticker) = caption_ticker.take() {
                    ticker.abort();
                }

                if let Some(message) = &state.error {
                    println!("{}", message.red());
                } else if let Some(forged) = &state.card {
                    let view = CardView::from(forged);
                    println!("{}", paint::paint_card(&view));
                    println!();
                    println!("{}", "Designer Notes".bright_yellow().bold());
                    println!(
                        "{}",
                        format!(
                            "Generated with a focus on \"{}\". The art was crafted to match its {} identity and mechanics.",
                            state.theme, forged.card.color_identity
                        )
                        .bright_black()
                    );
                }
            }
        }

        // Teardown releases the timer too
        if let Some(ticker) = caption_ticker.take() {
            ticker.abort();
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== CardForge ===".bright_magenta().bold());
    print_help();
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if trimmed == "/help" {
                    print_help();
                    continue;
                }

                event_tx
                    .send(ReplEvent::Session(SessionEvent::Submit(trimmed.to_string())))
                    .await?;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Signal shutdown and wait for the controller to wind down
    event_tx.send(ReplEvent::Shutdown).await?;
    drop(event_tx);
    let _ = controller.await;

    Ok(())
}
