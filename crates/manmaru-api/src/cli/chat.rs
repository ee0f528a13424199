//! Terminal chat loop.
//!
//! Drives the same relay service as `POST /chat` against a single
//! in-process session. `/reset [mode]` re-initializes the persona,
//! `/quit` (or Ctrl+D) exits.

use std::io::Write;

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use manmaru_core::session::store::SessionStore;
use manmaru_types::error::RelayError;
use manmaru_types::persona::Persona;
use manmaru_types::session::SessionId;

use crate::state::AppState;

/// Slash commands understood by the chat loop.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Start over with a persona, keeping the current one if no mode is given.
    Reset(Option<Persona>),
    /// Leave the loop.
    Quit,
    /// Show available commands.
    Help,
    /// Anything else starting with `/`.
    Unknown(String),
}

/// Parse a line as a slash command. `None` for plain messages.
pub fn parse(input: &str) -> Option<ReplCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/reset" | "/new" => Some(ReplCommand::Reset(arg.map(|m| Persona::from_mode(Some(m))))),
        "/quit" | "/exit" | "/q" => Some(ReplCommand::Quit),
        "/help" | "/h" | "/?" => Some(ReplCommand::Help),
        other => Some(ReplCommand::Unknown(other.to_string())),
    }
}

/// Run the interactive loop until `/quit` or end of input.
pub async fn run_chat_loop(state: &AppState, mode: &str) -> anyhow::Result<()> {
    let session = SessionId::new();
    let mut persona = Persona::from_mode(Some(mode));
    state.relay.initialize(&session, persona).await?;

    print_banner(state.relay.model(), persona);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("you>").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse(&line) {
            Some(ReplCommand::Quit) => break,
            Some(ReplCommand::Help) => print_help(),
            Some(ReplCommand::Reset(next)) => {
                persona = next.unwrap_or(persona);
                state.relay.initialize(&session, persona).await?;
                println!("  {} {persona}", style("Transcript reset:").dim());
            }
            Some(ReplCommand::Unknown(cmd)) => {
                println!("  {} {cmd} (try /help)", style("Unknown command:").yellow());
            }
            None if line.trim().is_empty() => {}
            None => match state.relay.exchange(&session, line.trim()).await {
                Ok(reply) => println!("{} {reply}", style("ai>").cyan().bold()),
                Err(e) => print_error(&e),
            },
        }
    }

    state.relay.store().remove(&session).await?;
    println!("  {}", style("Bye.").dim());
    Ok(())
}

fn print_banner(model: &str, persona: Persona) {
    println!();
    println!("  {}", style("manmaru").cyan().bold());
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Persona:").bold(), style(persona).dim());
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
}

fn print_help() {
    println!("  {}  start over (optionally: /reset training)", style("/reset [mode]").bold());
    println!("  {}          leave the chat", style("/quit").bold());
    println!("  {}          show this help", style("/help").bold());
}

fn print_error(e: &RelayError) {
    eprintln!(
        "  {} {e} {}",
        style("error:").red().bold(),
        style("(transcript unchanged)").dim()
    );
}
