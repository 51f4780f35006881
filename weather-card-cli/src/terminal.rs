//! Interactive mode: stdin is the search field, stdout is the page.

use std::io::{self, IsTerminal, Write};

use chrono::Local;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, warn};
use weather_card_core::{
    Action, Config, Runtime, Surface, WidgetState, provider_from_config, render::render,
};

const HINT: &str = "Type a place and press Enter. Ctrl-D quits.";

/// Redraws the whole screen on every change.
struct TerminalSurface {
    clear: bool,
}

impl TerminalSurface {
    fn new() -> Self {
        Self {
            clear: io::stdout().is_terminal(),
        }
    }

    fn draw(&self, state: &WidgetState) -> io::Result<()> {
        let screen = render(state, Local::now().date_naive());
        let mut out = io::stdout().lock();

        if self.clear {
            // Clear screen and move the cursor home.
            write!(out, "\x1b[2J\x1b[H")?;
        }
        write!(out, "{screen}")?;
        writeln!(out, "{HINT}")?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn present(&mut self, state: &WidgetState) {
        if let Err(e) = self.draw(state) {
            warn!(error = %e, "failed to draw to stdout");
        }
    }
}

/// Run the interactive card until stdin is closed.
pub async fn watch(config: &Config, place: Option<String>) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let initial = place.unwrap_or_else(|| config.default_place.clone());

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(forward_stdin(tx));

    let runtime = Runtime::new(provider, config.timings);
    let mut surface = TerminalSurface::new();
    runtime.run(WidgetState::new(initial), rx, &mut surface).await;

    Ok(())
}

/// Each line read is typed into the field and submitted.
async fn forward_stdin(tx: mpsc::Sender<Action>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                for action in line_actions(&line) {
                    if tx.send(action).await.is_err() {
                        return;
                    }
                }
            }
            Ok(None) => {
                debug!("stdin closed");
                return;
            }
            Err(e) => {
                warn!(error = %e, "failed to read stdin");
                return;
            }
        }
    }
}

fn line_actions(line: &str) -> [Action; 2] {
    let draft = line.trim_end_matches('\r').to_string();
    [Action::DraftChanged(draft), Action::Submit]
}
