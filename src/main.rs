mod logging;

use crossterm::event;
use powertext::app::Workbench;
use powertext::core::event::InputEvent;
use powertext::tui::terminal_guard::{TerminalGuard, TerminationSignal};
use powertext::tui::view::{EventResult, View};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

const USAGE: &str = "Usage: powertext [FILE]...\n\nOpens each FILE in its own workspace.";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

enum Cli {
    Run(Vec<PathBuf>),
    Help,
    Version,
}

fn parse_args(args: impl Iterator<Item = OsString>) -> Cli {
    let mut paths = Vec::new();
    let mut only_paths = false;
    for arg in args {
        if !only_paths {
            match arg.to_str() {
                Some("-h") | Some("--help") => return Cli::Help,
                Some("-V") | Some("--version") => return Cli::Version,
                Some("--") => {
                    only_paths = true;
                    continue;
                }
                _ => {}
            }
        }
        paths.push(PathBuf::from(arg));
    }
    Cli::Run(paths)
}

fn main() -> io::Result<()> {
    let paths = match parse_args(std::env::args_os().skip(1)) {
        Cli::Run(paths) => paths,
        Cli::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Cli::Version => {
            println!("powertext {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    let _logging = logging::init();
    tracing::info!(files = paths.len(), "starting");

    let mut workbench = Workbench::new();
    workbench.open_paths(&paths);

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel::<TerminationSignal>();
    #[cfg(unix)]
    {
        if let Err(e) =
            powertext::tui::terminal_guard::install_termination_signals(guard.restorer(), signal_tx)
        {
            tracing::warn!(error = %e, "signal handler install failed");
        }
    }
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let outcome = run(&mut terminal, &mut workbench, &signal_rx);
    drop(terminal);
    drop(guard);

    match outcome {
        Ok(Some(signal)) => {
            tracing::info!(?signal, "terminated by signal");
            std::process::exit(signal.exit_code());
        }
        Ok(None) => {
            tracing::info!("exit");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "event loop failed");
            Err(e)
        }
    }
}

/// Draws only after input changed something. Returns the signal that ended the loop, if any.
fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    workbench: &mut Workbench,
    signals: &Receiver<TerminationSignal>,
) -> io::Result<Option<TerminationSignal>> {
    let mut dirty = true;
    loop {
        if let Ok(signal) = signals.try_recv() {
            return Ok(Some(signal));
        }

        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
            })?;
            dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let input = InputEvent::from(event::read()?);
        match workbench.handle_input(&input) {
            EventResult::Quit => return Ok(None),
            EventResult::Consumed => dirty = true,
            EventResult::Ignored => {}
        }
    }
}
