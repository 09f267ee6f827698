use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Puts the terminal into editing mode and back.
pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermTerminalOps;

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::{EnableBracketedPaste, EnableMouseCapture},
            execute,
            terminal::{enable_raw_mode, EnterAlternateScreen},
        };

        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            cursor::SetCursorStyle::SteadyBar
        )?;
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::{
            cursor,
            event::{DisableBracketedPaste, DisableMouseCapture},
            execute,
            terminal::{disable_raw_mode, LeaveAlternateScreen},
        };

        // Every step runs even if an earlier one failed; the first error is reported.
        let mut first_err: Option<io::Error> = None;

        if let Err(err) = disable_raw_mode() {
            first_err.get_or_insert(err);
        }
        if let Err(err) = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::SetCursorStyle::DefaultUserShape
        ) {
            first_err.get_or_insert(err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Shared handle that restores the terminal at most once, from whichever thread gets there first.
#[derive(Clone)]
pub struct TerminalRestorer {
    restored: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.restored.load(Ordering::SeqCst)
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps))
    }

    /// A failed setup is rolled back before the error is returned.
    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        if let Err(err) = ops.setup() {
            let _ = ops.restore();
            return Err(err);
        }
        Ok(Self {
            restorer: TerminalRestorer {
                restored: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            tracing::warn!(error = %e, "terminal restore failed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationSignal::SigInt => 130,
            TerminationSignal::SigTerm => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM to the main loop. If the loop has not exited after a grace period the
/// terminal is restored and the process exits with the conventional code.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: TerminalRestorer,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::time::Duration;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        for sig in signals.forever() {
            let signal = match sig {
                SIGINT => TerminationSignal::SigInt,
                SIGTERM => TerminationSignal::SigTerm,
                _ => continue,
            };
            tracing::info!(?signal, "termination signal received");

            let _ = tx.send(signal);

            std::thread::sleep(Duration::from_secs(2));
            let _ = restorer.restore();
            std::process::exit(signal.exit_code());
        }
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
