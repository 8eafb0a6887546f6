//! Raw-mode / alternate-screen lifetime.
//!
//! The dashboard must leave the user's terminal usable on every exit path:
//! normal quit, panic unwinding through `Drop`, and SIGINT/SIGTERM. All of
//! them funnel into one `ScreenHandle` that switches the terminal back at
//! most once.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Terminal mode switching, behind a trait so the shutdown paths are
/// testable without a real terminal.
pub trait ScreenOps: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

/// Real terminal: raw mode + alternate screen + mouse capture.
#[derive(Debug, Default)]
pub struct CrosstermScreen;

impl ScreenOps for CrosstermScreen {
    fn enter(&self) -> io::Result<()> {
        use crossterm::event::EnableMouseCapture;
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};

        enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        use crossterm::event::DisableMouseCapture;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        // Attempt every step; report the first failure.
        let raw = disable_raw_mode();
        let screen =
            crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        raw.and(screen)
    }
}

/// Cloneable handle to a screen that `enter`ed. However many owners call
/// `leave` (drop guard, signal watcher, main), the terminal switches back
/// exactly once.
#[derive(Clone)]
pub struct ScreenHandle {
    left: Arc<AtomicBool>,
    ops: Arc<dyn ScreenOps>,
}

impl ScreenHandle {
    pub fn leave(&self) -> io::Result<()> {
        if self.left.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.leave()
    }
}

/// Owns the screen for the duration of the app; leaving happens on drop at
/// the latest.
pub struct ScreenGuard {
    handle: ScreenHandle,
}

impl ScreenGuard {
    pub fn enter() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermScreen))
    }

    pub fn with_ops(ops: Arc<dyn ScreenOps>) -> io::Result<Self> {
        ops.enter()?;
        Ok(Self {
            handle: ScreenHandle {
                left: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn handle(&self) -> ScreenHandle {
        self.handle.clone()
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = self.handle.leave();
    }
}

/// Why the app is shutting down, with the conventional exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            ShutdownSignal::Interrupt => 130,
            ShutdownSignal::Terminate => 143,
        }
    }
}

/// Forward SIGINT/SIGTERM to the event loop so it can exit cleanly. If the
/// loop does not get there within the grace window, leave the screen and
/// exit from here.
#[cfg(unix)]
pub fn watch_shutdown_signals(
    screen: ScreenHandle,
    tx: std::sync::mpsc::Sender<ShutdownSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::time::Duration;

    const GRACE: Duration = Duration::from_secs(2);

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        for raw in signals.forever() {
            let signal = match raw {
                SIGINT => ShutdownSignal::Interrupt,
                SIGTERM => ShutdownSignal::Terminate,
                _ => continue,
            };
            tracing::info!(?signal, "shutdown signal");
            let _ = tx.send(signal);

            std::thread::sleep(GRACE);
            let _ = screen.leave();
            std::process::exit(signal.exit_code());
        }
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/screen.rs"]
mod tests;
