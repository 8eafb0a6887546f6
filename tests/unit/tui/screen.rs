use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScreen {
    entered: AtomicUsize,
    left: AtomicUsize,
}

impl ScreenOps for CountingScreen {
    fn enter(&self) -> std::io::Result<()> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn leave(&self) -> std::io::Result<()> {
        self.left.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct BrokenScreen;

impl ScreenOps for BrokenScreen {
    fn enter(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "no tty"))
    }

    fn leave(&self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_drop_leaves_the_screen() {
    let screen = Arc::new(CountingScreen::default());
    {
        let _guard = ScreenGuard::with_ops(screen.clone()).unwrap();
        assert_eq!(screen.entered.load(Ordering::SeqCst), 1);
        assert_eq!(screen.left.load(Ordering::SeqCst), 0);
    }
    assert_eq!(screen.left.load(Ordering::SeqCst), 1);
}

#[test]
fn test_leave_runs_at_most_once_across_handles() {
    let screen = Arc::new(CountingScreen::default());
    let guard = ScreenGuard::with_ops(screen.clone()).unwrap();

    // Several owners race to leave: signal watcher, main, and the drop
    // guard. Only the first one switches the terminal back.
    let a = guard.handle();
    let b = guard.handle();
    a.leave().unwrap();
    b.leave().unwrap();
    drop(guard);

    assert_eq!(screen.left.load(Ordering::SeqCst), 1);
}

#[test]
fn test_enter_failure_propagates_without_a_guard() {
    assert!(ScreenGuard::with_ops(Arc::new(BrokenScreen)).is_err());
}

#[test]
fn test_shutdown_signal_exit_codes() {
    assert_eq!(ShutdownSignal::Interrupt.exit_code(), 130);
    assert_eq!(ShutdownSignal::Terminate.exit_code(), 143);
}
