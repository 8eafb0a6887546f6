use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use hubdash::app::Workbench;
use hubdash::core::InputEvent;
use hubdash::services::github::GithubClient;
#[cfg(unix)]
use hubdash::tui::watch_shutdown_signals;
use hubdash::tui::ScreenGuard;

const TICK: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let _logging = hubdash::logging::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let (fetch_tx, fetch_rx) = mpsc::channel();
    let client = match GithubClient::new(runtime.handle().clone(), fetch_tx) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    let mut workbench = Workbench::new(client);
    if let Some(query) = std::env::args().nth(1) {
        workbench.open_query(&query);
    }

    let screen = ScreenGuard::enter()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    let _signal_thread = watch_shutdown_signals(screen.handle(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let exit_signal = loop {
        terminal.draw(|frame| workbench.render(frame, frame.area()))?;

        while let Ok(outcome) = fetch_rx.try_recv() {
            workbench.on_fetch(outcome);
        }

        if let Ok(signal) = signal_rx.try_recv() {
            break Some(signal);
        }

        if event::poll(TICK)? {
            let input = InputEvent::from(event::read()?);
            if workbench.handle_input(&input).is_quit() {
                break None;
            }
        }
    };

    screen.handle().leave()?;
    drop(terminal);

    if let Some(signal) = exit_signal {
        std::process::exit(signal.exit_code());
    }
    Ok(())
}
