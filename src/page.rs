//! Terminal run loop shared by both pages.

use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::panic;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::constants::runtime;
use crate::error::Result;
use crate::tasks::{AppUpdate, Command, Dispatcher};

/// A page controller driven by [`run`].
///
/// Every method that can lead to network work returns the commands to
/// dispatch instead of performing it.
pub trait Page {
    /// Called once before the first frame.
    fn start(&mut self) -> Vec<Command>;

    /// Terminal size changed (also called before `start`).
    fn resize(&mut self, width: u16, height: u16);

    /// A key was pressed.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command>;

    /// Mouse input. Ignored unless a page overrides it.
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Vec<Command> {
        Vec::new()
    }

    /// Bracketed paste into whatever field has focus.
    fn handle_paste(&mut self, _text: &str) {}

    /// A background request finished.
    fn apply(&mut self, update: AppUpdate) -> Vec<Command>;

    /// Advance animations by `dt`.
    fn tick(&mut self, _dt: Duration) {}

    /// Draw the page into `f`.
    fn draw(&mut self, f: &mut Frame);

    /// Whether the run loop should exit.
    fn should_quit(&self) -> bool;
}

// Helper function to ensure the terminal is cleaned up on exit
fn cleanup_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Take over the terminal and run `page` until it quits.
pub async fn run<P: Page>(
    page: &mut P,
    dispatcher: &Dispatcher,
    updates: &mut mpsc::Receiver<AppUpdate>,
) -> Result<()> {
    // Restore the terminal before the default hook prints the panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            DisableBracketedPaste,
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_page(&mut terminal, page, dispatcher, updates).await;

    if let Err(e) = cleanup_terminal(&mut terminal) {
        tracing::error!("Error cleaning up terminal: {e:?}");
    }
    res
}

async fn run_page<B: Backend, P: Page>(
    terminal: &mut Terminal<B>,
    page: &mut P,
    dispatcher: &Dispatcher,
    updates: &mut mpsc::Receiver<AppUpdate>,
) -> Result<()> {
    let size = terminal.size()?;
    page.resize(size.width, size.height);
    dispatcher.dispatch(page.start());

    let mut last_frame = Instant::now();
    loop {
        // Handle async updates first
        while let Ok(update) = updates.try_recv() {
            dispatcher.dispatch(page.apply(update));
        }

        let now = Instant::now();
        page.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|f| page.draw(f))?;

        if event::poll(runtime::FRAME_INTERVAL)? {
            let commands = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => page.handle_key(key),
                Event::Mouse(mouse) => page.handle_mouse(mouse),
                Event::Paste(text) => {
                    page.handle_paste(&text);
                    Vec::new()
                }
                Event::Resize(width, height) => {
                    page.resize(width, height);
                    Vec::new()
                }
                _ => Vec::new(),
            };
            dispatcher.dispatch(commands);
        } else {
            tokio::task::yield_now().await;
        }

        if page.should_quit() {
            break;
        }
    }
    Ok(())
}
