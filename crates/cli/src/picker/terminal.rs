use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub enum InputEvent {
    Key(KeyEvent),
    Resize,
}

/// Raw-mode alternate screen on stderr, restored on drop
///
/// Drawing goes to stderr so stdout stays free for the tasks that run after
/// the picker closes.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<io::Stderr>>,
    event_rx: mpsc::UnboundedReceiver<InputEvent>,
    event_task: tokio::task::JoinHandle<()>,
}

impl TerminalManager {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stderr = io::stderr();
        if let Err(e) = execute!(stderr, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let backend = CrosstermBackend::new(stderr);
        let terminal = Terminal::new(backend)?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let event_task = tokio::spawn(Self::event_loop(event_tx));

        Ok(Self {
            terminal,
            event_rx,
            event_task,
        })
    }

    async fn event_loop(tx: mpsc::UnboundedSender<InputEvent>) {
        while !tx.is_closed() {
            // Bounded poll so the loop notices a closed channel
            let has_event = tokio::task::spawn_blocking(|| {
                event::poll(POLL_INTERVAL).unwrap_or(false)
            })
            .await
            .unwrap_or(false);

            if !has_event {
                continue;
            }

            let input_event = match tokio::task::spawn_blocking(event::read).await {
                Ok(Ok(Event::Key(key))) => InputEvent::Key(key),
                Ok(Ok(Event::Resize(_, _))) => InputEvent::Resize,
                _ => continue,
            };
            if tx.send(input_event).is_err() {
                break;
            }
        }
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<io::Stderr>> {
        &mut self.terminal
    }

    pub async fn next_event(&mut self) -> Option<InputEvent> {
        self.event_rx.recv().await
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        self.event_rx.close();
        self.event_task.abort();
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
