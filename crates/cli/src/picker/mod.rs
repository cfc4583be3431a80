//! Interactive task picker
//!
//! [`PickerState`] holds query, cursor and selection and knows nothing about
//! the terminal. [`pick`] wires it to crossterm input and ratatui drawing.

mod render;
mod state;
mod terminal;

pub use render::render;
pub use state::{PickerOutcome, PickerState};
pub use terminal::{InputEvent, TerminalManager};

use std::io;
use taskpick_core::Task;

/// Run an interactive session over `tasks`
///
/// The terminal is restored before this returns, whatever the outcome.
pub async fn pick(
    tasks: &[Task],
    multi: bool,
    limit: usize,
    initial_query: &str,
) -> io::Result<PickerOutcome> {
    let mut state = PickerState::new(tasks, multi, limit).with_query(initial_query);
    let mut manager = TerminalManager::new()?;

    loop {
        manager.terminal().draw(|frame| render(frame, &state))?;

        match manager.next_event().await {
            Some(InputEvent::Key(key)) => {
                if let Some(outcome) = state.handle_key(key) {
                    return Ok(outcome);
                }
            }
            Some(InputEvent::Resize) => {}
            None => return Ok(PickerOutcome::Aborted),
        }
    }
}
