use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use taskpick_core::Task;
use taskpick_discovery::filter_indices;

/// How a picker session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Indices into the candidate list, in selection order
    Confirmed(Vec<usize>),
    Aborted,
}

/// Everything the picker shows, independent of any terminal
#[derive(Debug)]
pub struct PickerState<'a> {
    tasks: &'a [Task],
    multi: bool,
    limit: usize,
    query: String,
    matches: Vec<usize>,
    cursor: usize,
    offset: usize,
    selected: Vec<usize>,
}

impl<'a> PickerState<'a> {
    pub fn new(tasks: &'a [Task], multi: bool, limit: usize) -> Self {
        let mut state = Self {
            tasks,
            multi,
            limit: limit.max(1),
            query: String::new(),
            matches: Vec::new(),
            cursor: 0,
            offset: 0,
            selected: Vec::new(),
        };
        state.refilter();
        state
    }

    /// Start with `query` already typed
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self.refilter();
        self
    }

    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    /// Candidate indices passing the current query
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Position of the cursor within [`Self::matches`]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Candidate index under the cursor
    pub fn current(&self) -> Option<usize> {
        self.matches.get(self.cursor).copied()
    }

    /// Matches inside the scroll window, with their position in `matches`
    pub fn visible(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matches
            .iter()
            .copied()
            .enumerate()
            .skip(self.offset)
            .take(self.limit)
    }

    /// 1-based selection order of a candidate, if it is selected
    pub fn selection_order(&self, index: usize) -> Option<usize> {
        self.selected
            .iter()
            .position(|&selected| selected == index)
            .map(|position| position + 1)
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Apply one key press; returns the outcome once the session is over
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PickerOutcome> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Some(PickerOutcome::Aborted),
            KeyCode::Char('c') if ctrl => return Some(PickerOutcome::Aborted),
            KeyCode::Enter => return self.confirm(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Char('p') if ctrl => self.move_up(),
            KeyCode::Char('n') if ctrl => self.move_down(),
            KeyCode::Tab => self.toggle(),
            KeyCode::Backspace => self.pop_char(),
            KeyCode::Char(c) if !ctrl => self.push_char(c),
            _ => {}
        }
        None
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.scroll_to_cursor();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.matches.len() {
            self.cursor += 1;
            self.scroll_to_cursor();
        }
    }

    /// Flip the selection of the cursor row; only meaningful in multi mode
    pub fn toggle(&mut self) {
        if !self.multi {
            return;
        }
        let Some(index) = self.current() else {
            return;
        };
        match self.selected.iter().position(|&s| s == index) {
            Some(position) => {
                self.selected.remove(position);
            }
            None => self.selected.push(index),
        }
    }

    /// Finish the session with the chosen candidates
    ///
    /// Returns `None` when there is nothing to confirm, leaving the picker open.
    pub fn confirm(&self) -> Option<PickerOutcome> {
        if self.multi && !self.selected.is_empty() {
            return Some(PickerOutcome::Confirmed(self.selected.clone()));
        }
        self.current()
            .map(|index| PickerOutcome::Confirmed(vec![index]))
    }

    fn refilter(&mut self) {
        self.matches = filter_indices(self.tasks, &self.query);
        self.cursor = 0;
        self.offset = 0;
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.limit {
            self.offset = self.cursor + 1 - self.limit;
        }
    }
}
