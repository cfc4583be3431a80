//! Multi-term substring filtering for the picker
//!
//! Pure and allocation-light so it can run on every keystroke.

use taskpick_core::Task;

/// Something the matcher can filter by name and command text
pub trait Searchable {
    fn name(&self) -> &str;
    fn command(&self) -> &str;
}

impl Searchable for Task {
    fn name(&self) -> &str {
        &self.name
    }

    fn command(&self) -> &str {
        &self.command
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn command(&self) -> &str {
        (**self).command()
    }
}

/// A normalised search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    normalized: String,
    terms: Vec<String>,
}

impl Query {
    pub fn new(input: &str) -> Self {
        let terms: Vec<String> = input
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        Self {
            normalized: terms.join(" "),
            terms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `candidate` passes this query
    pub fn matches<T: Searchable + ?Sized>(&self, candidate: &T) -> bool {
        if self.is_empty() {
            return true;
        }

        let name = candidate.name().to_lowercase();
        if name == self.normalized {
            return true;
        }

        let command = candidate.command().to_lowercase();
        self.terms
            .iter()
            .all(|term| name.contains(term.as_str()) || command.contains(term.as_str()))
    }
}

/// Candidates matching `input`, in their original order
pub fn filter<'a, T: Searchable>(candidates: &'a [T], input: &str) -> Vec<&'a T> {
    let query = Query::new(input);
    candidates.iter().filter(|c| query.matches(*c)).collect()
}

/// Positions in `candidates` of the entries matching `input`, ascending
pub fn filter_indices<T: Searchable>(candidates: &[T], input: &str) -> Vec<usize> {
    let query = Query::new(input);
    candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| query.matches(*c))
        .map(|(index, _)| index)
        .collect()
}
