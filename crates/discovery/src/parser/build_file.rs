use super::DefinitionParser;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use taskpick_core::constants::{BUILD_FILENAMES, BUILD_PROGRAM, SEQUENTIAL_SEPARATOR};
use taskpick_core::{Error, Result, Task, TaskSource};
use tracing::debug;

// Dot-prefixed targets (.PHONY, .DEFAULT ...) cannot match: '.' is not an identifier char
static TARGET_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_-]+)\s*:").expect("target header pattern is valid"));

/// Reads targets and their recipes from Makefiles
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildFileParser;

impl BuildFileParser {
    /// Extract tasks from Makefile text
    pub fn parse_str(content: &str) -> Vec<Task> {
        let mut tasks = Vec::new();
        let mut seen = HashSet::new();
        let mut lines = content.lines().peekable();

        while let Some(line) = lines.next() {
            let Some(target) = target_name(line) else {
                continue;
            };

            let mut recipe = Vec::new();
            while let Some(next) = lines.peek() {
                if let Some(step) = next.strip_prefix('\t') {
                    let step = step.trim();
                    if !step.is_empty() {
                        recipe.push(step.to_string());
                    }
                } else if !is_blank_or_comment(next) {
                    break;
                }
                lines.next();
            }

            if !seen.insert(target.to_string()) {
                debug!(name = %target, "Ignoring duplicate target definition");
                continue;
            }

            let command = if recipe.is_empty() {
                format!("{BUILD_PROGRAM} {target}")
            } else {
                recipe.join(SEQUENTIAL_SEPARATOR)
            };
            tasks.push(Task::new(target, command, TaskSource::BuildFile));
        }

        tasks
    }
}

/// Target name declared by a header line, if `line` is one
///
/// Variable assignments such as `CC := gcc` or `CC ::= gcc` are not targets.
fn target_name(line: &str) -> Option<&str> {
    let captures = TARGET_HEADER.captures(line)?;
    let header_end = captures.get(0)?.end();
    let rest = &line[header_end..];
    if rest.starts_with('=') || rest.starts_with(":=") {
        return None;
    }
    captures.get(1).map(|m| m.as_str())
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

impl DefinitionParser for BuildFileParser {
    fn source(&self) -> TaskSource {
        TaskSource::BuildFile
    }

    fn file_names(&self) -> &'static [&'static str] {
        BUILD_FILENAMES
    }

    fn try_parse(&self, path: &Path) -> Result<Vec<Task>> {
        let bytes = fs::read(path).map_err(|e| Error::file_system(path, "read build file", e))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| Error::build_file_parse(path, format!("not valid UTF-8: {e}")))?;

        let tasks = Self::parse_str(&content);
        debug!(path = %path.display(), count = tasks.len(), "Parsed build file");
        Ok(tasks)
    }
}
