use crate::executor::{run_sequence, SystemTaskExecutor};
use crate::picker::{self, PickerOutcome};
use std::env;
use std::io::{self, IsTerminal, Write};
use taskpick_core::{ResultExt, Task, TaskSource};
use taskpick_discovery::{filter, DiscoveryConfig, RunnerResolver, TaskDiscovery};

/// Exit code when the user closes the picker without choosing
pub const ABORTED_EXIT_CODE: i32 = 130;

/// Options for the default discover, pick and run flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOptions {
    pub multi: bool,
    pub workspace: bool,
    pub limit: usize,
    pub source: TaskSource,
    pub no_cache: bool,
    pub list: bool,
    pub query: String,
}

/// Discover tasks, let the user choose, run the choice; returns the exit code
pub async fn execute(options: PickOptions) -> taskpick_core::Result<i32> {
    let cwd = env::current_dir().context("cannot determine current directory")?;

    let mut config = DiscoveryConfig::from_env().source(options.source);
    if options.no_cache {
        config = config.without_cache();
    }
    let discovery = TaskDiscovery::new(&cwd, config);
    let tasks = discovery.discover(options.workspace);

    if options.list {
        let matched = filter(&tasks, &options.query);
        if matched.is_empty() && !tasks.is_empty() {
            eprintln!("No tasks match '{}'", options.query);
        }
        print_tasks(&mut io::stdout().lock(), &matched).context("failed to write task list")?;
        return Ok(0);
    }

    if tasks.is_empty() {
        return Ok(0);
    }

    if !io::stdin().is_terminal() || !taskpick_utils::tracing::is_tty() {
        return Err(taskpick_core::Error::configuration(
            "the interactive picker needs a terminal; use --list to print tasks instead",
        ));
    }

    let outcome = picker::pick(&tasks, options.multi, options.limit, &options.query)
        .await
        .context("interactive picker failed")?;
    let indices = match outcome {
        PickerOutcome::Confirmed(indices) => indices,
        PickerOutcome::Aborted => return Ok(ABORTED_EXIT_CODE),
    };
    let chosen: Vec<&Task> = indices.iter().map(|&index| &tasks[index]).collect();

    let fallback_dir = discovery.nearest_definition_dir().unwrap_or(cwd);
    let mut resolver = RunnerResolver::new();
    run_sequence(&SystemTaskExecutor, &mut resolver, &chosen, &fallback_dir).await
}

/// Write one aligned line per task: package label (if any), name, command
pub fn print_tasks<W: Write>(out: &mut W, tasks: &[&Task]) -> io::Result<()> {
    let label_width = tasks
        .iter()
        .filter_map(|t| t.package_label.as_ref())
        .map(|label| label.as_str().chars().count())
        .max();
    let name_width = tasks
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);

    for task in tasks {
        if let Some(width) = label_width {
            let label = task.package_label.as_ref().map_or("", |l| l.as_str());
            write!(out, "{label:<width$}  ")?;
        }
        writeln!(out, "{:<name_width$}  {}", task.name, task.command)?;
    }
    Ok(())
}
