use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use taskpick_core::{Error, Result, Task, TaskSource};
use taskpick_discovery::{PackageManager, RunnerResolver};
use tokio::process::Command;

/// Runs one task as a child process
///
/// Implementations decide how a task is spawned; callers only look at
/// whether the exit status is a success.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(
        &self,
        task: &Task,
        working_dir: &Path,
        runner: PackageManager,
    ) -> Result<ExitStatus>;
}

/// Spawns tasks with the terminal's stdio inherited
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTaskExecutor;

#[async_trait]
impl TaskExecutor for SystemTaskExecutor {
    async fn execute(
        &self,
        task: &Task,
        working_dir: &Path,
        runner: PackageManager,
    ) -> Result<ExitStatus> {
        let (program, args) = task.invocation(runner.program());
        let resolved = which::which(&program).map_err(|e| {
            Error::command_execution(&program, args.clone(), format!("not found in PATH: {e}"), None)
        })?;

        tracing::debug!(
            program = %resolved.display(),
            dir = %working_dir.display(),
            "Running {}",
            task.qualified_name()
        );

        let mut child = Command::new(&resolved)
            .args(&args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                Error::command_execution(
                    &program,
                    args.clone(),
                    format!("failed to spawn: {e}"),
                    None,
                )
            })?;

        child.wait().await.map_err(|e| {
            Error::command_execution(&program, args, format!("failed to wait: {e}"), None)
        })
    }
}

/// Directory a task runs in: its package, else the discovery fallback
pub fn working_dir_for(task: &Task, fallback: &Path) -> PathBuf {
    task.package_directory
        .clone()
        .unwrap_or_else(|| fallback.to_path_buf())
}

/// Run `tasks` one after another in the given order
///
/// Stops at the first failure and returns its exit code; returns 0 when every
/// task succeeded. A task killed by a signal reports exit code 1.
pub async fn run_sequence<E: TaskExecutor + ?Sized>(
    executor: &E,
    resolver: &mut RunnerResolver,
    tasks: &[&Task],
    fallback_dir: &Path,
) -> Result<i32> {
    for task in tasks {
        let dir = working_dir_for(task, fallback_dir);
        let runner = match task.source {
            TaskSource::Manifest => resolver.resolve(&dir),
            TaskSource::BuildFile => PackageManager::default(),
        };

        let status = executor.execute(task, &dir, runner).await?;
        if !status.success() {
            let code = status.code().unwrap_or(1);
            tracing::warn!(task = %task.qualified_name(), code, "Task failed, stopping");
            return Ok(code);
        }
    }
    Ok(0)
}
