use clap::Subcommand;

pub mod cache;
pub mod pick;

use self::cache::CacheCommands;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Manage the discovery cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

impl Commands {
    pub async fn execute(self) -> taskpick_core::Result<()> {
        match self {
            Commands::Cache { command } => command.execute().await,
        }
    }
}
