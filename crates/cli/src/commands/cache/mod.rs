use clap::Subcommand;
use taskpick_cache::{CacheConfig, ScriptCache};
use taskpick_core::Result;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CacheCommands {
    /// Remove every cached discovery result
    Clear,
    /// Print the location of the cache file
    Path,
}

impl CacheCommands {
    pub async fn execute(self) -> Result<()> {
        self.execute_with(CacheConfig::default())
    }

    pub fn execute_with(self, config: CacheConfig) -> Result<()> {
        match self {
            CacheCommands::Clear => {
                let cache = ScriptCache::new(config);
                cache.clear()?;
                tracing::info!(path = %cache.config().store_path().display(), "Cache cleared");
                eprintln!("Cache cleared");
                Ok(())
            }
            CacheCommands::Path => {
                println!("{}", config.store_path().display());
                Ok(())
            }
        }
    }
}
