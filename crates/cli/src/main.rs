use clap::Parser;
use taskpick::commands::pick::{self, PickOptions};
use taskpick::Commands;
use taskpick_core::TaskSource;

#[derive(Parser, Debug)]
#[command(name = "taskpick")]
#[command(about = "Fuzzy-pick and run package.json scripts or Makefile targets", long_about = None)]
#[command(version)]
struct Cli {
    /// Select several tasks and run them in selection order
    #[arg(short, long)]
    multi: bool,

    /// Collect tasks from every package of the enclosing workspace
    #[arg(short, long)]
    workspace: bool,

    /// Number of rows visible in the picker
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    limit: u16,

    /// Read Makefile targets instead of package.json scripts
    #[arg(long)]
    make: bool,

    /// Skip the discovery cache
    #[arg(long)]
    no_cache: bool,

    /// Print matching tasks instead of opening the picker
    #[arg(long)]
    list: bool,

    /// Initial search text
    ///
    /// A word equal to a subcommand name (`cache`) is taken as that
    /// subcommand; pass such text with `--query` instead.
    query: Option<String>,

    /// Initial search text, never mistaken for a subcommand
    #[arg(short, long = "query", value_name = "QUERY", conflicts_with = "query")]
    query_text: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = taskpick_utils::tracing::init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Some(command) = cli.command {
        command.execute().await?;
        return Ok(());
    }

    let source = if cli.make {
        TaskSource::BuildFile
    } else {
        TaskSource::Manifest
    };
    let options = PickOptions {
        multi: cli.multi,
        workspace: cli.workspace,
        limit: usize::from(cli.limit),
        source,
        no_cache: cli.no_cache,
        list: cli.list,
        query: cli.query_text.or(cli.query).unwrap_or_default(),
    };

    let code = pick::execute(options).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
