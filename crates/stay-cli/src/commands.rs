use colored::Colorize;

use stay_server::{ApiServer, ServerConfig};
use stay_store::FileStore;
use stay_types::EntityKind;

use crate::cli::{Cli, Command, ServeArgs, StatsArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    // Flags override the config file.
    if let Some(bind) = &args.bind {
        config.bind_addr = bind.parse()?;
    }
    if let Some(snapshot) = args.snapshot {
        config.snapshot_path = snapshot;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(ApiServer::new(config).serve())?;
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let mut store = FileStore::new(&args.snapshot);
    store.reload()?;

    println!(
        "{} records in {}",
        store.count().to_string().bold(),
        args.snapshot.display()
    );
    for kind in EntityKind::ALL {
        println!("  {:<10} {}", kind.to_string().cyan(), store.count_of(kind));
    }
    Ok(())
}
