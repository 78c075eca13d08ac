use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stay",
    about = "Stay — snapshot-persisted catalog service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Print record counts from a snapshot file
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<String>,

    /// Snapshot file backing the store (overrides the config file)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct StatsArgs {
    #[arg(long, default_value = "file.json")]
    pub snapshot: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["stay", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.bind.is_none());
            assert!(args.snapshot.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "stay",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--snapshot",
            "/tmp/catalog.json",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".into()));
            assert_eq!(args.snapshot, Some("/tmp/catalog.json".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_with_config_file() {
        let cli = Cli::try_parse_from(["stay", "serve", "--config", "stay.toml"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.config, Some("stay.toml".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_stats_default_snapshot() {
        let cli = Cli::try_parse_from(["stay", "stats"]).unwrap();
        if let Command::Stats(args) = cli.command {
            assert_eq!(args.snapshot, PathBuf::from("file.json"));
        } else {
            panic!("wrong command");
        }
    }
}
