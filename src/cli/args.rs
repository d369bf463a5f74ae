//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

use crate::config::Config;

/// Classifieds - listings, profiles and accounts over HTML forms
#[derive(Parser, Debug)]
#[command(name = "classifieds")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

/// Arguments for the serve command
///
/// Flags override `SERVER_HOST` / `SERVER_PORT` from the environment.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Layer the command-line overrides on top of `config`.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.server_host = host;
        }
        if let Some(port) = self.port {
            config.server_port = port;
        }
        config
    }
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_without_flags_keeps_config() {
        let cli = Cli::try_parse_from(["classifieds", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };

        let config = args.apply(Config::default());
        assert_eq!(config.server_addr(), Config::default().server_addr());
    }

    #[test]
    fn test_serve_flags_override_config() {
        let cli = Cli::try_parse_from(["classifieds", "serve", "-H", "127.0.0.1", "-p", "8081"])
            .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };

        let config = args.apply(Config {
            server_port: 9000,
            ..Config::default()
        });
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn test_port_flag_alone_keeps_host() {
        let args = ServeArgs {
            port: Some(4000),
            ..ServeArgs::default()
        };

        let config = args.apply(Config {
            server_host: "10.0.0.5".to_string(),
            ..Config::default()
        });
        assert_eq!(config.server_addr(), "10.0.0.5:4000");
    }

    #[test]
    fn test_migrate_subcommand() {
        let cli = Cli::try_parse_from(["classifieds", "-v", "migrate", "status"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["classifieds", "generate"]).is_err());
    }
}
