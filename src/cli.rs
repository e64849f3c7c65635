//! Command-line surface of the seeder.
//!
//! Reports go to stdout; logs go to stderr through `tracing`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::bootstrap::{self, AppContext};
use crate::config::ConfigLoader;
use crate::seeds::events::DEFAULT_EVENT_COUNT;
use crate::seeds::{SeedOptions, areas, events};

/// Seeds reference catalogs into the configured database.
#[derive(Debug, Parser)]
#[command(name = "catalog-seeder", version)]
#[command(about = "Idempotent reference-data seeder", long_about = None)]
pub struct Cli {
    /// Directory holding the `.env*` files (defaults to the working directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub env_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Seed administrative areas and their cargos
    Areas {
        /// Delete all cargos and areas before seeding
        #[arg(long, visible_alias = "limpiar")]
        clear: bool,

        /// Only report what is currently stored
        #[arg(long, visible_alias = "solo-verificar")]
        verify_only: bool,
    },

    /// Seed event categories and events
    Events {
        /// Delete all events and categories before seeding
        #[arg(long, visible_alias = "delete")]
        clear: bool,

        /// Only report what is currently stored
        #[arg(long, visible_alias = "solo-verificar")]
        verify_only: bool,

        /// Number of events to apply, in fixture order
        #[arg(long, visible_alias = "events-count", value_name = "N", default_value_t = DEFAULT_EVENT_COUNT)]
        count: usize,

        /// Username the events are attributed to
        #[arg(long, value_name = "USERNAME")]
        owner: Option<String>,
    },

    /// Apply pending database migrations and exit
    Migrate,
}

impl Command {
    fn seed_options(&self) -> SeedOptions {
        match self {
            Command::Areas { clear, verify_only }
            | Command::Events {
                clear, verify_only, ..
            } => SeedOptions {
                clear_first: *clear,
                verify_only: *verify_only,
            },
            Command::Migrate => SeedOptions::default(),
        }
    }

    /// `migrate` applies migrations itself, so bootstrap must not.
    fn allows_auto_migrate(&self) -> bool {
        !matches!(self, Command::Migrate)
    }
}

/// Loads configuration, bootstraps the environment and runs `cli.command`.
pub async fn execute(cli: Cli) -> Result<()> {
    let loader = match &cli.env_dir {
        Some(dir) => ConfigLoader::with_base_dir(dir.clone()),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load().context("loading configuration")?;
    config.auto_migrate &= cli.command.allows_auto_migrate();
    let ctx = bootstrap::setup(config).await?;

    run_command(&ctx, &cli.command).await
}

/// Runs one command against an already bootstrapped context.
pub async fn run_command(ctx: &AppContext, command: &Command) -> Result<()> {
    let options = command.seed_options();

    let report = match command {
        Command::Areas { .. } => areas::seeder(&ctx.db)
            .run(options)
            .await
            .context("seeding areas and cargos")?,
        Command::Events { count, owner, .. } => events::seeder(&ctx.db, *count, owner.clone())
            .run(options)
            .await
            .context("seeding categories and events")?,
        Command::Migrate => {
            bootstrap::run_migrations(&ctx.db).await?;
            println!("✅ Migraciones aplicadas");
            return Ok(());
        }
    };

    print!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["catalog-seeder"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid arguments").command
    }

    #[test]
    fn areas_accepts_spanish_aliases() {
        assert_eq!(
            parse(&["areas", "--limpiar", "--solo-verificar"]),
            Command::Areas {
                clear: true,
                verify_only: true
            }
        );
        assert_eq!(
            parse(&["areas"]),
            Command::Areas {
                clear: false,
                verify_only: false
            }
        );
    }

    #[test]
    fn events_defaults_and_aliases() {
        assert_eq!(
            parse(&["events"]),
            Command::Events {
                clear: false,
                verify_only: false,
                count: DEFAULT_EVENT_COUNT,
                owner: None,
            }
        );
        assert_eq!(
            parse(&["events", "--delete", "--events-count", "4", "--owner", "admin"]),
            Command::Events {
                clear: true,
                verify_only: false,
                count: 4,
                owner: Some("admin".to_string()),
            }
        );
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(Cli::try_parse_from(["catalog-seeder", "events", "--count", "-1"]).is_err());
    }

    #[test]
    fn env_dir_is_global() {
        let cli = Cli::try_parse_from(["catalog-seeder", "migrate", "--env-dir", "/tmp/x"])
            .expect("valid arguments");
        assert_eq!(cli.env_dir, Some(PathBuf::from("/tmp/x")));
        assert_eq!(cli.command, Command::Migrate);
    }

    #[test]
    fn options_follow_flags() {
        let options = parse(&["events", "--clear"]).seed_options();
        assert!(options.clear_first);
        assert!(!options.verify_only);
        assert_eq!(Command::Migrate.seed_options(), SeedOptions::default());
    }

    #[test]
    fn migrate_runs_migrations_only_once() {
        assert!(!Command::Migrate.allows_auto_migrate());
        assert!(parse(&["areas"]).allows_auto_migrate());
        assert!(parse(&["events", "--verify-only"]).allows_auto_migrate());
    }
}
