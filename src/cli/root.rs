use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::list::ListCommand;
use super::schema::SchemaCommand;
use crate::api::{DataSource, MockApi, Role};
use crate::config::Config;
use crate::tui;

/// opsdesk - a terminal console for batch jobs, users and centers
#[derive(Parser)]
#[command(
    name = "opsdesk",
    version,
    about = "A terminal console for batch jobs, users and centers",
    long_about = r#"opsdesk browses the users, centers and batch jobs of a computing site.
Without a subcommand it opens the interactive console.

Examples:
  opsdesk                              # Open the console
  opsdesk --role viewer                # Open the console as a viewer
  opsdesk list jobs --status running   # Print running jobs
  opsdesk schema --pretty              # Print the configuration schema"#
)]
pub struct Cli {
    /// Configuration file (defaults to ./.opsdesk.json, ./opsdesk.json, then the user config dir)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Role of the operator, overrides the configuration
    #[arg(short = 'r', long = "role", global = true)]
    pub role: Option<Role>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Write logs to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of users, centers or jobs
    List(ListCommand),

    /// Print the JSON schema of the configuration file
    Schema(SchemaCommand),
}

impl Cli {
    /// Whether this invocation opens the full-screen console
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }

    pub async fn execute(self) -> Result<()> {
        if self.debug {
            debug!("Debug logging enabled");
        }

        if let Some(Commands::Schema(schema_cmd)) = &self.command {
            return schema_cmd.execute();
        }

        let config = self.load_config().await?;
        debug!("Configuration initialized");

        let api = MockApi::load(config.fixtures_dir.as_deref())
            .await
            .context("Failed to load fixtures")?
            .with_base_path(config.api_base_path.clone());
        let api: Arc<dyn DataSource> = Arc::new(api);
        info!("Using data source: {}", api.name());

        match self.command {
            Some(Commands::List(list_cmd)) => list_cmd.execute(&config, api).await,
            Some(Commands::Schema(_)) => Ok(()),
            None => {
                info!("Starting interactive console as {}", config.role);
                tui::run(config, api).await
            }
        }
    }

    async fn load_config(&self) -> Result<Config> {
        let mut config = Config::init(self.config.as_deref()).await?;
        if let Some(role) = self.role {
            config.role = role;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JobStatus;
    use crate::cli::list::Resource;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "opsdesk", "list", "jobs", "--status", "running", "--page", "2", "--role", "viewer", "-d",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.role, Some(Role::Viewer));
        assert!(!cli.is_interactive());
        match cli.command {
            Some(Commands::List(list)) => {
                assert_eq!(list.resource, Resource::Jobs);
                assert_eq!(list.status, Some(JobStatus::Running));
                assert_eq!(list.page, 2);
                assert_eq!(list.per_page, None);
            }
            _ => panic!("expected the list command"),
        }
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Cli::try_parse_from(["opsdesk", "--role", "root"]).is_err());
        assert!(Cli::try_parse_from(["opsdesk", "list", "printers"]).is_err());
        assert!(Cli::try_parse_from(["opsdesk", "list", "jobs", "--status", "paused"]).is_err());
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["opsdesk", "--log-file", "/tmp/opsdesk.log"]).unwrap();
        assert!(cli.is_interactive());
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/opsdesk.log")));
    }
}
