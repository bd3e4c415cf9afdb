//! Configuration loading.
//!
//! Configuration is assembled with [figment] from three layers, later layers
//! winning:
//!
//! 1. A YAML file (`config.yaml` by default, `--config` / `ROSTERCTL_CONFIG`
//!    to override)
//! 2. Environment variables prefixed `ROSTERCTL_` (e.g. `ROSTERCTL_PORT`)
//! 3. The common raw `DATABASE_URL` variable
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 3000
//! database_url: sqlite://rosterctl.db?mode=rwc
//! per_page: 10
//! ranking_limit: 10
//! model_path: salary_model.json
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rosterctl", about = "Roster management API server")]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "ROSTERCTL_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (the default when no command is given)
    Serve,

    /// Insert randomly generated employees into the database
    GenerateEmployees {
        /// Number of employees to generate
        #[arg(long, default_value_t = 100)]
        count: u32,
    },

    /// Fit the salary regression model on stored employees and write the
    /// artifact to `model_path`
    TrainModel {
        /// Minimum number of training samples; synthetic rows are generated
        /// to pad out sparse tables
        #[arg(long, default_value_t = 200)]
        min_samples: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP listener to
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Page size for all paginated list endpoints
    #[serde(default = "default_per_page")]
    pub per_page: i64,

    /// Cap on the bounded top-N sets (top earners, most recent hires).
    /// Distinct from the page size: ranking happens first, pagination is
    /// applied over the capped subset.
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: i64,

    /// Path to the trained salary model artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://rosterctl.db?mode=rwc".to_string()
}

fn default_per_page() -> i64 {
    10
}

fn default_ranking_limit() -> i64 {
    10
}

fn default_model_path() -> PathBuf {
    PathBuf::from("salary_model.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            per_page: default_per_page(),
            ranking_limit: default_ranking_limit(),
            model_path: default_model_path(),
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("ROSTERCTL_").split("__"))
            // Common DATABASE_URL pattern
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.per_page < 1 {
            anyhow::bail!("per_page must be at least 1, got {}", self.per_page);
        }
        if self.ranking_limit < 1 {
            anyhow::bail!("ranking_limit must be at least 1, got {}", self.ranking_limit);
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
