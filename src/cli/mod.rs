pub mod planning;
pub mod retro;
pub mod schema;

use crate::cache::{CacheStore, CachedSource, FileCache, MemoryCache};
use crate::config::Config;
use crate::tracker::{Credentials, IssueSource, JiraClient};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pulse")]
#[command(
    author,
    version,
    about = "Planning and retro markdown reports from Jira objectives, epics and issues"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(short, long, global = true, default_value = "pulse.yaml")]
    pub config: PathBuf,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Ignore the response cache for this run
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Jira user (email) for basic auth
    #[arg(long, global = true, env = "JIRA_USER")]
    pub jira_user: Option<String>,

    /// Jira API token for basic auth
    #[arg(long, global = true, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub jira_token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Snapshot of work in review, in progress and triaged
    Planning,

    /// Work completed since a date
    Retro(RetroArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct RetroArgs {
    /// First day of the cycle (DD-MM-YYYY, UTC)
    #[arg(long, value_parser = parse_since)]
    pub since: NaiveDate,
}

fn parse_since(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%d-%m-%Y")
        .map_err(|e| format!("expected DD-MM-YYYY, got '{}': {}", value, e))
}

/// Tracker client behind the response cache
pub type Source = CachedSource<JiraClient, Box<dyn CacheStore>>;

/// Load and validate the config named on the command line
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    info!("Loading config from {:?}", cli.config);
    let config = Config::load(&cli.config)?;
    config.validate()?;
    Ok(config)
}

/// Build the cached Jira source. A corrupt cache file stops the run here.
pub fn open_source(cli: &Cli, config: &Config) -> anyhow::Result<Source> {
    let credentials = match (&cli.jira_user, &cli.jira_token) {
        (Some(user), Some(token)) => Some(Credentials {
            user: user.clone(),
            token: token.clone(),
        }),
        _ => {
            warn!("JIRA_USER / JIRA_API_TOKEN not set, sending anonymous requests");
            None
        }
    };
    let client = JiraClient::new(config, credentials)?;

    let cache: Box<dyn CacheStore> = if cli.no_cache || !config.cache.enabled {
        Box::new(MemoryCache::default())
    } else {
        Box::new(FileCache::load(&config.cache.path)?)
    };

    Ok(CachedSource::new(client, cache))
}

/// Persist cached responses; failure to save never hides the report.
/// Called whether or not the report succeeded.
pub fn save_cache<S: IssueSource, C: CacheStore>(source: &mut CachedSource<S, C>) {
    if let Err(e) = source.flush() {
        warn!("Failed to save cache: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Templates;
    use crate::report::{planning_report, TitleRenderer};
    use crate::tracker::fake::{issue, FakeSource};
    use crate::tracker::jql;
    use tempfile::TempDir;

    #[test]
    fn test_parse_since_day_month_year() {
        assert_eq!(
            parse_since("01-10-2026").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_since_rejects_iso_dates() {
        assert!(parse_since("2026-10-01").is_err());
        assert!(parse_since("31-02-2026").is_err());
    }

    #[test]
    fn test_retro_requires_since() {
        assert!(Cli::try_parse_from(["pulse", "retro"]).is_err());
        let cli = Cli::try_parse_from(["pulse", "retro", "--since", "15-09-2026"]).unwrap();
        assert!(matches!(cli.command, Commands::Retro(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pulse", "planning", "--no-cache", "-c", "team.yaml"]).unwrap();
        assert!(cli.no_cache);
        assert_eq!(cli.config, PathBuf::from("team.yaml"));
    }

    #[tokio::test]
    async fn test_cache_saved_when_report_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".pulse").join("cache.json");

        let mut fake = FakeSource::new();
        fake.add(issue("O-1", "Objective", "In Progress", "Grow"));
        fake.on_search(jql::active_objectives(), &["O-1"]);
        fake.fail_search(jql::children_of("O-1"));

        let mut source = CachedSource::new(fake, FileCache::load(&path).unwrap());
        let templates = Templates {
            intro: "Pulse".to_string(),
            in_review: "## In review".to_string(),
            in_progress: "## In progress".to_string(),
            triaged: "## Triaged".to_string(),
        };
        let report =
            planning_report(&mut source, &TitleRenderer::new("https://jira.test"), &templates)
                .await;
        save_cache(&mut source);

        assert!(report.is_err());
        let saved = FileCache::load(&path).unwrap();
        assert!(saved.get(&jql::active_objectives()).is_some());
        assert!(saved.get("O-1").is_some());
        assert!(saved.get(&jql::children_of("O-1")).is_none());
    }
}
