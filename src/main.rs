//! cv-pull-request command-line entry point

mod cli;

use clap::Parser;
use cv_pull_request::config::{DEFAULT_CONFIG_FILE, SettingsOverrides};
use cv_pull_request::types::AssigneeFailurePolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Create release merge pull requests across many repositories
#[derive(Parser, Debug)]
#[command(name = "cv-pull-request", version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// Log API calls and internal steps to stderr
    #[arg(short, long)]
    debug: bool,

    /// Never prompt; every required value must come from flags, the settings file, or the environment
    #[arg(short, long, visible_alias = "yes")]
    automatic: bool,

    /// Release version substituted into branch templates
    #[arg(short, long = "release", value_name = "VERSION")]
    release: Option<String>,

    /// Pull request assignee (repeatable, or comma separated)
    #[arg(long = "assignee", value_name = "NAME", value_delimiter = ',')]
    assignees: Vec<String>,

    /// GitHub API token (defaults to the settings file, then GITHUB_TOKEN / GH_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Repository owner (user or organization)
    #[arg(long, value_name = "OWNER")]
    owner: Option<String>,

    /// What to report when assigning people to a created pull request fails
    #[arg(long, value_enum, default_value_t = AssigneeFailurePolicy::Ignore)]
    on_assign_failure: AssigneeFailurePolicy,

    /// Show the pull requests that would be created and exit
    #[arg(long)]
    dry_run: bool,

    /// GitHub API base URL (GitHub Enterprise)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cv_pull_request=debug,octocrab=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.debug);

    let options = cli::RunOptions {
        config_file: args.config_file,
        overrides: SettingsOverrides {
            owner: args.owner,
            version: args.release,
            assignees: args
                .assignees
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            token: args.token,
            automatic: args.automatic,
            debug: args.debug,
            on_assign_failure: args.on_assign_failure,
        },
        dry_run: args.dry_run,
        api_url: args.api_url,
    };

    cli::run(options).await?;
    Ok(())
}
