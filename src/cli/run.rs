//! Run command - plan, confirm, create and report the batch

use crate::cli::CliProgress;
use crate::cli::prompt::{ConfirmPrompt, TerminalPrompter};
use crate::cli::style::{Stylize, arrow, check, cross};
use anstream::println;
use chrono::Local;
use cv_pull_request::batch::{
    Report, build_plan, confirm_plan, execute_requests, render_report,
};
use cv_pull_request::config::{
    ConfigFile, SettingsOverrides, collect_settings, format_run_date, load_config, save_config,
    token_from_env, validate_projects,
};
use cv_pull_request::error::Result;
use cv_pull_request::platform::{GitHubService, GitHubServiceOptions, web_base_url};
use cv_pull_request::types::{Outcome, ResolvedRequest};
use std::path::PathBuf;
use tracing::warn;

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Settings file to read and rewrite
    pub config_file: PathBuf,
    /// Values given on the command line
    pub overrides: SettingsOverrides,
    /// Show the plan and stop
    pub dry_run: bool,
    /// API base URI (None for api.github.com)
    pub api_url: Option<String>,
}

/// Run the batch
pub async fn run(options: RunOptions) -> Result<()> {
    println!(
        "{}",
        format!(
            "==== CV PULL REQUEST GENERATOR (v{}) ====",
            env!("CARGO_PKG_VERSION")
        )
        .success()
        .emphasis()
    );
    println!();

    // =========================================================================
    // Phase 1: CONFIGURE
    // =========================================================================

    println!(
        "{}",
        format!("Reading settings from {}...", options.config_file.display()).muted()
    );
    let file = load_config(&options.config_file)?;
    let projects = file.projects_or_default();
    validate_projects(&projects)?;

    let settings = collect_settings(
        &file,
        &options.overrides,
        token_from_env(|var| std::env::var(var).ok()),
        format_run_date(Local::now().date_naive()),
        &TerminalPrompter,
    )?;

    // =========================================================================
    // Phase 2: PLAN
    // =========================================================================

    let plan = build_plan(&settings, &projects);
    print_plan(&plan, &web_base_url(options.api_url.as_deref()));

    if options.dry_run {
        println!("{}", "Dry run - no pull requests created.".muted());
        return Ok(());
    }

    if !confirm_plan(&settings, &plan, &ConfirmPrompt)? {
        println!("{}", "Aborted".muted());
        return Ok(());
    }
    println!();

    // =========================================================================
    // Phase 3: EXECUTE
    // =========================================================================

    let platform = GitHubService::new(&GitHubServiceOptions {
        token: settings.token.clone(),
        user_agent: settings.user_agent.clone(),
        timezone: settings.timezone.clone(),
        base_uri: options.api_url.clone(),
    })?;

    let progress = CliProgress::new();
    let outcomes =
        execute_requests(&plan, &platform, settings.on_assign_failure, &progress).await;

    // =========================================================================
    // Phase 4: REPORT
    // =========================================================================

    let report = render_report(&plan, &outcomes);
    print_report(&report);

    // Soft failure - the pull requests exist either way
    if let Err(e) = save_config(
        &options.config_file,
        &ConfigFile::from_settings(&settings, &projects, &file),
    ) {
        warn!(error = %e, "failed to save settings");
        println!("{}", format!("Failed to save settings: {e}").warn());
    }

    report.ensure_complete()
}

/// Print the pull requests about to be created
fn print_plan(plan: &[ResolvedRequest], web_base: &str) {
    println!(
        "{}",
        "The generator will attempt to create the following pull requests:".emphasis()
    );
    println!();

    for request in plan {
        println!(
            "{} {}",
            request.name.emphasis(),
            format!("[in {web_base}/{}]", request.full_repo()).muted()
        );
        println!(
            "   {} {} {}",
            request.base.accent(),
            arrow(),
            request.head.accent()
        );
    }
    println!();
}

/// Print one line per project, in configuration order
fn print_report(report: &Report) {
    let hyperlinks = supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout);

    println!();
    println!("{}", "==== CV PULL REQUEST RESULTS ====".success().emphasis());
    if hyperlinks {
        println!(
            "{}",
            "(Hold the Command or Ctrl key to follow the hyperlinks)".warn()
        );
    }
    println!();

    for entry in &report.entries {
        match &entry.outcome {
            Outcome::Success { reference_url } => {
                let link = if hyperlinks {
                    terminal_link::Link::new("Pull Request Link", reference_url).to_string()
                } else {
                    reference_url.clone()
                };
                println!(
                    " {} {}: {}",
                    check(),
                    entry.project_name.emphasis(),
                    link.accent()
                );
            }
            Outcome::Failure { message } => {
                println!(
                    " {} {}: {}",
                    cross(),
                    entry.project_name.emphasis(),
                    message.error()
                );
            }
        }
    }

    println!();
    println!(
        "{} created, {} failed",
        report.success_count().accent(),
        report.failure_count().accent()
    );
}
