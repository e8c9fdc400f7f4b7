//! Settings collection
//!
//! Combines command-line overrides, the settings file, the environment and
//! (in interactive mode) operator prompts into one immutable
//! [`GlobalSettings`] plus the project list.

mod storage;

pub use storage::{DEFAULT_CONFIG_FILE, load_config, save_config};

use crate::error::{Error, Result};
use crate::types::{AssigneeFailurePolicy, GlobalSettings, ProjectDefinition, TokenSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Owner used when neither the file nor the command line names one
pub const DEFAULT_OWNER: &str = "HRG-Technologies-LLC";

/// `User-Agent` used when the file does not name one
pub const DEFAULT_USER_AGENT: &str = "HRG GitHub Utilities";

/// Timezone used when the file does not name one
pub const DEFAULT_TIMEZONE: &str = "Pacific/Honolulu";

/// Environment variables consulted for the API token, in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

const VERSION_PROMPT: &str = "What CV version are you building?";
const ASSIGNEES_PROMPT: &str =
    "Who are the pull request assignees? (separate multiple assignees with a comma)";
const TOKEN_PROMPT: &str = "What GitHub API token should we use?";

/// Contents of the settings file
///
/// Every field is optional; missing values fall back to defaults, the
/// environment, or a prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    /// Default repository owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Last release version used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Last assignees used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    /// API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// `User-Agent` header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Timezone header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Projects to open pull requests for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectDefinition>>,
}

impl ConfigFile {
    /// Snapshot of a run's settings for the next run.
    ///
    /// Run date and mode flags are not persisted. A token read from the
    /// environment is never written; `previous` keeps whatever token the file
    /// already had.
    pub fn from_settings(
        settings: &GlobalSettings,
        projects: &[ProjectDefinition],
        previous: &Self,
    ) -> Self {
        let token = if settings.token_source.is_persisted() {
            Some(settings.token.clone())
        } else {
            previous.token.clone()
        };

        Self {
            owner: Some(settings.owner.clone()),
            version: Some(settings.version.clone()),
            assignees: Some(settings.assignees.clone()),
            token,
            user_agent: Some(settings.user_agent.clone()),
            timezone: Some(settings.timezone.clone()),
            projects: Some(projects.to_vec()),
        }
    }

    /// Configured projects, or the built-in list when the file has none
    pub fn projects_or_default(&self) -> Vec<ProjectDefinition> {
        self.projects.clone().unwrap_or_else(default_projects)
    }
}

/// Values supplied on the command line; they win over everything else
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// `--owner`
    pub owner: Option<String>,
    /// `--release`
    pub version: Option<String>,
    /// `--assignee`
    pub assignees: Vec<String>,
    /// `--token`
    pub token: Option<String>,
    /// `--automatic`
    pub automatic: bool,
    /// `--debug`
    pub debug: bool,
    /// `--on-assign-failure`
    pub on_assign_failure: AssigneeFailurePolicy,
}

/// Asks the operator for a missing value
pub trait Prompter {
    /// Ask `message`, offering `initial` as the editable default.
    ///
    /// Implementations should re-ask until the answer is non-empty.
    fn input(&self, message: &str, initial: &str) -> Result<String>;

    /// Ask for a secret without echoing it
    fn secret(&self, message: &str) -> Result<String>;
}

/// The built-in project list used when the settings file defines none
pub fn default_projects() -> Vec<ProjectDefinition> {
    vec![
        ProjectDefinition::new("JLV - CCP", "JLV", "cvccp_dev_{version}", "cvccp_test_{version}"),
        ProjectDefinition::new("JLV - VAS", "JLV", "cvvas_dev_{version}", "cvvas_test_{version}"),
        ProjectDefinition::new(
            "JMeadows - CCP",
            "jMeadows",
            "cvccp_dev_{version}",
            "cvccp_test_{version}",
        ),
        ProjectDefinition::new(
            "JMeadows - VAS",
            "jMeadows",
            "cvvas_dev_{version}",
            "cvvas_test_{version}",
        ),
        ProjectDefinition::new("HuiCore", "HuiCore", "cv_dev_{version}", "cv_test_{version}"),
        ProjectDefinition::new(
            "VistA Data Service",
            "VistaDataService",
            "cv_dev_{version}",
            "cv_test_{version}",
        ),
        ProjectDefinition::new("JLV QoS", "jlvqos", "cv_dev_{version}", "cv_test_{version}"),
        ProjectDefinition::new(
            "Report Builder",
            "ReportBuilder",
            "cv_dev_{version}",
            "cv_test_{version}",
        ),
    ]
}

/// Format a run date as `MM-dd-yyyy`
pub fn format_run_date(date: NaiveDate) -> String {
    date.format("%m-%d-%Y").to_string()
}

/// Split a comma separated assignee list, dropping blanks
pub fn parse_assignees(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// First non-empty token among [`TOKEN_ENV_VARS`]
pub fn token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS.iter().find_map(|var| {
        lookup(var)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .inspect(|_| debug!(var, "using token from environment"))
    })
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build the run's settings.
///
/// Precedence per value: command line, settings file, environment (token
/// only), built-in default. In interactive mode version and assignees are
/// always asked (pre-filled from the file) unless given on the command line,
/// and the token is asked only when nothing else supplies it. In automatic
/// mode a missing required value is a configuration error.
pub fn collect_settings(
    file: &ConfigFile,
    overrides: &SettingsOverrides,
    env_token: Option<String>,
    date: String,
    prompter: &dyn Prompter,
) -> Result<GlobalSettings> {
    let automatic = overrides.automatic;

    let version = match non_empty(overrides.version.as_ref()) {
        Some(version) => version,
        None if automatic => non_empty(file.version.as_ref())
            .ok_or_else(|| missing("version", "--release"))?,
        None => prompter
            .input(VERSION_PROMPT, file.version.as_deref().unwrap_or_default())?
            .trim()
            .to_string(),
    };

    let assignees = if !overrides.assignees.is_empty() {
        overrides.assignees.clone()
    } else if automatic {
        file.assignees
            .clone()
            .filter(|names| !names.is_empty())
            .ok_or_else(|| missing("assignees", "--assignee"))?
    } else {
        let initial = file.assignees.as_deref().unwrap_or_default().join(",");
        parse_assignees(&prompter.input(ASSIGNEES_PROMPT, &initial)?)
    };

    let token = non_empty(overrides.token.as_ref())
        .map(|token| (token, TokenSource::CommandLine))
        .or_else(|| {
            non_empty(file.token.as_ref()).map(|token| (token, TokenSource::SettingsFile))
        })
        .or_else(|| env_token.map(|token| (token, TokenSource::EnvVar)));
    let (token, token_source) = match token {
        Some(found) => found,
        None if automatic => return Err(missing("token", "--token or GITHUB_TOKEN")),
        None => (
            prompter.secret(TOKEN_PROMPT)?.trim().to_string(),
            TokenSource::Prompt,
        ),
    };
    debug!(source = ?token_source, "resolved API token");

    let settings = GlobalSettings {
        owner: non_empty(overrides.owner.as_ref())
            .or_else(|| non_empty(file.owner.as_ref()))
            .unwrap_or_else(|| DEFAULT_OWNER.to_string()),
        version,
        date,
        assignees,
        token,
        token_source,
        user_agent: non_empty(file.user_agent.as_ref())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        timezone: non_empty(file.timezone.as_ref())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        automatic,
        debug: overrides.debug,
        on_assign_failure: overrides.on_assign_failure,
    };

    validate_settings(&settings)?;
    Ok(settings)
}

fn missing(field: &str, flag: &str) -> Error {
    Error::Config(format!(
        "missing required setting `{field}` in automatic mode (pass {flag} or set it in the settings file)"
    ))
}

/// Check the invariants every run relies on
pub fn validate_settings(settings: &GlobalSettings) -> Result<()> {
    if settings.version.trim().is_empty() {
        return Err(Error::Config("version must not be empty".to_string()));
    }
    if settings.assignees.is_empty() {
        return Err(Error::Config(
            "at least one assignee is required".to_string(),
        ));
    }
    if settings.token.trim().is_empty() {
        return Err(Error::Config("API token must not be empty".to_string()));
    }
    if settings.owner.trim().is_empty() {
        return Err(Error::Config("owner must not be empty".to_string()));
    }
    Ok(())
}

/// Check the project list: non-empty, complete entries, unique names
pub fn validate_projects(projects: &[ProjectDefinition]) -> Result<()> {
    if projects.is_empty() {
        return Err(Error::Config("no projects configured".to_string()));
    }

    let mut seen = HashSet::new();
    for project in projects {
        let blank = [
            ("name", &project.name),
            ("repo", &project.repo),
            ("head", &project.head_template),
            ("base", &project.base_template),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        if let Some((field, _)) = blank {
            return Err(Error::Config(format!(
                "project `{}` has an empty `{field}`",
                project.name
            )));
        }
        if !seen.insert(project.name.as_str()) {
            return Err(Error::Config(format!(
                "duplicate project name `{}`",
                project.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Answers prompts from a queue and records what was asked
    struct ScriptedPrompter {
        answers: RefCell<Vec<String>>,
        asked: RefCell<Vec<(String, String)>>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().rev().map(ToString::to_string).collect()),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(&self, message: &str, initial: &str) -> Result<String> {
            self.asked
                .borrow_mut()
                .push((message.to_string(), initial.to_string()));
            self.answers
                .borrow_mut()
                .pop()
                .ok_or_else(|| Error::Prompt("no scripted answer left".to_string()))
        }

        fn secret(&self, message: &str) -> Result<String> {
            self.input(message, "")
        }
    }

    fn full_file() -> ConfigFile {
        ConfigFile {
            owner: Some("acme".to_string()),
            version: Some("3.1".to_string()),
            assignees: Some(vec!["alice".to_string()]),
            token: Some("file-token".to_string()),
            user_agent: Some("acme bot".to_string()),
            timezone: Some("UTC".to_string()),
            projects: None,
        }
    }

    fn automatic() -> SettingsOverrides {
        SettingsOverrides {
            automatic: true,
            ..SettingsOverrides::default()
        }
    }

    #[test]
    fn test_format_run_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_run_date(date), "03-07-2026");
    }

    #[test]
    fn test_parse_assignees() {
        assert_eq!(parse_assignees("alice, bob,,carol "), vec!["alice", "bob", "carol"]);
        assert!(parse_assignees(" , ").is_empty());
    }

    #[test]
    fn test_token_from_env_order() {
        let env = |var: &str| match var {
            "GITHUB_TOKEN" => Some("  ".to_string()),
            "GH_TOKEN" => Some("gh".to_string()),
            _ => None,
        };
        assert_eq!(token_from_env(env), Some("gh".to_string()));
        assert_eq!(token_from_env(|_| None), None);
    }

    #[test]
    fn test_automatic_mode_uses_file_without_prompting() {
        let prompter = ScriptedPrompter::new(&[]);
        let settings =
            collect_settings(&full_file(), &automatic(), None, "10-17-2026".to_string(), &prompter)
                .unwrap();

        assert!(prompter.asked.borrow().is_empty());
        assert_eq!(settings.owner, "acme");
        assert_eq!(settings.version, "3.1");
        assert_eq!(settings.assignees, vec!["alice"]);
        assert_eq!(settings.token, "file-token");
        assert_eq!(settings.token_source, TokenSource::SettingsFile);
        assert_eq!(settings.user_agent, "acme bot");
        assert_eq!(settings.timezone, "UTC");
        assert_eq!(settings.date, "10-17-2026");
        assert!(settings.automatic);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = SettingsOverrides {
            owner: Some("other".to_string()),
            version: Some("4.0".to_string()),
            assignees: vec!["bob".to_string(), "carol".to_string()],
            token: Some("cli-token".to_string()),
            on_assign_failure: AssigneeFailurePolicy::Fail,
            ..automatic()
        };
        let settings = collect_settings(
            &full_file(),
            &overrides,
            Some("env-token".to_string()),
            "d".to_string(),
            &ScriptedPrompter::new(&[]),
        )
        .unwrap();

        assert_eq!(settings.owner, "other");
        assert_eq!(settings.version, "4.0");
        assert_eq!(settings.assignees, vec!["bob", "carol"]);
        assert_eq!(settings.token, "cli-token");
        assert_eq!(settings.token_source, TokenSource::CommandLine);
        assert_eq!(settings.on_assign_failure, AssigneeFailurePolicy::Fail);
    }

    #[test]
    fn test_env_token_used_when_file_has_none() {
        let file = ConfigFile {
            token: None,
            ..full_file()
        };
        let settings = collect_settings(
            &file,
            &automatic(),
            Some("env-token".to_string()),
            "d".to_string(),
            &ScriptedPrompter::new(&[]),
        )
        .unwrap();
        assert_eq!(settings.token, "env-token");
        assert_eq!(settings.token_source, TokenSource::EnvVar);
    }

    #[test]
    fn test_automatic_mode_missing_version_is_config_error() {
        let file = ConfigFile {
            version: None,
            ..full_file()
        };
        let result = collect_settings(
            &file,
            &automatic(),
            None,
            "d".to_string(),
            &ScriptedPrompter::new(&[]),
        );
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("version")));
    }

    #[test]
    fn test_automatic_mode_missing_token_is_config_error() {
        let file = ConfigFile {
            token: None,
            ..full_file()
        };
        let result = collect_settings(
            &file,
            &automatic(),
            None,
            "d".to_string(),
            &ScriptedPrompter::new(&[]),
        );
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("token")));
    }

    #[test]
    fn test_automatic_mode_empty_assignees_is_config_error() {
        let file = ConfigFile {
            assignees: Some(vec![]),
            ..full_file()
        };
        let result = collect_settings(
            &file,
            &automatic(),
            None,
            "d".to_string(),
            &ScriptedPrompter::new(&[]),
        );
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("assignees")));
    }

    #[test]
    fn test_interactive_mode_prompts_with_file_values_as_initial() {
        let prompter = ScriptedPrompter::new(&["3.2", "alice, bob"]);
        let settings = collect_settings(
            &full_file(),
            &SettingsOverrides::default(),
            None,
            "d".to_string(),
            &prompter,
        )
        .unwrap();

        let asked = prompter.asked.borrow();
        assert_eq!(asked.len(), 2);
        assert_eq!(asked[0], (VERSION_PROMPT.to_string(), "3.1".to_string()));
        assert_eq!(asked[1], (ASSIGNEES_PROMPT.to_string(), "alice".to_string()));
        assert_eq!(settings.version, "3.2");
        assert_eq!(settings.assignees, vec!["alice", "bob"]);
        // Token came from the file, so it was not asked
        assert_eq!(settings.token, "file-token");
    }

    #[test]
    fn test_interactive_mode_asks_for_missing_token() {
        let prompter = ScriptedPrompter::new(&["3.2", "alice", "typed-token"]);
        let settings = collect_settings(
            &ConfigFile::default(),
            &SettingsOverrides::default(),
            None,
            "d".to_string(),
            &prompter,
        )
        .unwrap();

        assert_eq!(prompter.asked.borrow().len(), 3);
        assert_eq!(settings.token, "typed-token");
        assert_eq!(settings.token_source, TokenSource::Prompt);
        assert_eq!(settings.owner, DEFAULT_OWNER);
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(settings.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_interactive_blank_answer_fails_validation() {
        let prompter = ScriptedPrompter::new(&["  ", "alice"]);
        let result = collect_settings(
            &full_file(),
            &SettingsOverrides::default(),
            None,
            "d".to_string(),
            &prompter,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_command_line_values_are_not_prompted() {
        let overrides = SettingsOverrides {
            version: Some("5.0".to_string()),
            assignees: vec!["dave".to_string()],
            ..SettingsOverrides::default()
        };
        let prompter = ScriptedPrompter::new(&[]);
        let settings =
            collect_settings(&full_file(), &overrides, None, "d".to_string(), &prompter).unwrap();

        assert!(prompter.asked.borrow().is_empty());
        assert_eq!(settings.version, "5.0");
    }

    #[test]
    fn test_validate_projects() {
        assert!(validate_projects(&default_projects()).is_ok());
        assert!(matches!(validate_projects(&[]), Err(Error::Config(_))));

        let duplicate = vec![
            ProjectDefinition::new("A", "a", "h", "b"),
            ProjectDefinition::new("A", "a2", "h", "b"),
        ];
        assert!(
            matches!(validate_projects(&duplicate), Err(Error::Config(msg)) if msg.contains("duplicate"))
        );

        let blank_base = vec![ProjectDefinition::new("A", "a", "h", " ")];
        assert!(
            matches!(validate_projects(&blank_base), Err(Error::Config(msg)) if msg.contains("`base`"))
        );
    }

    #[test]
    fn test_from_settings_round_trips_projects() {
        let prompter = ScriptedPrompter::new(&[]);
        let settings =
            collect_settings(&full_file(), &automatic(), None, "d".to_string(), &prompter).unwrap();
        let projects = default_projects();

        let file = ConfigFile::from_settings(&settings, &projects, &full_file());
        assert_eq!(file.version.as_deref(), Some("3.1"));
        assert_eq!(file.token.as_deref(), Some("file-token"));
        assert_eq!(file.projects_or_default(), projects);
    }

    #[test]
    fn test_from_settings_never_saves_env_token() {
        let without_token = ConfigFile {
            token: None,
            ..full_file()
        };
        let settings = collect_settings(
            &without_token,
            &automatic(),
            Some("env-token".to_string()),
            "d".to_string(),
            &ScriptedPrompter::new(&[]),
        )
        .unwrap();

        let file = ConfigFile::from_settings(&settings, &default_projects(), &without_token);
        assert_eq!(file.token, None);

        let text = toml::to_string(&file).unwrap();
        assert!(!text.contains("env-token"), "{text}");
    }

    #[test]
    fn test_from_settings_saves_typed_token() {
        let prompter = ScriptedPrompter::new(&["3.2", "alice", "typed-token"]);
        let settings = collect_settings(
            &ConfigFile::default(),
            &SettingsOverrides::default(),
            None,
            "d".to_string(),
            &prompter,
        )
        .unwrap();

        let file =
            ConfigFile::from_settings(&settings, &default_projects(), &ConfigFile::default());
        assert_eq!(file.token.as_deref(), Some("typed-token"));
    }
}
