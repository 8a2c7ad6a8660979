//! CLI argument parsing, exit codes and token resolution.
use clap::{CommandFactory, Parser, error::ErrorKind};
use derive_builder::Builder;
use secrecy::SecretString;
use std::{env, io::Write, process::ExitCode};

use crate::{
    Result, changelog::render::Format, error::GhchError, repo::Repository,
};

pub const EXIT_CODE_OK: u8 = 0;
pub const EXIT_CODE_PARSE_FLAG_ERROR: u8 = 1;
pub const EXIT_CODE_ERR: u8 = 2;

pub const DEFAULT_REMOTE: &str = "origin";
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";
pub const TOKEN_GIT_CONFIG_KEY: &str = "github.token";

/// Generate a changelog from the pull requests merged between version tags.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, default_value = ".")]
    /// Git repository path.
    pub repo: String,

    #[arg(short, long, default_value = "git")]
    /// Git executable path. Kept for compatibility: the repository is read
    /// in-process.
    pub git: String,

    #[arg(short, long)]
    /// Revision range start (exclusive).
    pub from: Option<String>,

    #[arg(short, long)]
    /// Revision range end (inclusive). Defaults to the current tip.
    pub to: Option<String>,

    #[arg(long, default_value = "")]
    /// GitHub token. Falls back to GITHUB_TOKEN, then git config github.token.
    pub token: String,

    #[arg(short, long, default_value_t = false)]
    /// Enable debug logging.
    pub verbose: bool,

    #[arg(long, default_value = DEFAULT_REMOTE)]
    /// Remote used to determine the repository owner and name.
    pub remote: String,

    #[arg(short = 'F', long, value_enum, default_value_t = Format::Json)]
    /// Output format.
    pub format: Format,

    #[arg(short = 'A', long, default_value_t = false)]
    /// Output a section for every version tag.
    pub all: bool,

    #[arg(short = 'N', long)]
    /// Label for the unreleased section, e.g. the version about to be tagged.
    pub next_version: Option<String>,

    #[arg(short, long)]
    /// Write output to this file instead of stdout.
    pub out_file: Option<String>,
}

/// What to generate, independent of how the providers are reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(setter(into), default)]
pub struct ChangelogOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub next_version: Option<String>,
    pub all: bool,
    pub format: Format,
}

impl Args {
    /// Changelog options from the parsed arguments. Empty strings count as
    /// not given.
    pub fn changelog_options(&self) -> Result<ChangelogOptions> {
        let non_empty = |value: &Option<String>| {
            value.clone().filter(|v| !v.is_empty())
        };

        ChangelogOptionsBuilder::default()
            .from(non_empty(&self.from))
            .to(non_empty(&self.to))
            .next_version(non_empty(&self.next_version))
            .all(self.all)
            .format(self.format)
            .build()
            .map_err(|err| GhchError::InvalidArgs(err.to_string()))
    }

    /// Resolve the GitHub token: flag, then environment, then git config.
    /// An empty token means anonymous access.
    pub async fn resolve_token(&self, repo: &dyn Repository) -> SecretString {
        self.resolve_token_from(env::var(TOKEN_ENV_VAR).ok(), repo)
            .await
    }

    async fn resolve_token_from(
        &self,
        env_token: Option<String>,
        repo: &dyn Repository,
    ) -> SecretString {
        let mut token = self.token.clone();

        if token.is_empty()
            && let Some(env_token) = env_token
        {
            token = env_token;
        }

        if token.is_empty() {
            match repo.config_value(TOKEN_GIT_CONFIG_KEY).await {
                Ok(Some(config_token)) => token = config_token,
                Ok(None) => {}
                Err(err) => {
                    log::debug!("unable to read {TOKEN_GIT_CONFIG_KEY}: {err}")
                }
            }
        }

        SecretString::from(token)
    }
}

/// Report a parse failure and map it to an exit code. Help text goes to
/// stderr unless help was explicitly requested.
pub fn handle_parse_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::from(EXIT_CODE_OK)
        }
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            ExitCode::from(EXIT_CODE_PARSE_FLAG_ERROR)
        }
        _ => {
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{err}");
            let _ = Args::command().write_help(&mut stderr);
            ExitCode::from(EXIT_CODE_PARSE_FLAG_ERROR)
        }
    }
}
