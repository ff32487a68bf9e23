use crate::auth::AuthContext;
use crate::client::ClientConfig;
use crate::core::{AuthMode, InteractiveMode, OverwriteMode, SelectMode};
use crate::logging::LogFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// パスワードを渡す環境変数（コマンドライン引数では受け付けない）
pub const PASSWORD_INPUT_ENV: &str = "MINERVA_PASS";
/// リフレッシュトークンを渡す環境変数
pub const TOKEN_INPUT_ENV: &str = "MINERVA_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "minerva_cli")]
#[command(about = "Typed front end for the Minerva command-line client")]
#[command(version)]
pub struct Cli {
    /// Minerva server URL
    #[arg(long, env = "MINERVA_URL", global = true)]
    pub url: Option<String>,

    /// Default database name
    #[arg(long, env = "MINERVA_DB", global = true)]
    pub database: Option<String>,

    /// Path to the Minerva CLI executable
    #[arg(long, env = "ANS_MINERVA_CLI", global = true)]
    pub exe: Option<PathBuf>,

    /// Interactivity level passed to the CLI
    #[arg(long, value_enum, global = true)]
    pub interactive: Option<InteractiveMode>,

    /// Parse the CLI output as JSON and pretty-print it
    #[arg(long, global = true)]
    pub json: bool,

    /// Kill the CLI if it runs longer than this many seconds
    #[arg(long, env = "MINERVA_TIMEOUT_SECS", global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// グローバル引数からクライアント設定を組み立てる
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| anyhow::anyhow!("--url (or MINERVA_URL) is required"))?;
        let database = self
            .database
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| anyhow::anyhow!("--database (or MINERVA_DB) is required"))?;

        let mut config = ClientConfig::new(url, database);
        if let Some(exe) = &self.exe {
            config = config.with_executable(exe);
        }
        if let Some(interactive) = self.interactive {
            config = config.with_default_interactive(interactive);
        }
        if let Some(seconds) = self.timeout {
            config = config.with_timeout(Duration::from_secs(seconds));
        }
        Ok(config)
    }
}

/// 認証フラグ（秘密情報は環境変数からのみ読む）
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// Authentication mode
    #[arg(long, value_enum, default_value_t = AuthMode::Explicit, global = true)]
    pub auth_mode: AuthMode,

    /// User name (explicit mode)
    #[arg(long, env = "MINERVA_USER", global = true)]
    pub user: Option<String>,

    /// Database override for authentication
    #[arg(long, global = true)]
    pub auth_database: Option<String>,

    /// Certificate configuration file (impersonate mode)
    #[arg(long, global = true)]
    pub certconfig: Option<PathBuf>,
}

impl AuthArgs {
    /// 環境変数の参照関数を与えて認証コンテキストを作る
    pub fn to_context<F>(&self, lookup: F) -> AuthContext
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut auth = AuthContext::new(self.auth_mode);
        if let Some(user) = &self.user {
            auth = auth.with_user(user);
        }
        if let Some(database) = &self.auth_database {
            auth = auth.with_database(database);
        }
        if let Some(path) = &self.certconfig {
            auth = auth.with_certificate_config(path);
        }
        match self.auth_mode {
            AuthMode::Explicit => {
                if let Some(password) = lookup(PASSWORD_INPUT_ENV) {
                    auth = auth.with_password(password);
                }
            }
            AuthMode::RefreshToken => {
                if let Some(token) = lookup(TOKEN_INPUT_ENV) {
                    auth = auth.with_token(token);
                }
            }
            AuthMode::ImpersonateByCertificate | AuthMode::WindowsIntegrated => {}
        }
        auth
    }
}

/// 共通のローカル指定
#[derive(Args, Debug, Clone, Default)]
pub struct LocalArgs {
    /// Local workspace directory
    #[arg(long)]
    pub local: Option<String>,

    /// Output sink (default: stream://stdout)
    #[arg(long)]
    pub output: Option<String>,

    /// UI theme for graphical dialogs
    #[arg(long)]
    pub ui_theme: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and cache the session
    SignIn {
        /// Sign in even if a session already exists
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Sign out of the current session
    SignOut {
        #[command(flatten)]
        local: LocalArgs,
    },

    /// Claim remote items for exclusive editing
    Claim {
        /// Remote items to claim
        #[arg(required = true)]
        remotes: Vec<String>,

        /// Glob filter applied before claiming
        #[arg(long = "glob")]
        globs: Vec<String>,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Release claimed remote items
    Unclaim {
        #[arg(required = true)]
        remotes: Vec<String>,

        #[arg(long = "glob")]
        globs: Vec<String>,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Download remote items
    Download {
        #[arg(required = true)]
        remotes: Vec<String>,

        /// Conflict policy for existing local files
        #[arg(long, value_enum, default_value_t = OverwriteMode::Overwrite)]
        overwrite: OverwriteMode,

        /// Local destination path
        #[arg(long)]
        path: Option<String>,

        /// Only download items matching this filter
        #[arg(long)]
        filter: Option<String>,

        /// Include or exclude dependencies
        #[arg(long)]
        dependencies: Option<bool>,

        /// Download file content
        #[arg(long)]
        content: bool,

        /// Do not record a session
        #[arg(long)]
        no_session: bool,

        #[arg(long)]
        remote_start: Option<String>,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Download an Ans_Data item by id
    DownloadId {
        id: String,

        /// Local destination directory
        #[arg(long)]
        path: String,
    },

    /// Upload local files to a remote location
    Upload {
        /// Remote destination
        remote: String,

        #[arg(long = "glob")]
        globs: Vec<String>,

        #[arg(long, value_enum, default_value_t = OverwriteMode::Overwrite)]
        overwrite: OverwriteMode,

        #[arg(long)]
        no_session: bool,

        #[arg(long)]
        close_session: bool,

        /// Patterns that override .minervaignore rules
        #[arg(long = "override-ignore")]
        override_ignore_rules: Vec<String>,

        #[arg(long)]
        remote_start: Option<String>,

        #[arg(long)]
        version_folders: Option<String>,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Ask the server for the latest state of local files
    FetchStatus {
        #[arg(long = "glob")]
        globs: Vec<String>,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Open a selection dialog and print the chosen items
    SelectItems {
        #[arg(long, value_enum)]
        mode: SelectMode,

        #[arg(long)]
        filter: Option<String>,

        #[arg(long)]
        dependencies: Option<bool>,

        #[arg(long)]
        multi_select: Option<bool>,

        #[arg(long)]
        remote_start: Option<String>,

        #[arg(long = "remote")]
        remotes: Vec<String>,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Show working-directory information for a local path
    GetLocal {
        path: String,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Show files staged for upload
    GetStatus {
        #[command(flatten)]
        local: LocalArgs,
    },

    /// Stage files for upload
    Stage {
        #[arg(required = true)]
        globs: Vec<String>,

        #[arg(long = "override-ignore")]
        override_ignore_rules: Vec<String>,

        #[command(flatten)]
        local: LocalArgs,
    },

    /// Remove files from the staging area
    Unstage {
        #[arg(required = true)]
        globs: Vec<String>,

        #[command(flatten)]
        local: LocalArgs,
    },
}
