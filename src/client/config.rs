// クライアント設定の具象実装

use crate::command::STDOUT_SINK;
use crate::core::{CliError, CliResult, InteractiveMode};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI実行ファイルのパスを指定する環境変数
pub const EXECUTABLE_ENV: &str = "ANS_MINERVA_CLI";
pub const URL_ENV: &str = "MINERVA_URL";
pub const DATABASE_ENV: &str = "MINERVA_DB";
pub const TIMEOUT_ENV: &str = "MINERVA_TIMEOUT_SECS";

/// クライアント全体のデフォルト設定
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    url: String,
    database: String,
    executable: Option<PathBuf>,
    default_interactive: InteractiveMode,
    default_output: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            executable: None,
            default_interactive: InteractiveMode::Unattended,
            default_output: Some(STDOUT_SINK.to_string()),
            timeout: None,
        }
    }

    /// 環境変数から設定を読み込む
    ///
    /// `MINERVA_URL` と `MINERVA_DB` は必須。実行ファイルのパスは
    /// クライアント作成時に `ANS_MINERVA_CLI` から解決される。
    pub fn from_env() -> CliResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む（テスト用に分離）
    pub fn from_lookup<F>(lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| CliError::configuration(format!("{key} is not set")))
        };

        let mut config = Self::new(required(URL_ENV)?, required(DATABASE_ENV)?);

        if let Some(path) = lookup(EXECUTABLE_ENV).filter(|p| !p.is_empty()) {
            config.executable = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                CliError::configuration(format!("{TIMEOUT_ENV} must be a whole number of seconds: {raw}"))
            })?;
            config.timeout = Some(Duration::from_secs(seconds));
        }

        Ok(config)
    }

    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    pub fn with_default_interactive(mut self, interactive: InteractiveMode) -> Self {
        self.default_interactive = interactive;
        self
    }

    /// `None` を指定すると `--output` を付けない
    pub fn with_default_output(mut self, output: Option<String>) -> Self {
        self.default_output = output;
        self
    }

    /// 呼び出し側が課すタイムアウト（超過時は子プロセスを終了）
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    pub fn default_interactive(&self) -> InteractiveMode {
        self.default_interactive
    }

    pub fn default_output(&self) -> Option<&str> {
        self.default_output.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// 実行ファイルのパスを解決し、存在を確認する
///
/// 明示パスを優先し、なければ環境変数の値を使う。
pub fn resolve_executable(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
) -> CliResult<PathBuf> {
    let candidate = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from));

    match candidate {
        Some(path) if path.is_file() => Ok(path),
        other => Err(CliError::ExecutableNotFound { path: other }),
    }
}
