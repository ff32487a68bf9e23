// Custom error types for CLI invocation
// 外部CLI呼び出し専用のカスタムエラー型定義

use super::types::AuthMode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// クライアント固有のエラー型
#[derive(Error, Debug)]
pub enum CliError {
    #[error("認証設定エラー ({mode}): {reason}")]
    InvalidAuthConfiguration { mode: AuthMode, reason: String },

    #[error("CLI実行ファイルが見つかりません: {}", describe_path(.path))]
    ExecutableNotFound { path: Option<PathBuf> },

    #[error(transparent)]
    Execution(#[from] CliExecutionError),

    #[error("CLI出力のJSON解析エラー: {source}")]
    MalformedOutput {
        stdout: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("タイムアウト: `{command}` が {}秒以内に完了しませんでした", .timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },

    #[error("プロセス起動エラー: {} - {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("引数エラー: {field} - {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("設定エラー: {message}")]
    Configuration { message: String },
}

/// 終了コードが0以外だった場合の詳細
///
/// stdout/stderr/argv は実際の値を保持する。argv に秘密情報は含まれない
/// （秘密は環境変数でのみ渡される）。
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Minerva CLI failed: {command}\nReturn Code: {}\nCommand: {}\nSTDERR: {}",
    exit_code_label(.exit_code),
    crate::command::quote_argv(.argv),
    .stderr.trim()
)]
pub struct CliExecutionError {
    /// サブコマンド名（例: `download`）
    pub command: String,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// 実行ファイルパスを含む完全な引数ベクタ
    pub argv: Vec<String>,
}

fn describe_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(
            "{} (パスを明示するか環境変数 {} を設定してください)",
            path.display(),
            crate::client::config::EXECUTABLE_ENV
        ),
        None => format!(
            "未設定 (パスを明示するか環境変数 {} を設定してください)",
            crate::client::config::EXECUTABLE_ENV
        ),
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

impl CliError {
    /// 認証設定エラーの作成
    pub fn invalid_auth(mode: AuthMode, reason: impl Into<String>) -> Self {
        Self::InvalidAuthConfiguration {
            mode,
            reason: reason.into(),
        }
    }

    /// 引数エラーの作成
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 実行エラーの詳細を取得
    pub fn execution(&self) -> Option<&CliExecutionError> {
        match self {
            Self::Execution(err) => Some(err),
            _ => None,
        }
    }

    /// 呼び出し側が再試行を検討できるかどうか
    ///
    /// クライアント自身は再試行しない。入力の誤りは再試行しても直らない。
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Execution(_) | Self::Timeout { .. } | Self::Spawn { .. } => true,
            Self::InvalidAuthConfiguration { .. }
            | Self::ExecutableNotFound { .. }
            | Self::MalformedOutput { .. }
            | Self::InvalidArgument { .. }
            | Self::Configuration { .. } => false,
        }
    }

    /// エラーコンテキストを取得
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::InvalidAuthConfiguration { mode, .. } => ErrorContext::new("auth_validation")
                .with_resource(mode.as_str())
                .with_suggestion("認証モードに必要な項目のみを設定してください"),
            Self::ExecutableNotFound { path } => {
                let context = ErrorContext::new("executable_resolution").with_suggestion(format!(
                    "環境変数 {} にCLIのフルパスを設定してください",
                    crate::client::config::EXECUTABLE_ENV
                ));
                match path {
                    Some(path) => context.with_resource(path.display().to_string()),
                    None => context,
                }
            }
            Self::Execution(err) => ErrorContext::new("cli_execution")
                .with_resource(err.command.clone())
                .with_suggestion("STDERRの内容を確認してください"),
            Self::MalformedOutput { .. } => ErrorContext::new("output_parsing")
                .with_suggestion("--output の出力先がJSONを返す設定か確認してください"),
            Self::Timeout { command, .. } => ErrorContext::new("cli_execution")
                .with_resource(command.clone())
                .with_suggestion("タイムアウト値を延ばすか対象を分割してください"),
            Self::Spawn { program, .. } => ErrorContext::new("process_spawn")
                .with_resource(program.display().to_string())
                .with_suggestion("実行権限とパスを確認してください"),
            Self::InvalidArgument { field, .. } => {
                ErrorContext::new("argument_validation").with_resource(field.clone())
            }
            Self::Configuration { message } => ErrorContext::new("configuration")
                .with_suggestion(format!("設定を確認してください: {message}")),
        }
    }
}

/// エラーコンテキスト情報
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// 実行していた操作
    pub operation: String,
    /// 関連するリソース（コマンド名・パス等）
    pub resource: Option<String>,
    /// エラー解決のための提案
    pub suggestion: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            suggestion: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// クライアントの結果型
pub type CliResult<T> = std::result::Result<T, CliError>;
