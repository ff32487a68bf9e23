// CLI呼び出しに関連するデータ型定義
// 外部ツールに渡すトークン表現（as_str）はここで一元管理する

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 認証方式（相互排他）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum AuthMode {
    /// ユーザー名 + パスワード
    #[serde(rename = "Explicit")]
    Explicit,
    /// 証明書設定ファイルによる代理認証
    #[serde(rename = "Impersonate")]
    ImpersonateByCertificate,
    /// リフレッシュトークン
    #[serde(rename = "Refresh_Token")]
    RefreshToken,
    /// Windows統合認証
    #[serde(rename = "Windows")]
    WindowsIntegrated,
}

impl AuthMode {
    /// `--auth:mode` に渡すトークン
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "Explicit",
            Self::ImpersonateByCertificate => "Impersonate",
            Self::RefreshToken => "Refresh_Token",
            Self::WindowsIntegrated => "Windows",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 外部ツールが対話UIを開いてよいかどうか
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum InteractiveMode {
    /// 完全無人実行（トークンは `None`）
    #[default]
    #[serde(rename = "None")]
    #[value(name = "none")]
    Unattended,
    #[serde(rename = "Console")]
    Console,
    #[serde(rename = "Graphical")]
    Graphical,
}

impl InteractiveMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unattended => "None",
            Self::Console => "Console",
            Self::Graphical => "Graphical",
        }
    }

    /// UIを表示できるモードかどうか
    pub const fn allows_prompt(&self) -> bool {
        !matches!(self, Self::Unattended)
    }
}

impl fmt::Display for InteractiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ローカルファイル衝突時の上書きポリシー
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum OverwriteMode {
    Error,
    #[default]
    Overwrite,
    Append,
    Ignore,
    /// 新しいバージョンとして保存
    Snapshot,
}

impl OverwriteMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Overwrite => "Overwrite",
            Self::Append => "Append",
            Self::Ignore => "Ignore",
            Self::Snapshot => "Snapshot",
        }
    }
}

impl fmt::Display for OverwriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// select-items の選択ダイアログ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum SelectMode {
    SaveFile,
    SelectFile,
    SelectFolder,
    SelectFileFolder,
}

impl SelectMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SaveFile => "SaveFile",
            Self::SelectFile => "SelectFile",
            Self::SelectFolder => "SelectFolder",
            Self::SelectFileFolder => "SelectFileFolder",
        }
    }
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 標準出力の解釈方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 1回のプロセス実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// 終了コード（シグナル終了時は None）
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl ExecutionResult {
    /// 計測情報なしで結果を作成（テスト・モック用）
    pub fn new(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// コマンドの成功値
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Text(String),
    Json(serde_json::Value),
}

impl CommandOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// テキストとして取り出す（JSONは再シリアライズ）
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Json(value) => value.to_string(),
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// JSON出力を任意の型へデシリアライズ
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        match self {
            Self::Json(value) => T::deserialize(value),
            Self::Text(text) => serde_json::from_str(text),
        }
    }
}
