// 操作ごとのオプション定義
// 各オプションは操作固有の引数フラグメントを純粋関数として組み立てる

use crate::command::{bool_token, build_glob_args, build_ignore_override_args, build_remote_args};
use crate::core::{InteractiveMode, OutputFormat, OverwriteMode, SelectMode};

fn push_flag(args: &mut Vec<String>, flag: &str, enabled: bool) {
    if enabled {
        args.push(flag.to_string());
    }
}

fn push_value(args: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        args.extend([flag.to_string(), value.to_string()]);
    }
}

fn push_bool(args: &mut Vec<String>, flag: &str, value: Option<bool>) {
    if let Some(value) = value {
        args.extend([flag.to_string(), bool_token(value).to_string()]);
    }
}

/// 呼び出しごとの共通オプション（未指定はクライアントのデフォルトを使用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonOptions {
    pub interactive: Option<InteractiveMode>,
    pub local: Option<String>,
    pub ui_theme: Option<String>,
    pub output: Option<String>,
    pub format: OutputFormat,
}

impl CommonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interactive(mut self, interactive: InteractiveMode) -> Self {
        self.interactive = Some(interactive);
        self
    }

    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = Some(local.into());
        self
    }

    pub fn with_ui_theme(mut self, theme: impl Into<String>) -> Self {
        self.ui_theme = Some(theme.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// 標準出力をJSONとして解析する
    pub fn json(mut self) -> Self {
        self.format = OutputFormat::Json;
        self
    }
}

/// sign-in（`--force` は sign-in 専用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignInOptions {
    pub force: bool,
    pub common: CommonOptions,
}

impl SignInOptions {
    pub fn action_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, "--force", self.force);
        args
    }
}

/// claim / unclaim
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimOptions {
    pub globs: Vec<String>,
    pub common: CommonOptions,
}

impl ClaimOptions {
    /// globフィルタはリモート指定より前に置く
    pub fn action_args(&self, targets: &[String]) -> Vec<String> {
        let mut args = build_glob_args(&self.globs);
        args.extend(build_remote_args(targets));
        args
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadOptions {
    pub overwrite: OverwriteMode,
    pub no_session: bool,
    pub content: bool,
    pub dependencies: Option<bool>,
    pub filter: Option<String>,
    /// ダウンロード先のローカルパス
    pub path: Option<String>,
    pub remote_start: Option<String>,
    pub common: CommonOptions,
}

impl DownloadOptions {
    pub fn action_args(&self, targets: &[String]) -> Vec<String> {
        let mut args = vec!["--overwrite".to_string(), self.overwrite.as_str().to_string()];
        push_flag(&mut args, "--no-session", self.no_session);
        push_flag(&mut args, "--content", self.content);
        push_bool(&mut args, "--dependencies", self.dependencies);
        push_value(&mut args, "--filter", self.filter.as_deref());
        push_value(&mut args, "--path", self.path.as_deref());
        push_value(&mut args, "--remote-start", self.remote_start.as_deref());
        args.extend(build_remote_args(targets));
        args
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadOptions {
    pub globs: Vec<String>,
    pub overwrite: OverwriteMode,
    pub no_session: bool,
    pub close_session: bool,
    /// `.minervaignore` のルールを上書きするパターン
    pub override_ignore_rules: Vec<String>,
    pub remote_start: Option<String>,
    pub version_folders: Option<String>,
    pub common: CommonOptions,
}

impl UploadOptions {
    pub fn action_args(&self, remote: &str) -> Vec<String> {
        let mut args = vec![
            "--remote".to_string(),
            remote.to_string(),
            "--overwrite".to_string(),
            self.overwrite.as_str().to_string(),
        ];
        push_flag(&mut args, "--no-session", self.no_session);
        push_flag(&mut args, "--close-session", self.close_session);
        args.extend(build_glob_args(&self.globs));
        args.extend(build_ignore_override_args(&self.override_ignore_rules));
        push_value(&mut args, "--remote-start", self.remote_start.as_deref());
        push_value(&mut args, "--version-folders", self.version_folders.as_deref());
        args
    }
}

/// fetch-status（読み取り専用の状態問い合わせ）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchStatusOptions {
    pub globs: Vec<String>,
    pub common: CommonOptions,
}

impl FetchStatusOptions {
    pub fn action_args(&self) -> Vec<String> {
        build_glob_args(&self.globs)
    }
}

/// select-items（対話的な選択ダイアログ）
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItemsOptions {
    pub mode: SelectMode,
    pub filter: Option<String>,
    pub dependencies: Option<bool>,
    pub multi_select: Option<bool>,
    pub remote_start: Option<String>,
    pub remotes: Vec<String>,
    pub common: CommonOptions,
}

impl SelectItemsOptions {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            filter: None,
            dependencies: None,
            multi_select: None,
            remote_start: None,
            remotes: Vec::new(),
            common: CommonOptions::default(),
        }
    }

    pub fn action_args(&self) -> Vec<String> {
        let mut args = vec!["--mode".to_string(), self.mode.as_str().to_string()];
        push_bool(&mut args, "--dependencies", self.dependencies);
        push_value(&mut args, "--filter", self.filter.as_deref());
        push_bool(&mut args, "--multiSelect", self.multi_select);
        push_value(&mut args, "--remote-start", self.remote_start.as_deref());
        args.extend(build_remote_args(&self.remotes));
        args
    }
}

/// stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageOptions {
    pub override_ignore_rules: Vec<String>,
    pub common: CommonOptions,
}

impl StageOptions {
    pub fn action_args(&self, globs: &[String]) -> Vec<String> {
        let mut args = build_glob_args(globs);
        args.extend(build_ignore_override_args(&self.override_ignore_rules));
        args
    }
}
