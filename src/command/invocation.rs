use crate::core::InteractiveMode;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// マスク後の表示値
pub const MASK: &str = "***";

/// 秘密情報を含む環境変数キーかどうか
pub fn is_secret_key(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    upper.contains("PASSWORD") || upper.contains("TOKEN")
}

/// ログ出力用に秘密値をマスクした環境変数マップを返す
pub fn mask_env(env: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    env.iter()
        .map(|(key, value)| {
            let shown = if is_secret_key(key) {
                MASK.to_string()
            } else {
                value.clone()
            };
            (key.clone(), shown)
        })
        .collect()
}

fn quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\"'\"'"))
    }
}

/// 診断表示用にPOSIXシェル風のクォートで引数を連結
pub fn quote_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 1回分の外部コマンド呼び出し
///
/// 呼び出しごとに新しく構築し、保持しない。`Debug` は秘密値をマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: PathBuf,
    command: String,
    fragments: Vec<String>,
    env: BTreeMap<String, String>,
    interactive: InteractiveMode,
}

impl CommandInvocation {
    pub fn new(
        program: impl Into<PathBuf>,
        command: impl Into<String>,
        fragments: Vec<String>,
        env: BTreeMap<String, String>,
    ) -> Self {
        Self {
            program: program.into(),
            command: command.into(),
            fragments,
            env,
            interactive: InteractiveMode::Unattended,
        }
    }

    /// 対話レベル（プロンプト可能なら子プロセスに標準入力を引き継ぐ）
    pub fn with_interactive(mut self, interactive: InteractiveMode) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn interactive(&self) -> InteractiveMode {
        self.interactive
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// サブコマンド名
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// サブコマンド名以降の引数（プロセスに渡す順）
    pub fn args(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.command.as_str()).chain(self.fragments.iter().map(String::as_str))
    }

    /// 継承環境に上書きする追加の環境変数（実値）
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// `[program, command, ...fragments]`
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args().map(str::to_string))
            .collect()
    }

    pub fn command_line(&self) -> String {
        quote_argv(&self.argv())
    }

    pub fn masked_env(&self) -> BTreeMap<String, String> {
        mask_env(&self.env)
    }
}

impl fmt::Debug for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandInvocation")
            .field("program", &self.program)
            .field("command", &self.command)
            .field("fragments", &self.fragments)
            .field("env", &self.masked_env())
            .field("interactive", &self.interactive)
            .finish()
    }
}
