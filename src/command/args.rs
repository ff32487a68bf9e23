// 引数ビルダー - 構造化オプションを順序付きのフラグ列に変換する純粋関数群
// 外部ツールはフラグの順序に依存する組み合わせがあるため、順序は固定

use crate::core::{AuthMode, InteractiveMode};
use std::collections::BTreeMap;

/// パスワード認証用の環境変数名
pub const PASSWORD_ENV: &str = "ANS_MINERVA_AUTH__PASSWORD";
/// トークン認証用の環境変数名
pub const TOKEN_ENV: &str = "ANS_MINERVA_AUTH__TOKEN";

/// 出力先のデフォルト（標準出力へストリーミング）
pub const STDOUT_SINK: &str = "stream://stdout";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// 三値フラグ用の真偽値トークン
pub fn bool_token(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// 全コマンド共通の引数
///
/// `--url U --interactive M [--local L] [--ui-theme T] [--output O]`
pub fn build_common_args(
    url: &str,
    interactive: InteractiveMode,
    local: Option<&str>,
    ui_theme: Option<&str>,
    output: Option<&str>,
) -> Vec<String> {
    let mut args = vec![
        "--url".to_string(),
        url.to_string(),
        "--interactive".to_string(),
        interactive.as_str().to_string(),
    ];
    if let Some(local) = non_empty(local) {
        args.extend(["--local".to_string(), local.to_string()]);
    }
    if let Some(theme) = non_empty(ui_theme) {
        args.extend(["--ui-theme".to_string(), theme.to_string()]);
    }
    if let Some(output) = non_empty(output) {
        args.extend(["--output".to_string(), output.to_string()]);
    }
    args
}

/// ローカル専用コマンド（get-local / get-status / stage / unstage）の引数
///
/// URLは不要。出力先は常に指定し、空の場合は標準出力にフォールバックする。
pub fn build_local_args(
    interactive: InteractiveMode,
    local: Option<&str>,
    output: Option<&str>,
    ui_theme: Option<&str>,
) -> Vec<String> {
    let mut args = vec!["--interactive".to_string(), interactive.as_str().to_string()];
    if let Some(local) = non_empty(local) {
        args.extend(["--local".to_string(), local.to_string()]);
    }
    args.extend([
        "--output".to_string(),
        non_empty(output).unwrap_or(STDOUT_SINK).to_string(),
    ]);
    if let Some(theme) = non_empty(ui_theme) {
        args.extend(["--ui-theme".to_string(), theme.to_string()]);
    }
    args
}

/// 認証関連の非秘密フラグ
///
/// `--auth:database D [--auth:user U] [--auth:mode M] [--auth:certconfig C]`
pub fn build_auth_args(
    database: &str,
    user: Option<&str>,
    mode: Option<AuthMode>,
    certconfig: Option<&str>,
) -> Vec<String> {
    let mut args = vec!["--auth:database".to_string(), database.to_string()];
    if let Some(user) = non_empty(user) {
        args.extend(["--auth:user".to_string(), user.to_string()]);
    }
    if let Some(mode) = mode {
        args.extend(["--auth:mode".to_string(), mode.as_str().to_string()]);
    }
    if let Some(certconfig) = non_empty(certconfig) {
        args.extend(["--auth:certconfig".to_string(), certconfig.to_string()]);
    }
    args
}

/// 認証の秘密値を環境変数として構築
///
/// 秘密キーは最大1つ。証明書・Windows認証では空。
pub fn build_auth_env(
    mode: AuthMode,
    password: Option<&str>,
    token: Option<&str>,
) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    match mode {
        AuthMode::Explicit => {
            if let Some(password) = non_empty(password) {
                env.insert(PASSWORD_ENV.to_string(), password.to_string());
            }
        }
        AuthMode::RefreshToken => {
            if let Some(token) = non_empty(token) {
                env.insert(TOKEN_ENV.to_string(), token.to_string());
            }
        }
        AuthMode::ImpersonateByCertificate | AuthMode::WindowsIntegrated => {}
    }
    env
}

/// 複数値オプションを `flag value` の繰り返しに展開（入力順を保持）
pub fn build_repeated_flag<I, S>(flag: &str, values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| [flag.to_string(), value.as_ref().to_string()])
        .collect()
}

pub fn build_remote_args<I, S>(remotes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_repeated_flag("--remote", remotes)
}

pub fn build_glob_args<I, S>(globs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_repeated_flag("--glob", globs)
}

/// `.minervaignore` の除外ルールを上書きするパターン
pub fn build_ignore_override_args<I, S>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_repeated_flag("--override-minervaignore", patterns)
}
