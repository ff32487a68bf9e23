//! 認証コンテキストと秘密情報の分離
//!
//! `AuthContext` は4つの相互排他的な認証方式のいずれかを表す。
//! プロセス起動前に必ず [`AuthContext::validate`] を通し、
//! [`AuthContext::split`] で非秘密フラグと秘密環境変数に分ける。

use crate::command::{build_auth_args, build_auth_env, MASK};
use crate::core::{AuthMode, CliError, CliResult};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// 認証コンテキスト（不変値）
///
/// `database` を省略した場合はクライアントのデフォルトDBを使用する。
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    mode: AuthMode,
    user: Option<String>,
    database: Option<String>,
    password: Option<String>,
    token: Option<String>,
    certificate_config: Option<PathBuf>,
}

/// 認証情報を分離した結果
#[derive(Clone, PartialEq, Eq)]
pub struct AuthArguments {
    /// コマンドラインに載せてよいフラグ
    pub args: Vec<String>,
    /// 環境変数でのみ渡す秘密値
    pub env: BTreeMap<String, String>,
}

impl fmt::Debug for AuthArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthArguments")
            .field("args", &self.args)
            .field("env", &crate::command::mask_env(&self.env))
            .finish()
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl AuthContext {
    /// 方式のみを指定して作成（フィールドは `with_*` で設定）
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            user: None,
            database: None,
            password: None,
            token: None,
            certificate_config: None,
        }
    }

    /// ユーザー名 + パスワード認証
    pub fn explicit(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(AuthMode::Explicit)
            .with_user(user)
            .with_password(password)
    }

    /// リフレッシュトークン認証
    pub fn refresh_token(token: impl Into<String>) -> Self {
        Self::new(AuthMode::RefreshToken).with_token(token)
    }

    /// 証明書設定ファイルによる代理認証
    pub fn impersonate(certificate_config: impl Into<PathBuf>) -> Self {
        Self::new(AuthMode::ImpersonateByCertificate).with_certificate_config(certificate_config)
    }

    /// Windows統合認証
    pub fn windows() -> Self {
        Self::new(AuthMode::WindowsIntegrated)
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_certificate_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.certificate_config = Some(path.into());
        self
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn certificate_config(&self) -> Option<&Path> {
        self.certificate_config.as_deref()
    }

    fn has_certificate(&self) -> bool {
        self.certificate_config
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty())
    }

    /// 方式ごとに必要な項目だけが設定されているか検証
    pub fn validate(&self) -> CliResult<()> {
        let has_password = present(&self.password);
        let has_token = present(&self.token);
        let has_cert = self.has_certificate();

        match self.mode {
            AuthMode::Explicit => {
                if !has_password {
                    return Err(CliError::invalid_auth(self.mode, "password is required"));
                }
                if has_token || has_cert {
                    return Err(CliError::invalid_auth(
                        self.mode,
                        "token and certificate config must not be set",
                    ));
                }
            }
            AuthMode::RefreshToken => {
                if !has_token {
                    return Err(CliError::invalid_auth(self.mode, "token is required"));
                }
                if has_password || has_cert {
                    return Err(CliError::invalid_auth(
                        self.mode,
                        "password and certificate config must not be set",
                    ));
                }
            }
            AuthMode::ImpersonateByCertificate => {
                if !has_cert {
                    return Err(CliError::invalid_auth(
                        self.mode,
                        "certificate config path is required",
                    ));
                }
                if has_password || has_token {
                    return Err(CliError::invalid_auth(
                        self.mode,
                        "password and token must not be set",
                    ));
                }
            }
            AuthMode::WindowsIntegrated => {
                if has_password || has_token || has_cert {
                    return Err(CliError::invalid_auth(
                        self.mode,
                        "password, token and certificate config must not be set",
                    ));
                }
            }
        }
        Ok(())
    }

    /// 検証後、非秘密フラグと秘密環境変数に分離する
    ///
    /// `database` 未指定時は `default_database` を使う。
    pub fn split(&self, default_database: &str) -> CliResult<AuthArguments> {
        self.validate()?;

        let database = self
            .database
            .as_deref()
            .filter(|db| !db.is_empty())
            .unwrap_or(default_database);
        let certconfig = match self.mode {
            AuthMode::ImpersonateByCertificate => self
                .certificate_config
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            _ => None,
        };

        Ok(AuthArguments {
            args: build_auth_args(
                database,
                self.user.as_deref(),
                Some(self.mode),
                certconfig.as_deref(),
            ),
            env: build_auth_env(self.mode, self.password.as_deref(), self.token.as_deref()),
        })
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("mode", &self.mode)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("password", &self.password.as_ref().map(|_| MASK))
            .field("token", &self.token.as_ref().map(|_| MASK))
            .field("certificate_config", &self.certificate_config)
            .finish()
    }
}
