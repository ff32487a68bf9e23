//! Minerva CLI クライアント（ファサード）
//!
//! 1操作 = 1メソッド。各メソッドはクライアントのデフォルトと呼び出しごとの
//! オプションをマージし、認証を検証・分離したうえで実行エンジンに渡す。
//! クライアントは構築後に不変で、`Arc` で共有して並行に呼び出せる。

pub mod config;
pub mod options;

pub use config::{resolve_executable, ClientConfig, EXECUTABLE_ENV};
pub use options::{
    ClaimOptions, CommonOptions, DownloadOptions, FetchStatusOptions, SelectItemsOptions,
    SignInOptions, StageOptions, UploadOptions,
};

use crate::auth::{AuthArguments, AuthContext};
use crate::command::{build_common_args, build_local_args};
use crate::core::{
    CliError, CliResult, CommandOutput, InteractiveMode, OverwriteMode, ProcessRunner,
};
use crate::engine::{execute, TokioProcessRunner};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// `download_by_id` がリモートパスを組み立てる際のアイテム種別
const DATA_ITEM_TYPE: &str = "Ans_Data";

fn to_strings(values: &[impl AsRef<str>]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_string()).collect()
}

fn require_non_empty(field: &str, values: &[String]) -> CliResult<()> {
    if values.is_empty() {
        return Err(CliError::invalid_argument(
            field,
            "at least one value is required",
        ));
    }
    if let Some(index) = values.iter().position(|v| v.is_empty()) {
        return Err(CliError::invalid_argument(
            field,
            format!("value at index {index} is empty"),
        ));
    }
    Ok(())
}

/// Minerva CLI クライアント
pub struct MinervaCliClient<R = TokioProcessRunner>
where
    R: ProcessRunner,
{
    config: ClientConfig,
    executable: PathBuf,
    runner: R,
}

impl MinervaCliClient<TokioProcessRunner> {
    /// 実プロセスを起動するクライアントを作成
    ///
    /// 実行ファイルが解決できない場合は `ExecutableNotFound` で失敗する。
    pub fn new(config: ClientConfig) -> CliResult<Self> {
        let runner = TokioProcessRunner::new().with_timeout(config.timeout());
        Self::with_runner(config, runner)
    }
}

impl<R> MinervaCliClient<R>
where
    R: ProcessRunner,
{
    /// 任意のランナーでクライアントを作成（コンストラクタインジェクション）
    pub fn with_runner(config: ClientConfig, runner: R) -> CliResult<Self> {
        let executable =
            resolve_executable(config.executable(), std::env::var_os(EXECUTABLE_ENV))?;
        Ok(Self {
            config,
            executable,
            runner,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// 呼び出しごとの指定がなければクライアントのデフォルト
    fn interactive(&self, common: &CommonOptions) -> InteractiveMode {
        common
            .interactive
            .unwrap_or(self.config.default_interactive())
    }

    fn common_args(&self, common: &CommonOptions) -> Vec<String> {
        build_common_args(
            self.config.url(),
            self.interactive(common),
            common.local.as_deref(),
            common.ui_theme.as_deref(),
            common.output.as_deref().or(self.config.default_output()),
        )
    }

    fn local_args(&self, common: &CommonOptions) -> Vec<String> {
        build_local_args(
            self.interactive(common),
            common.local.as_deref(),
            common.output.as_deref().or(self.config.default_output()),
            common.ui_theme.as_deref(),
        )
    }

    /// 認証を検証し、デフォルトDBをマージして分離する
    fn auth_args(&self, auth: &AuthContext) -> CliResult<AuthArguments> {
        auth.split(self.config.database())
    }

    /// 共通引数 + 認証引数 + 操作引数を組み立てて実行
    async fn run_authenticated(
        &self,
        command: &str,
        auth: &AuthContext,
        common: &CommonOptions,
        action: Vec<String>,
    ) -> CliResult<CommandOutput> {
        let AuthArguments { args, env } = self.auth_args(auth)?;
        let mut fragments = self.common_args(common);
        fragments.extend(args);
        fragments.extend(action);
        execute(
            &self.runner,
            &self.executable,
            command,
            fragments,
            env,
            self.interactive(common),
            common.format,
        )
        .await
    }

    async fn run_local(
        &self,
        command: &str,
        common: &CommonOptions,
        mut fragments: Vec<String>,
    ) -> CliResult<CommandOutput> {
        fragments.extend(self.local_args(common));
        execute(
            &self.runner,
            &self.executable,
            command,
            fragments,
            BTreeMap::new(),
            self.interactive(common),
            common.format,
        )
        .await
    }

    /// サインイン
    #[tracing::instrument(skip_all, fields(command = "sign-in", mode = %auth.mode(), force = options.force))]
    pub async fn sign_in(
        &self,
        auth: &AuthContext,
        options: &SignInOptions,
    ) -> CliResult<CommandOutput> {
        self.run_authenticated("sign-in", auth, &options.common, options.action_args())
            .await
    }

    /// サインアウト（認証不要）
    #[tracing::instrument(skip_all, fields(command = "sign-out"))]
    pub async fn sign_out(&self, options: &CommonOptions) -> CliResult<CommandOutput> {
        let fragments = self.common_args(options);
        execute(
            &self.runner,
            &self.executable,
            "sign-out",
            fragments,
            BTreeMap::new(),
            self.interactive(options),
            options.format,
        )
        .await
    }

    /// リモートアイテムを排他編集のために確保
    #[tracing::instrument(skip_all, fields(command = "claim", targets = targets.len()))]
    pub async fn claim(
        &self,
        targets: &[impl AsRef<str> + Sync],
        auth: &AuthContext,
        options: &ClaimOptions,
    ) -> CliResult<CommandOutput> {
        let targets = to_strings(targets);
        require_non_empty("targets", &targets)?;
        self.run_authenticated("claim", auth, &options.common, options.action_args(&targets))
            .await
    }

    /// 確保の解除
    #[tracing::instrument(skip_all, fields(command = "unclaim", targets = targets.len()))]
    pub async fn unclaim(
        &self,
        targets: &[impl AsRef<str> + Sync],
        auth: &AuthContext,
        options: &ClaimOptions,
    ) -> CliResult<CommandOutput> {
        let targets = to_strings(targets);
        require_non_empty("targets", &targets)?;
        self.run_authenticated(
            "unclaim",
            auth,
            &options.common,
            options.action_args(&targets),
        )
        .await
    }

    /// リモートアイテムをローカルへダウンロード
    #[tracing::instrument(
        skip_all,
        fields(command = "download", targets = targets.len(), overwrite = %options.overwrite)
    )]
    pub async fn download(
        &self,
        targets: &[impl AsRef<str> + Sync],
        auth: &AuthContext,
        options: &DownloadOptions,
    ) -> CliResult<CommandOutput> {
        let targets = to_strings(targets);
        require_non_empty("targets", &targets)?;
        self.run_authenticated(
            "download",
            auth,
            &options.common,
            options.action_args(&targets),
        )
        .await
    }

    /// 単一のリモートパスをローカルディレクトリへダウンロード（上書き）
    pub async fn download_to(
        &self,
        remote: &str,
        local_directory: &str,
        auth: &AuthContext,
    ) -> CliResult<CommandOutput> {
        let options = DownloadOptions {
            overwrite: OverwriteMode::Overwrite,
            path: Some(local_directory.to_string()),
            ..Default::default()
        };
        self.download(&[remote], auth, &options).await
    }

    /// `Ans_Data` のIDを指定してダウンロード
    ///
    /// リモートパスは `\Ans_Data\<id>` の単純な連結。他のアイテム種別には使わない。
    pub async fn download_by_id(
        &self,
        id: &str,
        local_directory: &str,
        auth: &AuthContext,
    ) -> CliResult<CommandOutput> {
        if id.is_empty() {
            return Err(CliError::invalid_argument("id", "must not be empty"));
        }
        self.download_to(&data_item_path(id), local_directory, auth)
            .await
    }

    /// ローカルファイルをMinervaへアップロード
    #[tracing::instrument(skip_all, fields(command = "upload", remote = remote, overwrite = %options.overwrite))]
    pub async fn upload(
        &self,
        remote: &str,
        auth: &AuthContext,
        options: &UploadOptions,
    ) -> CliResult<CommandOutput> {
        if remote.is_empty() {
            return Err(CliError::invalid_argument("remote", "must not be empty"));
        }
        self.run_authenticated("upload", auth, &options.common, options.action_args(remote))
            .await
    }

    /// ローカルファイルの最新状態をサーバーに問い合わせる
    #[tracing::instrument(skip_all, fields(command = "fetch-status"))]
    pub async fn fetch_status(
        &self,
        auth: &AuthContext,
        options: &FetchStatusOptions,
    ) -> CliResult<CommandOutput> {
        self.run_authenticated(
            "fetch-status",
            auth,
            &options.common,
            options.action_args(),
        )
        .await
    }

    /// 選択ダイアログでアイテムを選び、その記述を出力させる
    #[tracing::instrument(skip_all, fields(command = "select-items", mode = %options.mode))]
    pub async fn select_items(
        &self,
        auth: &AuthContext,
        options: &SelectItemsOptions,
    ) -> CliResult<CommandOutput> {
        let interactive = self.interactive(&options.common);
        if !interactive.allows_prompt() {
            warn!(
                interactive = %interactive,
                "select-items without a UI-capable interactive mode may fail"
            );
        }
        self.run_authenticated(
            "select-items",
            auth,
            &options.common,
            options.action_args(),
        )
        .await
    }

    /// ローカルファイル/フォルダの作業ディレクトリ情報を取得
    #[tracing::instrument(skip_all, fields(command = "get-local", path = path))]
    pub async fn get_local(
        &self,
        path: &str,
        options: &CommonOptions,
    ) -> CliResult<CommandOutput> {
        if path.is_empty() {
            return Err(CliError::invalid_argument("path", "must not be empty"));
        }
        self.run_local(
            "get-local",
            options,
            vec!["--path".to_string(), path.to_string()],
        )
        .await
    }

    /// アップロード用にステージされたファイルを表示
    #[tracing::instrument(skip_all, fields(command = "get-status"))]
    pub async fn get_status(&self, options: &CommonOptions) -> CliResult<CommandOutput> {
        self.run_local("get-status", options, Vec::new()).await
    }

    /// globパターンでファイルをステージ
    #[tracing::instrument(skip_all, fields(command = "stage", globs = globs.len()))]
    pub async fn stage(
        &self,
        globs: &[impl AsRef<str> + Sync],
        options: &StageOptions,
    ) -> CliResult<CommandOutput> {
        let globs = to_strings(globs);
        require_non_empty("globs", &globs)?;
        self.run_local("stage", &options.common, options.action_args(&globs))
            .await
    }

    /// ステージからファイルを外す
    #[tracing::instrument(skip_all, fields(command = "unstage", globs = globs.len()))]
    pub async fn unstage(
        &self,
        globs: &[impl AsRef<str> + Sync],
        options: &CommonOptions,
    ) -> CliResult<CommandOutput> {
        let globs = to_strings(globs);
        require_non_empty("globs", &globs)?;
        self.run_local(
            "unstage",
            options,
            crate::command::build_glob_args(&globs),
        )
        .await
    }
}

/// `\Ans_Data\<id>` 形式のリモートパス
pub fn data_item_path(id: &str) -> String {
    format!("\\{DATA_ITEM_TYPE}\\{id}")
}
