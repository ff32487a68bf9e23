// サブコマンドの実行 - 引数をクライアント操作に変換する

pub mod session;
pub mod transfer;
pub mod workspace;

use super::args::{Cli, Commands, LocalArgs};
use crate::auth::AuthContext;
use crate::client::{
    CommonOptions, DownloadOptions, MinervaCliClient, SelectItemsOptions, UploadOptions,
};
use crate::core::{CommandOutput, ProcessRunner};
use anyhow::{Context, Result};

impl LocalArgs {
    /// 呼び出しごとの共通オプションに変換
    pub fn to_options(&self, json: bool) -> CommonOptions {
        let mut options = CommonOptions::new();
        options.local = self.local.clone();
        options.output = self.output.clone();
        options.ui_theme = self.ui_theme.clone();
        if json {
            options = options.json();
        }
        options
    }
}

/// 解析済みのコマンドラインを1つのクライアント操作として実行
pub async fn dispatch<R>(
    client: &MinervaCliClient<R>,
    cli: &Cli,
    auth: &AuthContext,
) -> Result<CommandOutput>
where
    R: ProcessRunner,
{
    let json = cli.json;
    let output = match &cli.command {
        Commands::SignIn { force, local } => {
            session::sign_in(client, auth, *force, local.to_options(json)).await
        }
        Commands::SignOut { local } => session::sign_out(client, local.to_options(json)).await,
        Commands::Claim {
            remotes,
            globs,
            local,
        } => transfer::claim(client, auth, remotes, globs, local.to_options(json)).await,
        Commands::Unclaim {
            remotes,
            globs,
            local,
        } => transfer::unclaim(client, auth, remotes, globs, local.to_options(json)).await,
        Commands::Download {
            remotes,
            overwrite,
            path,
            filter,
            dependencies,
            content,
            no_session,
            remote_start,
            local,
        } => {
            let options = DownloadOptions {
                overwrite: *overwrite,
                no_session: *no_session,
                content: *content,
                dependencies: *dependencies,
                filter: filter.clone(),
                path: path.clone(),
                remote_start: remote_start.clone(),
                common: local.to_options(json),
            };
            transfer::download(client, auth, remotes, &options).await
        }
        Commands::DownloadId { id, path } => client.download_by_id(id, path, auth).await,
        Commands::Upload {
            remote,
            globs,
            overwrite,
            no_session,
            close_session,
            override_ignore_rules,
            remote_start,
            version_folders,
            local,
        } => {
            let options = UploadOptions {
                globs: globs.clone(),
                overwrite: *overwrite,
                no_session: *no_session,
                close_session: *close_session,
                override_ignore_rules: override_ignore_rules.clone(),
                remote_start: remote_start.clone(),
                version_folders: version_folders.clone(),
                common: local.to_options(json),
            };
            transfer::upload(client, auth, remote, &options).await
        }
        Commands::FetchStatus { globs, local } => {
            transfer::fetch_status(client, auth, globs, local.to_options(json)).await
        }
        Commands::SelectItems {
            mode,
            filter,
            dependencies,
            multi_select,
            remote_start,
            remotes,
            local,
        } => {
            let mut options = SelectItemsOptions::new(*mode);
            options.filter = filter.clone();
            options.dependencies = *dependencies;
            options.multi_select = *multi_select;
            options.remote_start = remote_start.clone();
            options.remotes = remotes.clone();
            options.common = local.to_options(json);
            transfer::select_items(client, auth, &options).await
        }
        Commands::GetLocal { path, local } => {
            workspace::get_local(client, path, local.to_options(json)).await
        }
        Commands::GetStatus { local } => workspace::get_status(client, local.to_options(json)).await,
        Commands::Stage {
            globs,
            override_ignore_rules,
            local,
        } => {
            workspace::stage(client, globs, override_ignore_rules, local.to_options(json)).await
        }
        Commands::Unstage { globs, local } => {
            workspace::unstage(client, globs, local.to_options(json)).await
        }
    };
    output.context("Minerva CLI command failed")
}

/// 出力の表示用文字列（JSONは整形する）
pub fn render(output: &CommandOutput) -> Result<String> {
    match output {
        CommandOutput::Text(text) => Ok(text.clone()),
        CommandOutput::Json(value) => {
            serde_json::to_string_pretty(value).context("Failed to format JSON output")
        }
    }
}
