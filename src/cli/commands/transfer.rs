// リモートアイテムを扱うサブコマンド

use crate::auth::AuthContext;
use crate::client::{
    ClaimOptions, CommonOptions, DownloadOptions, FetchStatusOptions, MinervaCliClient,
    SelectItemsOptions, UploadOptions,
};
use crate::core::{CliResult, CommandOutput, ProcessRunner};
use tracing::info;

pub async fn claim<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    auth: &AuthContext,
    remotes: &[String],
    globs: &[String],
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    let options = ClaimOptions {
        globs: globs.to_vec(),
        common,
    };
    client.claim(remotes, auth, &options).await
}

pub async fn unclaim<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    auth: &AuthContext,
    remotes: &[String],
    globs: &[String],
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    let options = ClaimOptions {
        globs: globs.to_vec(),
        common,
    };
    client.unclaim(remotes, auth, &options).await
}

/// Execute download command
pub async fn download<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    auth: &AuthContext,
    remotes: &[String],
    options: &DownloadOptions,
) -> CliResult<CommandOutput> {
    info!(
        count = remotes.len(),
        destination = options.path.as_deref().unwrap_or("."),
        "downloading"
    );
    client.download(remotes, auth, options).await
}

/// Execute upload command
pub async fn upload<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    auth: &AuthContext,
    remote: &str,
    options: &UploadOptions,
) -> CliResult<CommandOutput> {
    info!(remote, globs = options.globs.len(), "uploading");
    client.upload(remote, auth, options).await
}

pub async fn fetch_status<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    auth: &AuthContext,
    globs: &[String],
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    let options = FetchStatusOptions {
        globs: globs.to_vec(),
        common,
    };
    client.fetch_status(auth, &options).await
}

pub async fn select_items<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    auth: &AuthContext,
    options: &SelectItemsOptions,
) -> CliResult<CommandOutput> {
    client.select_items(auth, options).await
}
