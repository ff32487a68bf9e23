// ローカル作業ディレクトリを扱うサブコマンド（認証不要）

use crate::client::{CommonOptions, MinervaCliClient, StageOptions};
use crate::core::{CliResult, CommandOutput, ProcessRunner};

pub async fn get_local<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    path: &str,
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    client.get_local(path, &common).await
}

pub async fn get_status<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    client.get_status(&common).await
}

pub async fn stage<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    globs: &[String],
    override_ignore_rules: &[String],
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    let options = StageOptions {
        override_ignore_rules: override_ignore_rules.to_vec(),
        common,
    };
    client.stage(globs, &options).await
}

pub async fn unstage<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    globs: &[String],
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    client.unstage(globs, &common).await
}
