use crate::auth::AuthContext;
use crate::client::{CommonOptions, MinervaCliClient, SignInOptions};
use crate::core::{CliResult, CommandOutput, ProcessRunner};
use tracing::info;

/// Execute sign-in command
pub async fn sign_in<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    auth: &AuthContext,
    force: bool,
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    info!(user = auth.user().unwrap_or("-"), mode = %auth.mode(), "signing in");
    client
        .sign_in(auth, &SignInOptions { force, common })
        .await
}

/// Execute sign-out command
pub async fn sign_out<R: ProcessRunner>(
    client: &MinervaCliClient<R>,
    common: CommonOptions,
) -> CliResult<CommandOutput> {
    client.sign_out(&common).await
}
