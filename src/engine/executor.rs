use crate::command::CommandInvocation;
use crate::core::{
    CliError, CliExecutionError, CliResult, CommandOutput, ExecutionResult, InteractiveMode,
    OutputFormat, ProcessRunner,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, info};

/// 外部CLIを1回実行し、結果を成功値または構造化エラーに変換する
///
/// 再試行は行わない。ダウンロード・アップロードは上書きモードによって
/// 冪等ではないため、再試行の判断は呼び出し側に委ねる。
pub async fn execute<R>(
    runner: &R,
    program: &Path,
    command: &str,
    fragments: Vec<String>,
    extra_env: BTreeMap<String, String>,
    interactive: InteractiveMode,
    format: OutputFormat,
) -> CliResult<CommandOutput>
where
    R: ProcessRunner + ?Sized,
{
    let invocation = CommandInvocation::new(program, command, fragments, extra_env)
        .with_interactive(interactive);
    execute_invocation(runner, &invocation, format).await
}

/// 構築済みの呼び出しを実行
pub async fn execute_invocation<R>(
    runner: &R,
    invocation: &CommandInvocation,
    format: OutputFormat,
) -> CliResult<CommandOutput>
where
    R: ProcessRunner + ?Sized,
{
    debug!(
        command_line = %invocation.command_line(),
        env = ?invocation.masked_env(),
        "executing Minerva CLI"
    );

    let result = runner.run(invocation).await?;
    interpret(invocation, result, format)
}

/// 実行結果の解釈（終了コード → 成功値 / エラー）
pub fn interpret(
    invocation: &CommandInvocation,
    result: ExecutionResult,
    format: OutputFormat,
) -> CliResult<CommandOutput> {
    if !result.success() {
        error!(
            command = invocation.command(),
            exit_code = ?result.exit_code,
            stderr = %result.stderr.trim(),
            "Minerva CLI failed"
        );
        return Err(CliExecutionError {
            command: invocation.command().to_string(),
            exit_code: result.exit_code,
            stdout: result.stdout,
            stderr: result.stderr,
            argv: invocation.argv(),
        }
        .into());
    }

    info!(
        command = invocation.command(),
        started_at = %result.started_at.format("%Y-%m-%d %H:%M:%S"),
        duration_ms = result.duration.as_millis() as u64,
        "Minerva CLI completed"
    );

    match format {
        OutputFormat::Text => Ok(CommandOutput::Text(result.stdout)),
        OutputFormat::Json => match serde_json::from_str(&result.stdout) {
            Ok(value) => Ok(CommandOutput::Json(value)),
            Err(source) => Err(CliError::MalformedOutput {
                stdout: result.stdout,
                source,
            }),
        },
    }
}
