use crate::command::CommandInvocation;
use crate::core::{CliError, CliResult, ExecutionResult, ProcessRunner};
use async_trait::async_trait;
use chrono::Utc;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::warn;

/// tokio::process による実プロセス実行
///
/// 継承した環境変数に呼び出しの追加環境変数を上書きする。
/// タイムアウト時は子プロセスを kill して `Timeout` を返す。
///
/// 対話レベルがプロンプト可能（Console / Graphical）なら標準入力を引き継ぎ、
/// 端末のフォアグラウンドのまま実行する。無人実行では標準入力を `/dev/null` にし、
/// Unix では子を専用のプロセスグループで起動してタイムアウト時にグループごと kill する。
/// 対話実行の子が起動した孫プロセスはタイムアウトしても残りうる。
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    timeout: Option<Duration>,
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// 子プロセスに標準入力を引き継ぐかどうか
pub fn inherits_stdin(invocation: &CommandInvocation) -> bool {
    invocation.interactive().allows_prompt()
}

#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    match killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
        Ok(()) | Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => warn!(pid, "failed to kill process group: {e}"),
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &CommandInvocation) -> CliResult<ExecutionResult> {
        let interactive = inherits_stdin(invocation);

        let mut command = Command::new(invocation.program());
        command
            .args(invocation.args())
            .envs(invocation.env())
            .stdin(if interactive {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        if !interactive {
            command.process_group(0);
        }

        let started_at = Utc::now();
        let clock = Instant::now();

        let child = command.spawn().map_err(|source| CliError::Spawn {
            program: invocation.program().to_path_buf(),
            source,
        })?;
        let pid = child.id();

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, wait).await {
                Ok(output) => output,
                Err(_) => {
                    warn!(command = invocation.command(), ?timeout, "CLI process timed out");
                    #[cfg(unix)]
                    if let (false, Some(pid)) = (interactive, pid) {
                        kill_process_group(pid);
                    }
                    // 子プロセス本体は wait_with_output のフューチャと一緒に破棄され kill される
                    return Err(CliError::Timeout {
                        command: invocation.command().to_string(),
                        timeout,
                    });
                }
            },
            None => wait.await,
        }
        .map_err(|source| CliError::Spawn {
            program: invocation.program().to_path_buf(),
            source,
        })?;

        Ok(ExecutionResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            started_at,
            duration: clock.elapsed(),
        })
    }
}
