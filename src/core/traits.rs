// プロセス実行の抽象化トレイト
// 実プロセスとテスト用モックを差し替えるための境界

use super::error::CliResult;
use super::types::ExecutionResult;
use crate::command::CommandInvocation;
use async_trait::async_trait;
use mockall::automock;

/// 外部プロセス実行の抽象化トレイト
///
/// 1回の呼び出しで1プロセスを起動し、終了まで待つ。
/// 終了コードが0以外でも `Ok` を返す（解釈は実行エンジンの責務）。
#[automock]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// 呼び出しを実行し、終了コードと出力を取得
    async fn run(&self, invocation: &CommandInvocation) -> CliResult<ExecutionResult>;
}

// ProcessRunner for Box<dyn ProcessRunner>
#[async_trait]
impl ProcessRunner for Box<dyn ProcessRunner> {
    async fn run(&self, invocation: &CommandInvocation) -> CliResult<ExecutionResult> {
        self.as_ref().run(invocation).await
    }
}

// ProcessRunner for Arc<R>
#[async_trait]
impl<R: ProcessRunner + ?Sized> ProcessRunner for std::sync::Arc<R> {
    async fn run(&self, invocation: &CommandInvocation) -> CliResult<ExecutionResult> {
        self.as_ref().run(invocation).await
    }
}
