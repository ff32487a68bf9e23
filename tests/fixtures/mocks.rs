// テスト用のランナー実装
// mockallの自動生成モックと、呼び出しを記録するだけのランナー

pub use minerva_cli::core::MockProcessRunner;

use async_trait::async_trait;
use minerva_cli::{CliResult, CommandInvocation, ExecutionResult, ProcessRunner};
use std::sync::Mutex;

/// 常に同じ結果を返すモック
pub fn mock_runner_returning(exit_code: i32, stdout: &'static str, stderr: &'static str) -> MockProcessRunner {
    let mut runner = MockProcessRunner::new();
    runner
        .expect_run()
        .returning(move |_| Ok(ExecutionResult::new(Some(exit_code), stdout, stderr)));
    runner
}

/// 呼び出しを記録し、成功を返すランナー
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<CommandInvocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: &CommandInvocation) -> CliResult<ExecutionResult> {
        self.invocations.lock().unwrap().push(invocation.clone());
        // 他のタスクに実行を譲り、並行実行を起こしやすくする
        tokio::task::yield_now().await;
        Ok(ExecutionResult::new(Some(0), invocation.command(), ""))
    }
}
