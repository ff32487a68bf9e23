// 実行エンジン層 - プロセス起動と結果の解釈

pub mod executor;
pub mod runner;

pub use executor::{execute, execute_invocation, interpret};
pub use runner::TokioProcessRunner;
