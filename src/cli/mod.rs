// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとクライアント操作の橋渡し

pub mod args;
pub mod commands;

// 公開API
pub use args::{AuthArgs, Cli, Commands, LocalArgs, PASSWORD_INPUT_ENV, TOKEN_INPUT_ENV};
pub use commands::{dispatch, render};
