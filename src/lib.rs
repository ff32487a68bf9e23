//! Minerva CLI の型付きクライアント
//!
//! 外部の Minerva CLI 実行ファイルに対する呼び出しを組み立てて実行する。
//! 秘密情報（パスワード・トークン）は環境変数でのみ子プロセスに渡し、
//! 引数リストやログには現れない。

pub mod auth;
pub mod cli;
pub mod client;
pub mod command;
pub mod core;
pub mod engine;
pub mod logging;
pub mod tree;

pub use crate::auth::{AuthArguments, AuthContext};
pub use crate::client::{
    ClaimOptions, ClientConfig, CommonOptions, DownloadOptions, FetchStatusOptions,
    MinervaCliClient, SelectItemsOptions, SignInOptions, StageOptions, UploadOptions,
};
pub use crate::command::CommandInvocation;
pub use crate::core::{
    AuthMode, CliError, CliExecutionError, CliResult, CommandOutput, ExecutionResult,
    InteractiveMode, OutputFormat, OverwriteMode, ProcessRunner, SelectMode,
};
pub use crate::engine::TokioProcessRunner;
