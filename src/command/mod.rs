// コマンド構築層 - 引数ビルダーと呼び出し値
// 全て副作用を持たない

pub mod args;
pub mod invocation;

pub use args::{
    bool_token, build_auth_args, build_auth_env, build_common_args, build_glob_args,
    build_ignore_override_args, build_local_args, build_remote_args, build_repeated_flag,
    PASSWORD_ENV, STDOUT_SINK, TOKEN_ENV,
};
pub use invocation::{is_secret_key, mask_env, quote_argv, CommandInvocation, MASK};
