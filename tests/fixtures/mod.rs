// テストユーティリティ
// 偽のCLI実行ファイルとランナーのモック

pub mod mocks;

pub use mocks::*;

use minerva_cli::ClientConfig;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

pub const TEST_URL: &str = "http://minerva.test/Minerva";
pub const TEST_DATABASE: &str = "PLM";

/// 偽CLIの挙動:
/// - 引数に `FAIL` があれば stderr に "bad token" を出して終了コード2
/// - 引数に `SLOW` があれば5秒待つ
/// - `get-status` は JSON でない文字列を出す
/// - `fetch-status` は JSON を出す
/// - それ以外はコマンド名と各引数を1行ずつ出し、最後に秘密環境変数の値を出す
const FAKE_CLI_SCRIPT: &str = r#"#!/bin/sh
cmd="$1"
shift
for arg in "$@"; do
  if [ "$arg" = "FAIL" ]; then
    echo "partial output"
    echo "bad token" >&2
    exit 2
  fi
  if [ "$arg" = "SLOW" ]; then
    sleep 5
  fi
done
case "$cmd" in
  get-status)
    echo "Nothing staged"
    ;;
  fetch-status)
    echo "{\"command\":\"$cmd\",\"files\":[{\"path\":\"model.cdb\",\"state\":\"Modified\"}]}"
    ;;
  *)
    echo "$cmd"
    for arg in "$@"; do
      echo "$arg"
    done
    echo "password=${ANS_MINERVA_AUTH__PASSWORD:-}"
    echo "token=${ANS_MINERVA_AUTH__TOKEN:-}"
    ;;
esac
"#;

/// 偽CLIを1度だけ作成する
///
/// 書き込み中のファイルを別スレッドの fork が掴むと実行時に ETXTBSY になるため、
/// プロセスを起動するテストは必ずこれを先に呼ぶ。
#[cfg(unix)]
pub fn fake_cli() -> &'static Path {
    static FAKE: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = FAKE.get_or_init(|| {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("minerva-fake");
        std::fs::write(&path, FAKE_CLI_SCRIPT).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        (dir, path)
    });
    path
}

pub fn test_config(executable: &Path) -> ClientConfig {
    ClientConfig::new(TEST_URL, TEST_DATABASE).with_executable(executable)
}

/// 出力の行をベクタに
pub fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
