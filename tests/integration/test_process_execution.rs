// 実プロセスを起動する統合テスト（偽CLIスクリプトを使用）
#![cfg(unix)]

use crate::fixtures::{fake_cli, lines, test_config, TEST_URL};
use minerva_cli::{
    AuthContext, CliError, CommonOptions, DownloadOptions, FetchStatusOptions, MinervaCliClient,
    OutputFormat, SignInOptions,
};
use std::time::Duration;

#[tokio::test]
async fn test_download_argv_and_secret_env() {
    let client = MinervaCliClient::new(test_config(fake_cli())).unwrap();
    let auth = AuthContext::explicit("alice", "pw-secret");

    let output = client
        .download(&["A", "B"], &auth, &DownloadOptions::default())
        .await
        .unwrap();
    let text = output.into_text();

    assert_eq!(
        lines(&text),
        vec![
            "download",
            "--url",
            TEST_URL,
            "--interactive",
            "None",
            "--output",
            "stream://stdout",
            "--auth:database",
            "PLM",
            "--auth:user",
            "alice",
            "--auth:mode",
            "Explicit",
            "--overwrite",
            "Overwrite",
            "--remote",
            "A",
            "--remote",
            "B",
            "password=pw-secret",
            "token=",
        ]
    );
}

#[tokio::test]
async fn test_refresh_token_only_in_env() {
    let client = MinervaCliClient::new(test_config(fake_cli())).unwrap();
    let auth = AuthContext::refresh_token("tok-secret").with_database("OTHER");

    let text = client
        .sign_in(&auth, &SignInOptions { force: true, ..Default::default() })
        .await
        .unwrap()
        .into_text();
    let output = lines(&text);

    assert!(output.contains(&"token=tok-secret"));
    assert!(output.contains(&"password="));
    assert!(output.contains(&"OTHER"));
    assert!(output.contains(&"--force"));
    let args = &output[..output.len() - 2];
    assert!(args.iter().all(|arg| !arg.contains("tok-secret")));
}

#[tokio::test]
async fn test_nonzero_exit_reports_details() {
    let client = MinervaCliClient::new(test_config(fake_cli())).unwrap();
    let auth = AuthContext::explicit("alice", "pw-secret");

    let error = client
        .download(&["FAIL"], &auth, &DownloadOptions::default())
        .await
        .unwrap_err();

    let details = error.execution().expect("execution error");
    assert_eq!(details.command, "download");
    assert_eq!(details.exit_code, Some(2));
    assert_eq!(details.stdout.trim(), "partial output");
    assert!(details.stderr.contains("bad token"));
    assert_eq!(details.argv[0], fake_cli().to_string_lossy());
    assert_eq!(details.argv.last().map(String::as_str), Some("FAIL"));

    let message = error.to_string();
    assert!(message.starts_with("Minerva CLI failed: download"));
    assert!(message.contains("Return Code: 2"));
    assert!(message.contains("bad token"));
    assert!(!message.contains("pw-secret"));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_json_output_parsed() {
    let client = MinervaCliClient::new(test_config(fake_cli())).unwrap();
    let options = FetchStatusOptions {
        common: CommonOptions::new().json(),
        ..Default::default()
    };

    let output = client
        .fetch_status(&AuthContext::windows(), &options)
        .await
        .unwrap();

    let json = output.as_json().expect("json output");
    assert_eq!(json["command"], "fetch-status");
    assert_eq!(json["files"][0]["state"], "Modified");
}

#[tokio::test]
async fn test_malformed_json_output() {
    let client = MinervaCliClient::new(test_config(fake_cli())).unwrap();

    let error = client
        .get_status(&CommonOptions::new().json())
        .await
        .unwrap_err();

    match error {
        CliError::MalformedOutput { stdout, .. } => assert_eq!(stdout.trim(), "Nothing staged"),
        other => panic!("unexpected error: {other:?}"),
    }

    // テキストとしてなら同じ出力で成功する
    let mut options = CommonOptions::new();
    options.format = OutputFormat::Text;
    let output = client.get_status(&options).await.unwrap();
    assert_eq!(output.into_text().trim(), "Nothing staged");
}

#[tokio::test]
async fn test_timeout_kills_child() {
    let config = test_config(fake_cli()).with_timeout(Duration::from_millis(200));
    let client = MinervaCliClient::new(config).unwrap();

    let started = std::time::Instant::now();
    let error = client
        .download(&["SLOW"], &AuthContext::windows(), &DownloadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, CliError::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_local_commands_carry_no_auth() {
    let client = MinervaCliClient::new(test_config(fake_cli())).unwrap();

    let text = client
        .unstage(&["*.cdb"], &CommonOptions::new().with_local("/ws"))
        .await
        .unwrap()
        .into_text();

    assert_eq!(
        lines(&text),
        vec![
            "unstage",
            "--glob",
            "*.cdb",
            "--interactive",
            "None",
            "--local",
            "/ws",
            "--output",
            "stream://stdout",
            "password=",
            "token=",
        ]
    );
}

#[test]
fn test_missing_executable_fails_at_construction() {
    let config = test_config(std::path::Path::new("/nonexistent/minerva-cli"));
    let result = MinervaCliClient::new(config);
    assert!(matches!(
        result,
        Err(CliError::ExecutableNotFound { path: Some(_) })
    ));
}
