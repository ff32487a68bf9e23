// クライアント操作の統合テスト（ランナーはモック）

use crate::fixtures::{mock_runner_returning, test_config, MockProcessRunner, RecordingRunner};
use minerva_cli::command::{PASSWORD_ENV, TOKEN_ENV};
use minerva_cli::{
    AuthContext, ClaimOptions, CliError, CommonOptions, DownloadOptions, ExecutionResult,
    InteractiveMode, MinervaCliClient, SelectItemsOptions, SelectMode, StageOptions,
    UploadOptions,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn executable() -> NamedTempFile {
    NamedTempFile::new().unwrap()
}

#[tokio::test]
async fn test_every_operation_uses_its_command_name() {
    let exe = executable();
    let runner = Arc::new(RecordingRunner::new());
    let client = MinervaCliClient::with_runner(test_config(exe.path()), Arc::clone(&runner)).unwrap();
    let auth = AuthContext::explicit("alice", "pw");
    let common = CommonOptions::default();

    client.sign_in(&auth, &Default::default()).await.unwrap();
    client.sign_out(&common).await.unwrap();
    client.claim(&["A"], &auth, &ClaimOptions::default()).await.unwrap();
    client.unclaim(&["A"], &auth, &ClaimOptions::default()).await.unwrap();
    client.download(&["A"], &auth, &DownloadOptions::default()).await.unwrap();
    client.upload("R", &auth, &UploadOptions::default()).await.unwrap();
    client.fetch_status(&auth, &Default::default()).await.unwrap();
    client
        .select_items(&auth, &SelectItemsOptions::new(SelectMode::SelectFolder))
        .await
        .unwrap();
    client.get_local("/ws/a", &common).await.unwrap();
    client.get_status(&common).await.unwrap();
    client.stage(&["*"], &StageOptions::default()).await.unwrap();
    client.unstage(&["*"], &common).await.unwrap();

    let commands: Vec<String> = runner
        .invocations()
        .iter()
        .map(|i| i.command().to_string())
        .collect();
    assert_eq!(
        commands,
        vec![
            "sign-in",
            "sign-out",
            "claim",
            "unclaim",
            "download",
            "upload",
            "fetch-status",
            "select-items",
            "get-local",
            "get-status",
            "stage",
            "unstage",
        ]
    );

    for invocation in runner.invocations() {
        assert_eq!(invocation.program(), exe.path());
        let has_auth = invocation.fragments().iter().any(|f| f.starts_with("--auth:"));
        let authenticated = !matches!(
            invocation.command(),
            "sign-out" | "get-local" | "get-status" | "stage" | "unstage"
        );
        assert_eq!(has_auth, authenticated, "{}", invocation.command());
        assert_eq!(invocation.env().contains_key(PASSWORD_ENV), authenticated);
        assert!(invocation.fragments().iter().all(|f| f != "pw"));
    }
}

#[tokio::test]
async fn test_per_call_overrides_beat_defaults() {
    let exe = executable();
    let runner = Arc::new(RecordingRunner::new());
    let config = test_config(exe.path())
        .with_default_interactive(InteractiveMode::Console)
        .with_default_output(None);
    let client = MinervaCliClient::with_runner(config, Arc::clone(&runner)).unwrap();

    client.sign_out(&CommonOptions::default()).await.unwrap();
    client
        .sign_out(
            &CommonOptions::new()
                .with_interactive(InteractiveMode::Graphical)
                .with_ui_theme("dark")
                .with_output("file://out.json"),
        )
        .await
        .unwrap();

    let invocations = runner.invocations();
    assert_eq!(
        invocations[0].fragments(),
        ["--url", "http://minerva.test/Minerva", "--interactive", "Console"]
    );
    assert_eq!(
        invocations[1].fragments(),
        [
            "--url",
            "http://minerva.test/Minerva",
            "--interactive",
            "Graphical",
            "--ui-theme",
            "dark",
            "--output",
            "file://out.json",
        ]
    );
}

#[tokio::test]
async fn test_concurrent_calls_do_not_share_state() {
    let exe = executable();
    let runner = Arc::new(RecordingRunner::new());
    let client = Arc::new(
        MinervaCliClient::with_runner(test_config(exe.path()), Arc::clone(&runner)).unwrap(),
    );

    let mut handles = Vec::new();
    for n in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            let auth = if n % 2 == 0 {
                AuthContext::explicit(format!("user{n}"), format!("pw{n}"))
            } else {
                AuthContext::refresh_token(format!("tok{n}"))
            };
            let target = format!("item{n}");
            client
                .download(&[target], &auth, &DownloadOptions::default())
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let invocations = runner.invocations();
    assert_eq!(invocations.len(), 8);
    for invocation in invocations {
        let target = invocation.fragments().last().unwrap().clone();
        let n: usize = target.trim_start_matches("item").parse().unwrap();
        assert_eq!(invocation.env().len(), 1);
        if n % 2 == 0 {
            assert_eq!(invocation.env()[PASSWORD_ENV], format!("pw{n}"));
            assert!(invocation.fragments().contains(&format!("user{n}")));
        } else {
            assert_eq!(invocation.env()[TOKEN_ENV], format!("tok{n}"));
        }
    }
}

#[tokio::test]
async fn test_validation_happens_before_spawn() {
    let exe = executable();
    let mut runner = MockProcessRunner::new();
    runner.expect_run().never();
    let client = MinervaCliClient::with_runner(test_config(exe.path()), runner).unwrap();

    let cases = [
        AuthContext::explicit("alice", ""),
        AuthContext::windows().with_password("pw"),
        AuthContext::impersonate(PathBuf::new()),
        AuthContext::refresh_token("tok").with_certificate_config("/etc/cert.json"),
    ];
    for auth in &cases {
        let result = client.upload("R", auth, &UploadOptions::default()).await;
        assert!(
            matches!(result, Err(CliError::InvalidAuthConfiguration { .. })),
            "{auth:?}"
        );
    }
}

#[tokio::test]
async fn test_execution_error_keeps_output() {
    let exe = executable();
    let client = MinervaCliClient::with_runner(
        test_config(exe.path()),
        mock_runner_returning(2, "half done", "bad token"),
    )
    .unwrap();

    let error = client
        .claim(&["A"], &AuthContext::refresh_token("zz-secret-zz"), &ClaimOptions::default())
        .await
        .unwrap_err();

    let details = error.execution().expect("execution error");
    assert_eq!(details.exit_code, Some(2));
    assert_eq!(details.stdout, "half done");
    assert_eq!(details.stderr, "bad token");
    assert!(details.argv.iter().all(|a| !a.contains("zz-secret-zz")));
    assert!(!format!("{error:?}").contains("zz-secret-zz"));
}

#[tokio::test]
async fn test_download_by_id_rejects_empty_id() {
    let exe = executable();
    let mut runner = MockProcessRunner::new();
    runner.expect_run().never();
    let client = MinervaCliClient::with_runner(test_config(exe.path()), runner).unwrap();

    let result = client.download_by_id("", "/tmp", &AuthContext::windows()).await;
    assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
}

#[tokio::test]
async fn test_download_to_uses_overwrite_and_path() {
    let exe = executable();
    let mut runner = MockProcessRunner::new();
    runner
        .expect_run()
        .withf(|invocation| {
            invocation.fragments().ends_with(
                &["--overwrite", "Overwrite", "--path", "/data/in", "--remote", "Ans_Data/X"]
                    .map(String::from),
            )
        })
        .times(1)
        .returning(|_| Ok(ExecutionResult::new(Some(0), "", "")));
    let client = MinervaCliClient::with_runner(test_config(exe.path()), runner).unwrap();

    client
        .download_to("Ans_Data/X", "/data/in", &AuthContext::windows())
        .await
        .unwrap();
}
