//! Integration tests for the scanner
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, extract and merge pipeline end-to-end.

use hostsift::config::{resolve_settings, ScanMode, ScanOverrides, ScanSettings};
use hostsift::scanner::{run_scan, WorkerPool};
use hostsift::state::RunState;
use hostsift::ConfigError;
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates settings for `example.com` with the given mode and worker count
fn create_test_settings(mode: ScanMode, workers: usize) -> ScanSettings {
    let mut settings = ScanSettings::for_domain("example.com");
    settings.mode = mode;
    settings.workers = workers;
    settings.timeout = Duration::from_secs(5);
    settings
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Mounts a body-only page and a header-only page, returning their URLs
async fn mount_body_and_header_pages(mock_server: &MockServer) -> Vec<String> {
    Mock::given(method("GET"))
        .and(path("/body"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("see https://api.example.com/v1 and cdn.example.com"),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/header"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Location", "www.example.com/redirect"),
        )
        .mount(mock_server)
        .await;

    vec![
        format!("{}/body", mock_server.uri()),
        format!("{}/header", mock_server.uri()),
    ]
}

#[tokio::test]
async fn test_body_and_header_matches_in_both_mode() {
    let mock_server = MockServer::start().await;
    let urls = mount_body_and_header_pages(&mock_server).await;

    let report = run_scan(urls, create_test_settings(ScanMode::Both, 2))
        .await
        .expect("Scan failed");

    assert_eq!(
        report.matches,
        set(&["api.example.com", "cdn.example.com", "www.example.com"])
    );
    assert_eq!(report.attempted, 2);
    assert_eq!(report.fetched, 2);
}

#[tokio::test]
async fn test_headers_mode_ignores_body_matches() {
    let mock_server = MockServer::start().await;
    let urls = mount_body_and_header_pages(&mock_server).await;

    let report = run_scan(urls, create_test_settings(ScanMode::Headers, 2))
        .await
        .expect("Scan failed");

    assert_eq!(report.matches, set(&["www.example.com"]));
}

#[tokio::test]
async fn test_body_mode_ignores_header_matches() {
    let mock_server = MockServer::start().await;
    let urls = mount_body_and_header_pages(&mock_server).await;

    let report = run_scan(urls, create_test_settings(ScanMode::Body, 2))
        .await
        .expect("Scan failed");

    assert_eq!(report.matches, set(&["api.example.com", "cdn.example.com"]));
}

#[tokio::test]
async fn test_failed_url_does_not_abort_run() {
    let mock_server = MockServer::start().await;

    for i in 0..3 {
        Mock::given(method("GET"))
            .and(path(format!("/page{}", i)))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(format!("host{}.example.com", i)),
            )
            .mount(&mock_server)
            .await;
    }

    let mut urls: Vec<String> = (0..3)
        .map(|i| format!("{}/page{}", mock_server.uri(), i))
        .collect();
    // Port 1 is never listening, so this is a connection failure
    urls.insert(1, "http://127.0.0.1:1/unreachable".to_string());

    let pool = WorkerPool::new(create_test_settings(ScanMode::Both, 2)).expect("Pool setup failed");
    let counter = pool.progress_counter();
    let report = pool.run(urls).await.expect("Scan failed");

    assert_eq!(counter.load(Ordering::Relaxed), 4);
    assert_eq!(report.attempted, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.fetched, 3);
    assert_eq!(
        report.matches,
        set(&["host0.example.com", "host1.example.com", "host2.example.com"])
    );
}

#[tokio::test]
async fn test_serial_and_parallel_runs_agree() {
    let mock_server = MockServer::start().await;

    for i in 0..12 {
        // Every page repeats a shared host so merges overlap across workers
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("shared.example.com n{}.example.com", i))
                    .insert_header("x-origin", format!("edge{}.cdn.example.com", i % 3).as_str()),
            )
            .mount(&mock_server)
            .await;
    }

    let urls: Vec<String> = (0..12)
        .map(|i| format!("{}/p{}", mock_server.uri(), i))
        .collect();

    let serial = run_scan(urls.clone(), create_test_settings(ScanMode::Both, 1))
        .await
        .expect("Serial scan failed");
    let parallel = run_scan(urls, create_test_settings(ScanMode::Both, 8))
        .await
        .expect("Parallel scan failed");

    assert_eq!(serial.matches, parallel.matches);
    // 12 per-page hosts, 1 shared host, 3 edge hosts
    assert_eq!(serial.matches.len(), 16);
    assert_eq!(serial.attempted, 12);
    assert_eq!(parallel.attempted, 12);
}

#[tokio::test]
async fn test_more_workers_than_urls() {
    let mock_server = MockServer::start().await;
    let urls = mount_body_and_header_pages(&mock_server).await;

    let report = run_scan(urls, create_test_settings(ScanMode::Both, 32))
        .await
        .expect("Scan failed");

    assert_eq!(report.attempted, 2);
    assert_eq!(report.matches.len(), 3);
}

#[tokio::test]
async fn test_empty_url_list() {
    let report = run_scan(Vec::new(), create_test_settings(ScanMode::Both, 4))
        .await
        .expect("Scan failed");

    assert!(report.matches.is_empty());
    assert_eq!(report.total, 0);
    assert_eq!(report.attempted, 0);
}

#[tokio::test]
async fn test_error_status_still_scanned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("try help.example.com"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());

    let report = run_scan(vec![url.clone()], create_test_settings(ScanMode::Both, 1))
        .await
        .expect("Scan failed");
    assert_eq!(report.matches, set(&["help.example.com"]));

    let mut settings = create_test_settings(ScanMode::Both, 1);
    settings.success_only = true;
    let report = run_scan(vec![url], settings).await.expect("Scan failed");
    assert!(report.matches.is_empty());
    assert_eq!(report.skipped, 1);
    assert_eq!(report.attempted, 1);
}

#[tokio::test]
async fn test_fixed_request_headers_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("accept", "*/*"))
        .and(header("user-agent", "hostsift-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok.example.com"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut settings = create_test_settings(ScanMode::Body, 1);
    settings.user_agent = "hostsift-test/1.0".to_string();

    let report = run_scan(vec![format!("{}/", mock_server.uri())], settings)
        .await
        .expect("Scan failed");

    // The mock only answers when both headers match
    assert_eq!(report.matches, set(&["ok.example.com"]));
}

#[tokio::test]
async fn test_case_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Mail.Example.COM low.example.com"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());

    let report = run_scan(vec![url.clone()], create_test_settings(ScanMode::Body, 1))
        .await
        .expect("Scan failed");
    assert_eq!(report.matches, set(&["low.example.com"]));

    let mut settings = create_test_settings(ScanMode::Body, 1);
    settings.ignore_case = true;
    let report = run_scan(vec![url], settings).await.expect("Scan failed");
    assert_eq!(report.matches, set(&["Mail.Example.COM", "low.example.com"]));
}

#[tokio::test]
async fn test_invalid_mode_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let _urls = mount_body_and_header_pages(&mock_server).await;

    let overrides = ScanOverrides {
        domain: Some("example.com".to_string()),
        mode: Some("xx".to_string()),
        ..Default::default()
    };
    let result = resolve_settings(None, overrides);

    assert!(matches!(result, Err(ConfigError::InvalidMode(_))));
    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_slow_url_times_out_without_aborting_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow.example.com")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fast.example.com"))
        .mount(&mock_server)
        .await;

    let mut settings = create_test_settings(ScanMode::Body, 1);
    settings.timeout = Duration::from_secs(1);

    let urls = vec![
        format!("{}/slow", mock_server.uri()),
        format!("{}/fast", mock_server.uri()),
    ];
    let report = run_scan(urls, settings).await.expect("Scan failed");

    assert_eq!(report.attempted, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.fetched, 1);
    assert_eq!(report.matches, set(&["fast.example.com"]));
}

#[tokio::test]
async fn test_run_tracker_follows_pool_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/delayed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late.example.com")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let pool = WorkerPool::new(create_test_settings(ScanMode::Body, 1)).unwrap();
    let tracker = pool.run_tracker();
    assert_eq!(tracker.current(), RunState::Idle);

    let url = format!("{}/delayed", mock_server.uri());
    let handle = tokio::spawn(pool.run(vec![url]));

    let mut seen_draining = false;
    for _ in 0..40 {
        if tracker.current() == RunState::Draining {
            seen_draining = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(seen_draining, "run never reached Draining");

    let report = handle.await.unwrap().expect("Scan failed");
    assert_eq!(tracker.current(), RunState::Done);
    assert_eq!(report.matches, set(&["late.example.com"]));
}

#[tokio::test]
async fn test_large_body_scanned_end_to_end() {
    let mock_server = MockServer::start().await;

    let filler = "lorem ipsum dolor sit amet ".repeat(150_000);
    let body = format!("head.example.com {} tail.example.com", filler);

    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let urls = vec![format!("{}/large", mock_server.uri())];
    let report = run_scan(urls, create_test_settings(ScanMode::Body, 1))
        .await
        .expect("Scan failed");

    assert_eq!(report.fetched, 1);
    assert_eq!(report.matches, set(&["head.example.com", "tail.example.com"]));
}
