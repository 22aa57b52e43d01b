//! Downloader against a local HTTP server.

mod common;

use common::http_server::{self, Route};
use dlshare_core::downloader::{
    download_to_file, DownloadError, FetchOptions, MAX_REDIRECTS,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn writes_body_and_returns_length() {
    let body: Vec<u8> = (0u8..200).cycle().take(100 * 1024).collect();
    let server = http_server::start(vec![("/blob", Route::ok("application/octet-stream", body.clone()))]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("blob");

    let n = download_to_file(&server.url("/blob"), &dest, &FetchOptions::default(), None).unwrap();

    assert_eq!(n, body.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), body);
}

#[test]
fn truncates_existing_destination() {
    let server = http_server::start(vec![("/short", Route::ok("text/plain", b"new".to_vec()))]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("short");
    std::fs::write(&dest, b"old content that is longer").unwrap();

    download_to_file(&server.url("/short"), &dest, &FetchOptions::default(), None).unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"new");
}

#[test]
fn non_success_status_is_http_error() {
    let server = http_server::start(vec![]);
    let dir = tempdir().unwrap();
    let err = download_to_file(
        &server.url("/nope"),
        &dir.path().join("nope"),
        &FetchOptions::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, DownloadError::Http(404)), "got {err:?}");
}

#[test]
fn body_cap_is_enforced() {
    let server = http_server::start(vec![("/big", Route::ok("image/png", vec![7u8; 64 * 1024]))]);
    let dir = tempdir().unwrap();
    let opts = FetchOptions {
        max_body_bytes: Some(100),
        ..FetchOptions::default()
    };
    let err = download_to_file(&server.url("/big"), &dir.path().join("big"), &opts, None)
        .unwrap_err();
    assert!(matches!(err, DownloadError::TooLarge { limit: 100 }), "got {err:?}");
}

#[test]
fn abort_token_stops_transfer() {
    let server = http_server::start(vec![("/a", Route::ok("image/png", vec![1u8; 4096]))]);
    let dir = tempdir().unwrap();
    let abort = Arc::new(AtomicBool::new(true));
    let err = download_to_file(
        &server.url("/a"),
        &dir.path().join("a"),
        &FetchOptions::default(),
        Some(&abort),
    )
    .unwrap_err();
    assert!(matches!(err, DownloadError::Aborted), "got {err:?}");
}

#[test]
fn relative_redirect_keeps_only_final_body() {
    let server = http_server::start(vec![
        ("/old.png", Route::redirect("/new.png")),
        ("/new.png", Route::ok("image/png", b"final".to_vec())),
    ]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("out");

    let n = download_to_file(&server.url("/old.png"), &dest, &FetchOptions::default(), None)
        .unwrap();

    assert_eq!(n, 5);
    assert_eq!(std::fs::read(&dest).unwrap(), b"final");
    assert_eq!(server.hits(), 2);
}

#[test]
fn redirect_to_other_scheme_is_refused() {
    let server = http_server::start(vec![(
        "/cat.png",
        Route::redirect("ftp://127.0.0.1:9/cat.png"),
    )]);
    let dir = tempdir().unwrap();
    let err = download_to_file(
        &server.url("/cat.png"),
        &dir.path().join("cat"),
        &FetchOptions::default(),
        None,
    )
    .unwrap_err();
    match err {
        DownloadError::Redirect(location) => assert!(location.starts_with("ftp://"), "{location}"),
        other => panic!("got {other:?}"),
    }
    assert_eq!(server.hits(), 1);
}

#[test]
fn redirect_loop_gives_up() {
    let server = http_server::start(vec![("/loop", Route::redirect("/loop"))]);
    let dir = tempdir().unwrap();
    let err = download_to_file(
        &server.url("/loop"),
        &dir.path().join("loop"),
        &FetchOptions::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, DownloadError::TooManyRedirects), "got {err:?}");
    assert_eq!(server.hits(), MAX_REDIRECTS as usize + 1);
}
