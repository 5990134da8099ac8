//! WASM-target tests for prd-platform.
//!
//! Run with `wasm-pack test --headless --firefox crates/prd-platform`.
//! Nothing here needs a live backend: requests go to a closed port.

#![cfg(target_arch = "wasm32")]

use futures::future;
use futures::StreamExt;
use wasm_bindgen_test::*;

use prd_core::cancel::CancelToken;
use prd_core::ports::{BodyReader, ChatTransport};
use prd_core::stream::fragment_stream;
use prd_platform::{with_timeout, FetchBodyReader, HttpTransport};
use prd_types::config::ClientConfig;
use prd_types::error::NETWORK_UNREACHABLE;
use prd_types::message::ChatRequest;
use prd_types::{ChatError, Result};

wasm_bindgen_test_configure!(run_in_browser);

fn unreachable_transport() -> HttpTransport {
    let mut config = ClientConfig::default();
    config.apply_overrides(Some("http://127.0.0.1:9"), None, Some("1"));
    config.api.request_timeout_ms = 2_000;
    HttpTransport::new(config)
}

fn body_of(text: &str) -> web_sys::ReadableStream {
    let response = web_sys::Response::new_with_opt_str(Some(text)).unwrap();
    response.body().unwrap()
}

// ─── Body Reader Tests ───────────────────────────────────

#[wasm_bindgen_test]
async fn body_reader_reads_until_exhausted() {
    let controller = web_sys::AbortController::new().unwrap();
    let mut reader = FetchBodyReader::new(body_of("data: hi\n"), controller);

    let mut bytes = Vec::new();
    while let Some(chunk) = reader.read_chunk().await.unwrap() {
        bytes.extend(chunk);
    }
    assert_eq!(bytes, b"data: hi\n");
    assert_eq!(reader.read_chunk().await.unwrap(), None);
}

#[wasm_bindgen_test]
async fn fragment_stream_over_fetch_body() {
    let controller = web_sys::AbortController::new().unwrap();
    let reader = FetchBodyReader::new(
        body_of("data: Hello\ndata:  world\ndata: [DONE]\n"),
        controller,
    );
    let (_handle, token) = CancelToken::pair();
    let got: Vec<_> = fragment_stream(reader, token).collect().await;
    assert_eq!(got, vec![Ok("Hello".to_string()), Ok(" world".to_string())]);
}

// ─── Timeout Tests ───────────────────────────────────────

#[wasm_bindgen_test]
async fn stalled_call_times_out_as_network_error() {
    let err = with_timeout(20, future::pending::<Result<()>>())
        .await
        .unwrap_err();
    assert_eq!(err, ChatError::Timeout(20));
    assert_eq!(err.status(), Some(0));
    assert_eq!(err.detail(), NETWORK_UNREACHABLE);
}

#[wasm_bindgen_test]
async fn fast_call_beats_timeout() {
    let got = with_timeout(5_000, async { Ok::<_, ChatError>("pong") }).await;
    assert_eq!(got, Ok("pong"));

    let failed = with_timeout(5_000, async {
        Err::<(), _>(ChatError::Server { status: 503, detail: "busy".to_string() })
    })
    .await;
    assert_eq!(failed.unwrap_err().status(), Some(503));
}

// ─── Transport Tests ─────────────────────────────────────

#[wasm_bindgen_test]
async fn unreachable_server_is_network_class() {
    let err = unreachable_transport().check_health().await.unwrap_err();
    assert_eq!(err.status(), Some(0));
}

#[wasm_bindgen_test]
async fn pre_cancelled_stream_never_starts() {
    let (handle, token) = CancelToken::pair();
    handle.cancel();
    let result = unreachable_transport()
        .stream_chat(ChatRequest::new("hi", None), token)
        .await;
    assert!(matches!(result, Err(ChatError::Cancelled)));
}
