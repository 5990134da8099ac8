//! `ReadableStream` reader for streaming responses.
//!
//! Owns the `AbortController` of its fetch. Dropping the reader before the
//! body is exhausted aborts the request, so a cancelled stream never leaves
//! a connection running in the background.

use async_trait::async_trait;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, ReadableStream, ReadableStreamDefaultReader};

use prd_core::ports::BodyReader;
use prd_types::{ChatError, Result};

pub struct FetchBodyReader {
    reader: ReadableStreamDefaultReader,
    controller: AbortController,
    finished: bool,
}

impl FetchBodyReader {
    pub fn new(body: ReadableStream, controller: AbortController) -> Self {
        let reader = body
            .get_reader()
            .unchecked_into::<ReadableStreamDefaultReader>();
        Self {
            reader,
            controller,
            finished: false,
        }
    }
}

#[async_trait(?Send)]
impl BodyReader for FetchBodyReader {
    async fn read_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        if self.finished {
            return Ok(None);
        }

        let result = JsFuture::from(self.reader.read()).await.map_err(|e| {
            self.finished = true;
            read_error(&e)
        })?;

        let done = Reflect::get(&result, &JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            self.finished = true;
            return Ok(None);
        }

        let value = Reflect::get(&result, &JsValue::from_str("value"))
            .map_err(|e| read_error(&e))?;
        Ok(Some(Uint8Array::new(&value).to_vec()))
    }
}

impl Drop for FetchBodyReader {
    fn drop(&mut self) {
        if !self.finished {
            log::debug!("Aborting unfinished response body");
            self.controller.abort();
        }
    }
}

/// Map a rejected `read()` to a chat error. Aborts are not failures.
fn read_error(e: &JsValue) -> ChatError {
    if is_abort_error(e) {
        ChatError::Cancelled
    } else {
        ChatError::Network(js_error_message(e))
    }
}

fn is_abort_error(e: &JsValue) -> bool {
    Reflect::get(e, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
        .as_deref()
        == Some("AbortError")
}

pub(crate) fn js_error_message(e: &JsValue) -> String {
    Reflect::get(e, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}
