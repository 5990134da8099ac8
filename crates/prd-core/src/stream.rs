//! Fragment stream driver.
//!
//! Each step performs exactly one `read_chunk`, decodes the bytes, runs
//! them through the frame parser with the remainder threaded through, and
//! yields zero or more fragments. On end of body the remainder is flushed
//! once. A read error is yielded once and ends the stream.

use futures::stream::{self, StreamExt};
use prd_types::Result;

use crate::cancel::CancelToken;
use crate::frame::{extract_frames, flush_remainder, Utf8Decoder};
use crate::ports::{BodyReader, FragmentStream};

struct DecodeState<R> {
    reader: R,
    decoder: Utf8Decoder,
    remainder: String,
}

/// Turn a response body into a cancellable stream of fragments.
pub fn fragment_stream<R>(reader: R, cancel: CancelToken) -> FragmentStream
where
    R: BodyReader + 'static,
{
    let initial = DecodeState {
        reader,
        decoder: Utf8Decoder::new(),
        remainder: String::new(),
    };

    let steps = stream::unfold(Some(initial), |state| async move {
        let mut state = state?;
        match state.reader.read_chunk().await {
            Ok(Some(bytes)) => {
                let text = state.decoder.decode(&bytes);
                let extracted = extract_frames(&state.remainder, &text);
                state.remainder = extracted.remainder;
                let items: Vec<Result<String>> =
                    extracted.fragments.into_iter().map(Ok).collect();
                if extracted.done {
                    log::debug!("Stream sentinel received");
                    Some((items, None))
                } else {
                    Some((items, Some(state)))
                }
            }
            Ok(None) => {
                state.remainder.push_str(&state.decoder.finish());
                let items: Vec<Result<String>> =
                    flush_remainder(&state.remainder).map(Ok).into_iter().collect();
                Some((items, None))
            }
            Err(e) => Some((vec![Err(e)], None)),
        }
    })
    .flat_map(stream::iter);

    cancel.bind(steps)
}
