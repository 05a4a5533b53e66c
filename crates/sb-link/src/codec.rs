//! Base64 payload decoding.
//!
//! Adapters receive their decoder as a [`PayloadDecoder`] so callers can
//! swap in a stricter (or instrumented) implementation. [`LenientBase64`]
//! accepts every alphabet/padding combination seen in real subscriptions.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use thiserror::Error;

/// Why a payload could not be turned into bytes.
#[derive(Debug, Error)]
pub enum DecodeFailure {
    /// Rejected by every base64 engine tried.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    /// Reported by a caller-supplied decoder.
    #[error("{0}")]
    Custom(String),
}

/// Turns the payload segment of a link into raw bytes.
pub trait PayloadDecoder: Send + Sync {
    /// Decode `input`; failure is fatal to the link.
    fn decode(&self, input: &str) -> Result<Vec<u8>, DecodeFailure>;
}

impl<F> PayloadDecoder for F
where
    F: Fn(&str) -> Result<Vec<u8>, DecodeFailure> + Send + Sync,
{
    fn decode(&self, input: &str) -> Result<Vec<u8>, DecodeFailure> {
        self(input)
    }
}

/// Standard or URL-safe alphabet, padded or not, whitespace ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientBase64;

impl PayloadDecoder for LenientBase64 {
    fn decode(&self, input: &str) -> Result<Vec<u8>, DecodeFailure> {
        let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let err = match STANDARD.decode(&cleaned) {
            Ok(bytes) => return Ok(bytes),
            Err(e) => e,
        };
        for engine in [&STANDARD_NO_PAD, &URL_SAFE, &URL_SAFE_NO_PAD] {
            if let Ok(bytes) = engine.decode(&cleaned) {
                return Ok(bytes);
            }
        }
        Err(err.into())
    }
}
