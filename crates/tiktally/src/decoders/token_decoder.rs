//! # Token Decoder Trait

use crate::{
    decoders::{BatchDecodeResult, DecodeResult},
    errors::TallyResult,
    types::TokenType,
};

/// Lossy conversion of bytes to a string; invalid sequences become `U+FFFD`.
pub fn string_from_utf8_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes tokens into bytes.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// The concatenated bytes of every known token, in order.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TallyResult<DecodeResult<Vec<u8>>>;

    /// Decodes a batch of token sequences into bytes.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> TallyResult<BatchDecodeResult<Vec<u8>>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect::<TallyResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }

    /// Decodes tokens into a string.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> TallyResult<DecodeResult<String>> {
        self.try_decode_to_bytes(tokens)
            .map(|res| res.convert(string_from_utf8_lossy))
    }

    /// Decodes a batch of token sequences into strings.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> TallyResult<BatchDecodeResult<String>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect::<TallyResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }
}
