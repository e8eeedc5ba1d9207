//! # Dictionary ``{ T -> Vec<u8> }`` Token Decoder

use crate::{
    decoders::{DecodeResult, TokenDecoder},
    encoders::{EXPECTED_BYTES_PER_TOKEN, MissingRankPolicy},
    errors::{TallyError, TallyResult},
    types::{TokenType, token_to_u64},
    vocab::{TokenSpanMap, UnifiedTokenVocab},
};

/// A [`TokenDecoder<T>`] over a unified `{ T -> Vec<u8> }` dictionary.
///
/// Base ranks and special ranks share the dictionary; a rank never maps to both.
#[derive(Debug, Clone)]
pub struct TokenDictDecoder<T: TokenType> {
    /// Token to bytes mapping.
    token_spans: TokenSpanMap<T>,

    missing_ranks: MissingRankPolicy,
}

impl<T: TokenType> TokenDictDecoder<T> {
    /// Build a [`TokenDictDecoder`] from a [`UnifiedTokenVocab`].
    ///
    /// ## Arguments
    /// * `unified_vocab` - The vocabulary to build the decoder from.
    /// * `missing_ranks` - What to do with unknown tokens.
    pub fn from_unified_vocab(
        unified_vocab: &UnifiedTokenVocab<T>,
        missing_ranks: MissingRankPolicy,
    ) -> Self {
        Self::new(unified_vocab.unified_dictionary(), missing_ranks)
    }

    /// Creates a new Decoder.
    pub fn new(
        token_spans: TokenSpanMap<T>,
        missing_ranks: MissingRankPolicy,
    ) -> Self {
        Self {
            token_spans,
            missing_ranks,
        }
    }

    /// Get the [`TokenSpanMap`].
    pub fn token_spans(&self) -> &TokenSpanMap<T> {
        &self.token_spans
    }

    /// Get the [`MissingRankPolicy`].
    pub fn missing_ranks(&self) -> MissingRankPolicy {
        self.missing_ranks
    }
}

impl<T: TokenType> TokenDecoder<T> for TokenDictDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens)))]
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TallyResult<DecodeResult<Vec<u8>>> {
        let capacity = (tokens.len() as f64 * EXPECTED_BYTES_PER_TOKEN) as usize;
        let mut value = Vec::with_capacity(capacity);
        let mut skipped = 0;
        for t in tokens {
            match self.token_spans.get(t) {
                Some(span) => value.extend_from_slice(span),
                None if self.missing_ranks.is_strict() => {
                    return Err(TallyError::UnknownToken {
                        token: token_to_u64(*t)?,
                    });
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::debug!("skipped {skipped} unknown tokens while decoding");
        }
        Ok(DecodeResult::new(value, skipped))
    }
}
