//! # Vocabulary Test Builders
//!
//! Small, fully byte-covered vocabularies for tests.

use crate::{
    pretrained::GPT2_WORD_PATTERN,
    types::TokenType,
    vocab::{SpanMapVocab, UnifiedTokenVocab},
};

/// Multi-byte merges of the test vocabulary; ranked from 256 in this order.
pub const TEST_MERGES: &[&str] = &[
    "th", "he", "in", "er", "an", " t", "re", "on", "at", "en", "nd", "ti", "es", "or", "is", "ll",
    " a", " s", " w", "ou", "ing", "the", " the", "hel", "hell", "hello", " hello", " wor",
    " worl", " world",
];

/// The special tokens of the test vocabulary, in declaration order.
pub fn test_specials<T: TokenType>() -> Vec<(&'static str, T)> {
    [
        "<|endoftext|>",
        "<|fim_prefix|>",
        "<|fim_middle|>",
        "<|fim_suffix|>",
        "<|endofprompt|>",
    ]
    .into_iter()
    .enumerate()
    .filter_map(|(idx, text)| T::from_usize(1000 + idx).map(|token| (text, token)))
    .collect()
}

/// Build the ``(rank, span)`` pairs of the test vocabulary.
///
/// Every byte value has its own rank; rank `b` is byte `b`.
pub fn test_token_spans<T: TokenType>() -> Vec<(T, Vec<u8>)> {
    (0..256usize)
        .map(|b| vec![b as u8])
        .chain(TEST_MERGES.iter().map(|m| m.as_bytes().to_vec()))
        .enumerate()
        .filter_map(|(rank, span)| T::from_usize(rank).map(|token| (token, span)))
        .collect()
}

/// Build the test [`SpanMapVocab`].
pub fn build_test_span_vocab<T: TokenType>() -> SpanMapVocab<T> {
    SpanMapVocab::try_from_token_spans(test_token_spans()).unwrap()
}

/// Build the test [`UnifiedTokenVocab`]; GPT-2 word pattern with specials.
pub fn build_test_vocab<T: TokenType>() -> UnifiedTokenVocab<T> {
    UnifiedTokenVocab::try_from_parts(
        GPT2_WORD_PATTERN.to_pattern(),
        test_token_spans(),
        test_specials(),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_shape() {
        let vocab: UnifiedTokenVocab<u32> = build_test_vocab();
        assert_eq!(vocab.span_vocab().len(), 256 + TEST_MERGES.len());
        assert!(vocab.span_vocab().missing_single_bytes().is_empty());
        assert_eq!(vocab.special_vocab().len(), 5);
        assert_eq!(vocab.lookup_token(b"th"), Some(256));

        let spans: SpanMapVocab<u16> = build_test_span_vocab();
        assert_eq!(spans.lookup_token(b" world"), Some(255 + TEST_MERGES.len() as u16));
    }
}
