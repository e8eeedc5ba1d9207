//! # Merge-scan [`SpanEncoder`].
//!
//! Rescans every adjacent pair after each merge; O(n^2) per span.

use core::ops::Range;

use crate::{
    encoders::token_span_encoder::SpanEncoder,
    types::TokenType,
    vocab::SpanMapVocab,
};

/// The reference [`SpanEncoder`].
///
/// The code and behavior are as simple as possible; it is not optimized for performance.
#[derive(Debug, Clone)]
pub struct MergeScanSpanEncoder<T: TokenType> {
    parts: Vec<Range<usize>>,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TokenType> Default for MergeScanSpanEncoder<T> {
    fn default() -> Self {
        Self {
            parts: Vec::new(),
            _marker: core::marker::PhantomData,
        }
    }
}

impl<T: TokenType> SpanEncoder<T> for MergeScanSpanEncoder<T> {
    fn merge_parts(
        &mut self,
        vocab: &SpanMapVocab<T>,
        span: &[u8],
    ) -> &[Range<usize>] {
        self.parts.clear();
        self.parts.extend((0..span.len()).map(|i| i..i + 1));

        loop {
            // (rank, index) orders by rank, then leftmost.
            let best = self
                .parts
                .windows(2)
                .enumerate()
                .filter_map(|(i, w)| {
                    vocab
                        .lookup_token(&span[w[0].start..w[1].end])
                        .map(|rank| (rank, i))
                })
                .min();

            let Some((_, i)) = best else {
                break;
            };
            self.parts[i].end = self.parts[i + 1].end;
            self.parts.remove(i + 1);
        }

        &self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::{
        MissingRankPolicy,
        testing::{common_span_encoder_tests, merge_trace_vocab},
    };

    type T = u32;

    #[test]
    fn test_common() {
        common_span_encoder_tests::<T, _>(MergeScanSpanEncoder::default());
    }

    #[test]
    fn test_tie_goes_left() {
        let vocab = merge_trace_vocab::<T>();
        let mut se = MergeScanSpanEncoder::<T>::default();

        // "aaa": both "aa" pairs tie; the left one merges first.
        let parts = se.merge_parts(&vocab, b"aaa").to_vec();
        assert_eq!(parts, vec![0..2, 2..3]);

        let mut tokens = Vec::new();
        se.encode_append_compound_span(&vocab, b"aaa", MissingRankPolicy::Lenient, &mut tokens)
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                vocab.lookup_token(b"aa").unwrap(),
                vocab.lookup_token(b"a").unwrap()
            ]
        );
    }
}
