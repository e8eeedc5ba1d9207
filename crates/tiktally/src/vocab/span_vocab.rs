//! # Span Map ``{ Vec<u8> <-> T }`` Rank Vocabulary
//!
//! The base rank table of a BPE vocabulary. Every byte span has exactly one
//! rank and every rank has exactly one byte span; construction rejects
//! anything else.

use crate::{
    errors::{TallyError, TallyResult},
    types::{TokenType, hash_map_with_capacity},
    vocab::vocab_types::{SpanTokenMap, TokenSpanMap},
};

/// Bijective ``{ Vec<u8> <-> T }`` rank vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanMapVocab<T: TokenType> {
    span_map: SpanTokenMap<T>,
    token_spans: TokenSpanMap<T>,
}

impl<T: TokenType> Default for SpanMapVocab<T> {
    fn default() -> Self {
        Self {
            span_map: Default::default(),
            token_spans: Default::default(),
        }
    }
}

impl<T: TokenType> SpanMapVocab<T> {
    /// Build a vocabulary from a ``{ Vec<u8> -> T }`` map.
    ///
    /// ## Arguments
    /// * `span_map` - The span to rank mapping.
    ///
    /// ## Returns
    /// The vocabulary, or [`TallyError::MalformedVocabulary`] if two spans
    /// share a rank, or a span is empty.
    pub fn try_from_span_map(span_map: SpanTokenMap<T>) -> TallyResult<Self> {
        Self::try_from_token_spans(span_map.into_iter().map(|(span, token)| (token, span)))
    }

    /// Build a vocabulary from ``(T, Vec<u8>)`` pairs.
    ///
    /// ## Arguments
    /// * `token_spans` - The rank to span pairs; in any order.
    ///
    /// ## Returns
    /// The vocabulary, or [`TallyError::MalformedVocabulary`] if a rank or span
    /// appears twice, or a span is empty.
    pub fn try_from_token_spans<I>(token_spans: I) -> TallyResult<Self>
    where
        I: IntoIterator<Item = (T, Vec<u8>)>,
    {
        let iter = token_spans.into_iter();
        let (lower, _) = iter.size_hint();

        let mut span_map: SpanTokenMap<T> = hash_map_with_capacity(lower);
        let mut token_spans: TokenSpanMap<T> = hash_map_with_capacity(lower);

        for (token, span) in iter {
            if span.is_empty() {
                return Err(TallyError::MalformedVocabulary(format!(
                    "rank {token} has an empty span"
                )));
            }
            if let Some(prev) = token_spans.get(&token) {
                return Err(TallyError::MalformedVocabulary(format!(
                    "rank {token} maps to both {prev:?} and {span:?}"
                )));
            }
            if let Some(prev) = span_map.get(&span) {
                return Err(TallyError::MalformedVocabulary(format!(
                    "span {span:?} maps to both {prev} and {token}"
                )));
            }
            span_map.insert(span.clone(), token);
            token_spans.insert(token, span);
        }

        Ok(Self {
            span_map,
            token_spans,
        })
    }

    /// The number of ranks in the vocabulary.
    pub fn len(&self) -> usize {
        self.span_map.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.span_map.is_empty()
    }

    /// Get the ``{ Vec<u8> -> T }`` map.
    pub fn span_map(&self) -> &SpanTokenMap<T> {
        &self.span_map
    }

    /// Get the ``{ T -> Vec<u8> }`` map.
    pub fn token_spans(&self) -> &TokenSpanMap<T> {
        &self.token_spans
    }

    /// Iterate over the ``(span, rank)`` entries; in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], T)> + '_ {
        self.span_map
            .iter()
            .map(|(span, &token)| (span.as_slice(), token))
    }

    /// The largest rank, if any.
    pub fn max_token(&self) -> Option<T> {
        self.token_spans.keys().max().copied()
    }

    /// Return the rank for an exact byte span, if any.
    ///
    /// ## Arguments
    /// * `span` - The byte slice to look up.
    pub fn lookup_token(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.span_map.get(span).copied()
    }

    /// Return the byte span for a rank, if any.
    ///
    /// ## Arguments
    /// * `token` - The rank to look up.
    pub fn lookup_span(
        &self,
        token: &T,
    ) -> Option<&[u8]> {
        self.token_spans.get(token).map(|span| span.as_slice())
    }

    /// The single bytes which have no rank of their own.
    ///
    /// Spans made only of these bytes can never be fully encoded.
    ///
    /// ## Returns
    /// The missing byte values, ascending.
    pub fn missing_single_bytes(&self) -> Vec<u8> {
        (0..=u8::MAX)
            .filter(|b| !self.span_map.contains_key([*b].as_slice()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type T = u32;

    #[test]
    fn test_lookup_both_ways() {
        let vocab = SpanMapVocab::<T>::try_from_token_spans([
            (3, b"a".to_vec()),
            (7, b"b".to_vec()),
            (9, b"ab".to_vec()),
        ])
        .unwrap();

        assert_eq!(vocab.len(), 3);
        assert!(!vocab.is_empty());
        assert_eq!(vocab.lookup_token(b"ab"), Some(9));
        assert_eq!(vocab.lookup_token(b"ba"), None);
        assert_eq!(vocab.lookup_span(&7), Some(b"b".as_slice()));
        assert_eq!(vocab.lookup_span(&8), None);
        assert_eq!(vocab.max_token(), Some(9));

        let missing = vocab.missing_single_bytes();
        assert_eq!(missing.len(), 254);
        assert!(!missing.contains(&b'a'));
    }

    #[test]
    fn test_duplicate_rank_rejected() {
        let err = SpanMapVocab::<T>::try_from_token_spans([
            (1, b"a".to_vec()),
            (1, b"b".to_vec()),
        ])
        .unwrap_err();
        assert!(matches!(err, TallyError::MalformedVocabulary(_)));
    }

    #[test]
    fn test_duplicate_span_rejected() {
        let err = SpanMapVocab::<T>::try_from_token_spans([
            (1, b"a".to_vec()),
            (2, b"a".to_vec()),
        ])
        .unwrap_err();
        assert!(matches!(err, TallyError::MalformedVocabulary(_)));
    }

    #[test]
    fn test_empty_span_rejected() {
        let err = SpanMapVocab::<T>::try_from_token_spans([(1, vec![])]).unwrap_err();
        assert!(matches!(err, TallyError::MalformedVocabulary(_)));
    }

    #[test]
    fn test_from_span_map() {
        let mut span_map: SpanTokenMap<T> = Default::default();
        span_map.insert(b"x".to_vec(), 0);
        span_map.insert(b"y".to_vec(), 1);

        let vocab = SpanMapVocab::try_from_span_map(span_map.clone()).unwrap();
        assert_eq!(vocab.span_map(), &span_map);
        assert_eq!(vocab.token_spans().len(), 2);

        let mut entries = vocab.iter().collect::<Vec<_>>();
        entries.sort();
        assert_eq!(entries, vec![(b"x".as_slice(), 0), (b"y".as_slice(), 1)]);
    }
}
