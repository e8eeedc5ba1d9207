//! # Unified Token Vocabulary

use crate::{
    errors::{TallyError, TallyResult},
    regex::RegexWrapperPattern,
    segmentation::SegmentationConfig,
    types::TokenType,
    vocab::{SpanMapVocab, SpecialVocab, TokenSpanMap},
};

/// Unified token vocabulary.
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedTokenVocab<T: TokenType> {
    /// Text Segmentation Configuration
    segmentation: SegmentationConfig<T>,

    /// ``{ Vec<u8> <-> T }`` vocabulary.
    span_vocab: SpanMapVocab<T>,
}

impl<T: TokenType> UnifiedTokenVocab<T> {
    /// Initialize a [`UnifiedTokenVocab`].
    ///
    /// ## Arguments
    /// * `segmentation` - The word pattern and special tokens.
    /// * `span_vocab` - The base rank vocabulary.
    ///
    /// ## Returns
    /// The vocabulary; or an error when the pattern does not compile,
    /// or a special rank collides with a base rank.
    pub fn try_init(
        segmentation: SegmentationConfig<T>,
        span_vocab: SpanMapVocab<T>,
    ) -> TallyResult<Self> {
        segmentation.pattern().compile()?;

        for (text, token) in segmentation.special_vocab().iter() {
            if let Some(span) = span_vocab.lookup_span(&token) {
                return Err(TallyError::MalformedVocabulary(format!(
                    "special token {text:?} rank {token} collides with base span {span:?}"
                )));
            }
        }

        let missing = span_vocab.missing_single_bytes();
        if !missing.is_empty() {
            log::warn!(
                "vocabulary has no rank for {} single byte values; spans containing them will be dropped",
                missing.len()
            );
        }

        log::info!(
            "loaded vocabulary: {} ranks, {} special tokens",
            span_vocab.len(),
            segmentation.special_vocab().len()
        );

        Ok(Self {
            segmentation,
            span_vocab,
        })
    }

    /// Build a vocabulary from its parts.
    ///
    /// ## Arguments
    /// * `pattern` - The word split pattern.
    /// * `token_spans` - The base ``(rank, span)`` pairs.
    /// * `specials` - The special ``(text, rank)`` pairs, in declaration order.
    pub fn try_from_parts<P, I, J, S>(
        pattern: P,
        token_spans: I,
        specials: J,
    ) -> TallyResult<Self>
    where
        P: Into<RegexWrapperPattern>,
        I: IntoIterator<Item = (T, Vec<u8>)>,
        J: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let segmentation = SegmentationConfig::from_pattern(pattern)
            .with_specials(SpecialVocab::try_from_specials(specials)?);
        Self::try_init(segmentation, SpanMapVocab::try_from_token_spans(token_spans)?)
    }

    /// Get the [`SegmentationConfig`].
    pub fn segmentation(&self) -> &SegmentationConfig<T> {
        &self.segmentation
    }

    /// Get the word split pattern.
    pub fn pattern(&self) -> &RegexWrapperPattern {
        self.segmentation.pattern()
    }

    /// Get the [`SpanMapVocab`].
    pub fn span_vocab(&self) -> &SpanMapVocab<T> {
        &self.span_vocab
    }

    /// Get a reference to the [`SpecialVocab`]
    pub fn special_vocab(&self) -> &SpecialVocab<T> {
        self.segmentation.special_vocab()
    }

    /// The number of base and special ranks.
    pub fn len(&self) -> usize {
        self.span_vocab.len() + self.special_vocab().len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The largest rank, base or special.
    pub fn max_token(&self) -> Option<T> {
        self.span_vocab
            .max_token()
            .into_iter()
            .chain(self.special_vocab().max_token())
            .max()
    }

    /// Return the base rank for an exact byte span, if any.
    pub fn lookup_token(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.span_vocab.lookup_token(span)
    }

    /// Return the bytes for a rank; base ranks first, then special ranks.
    pub fn lookup_span(
        &self,
        token: &T,
    ) -> Option<&[u8]> {
        self.span_vocab
            .lookup_span(token)
            .or_else(|| self.special_vocab().lookup_span(token))
    }

    /// Build the ``{ T -> Vec<u8> }`` map over base and special ranks.
    pub fn unified_dictionary(&self) -> TokenSpanMap<T> {
        let mut token_spans = self.span_vocab.token_spans().clone();
        for (text, token) in self.special_vocab().iter() {
            token_spans.insert(token, text.as_bytes().to_vec());
        }
        token_spans
    }
}
