use std::sync::Arc;

use crate::{
    encoders::{
        MissingRankPolicy,
        TokenEncoder,
        token_span_encoder::{SpanEncoderBuilder, SpanEncoderSelector},
    },
    errors::TallyResult,
    segmentation::{ResolvedSpecialPolicy, TextRun, TextSegmentor},
    types::TokenType,
    vocab::UnifiedTokenVocab,
};

/// A [`TokenEncoder`] that composes a [`TextSegmentor`] with a [`SpanEncoder`].
///
/// Each call builds its own [`SpanEncoder`]; nothing is shared between calls
/// except the vocabulary.
///
/// [`SpanEncoder`]: crate::encoders::token_span_encoder::SpanEncoder
#[derive(Clone)]
pub struct TokenSpanEncoder<T>
where
    T: TokenType,
{
    /// The reference vocabulary.
    vocab: Arc<UnifiedTokenVocab<T>>,

    /// Text Segmentor.
    segmentor: TextSegmentor<T>,

    se_builder: SpanEncoderBuilder<T>,

    missing_ranks: MissingRankPolicy,
}

impl<T: TokenType> core::fmt::Debug for TokenSpanEncoder<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("TokenSpanEncoder")
            .field("missing_ranks", &self.missing_ranks)
            .finish()
    }
}

impl<T: TokenType> TokenSpanEncoder<T> {
    /// Create a new encoder using the selected [`SpanEncoder`].
    ///
    /// [`SpanEncoder`]: crate::encoders::token_span_encoder::SpanEncoder
    pub fn try_new_with_selector(
        vocab: Arc<UnifiedTokenVocab<T>>,
        selector: SpanEncoderSelector,
        missing_ranks: MissingRankPolicy,
    ) -> TallyResult<Self> {
        Self::try_new_with_builder(vocab, selector.span_encoder_builder(), missing_ranks)
    }

    /// Create a new encoder.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary.
    /// * `se_builder` - Builds the per-call merge engine.
    /// * `missing_ranks` - What to do with merge parts that have no rank.
    pub fn try_new_with_builder(
        vocab: Arc<UnifiedTokenVocab<T>>,
        se_builder: SpanEncoderBuilder<T>,
        missing_ranks: MissingRankPolicy,
    ) -> TallyResult<Self> {
        let segmentor = TextSegmentor::try_from_config(vocab.segmentation())?;
        Ok(Self {
            vocab,
            segmentor,
            se_builder,
            missing_ranks,
        })
    }

    /// Get the [`TextSegmentor`].
    pub fn segmentor(&self) -> &TextSegmentor<T> {
        &self.segmentor
    }

    /// Get the [`MissingRankPolicy`].
    pub fn missing_ranks(&self) -> MissingRankPolicy {
        self.missing_ranks
    }

    /// Visit every token of `text` in order.
    fn for_each_token(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
        f: &mut dyn FnMut(T),
    ) -> TallyResult<()> {
        let mut se = (self.se_builder)();
        let span_vocab = self.vocab.span_vocab();

        self.segmentor.for_each_run(text, policy, &mut |run| match run {
            TextRun::Special(_, token) => {
                f(token);
                Ok(())
            }
            TextRun::Plain(range) => self.segmentor.for_each_word(text, range, &mut |word| {
                let span = text[word].as_bytes();
                match span_vocab.lookup_token(span) {
                    Some(token) => {
                        f(token);
                        Ok(())
                    }
                    None => se.for_each_compound_token(span_vocab, span, self.missing_ranks, &mut *f),
                }
            }),
        })
    }
}

impl<T: TokenType> TokenEncoder<T> for TokenSpanEncoder<T> {
    fn vocab(&self) -> &Arc<UnifiedTokenVocab<T>> {
        &self.vocab
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, text, policy, tokens))
    )]
    fn try_encode_append_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
        tokens: &mut Vec<T>,
    ) -> TallyResult<()> {
        let start = tokens.len();
        let result = self.for_each_token(text, policy, &mut |t| tokens.push(t));
        if result.is_err() {
            tokens.truncate(start);
        }
        result
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, text, policy))
    )]
    fn try_count_tokens_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
    ) -> TallyResult<usize> {
        let mut count = 0;
        self.for_each_token(text, policy, &mut |_| count += 1)?;
        Ok(count)
    }
}
