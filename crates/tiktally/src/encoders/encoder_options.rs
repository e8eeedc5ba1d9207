//! # Encoder Options

use std::sync::Arc;

use crate::{
    encoders::{
        TokenEncoder,
        token_span_encoder::{SpanEncoderSelector, TokenSpanEncoder},
    },
    errors::TallyResult,
    types::TokenType,
    vocab::UnifiedTokenVocab,
};

/// What to do with a span or rank that the vocabulary does not know.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingRankPolicy {
    /// Skip it silently.
    #[default]
    Lenient,

    /// Fail with an error.
    Strict,
}

impl MissingRankPolicy {
    /// Is this [`MissingRankPolicy::Strict`]?
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Options for building a [`TokenEncoder`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenEncoderOptions {
    /// The merge engine.
    pub span_encoder: SpanEncoderSelector,

    /// What to do with merge parts which have no rank.
    pub missing_ranks: MissingRankPolicy,

    /// Should batch calls run in parallel?
    ///
    /// Requires the `rayon` feature; ignored otherwise.
    pub parallel: bool,
}

impl TokenEncoderOptions {
    /// Get the span encoder selector.
    pub fn span_encoder(&self) -> SpanEncoderSelector {
        self.span_encoder
    }

    /// Set the span encoder selector.
    pub fn set_span_encoder(
        &mut self,
        span_encoder: SpanEncoderSelector,
    ) {
        self.span_encoder = span_encoder;
    }

    /// Builder-style [`Self::set_span_encoder`].
    pub fn with_span_encoder(
        mut self,
        span_encoder: SpanEncoderSelector,
    ) -> Self {
        self.set_span_encoder(span_encoder);
        self
    }

    /// Get the missing rank policy.
    pub fn missing_ranks(&self) -> MissingRankPolicy {
        self.missing_ranks
    }

    /// Set the missing rank policy.
    pub fn set_missing_ranks(
        &mut self,
        missing_ranks: MissingRankPolicy,
    ) {
        self.missing_ranks = missing_ranks;
    }

    /// Builder-style [`Self::set_missing_ranks`].
    pub fn with_missing_ranks(
        mut self,
        missing_ranks: MissingRankPolicy,
    ) -> Self {
        self.set_missing_ranks(missing_ranks);
        self
    }

    /// Are batch calls parallel?
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Set whether batch calls are parallel.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Builder-style [`Self::set_parallel`].
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`TokenEncoder`] for a vocabulary.
    ///
    /// ## Arguments
    /// * `vocab` - The vocabulary.
    ///
    /// ## Returns
    /// The encoder; or an error if the vocabulary's patterns do not compile.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<UnifiedTokenVocab<T>>,
    ) -> TallyResult<Arc<dyn TokenEncoder<T>>> {
        let encoder =
            TokenSpanEncoder::<T>::try_new_with_selector(vocab, self.span_encoder, self.missing_ranks)?;

        #[cfg(feature = "rayon")]
        if self.parallel {
            return Ok(Arc::new(crate::rayon::ParallelRayonEncoder::new(encoder)));
        }

        Ok(Arc::new(encoder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{segmentation::SpecialPolicy, vocab::utility::testing::build_test_vocab};

    #[test]
    fn test_options() {
        let options = TokenEncoderOptions::default();
        assert_eq!(options.span_encoder(), SpanEncoderSelector::Default);
        assert_eq!(options.missing_ranks(), MissingRankPolicy::Lenient);
        assert!(!options.parallel());

        let options = options
            .with_span_encoder(SpanEncoderSelector::MergeScan)
            .with_missing_ranks(MissingRankPolicy::Strict)
            .with_parallel(true);
        assert_eq!(options.span_encoder(), SpanEncoderSelector::MergeScan);
        assert!(options.missing_ranks().is_strict());
        assert!(options.parallel());
    }

    #[test]
    fn test_build() {
        let vocab: Arc<UnifiedTokenVocab<u32>> = build_test_vocab().into();

        let serial = TokenEncoderOptions::default().build(vocab.clone()).unwrap();
        let parallel = TokenEncoderOptions::default()
            .with_parallel(true)
            .build(vocab.clone())
            .unwrap();

        let batch = ["hello world", "the other", ""];
        let policy = SpecialPolicy::default();
        assert_eq!(
            serial.try_encode_batch(&batch, &policy).unwrap(),
            parallel.try_encode_batch(&batch, &policy).unwrap()
        );
        assert!(Arc::ptr_eq(serial.vocab(), &vocab));
    }
}
