//! # Decoder Options

use std::sync::Arc;

use crate::{
    decoders::{TokenDecoder, TokenDictDecoder},
    encoders::MissingRankPolicy,
    errors::TallyResult,
    types::TokenType,
    vocab::UnifiedTokenVocab,
};

/// Options for building a [`TokenDecoder`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenDecoderOptions {
    /// What to do with unknown tokens.
    pub missing_ranks: MissingRankPolicy,

    /// Should batch calls run in parallel?
    ///
    /// Requires the `rayon` feature; ignored otherwise.
    pub parallel: bool,
}

impl TokenDecoderOptions {
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

    /// Build a [`TokenDecoder`] for a vocabulary.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<UnifiedTokenVocab<T>>,
    ) -> TallyResult<Arc<dyn TokenDecoder<T>>> {
        let decoder = TokenDictDecoder::from_unified_vocab(&vocab, self.missing_ranks);

        #[cfg(feature = "rayon")]
        if self.parallel {
            return Ok(Arc::new(crate::rayon::ParallelRayonDecoder::new(decoder)));
        }

        Ok(Arc::new(decoder))
    }
}
