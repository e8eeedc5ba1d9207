use std::sync::Arc;

use crate::{
    decoders::TokenDecoderOptions,
    encoders::{MissingRankPolicy, TokenEncoderOptions},
    errors::TallyResult,
    tokenizer::Tokenizer,
    types::TokenType,
    vocab::UnifiedTokenVocab,
};

/// Options for configuring a [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizerOptions {
    /// Encoder options.
    pub encoder: TokenEncoderOptions,

    /// Decoder options.
    pub decoder: TokenDecoderOptions,
}

impl TokenizerOptions {
    /// Gets the configured parallelism value.
    ///
    /// Returns true if either encoder or decoder are configured for parallelism.
    pub fn parallel(&self) -> bool {
        self.encoder.parallel() || self.decoder.parallel()
    }

    /// Sets the configured parallelism value on both encoder and decoder.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.encoder.set_parallel(parallel);
        self.decoder.set_parallel(parallel);
    }

    /// Builder-style [`Self::set_parallel`].
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Sets the missing rank policy on both encoder and decoder.
    pub fn set_missing_ranks(
        &mut self,
        missing_ranks: MissingRankPolicy,
    ) {
        self.encoder.set_missing_ranks(missing_ranks);
        self.decoder.set_missing_ranks(missing_ranks);
    }

    /// Builder-style [`Self::set_missing_ranks`].
    pub fn with_missing_ranks(
        mut self,
        missing_ranks: MissingRankPolicy,
    ) -> Self {
        self.set_missing_ranks(missing_ranks);
        self
    }

    /// Build a [`Tokenizer`] for the given vocab.
    pub fn build<T: TokenType>(
        &self,
        vocab: Arc<UnifiedTokenVocab<T>>,
    ) -> TallyResult<Tokenizer<T>> {
        Ok(Tokenizer::new(
            vocab.clone(),
            self.encoder.build(vocab.clone())?,
            self.decoder.build(vocab)?,
        ))
    }
}
