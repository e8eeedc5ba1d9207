//! # Token Encoder Trait

use std::sync::Arc;

use crate::{
    errors::TallyResult,
    segmentation::{ResolvedSpecialPolicy, SpecialPolicy},
    types::TokenType,
    vocab::UnifiedTokenVocab,
};

/// Expected average number of bytes per token, used to size buffers.
pub const EXPECTED_BYTES_PER_TOKEN: f64 = 4.0;

/// A trait for token encoders.
///
/// Every call is independent; the only shared state is the read-only vocabulary.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached vocabulary.
    fn vocab(&self) -> &Arc<UnifiedTokenVocab<T>>;

    /// Encode text under a resolved policy, appending to a target buffer.
    ///
    /// On error, `tokens` is left as it was.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `policy` - The resolved special token policy.
    /// * `tokens` - The target token buffer to append to.
    fn try_encode_append_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
        tokens: &mut Vec<T>,
    ) -> TallyResult<()>;

    /// Count the tokens of text under a resolved policy, without building them.
    ///
    /// Always equal to the length of the matching encode.
    ///
    /// ## Arguments
    /// * `text` - The text to count.
    /// * `policy` - The resolved special token policy.
    fn try_count_tokens_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
    ) -> TallyResult<usize>;

    /// Resolve a [`SpecialPolicy`] against this encoder's vocabulary.
    fn try_resolve_policy(
        &self,
        policy: &SpecialPolicy,
    ) -> TallyResult<ResolvedSpecialPolicy> {
        policy.resolve(self.vocab().special_vocab())
    }

    /// Encode text into tokens under a [`SpecialPolicy`].
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `policy` - The special token policy.
    ///
    /// ## Returns
    /// The tokens; or [`crate::TallyError::DisallowedSpecialTokenFound`]
    /// when the text contains a disallowed special token.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn try_encode_with_policy(
        &self,
        text: &str,
        policy: &SpecialPolicy,
    ) -> TallyResult<Vec<T>> {
        let policy = self.try_resolve_policy(policy)?;
        let capacity = text.len() as f64 / (EXPECTED_BYTES_PER_TOKEN * 0.5);
        let mut tokens = Vec::with_capacity(capacity as usize);
        self.try_encode_append_resolved(text, &policy, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode text into tokens under the default policy.
    ///
    /// No special tokens are allowed, and all are disallowed.
    fn try_encode(
        &self,
        text: &str,
    ) -> TallyResult<Vec<T>> {
        self.try_encode_with_policy(text, &SpecialPolicy::default())
    }

    /// Count the tokens of text under a [`SpecialPolicy`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn try_count_tokens_with_policy(
        &self,
        text: &str,
        policy: &SpecialPolicy,
    ) -> TallyResult<usize> {
        let policy = self.try_resolve_policy(policy)?;
        self.try_count_tokens_resolved(text, &policy)
    }

    /// Count the tokens of text under the default policy.
    fn try_count_tokens(
        &self,
        text: &str,
    ) -> TallyResult<usize> {
        self.try_count_tokens_with_policy(text, &SpecialPolicy::default())
    }

    /// Encode a batch of text into tokens under one policy.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    /// * `policy` - The special token policy.
    ///
    /// ## Returns
    /// One token vector per input; or the first error.
    fn try_encode_batch(
        &self,
        batch: &[&str],
        policy: &SpecialPolicy,
    ) -> TallyResult<Vec<Vec<T>>> {
        let policy = self.try_resolve_policy(policy)?;
        batch
            .iter()
            .map(|text| {
                let mut tokens = Vec::new();
                self.try_encode_append_resolved(text, &policy, &mut tokens)?;
                Ok(tokens)
            })
            .collect()
    }

    /// Count the tokens of a batch of text under one policy.
    fn try_count_tokens_batch(
        &self,
        batch: &[&str],
        policy: &SpecialPolicy,
    ) -> TallyResult<Vec<usize>> {
        let policy = self.try_resolve_policy(policy)?;
        batch
            .iter()
            .map(|text| self.try_count_tokens_resolved(text, &policy))
            .collect()
    }
}
