//! # Parallel Encoder

use std::{marker::PhantomData, sync::Arc};

use rayon::prelude::*;

use crate::{
    encoders::TokenEncoder,
    errors::TallyResult,
    segmentation::{ResolvedSpecialPolicy, SpecialPolicy},
    types::TokenType,
    vocab::UnifiedTokenVocab,
};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Single texts are encoded by the inner encoder; batches fan out over ``rayon``.
#[derive(Debug, Clone)]
pub struct ParallelRayonEncoder<T: TokenType, E: TokenEncoder<T>> {
    /// Inner encoder.
    pub inner: E,

    _marker: PhantomData<T>,
}

impl<T, E> ParallelRayonEncoder<T, E>
where
    T: TokenType,
    E: TokenEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, E> TokenEncoder<T> for ParallelRayonEncoder<T, E>
where
    T: TokenType,
    E: TokenEncoder<T>,
{
    fn vocab(&self) -> &Arc<UnifiedTokenVocab<T>> {
        self.inner.vocab()
    }

    fn try_encode_append_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
        tokens: &mut Vec<T>,
    ) -> TallyResult<()> {
        self.inner.try_encode_append_resolved(text, policy, tokens)
    }

    fn try_count_tokens_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
    ) -> TallyResult<usize> {
        self.inner.try_count_tokens_resolved(text, policy)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
        policy: &SpecialPolicy,
    ) -> TallyResult<Vec<Vec<T>>> {
        let policy = self.try_resolve_policy(policy)?;
        batch
            .par_iter()
            .map(|text| {
                let mut tokens = Vec::new();
                self.inner
                    .try_encode_append_resolved(text, &policy, &mut tokens)?;
                Ok(tokens)
            })
            .collect()
    }

    fn try_count_tokens_batch(
        &self,
        batch: &[&str],
        policy: &SpecialPolicy,
    ) -> TallyResult<Vec<usize>> {
        let policy = self.try_resolve_policy(policy)?;
        batch
            .par_iter()
            .map(|text| self.inner.try_count_tokens_resolved(text, &policy))
            .collect()
    }
}
