//! # Parallel Decoder

use std::marker::PhantomData;

use rayon::prelude::*;

use crate::{
    decoders::{BatchDecodeResult, DecodeResult, TokenDecoder},
    errors::TallyResult,
    types::TokenType,
};

/// Batch-Level Parallel Decoder Wrapper.
///
/// Enables ``rayon`` decoding of batches when available.
#[derive(Debug, Clone)]
pub struct ParallelRayonDecoder<T: TokenType, D: TokenDecoder<T>> {
    /// Wrapped decoder.
    pub inner: D,

    _marker: PhantomData<T>,
}

impl<T, D> ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    /// Create a new parallel token decoder.
    ///
    /// ## Arguments
    /// * `inner` - The token decoder to wrap.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, D> TokenDecoder<T> for ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TallyResult<DecodeResult<Vec<u8>>> {
        self.inner.try_decode_to_bytes(tokens)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> TallyResult<BatchDecodeResult<Vec<u8>>> {
        batch
            .par_iter()
            .map(|tokens| self.inner.try_decode_to_bytes(tokens))
            .collect::<TallyResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> TallyResult<BatchDecodeResult<String>> {
        batch
            .par_iter()
            .map(|tokens| self.inner.try_decode_to_string(tokens))
            .collect::<TallyResult<Vec<_>>>()
            .map(BatchDecodeResult::from)
    }
}
