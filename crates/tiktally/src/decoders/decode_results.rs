//! # `TokenDecoder` Result Types

use core::fmt::Debug;

/// The result of decoding tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult<V>
where
    V: Debug,
{
    /// The decoded result.
    pub value: V,

    /// The number of unknown tokens which were skipped.
    pub skipped: usize,
}

impl<V> DecodeResult<V>
where
    V: Debug,
{
    /// Construct a new result.
    pub fn new(
        value: V,
        skipped: usize,
    ) -> Self {
        Self { value, skipped }
    }

    /// Returns `true` if no tokens were skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }

    /// Discard the skip count.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Convert the result using a conversion function.
    pub fn convert<F, U>(
        self,
        f: F,
    ) -> DecodeResult<U>
    where
        F: FnOnce(V) -> U,
        U: Debug,
    {
        DecodeResult {
            value: f(self.value),
            skipped: self.skipped,
        }
    }
}

/// The result of decoding a batch of token sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDecodeResult<V>
where
    V: Debug,
{
    /// The per-item results.
    pub results: Vec<DecodeResult<V>>,
}

impl<V> From<Vec<DecodeResult<V>>> for BatchDecodeResult<V>
where
    V: Debug,
{
    fn from(results: Vec<DecodeResult<V>>) -> Self {
        Self { results }
    }
}

impl<V> BatchDecodeResult<V>
where
    V: Debug,
{
    /// Is the decoding complete for all items?
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(DecodeResult::is_complete)
    }

    /// Discard the skip counts.
    pub fn into_values(self) -> Vec<V> {
        self.results.into_iter().map(DecodeResult::into_value).collect()
    }

    /// Convert the results using a conversion function.
    pub fn convert<F, U>(
        self,
        f: &F,
    ) -> BatchDecodeResult<U>
    where
        F: Fn(V) -> U,
        U: Debug,
    {
        BatchDecodeResult {
            results: self.results.into_iter().map(|r| r.convert(f)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_result() {
        let result = DecodeResult::new(42, 0);
        assert!(result.is_complete());
        assert_eq!(result.clone().into_value(), 42);

        let converted = DecodeResult::new(42, 3).convert(|x| x.to_string());
        assert_eq!(converted.value, "42");
        assert_eq!(converted.skipped, 3);
        assert!(!converted.is_complete());
    }

    #[test]
    fn test_batch_decode_result() {
        let batch: BatchDecodeResult<i32> =
            vec![DecodeResult::new(1, 0), DecodeResult::new(2, 5)].into();
        assert!(!batch.is_complete());

        let converted = batch.clone().convert(&|x| x.to_string());
        assert_eq!(converted.results[1].value, "2");
        assert_eq!(converted.results[1].skipped, 5);

        assert_eq!(batch.into_values(), vec![1, 2]);
    }
}
