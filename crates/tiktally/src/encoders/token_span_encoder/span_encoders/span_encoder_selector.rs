//! # Span Encoder Selector

use std::sync::Arc;

use crate::{
    encoders::token_span_encoder::{
        SpanEncoder,
        span_encoders::{MergeScanSpanEncoder, PriorityMergeSpanEncoder},
    },
    types::TokenType,
};

/// Builder of fresh [`SpanEncoder`]s.
pub type SpanEncoderBuilder<T> = Arc<dyn Fn() -> Box<dyn SpanEncoder<T>> + Send + Sync>;

/// Policy enum for selecting a [`SpanEncoder`] for
/// [`TokenSpanEncoder`](`crate::encoders::token_span_encoder::TokenSpanEncoder`).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SpanEncoderSelector {
    /// The canonical best Default encoder.
    ///
    /// This is currently an alias for: [`PriorityMerge`](`Self::PriorityMerge`)
    #[default]
    Default,

    /// The canonical reference encoder.
    ///
    /// This is currently an alias for: [`MergeScan`](`Self::MergeScan`)
    Reference,

    /// Use the [`MergeScanSpanEncoder`] encoder.
    MergeScan,

    /// Use the [`PriorityMergeSpanEncoder`] encoder.
    PriorityMerge,
}

impl SpanEncoderSelector {
    /// Get a builder for the configured [`SpanEncoder`].
    pub fn span_encoder_builder<T: TokenType>(&self) -> SpanEncoderBuilder<T> {
        use SpanEncoderSelector::*;
        match self {
            Reference | MergeScan => Arc::new(|| {
                Box::new(MergeScanSpanEncoder::<T>::default()) as Box<dyn SpanEncoder<T>>
            }),
            Default | PriorityMerge => Arc::new(|| {
                Box::new(PriorityMergeSpanEncoder::<T>::default()) as Box<dyn SpanEncoder<T>>
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::utility::testing::build_test_span_vocab;

    #[test]
    fn test_selectors_agree() {
        type T = u32;
        let vocab = build_test_span_vocab::<T>();

        let results = [
            SpanEncoderSelector::Default,
            SpanEncoderSelector::Reference,
            SpanEncoderSelector::MergeScan,
            SpanEncoderSelector::PriorityMerge,
        ]
        .iter()
        .map(|selector| {
            let mut se = selector.span_encoder_builder::<T>()();
            se.merge_parts(&vocab, b" thenothello").to_vec()
        })
        .collect::<Vec<_>>();

        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
