//! # Token Span Encoder
//!
//! Splits text with a [`crate::segmentation::TextSegmentor`], then merges
//! each word with a [`SpanEncoder`].

pub mod span_encoders;
mod token_span_encoder;

#[doc(inline)]
pub use span_encoders::{SpanEncoder, SpanEncoderBuilder, SpanEncoderSelector};
#[doc(inline)]
pub use token_span_encoder::TokenSpanEncoder;
