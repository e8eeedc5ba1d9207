//! # Span Encoders
//!
//! Byte-pair merge engines for spans without a direct rank.

mod merge_scan_encoder;
mod priority_merge_encoder;
mod span_encoder;
mod span_encoder_selector;

#[doc(inline)]
pub use merge_scan_encoder::MergeScanSpanEncoder;
#[doc(inline)]
pub use priority_merge_encoder::PriorityMergeSpanEncoder;
#[doc(inline)]
pub use span_encoder::SpanEncoder;
#[doc(inline)]
pub use span_encoder_selector::{SpanEncoderBuilder, SpanEncoderSelector};
