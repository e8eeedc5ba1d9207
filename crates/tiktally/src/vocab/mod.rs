//! # Vocabulary
//!
//! This module provides the vocabulary and related io mechanisms.
//!
//! The primary user-oriented vocabulary is [`UnifiedTokenVocab`], which contains:
//! * `segmentation` - a [`crate::segmentation::SegmentationConfig`]; the word
//!   pattern and the ordered [`SpecialVocab`],
//! * `span_vocab` - a [`SpanMapVocab`] ``{ Vec<u8> <-> T }`` rank vocabulary.

pub mod io;
pub mod span_vocab;
pub mod special_vocab;
pub mod unified_vocab;
pub mod utility;
pub mod vocab_types;

#[doc(inline)]
pub use span_vocab::SpanMapVocab;
#[doc(inline)]
pub use special_vocab::SpecialVocab;
#[doc(inline)]
pub use unified_vocab::UnifiedTokenVocab;
#[doc(inline)]
pub use vocab_types::{SpanTokenMap, TokenSpanMap};
