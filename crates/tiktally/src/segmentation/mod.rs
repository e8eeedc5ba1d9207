//! # Text Segmentation
//!
//! This module exists to factor out text segmentation scanning.
//!
//! [`SegmentationConfig`] describes the declarative needs of a tokenizer:
//! * `pattern` - the word split pattern.
//! * `specials` - the ordered special tokens to handle out-of-band.
//!
//! [`SpecialPolicy`] is the per-call choice of which special tokens are
//! tokens, which are errors, and which are text.
//!
//! [`TextSegmentor`] implements the run-time scan: text is cut into
//! [`TextRun`]s at allowed special tokens, and plain runs into words.

pub mod segmentation_config;
pub mod special_policy;
pub mod text_segmentor;

#[doc(inline)]
pub use segmentation_config::SegmentationConfig;
#[doc(inline)]
pub use special_policy::{AllowedSpecial, DisallowedSpecial, ResolvedSpecialPolicy, SpecialPolicy};
#[doc(inline)]
pub use text_segmentor::{TextRun, TextSegmentor};
