//! # `tiktally` BPE Tokenizer
//!
//! Encodes text into token ranks, counts tokens, and decodes ranks back into
//! text, for byte-pair-encoding vocabularies in the GPT and Claude style.
//!
//! See:
//! * [`vocab`] to build, load, and save a [`UnifiedTokenVocab`].
//! * [`segmentation`] for word splitting and the special token policy.
//! * [`encoders`] to encode and count text.
//! * [`decoders`] to decode tokens into text.
//! * [`Tokenizer`] for the combined surface.
//!
//! Word patterns and special token tables of the public vocabularies are in
//! [`pretrained`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiktally::{TallyResult, Tokenizer, TokenizerOptions};
//!
//! fn example() -> TallyResult<()> {
//!     let tokenizer: Tokenizer<u32> =
//!         Tokenizer::from_artifact_path("cl100k_base.ttv", &TokenizerOptions::default())?;
//!
//!     let tokens = tokenizer.encode("hello world")?;
//!     assert_eq!(tokenizer.count_tokens("hello world")?, tokens.len());
//!     assert_eq!(tokenizer.decode(&tokens)?, "hello world");
//!
//!     let tokens = tokenizer.encode_with_special_tokens(
//!         "hello<|endoftext|>",
//!         Some(&["<|endoftext|>"][..]),
//!         None,
//!     )?;
//!     assert_eq!(tokens.len(), 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod pretrained;
pub mod regex;
pub mod segmentation;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::{TokenDecoder, TokenDecoderOptions};
#[doc(inline)]
pub use encoders::{MissingRankPolicy, TokenEncoder, TokenEncoderOptions};
#[doc(inline)]
pub use errors::{TallyError, TallyResult};
#[doc(inline)]
pub use segmentation::SpecialPolicy;
#[doc(inline)]
pub use tokenizer::{Tokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::UnifiedTokenVocab;
