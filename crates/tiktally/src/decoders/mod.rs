//! # Token Decoders
//!
//! Decoder clients should use:
//!
//! * [`TokenDictDecoder`] - a `{ T -> Vec<u8> }` dictionary decoder.
//! * `ParallelRayonDecoder` - a batch parallelism wrapper around any [`TokenDecoder`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tiktally::{
//!     TallyResult,
//!     decoders::{TokenDecoder, TokenDecoderOptions},
//!     types::TokenType,
//!     vocab::UnifiedTokenVocab,
//! };
//!
//! fn example<T: TokenType>(
//!     vocab: Arc<UnifiedTokenVocab<T>>,
//!     batch: &[&[T]],
//! ) -> TallyResult<Vec<String>> {
//!     let decoder = TokenDecoderOptions::default()
//!         .with_parallel(true)
//!         .build(vocab)?;
//!
//!     Ok(decoder.try_decode_batch_to_strings(batch)?.into_values())
//! }
//! ```

mod decode_results;
mod decoder_options;
mod token_decoder;
mod token_dict_decoder;

#[doc(inline)]
pub use decode_results::{BatchDecodeResult, DecodeResult};
#[doc(inline)]
pub use decoder_options::TokenDecoderOptions;
#[doc(inline)]
pub use token_decoder::{TokenDecoder, string_from_utf8_lossy};
#[doc(inline)]
pub use token_dict_decoder::TokenDictDecoder;
