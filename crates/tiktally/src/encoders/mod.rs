//! # Token Encoders
//!
//! Text to token encoding, under a special token policy.

mod encoder_options;
mod token_encoder;
pub mod token_span_encoder;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use encoder_options::{MissingRankPolicy, TokenEncoderOptions};
#[doc(inline)]
pub use token_encoder::{EXPECTED_BYTES_PER_TOKEN, TokenEncoder};
