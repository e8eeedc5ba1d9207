//! # Pretrained Vocabulary Descriptors
//!
//! Word patterns and special token tables of the public vocabularies.
//! The rank tables themselves are loaded from artifacts; see [`crate::vocab::io`].

mod patterns;
mod specials;

#[doc(inline)]
pub use patterns::*;
#[doc(inline)]
pub use specials::*;
