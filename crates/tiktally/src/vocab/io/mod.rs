//! # Vocabulary IO
//!
//! * [`artifact`] - the binary vocabulary artifact the runtime loads.
//! * [`source_json`] - the JSON vocabulary source documents artifacts are built from.
//! * [`base64_vocab`] - tiktoken style ``{BASE64 SPAN} {RANK}`` rank files.
//!
//! ## Building And Loading An Artifact
//!
//! ```rust,no_run
//! use tiktally::vocab::{
//!     UnifiedTokenVocab,
//!     io::{load_vocab_artifact_path, load_vocab_source_path, save_vocab_artifact_path},
//! };
//!
//! fn example() -> tiktally::TallyResult<UnifiedTokenVocab<u32>> {
//!     let artifact = load_vocab_source_path("cl100k_base.json")?.try_to_artifact()?;
//!     save_vocab_artifact_path(&artifact, "cl100k_base.ttv")?;
//!
//!     UnifiedTokenVocab::try_from_artifact(&load_vocab_artifact_path("cl100k_base.ttv")?)
//! }
//! ```

pub mod artifact;
pub mod base64_vocab;
pub mod source_json;

#[doc(inline)]
pub use artifact::*;
#[doc(inline)]
pub use base64_vocab::*;
#[doc(inline)]
pub use source_json::*;
