//! # Error Types

use crate::regex::ErrorWrapper;

/// Errors from tiktally operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TallyError {
    /// The rank tables, special tokens, or pattern of a vocabulary are inconsistent.
    ///
    /// This is a load-time failure; there is no meaningful retry.
    #[error("malformed vocabulary: {0}")]
    MalformedVocabulary(String),

    /// The input contains a special token which the call's policy disallows.
    #[error("disallowed special token {token:?} found at byte {position}")]
    DisallowedSpecialTokenFound {
        /// The special token text which matched.
        token: String,

        /// The byte offset of the match in the input text.
        position: usize,
    },

    /// A merged span has no rank; only raised under [`MissingRankPolicy::Strict`].
    ///
    /// [`MissingRankPolicy::Strict`]: crate::encoders::MissingRankPolicy::Strict
    #[error("no rank for span {span:?}")]
    UnrankedSpan {
        /// The bytes of the span.
        span: Vec<u8>,
    },

    /// A token has no bytes; only raised under [`MissingRankPolicy::Strict`].
    ///
    /// [`MissingRankPolicy::Strict`]: crate::encoders::MissingRankPolicy::Strict
    #[error("unknown token {token}")]
    UnknownToken {
        /// The token value, widened to `u64`.
        token: u64,
    },

    /// Token value out of range for the target type.
    #[error("token out of range")]
    TokenOutOfRange,

    /// Pattern compilation or matching failed.
    #[error(transparent)]
    Pattern(#[from] ErrorWrapper),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (base64, integer, json, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for tiktally operations.
pub type TallyResult<T> = core::result::Result<T, TallyError>;
