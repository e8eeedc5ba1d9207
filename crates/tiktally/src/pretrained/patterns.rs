//! # Word Patterns

use crate::regex::ConstRegexWrapperPattern;

/// The GPT-2 style word pattern; shared by `r50k_base` and the Claude vocabulary.
pub const GPT2_WORD_PATTERN: ConstRegexWrapperPattern = ConstRegexWrapperPattern::Fancy(
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+",
);

/// The Claude vocabulary word pattern.
pub const CLAUDE_WORD_PATTERN: ConstRegexWrapperPattern = GPT2_WORD_PATTERN;

/// The "`cl100k_base`" word pattern, used by chat-completions models.
pub const CL100K_BASE_WORD_PATTERN: ConstRegexWrapperPattern = ConstRegexWrapperPattern::Fancy(
    r"(?i:'s|'t|'re|'ve|'m|'ll|'d)|[^\r\n\p{L}\p{N}]?\p{L}+|\p{N}{1,3}| ?[^\s\p{L}\p{N}]+[\r\n]*|\s*[\r\n]+|\s+(?!\S)|\s+",
);
