//! # Segmentation Configuration
use crate::{regex::RegexWrapperPattern, types::TokenType, vocab::special_vocab::SpecialVocab};

/// The declarative half of segmentation: what splits words, and which texts are special.
///
/// Compiled into a [`crate::segmentation::TextSegmentor`].
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationConfig<T: TokenType> {
    /// The pre-tokenization word pattern.
    pub pattern: RegexWrapperPattern,

    /// The special tokens, in declaration order.
    pub specials: SpecialVocab<T>,
}

impl<T: TokenType> From<RegexWrapperPattern> for SegmentationConfig<T> {
    fn from(pattern: RegexWrapperPattern) -> Self {
        Self::from_pattern(pattern)
    }
}

impl<T: TokenType> SegmentationConfig<T> {
    /// A configuration with a word pattern and no special tokens.
    pub fn from_pattern<P>(pattern: P) -> Self
    where
        P: Into<RegexWrapperPattern>,
    {
        Self {
            pattern: pattern.into(),
            specials: SpecialVocab::default(),
        }
    }

    /// Replace the special tokens.
    pub fn with_specials(
        mut self,
        specials: SpecialVocab<T>,
    ) -> Self {
        self.specials = specials;
        self
    }

    /// The word pattern.
    pub fn pattern(&self) -> &RegexWrapperPattern {
        &self.pattern
    }

    /// The special tokens.
    pub fn special_vocab(&self) -> &SpecialVocab<T> {
        &self.specials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pattern() {
        type T = u32;

        let pattern = RegexWrapperPattern::Adaptive("hello".to_string());

        let config: SegmentationConfig<T> = pattern.clone().into();
        assert_eq!(config.pattern(), &pattern);
        assert!(config.special_vocab().is_empty());

        let specials = SpecialVocab::try_from_specials([("<|x|>", 7)]).unwrap();
        let config = config.with_specials(specials.clone());
        assert_eq!(config.special_vocab(), &specials);
    }
}
