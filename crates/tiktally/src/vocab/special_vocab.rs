//! # Special Token Vocabulary
//!
//! Special tokens are kept as an ordered list; the order is the declaration
//! order of the source vocabulary, and it decides which alternative wins when
//! two special token texts overlap at the same start position.

use crate::{
    errors::{TallyError, TallyResult},
    regex::{RegexWrapperPattern, exact_match_union_regex_pattern},
    types::{TTHashMap, TokenType, hash_map_with_capacity},
};

/// Ordered ``{ String <-> T }`` special token vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialVocab<T: TokenType> {
    specials: Vec<(String, T)>,
    text_tokens: TTHashMap<String, T>,
    token_index: TTHashMap<T, usize>,
}

impl<T: TokenType> Default for SpecialVocab<T> {
    fn default() -> Self {
        Self {
            specials: Vec::new(),
            text_tokens: Default::default(),
            token_index: Default::default(),
        }
    }
}

impl<T: TokenType> SpecialVocab<T> {
    /// Build a special vocabulary from ``(text, rank)`` pairs, in declaration order.
    ///
    /// ## Arguments
    /// * `specials` - The special token texts and ranks.
    ///
    /// ## Returns
    /// The vocabulary, or [`TallyError::MalformedVocabulary`] if a text is empty,
    /// or a text or rank is declared twice.
    pub fn try_from_specials<I, S>(specials: I) -> TallyResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let iter = specials.into_iter();
        let (lower, _) = iter.size_hint();

        let mut vocab = Self {
            specials: Vec::with_capacity(lower),
            text_tokens: hash_map_with_capacity(lower),
            token_index: hash_map_with_capacity(lower),
        };

        for (text, token) in iter {
            let text = text.as_ref();
            if text.is_empty() {
                return Err(TallyError::MalformedVocabulary(format!(
                    "special rank {token} has empty text"
                )));
            }
            if let Some(prev) = vocab.text_tokens.get(text) {
                return Err(TallyError::MalformedVocabulary(format!(
                    "special token {text:?} maps to both {prev} and {token}"
                )));
            }
            if let Some(&idx) = vocab.token_index.get(&token) {
                return Err(TallyError::MalformedVocabulary(format!(
                    "special rank {token} maps to both {:?} and {text:?}",
                    vocab.specials[idx].0
                )));
            }

            vocab.token_index.insert(token, vocab.specials.len());
            vocab.text_tokens.insert(text.to_string(), token);
            vocab.specials.push((text.to_string(), token));
        }

        Ok(vocab)
    }

    /// Get the number of special tokens in the vocab.
    pub fn len(&self) -> usize {
        self.specials.len()
    }

    /// Check if the vocab is empty.
    pub fn is_empty(&self) -> bool {
        self.specials.is_empty()
    }

    /// Iterate over ``(text, rank)`` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.specials
            .iter()
            .map(|(text, token)| (text.as_str(), *token))
    }

    /// Iterate over the special token texts in declaration order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.specials.iter().map(|(text, _)| text.as_str())
    }

    /// The position of `text` in declaration order, if it is a special token.
    pub fn declaration_index(
        &self,
        text: &str,
    ) -> Option<usize> {
        self.text_tokens
            .get(text)
            .and_then(|token| self.token_index.get(token))
            .copied()
    }

    /// Is `text` a special token?
    pub fn contains(
        &self,
        text: &str,
    ) -> bool {
        self.text_tokens.contains_key(text)
    }

    /// The largest special rank, if any.
    pub fn max_token(&self) -> Option<T> {
        self.specials.iter().map(|(_, token)| *token).max()
    }

    /// Return the rank of a special token text, if any.
    ///
    /// ## Arguments
    /// * `text` - The special token text.
    pub fn lookup_token(
        &self,
        text: &str,
    ) -> Option<T> {
        self.text_tokens.get(text).copied()
    }

    /// Return the UTF-8 bytes of a special rank's text, if any.
    ///
    /// ## Arguments
    /// * `token` - The special rank.
    pub fn lookup_span(
        &self,
        token: &T,
    ) -> Option<&[u8]> {
        self.token_index
            .get(token)
            .map(|&idx| self.specials[idx].0.as_bytes())
    }

    /// Get the alternation pattern matching every special token text.
    ///
    /// ## Returns
    /// `None` if no special tokens are present;
    /// and `Some(RegexWrapperPattern)` otherwise, with alternatives in declaration order.
    pub fn special_pattern(&self) -> Option<RegexWrapperPattern> {
        if self.is_empty() {
            return None;
        }
        let alts = self.texts().collect::<Vec<_>>();
        Some(exact_match_union_regex_pattern(&alts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type T = u32;

    #[test]
    fn test_declaration_order_kept() {
        let vocab = SpecialVocab::<T>::try_from_specials([
            ("<|z|>", 10),
            ("<|a|>", 11),
            ("<|m|>", 12),
        ])
        .unwrap();

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.texts().collect::<Vec<_>>(), vec!["<|z|>", "<|a|>", "<|m|>"]);
        assert_eq!(vocab.declaration_index("<|m|>"), Some(2));
        assert_eq!(vocab.declaration_index("nope"), None);
        assert_eq!(
            vocab.special_pattern().unwrap().as_str(),
            r"(<\|z\|>|<\|a\|>|<\|m\|>)"
        );
    }

    #[test]
    fn test_lookups() {
        let vocab = SpecialVocab::<T>::try_from_specials([("<EOT>", 0), ("<META>", 1)]).unwrap();

        assert!(vocab.contains("<EOT>"));
        assert!(!vocab.contains("<eot>"));
        assert_eq!(vocab.lookup_token("<META>"), Some(1));
        assert_eq!(vocab.lookup_span(&0), Some(b"<EOT>".as_slice()));
        assert_eq!(vocab.lookup_span(&2), None);
        assert_eq!(vocab.max_token(), Some(1));
    }

    #[test]
    fn test_empty() {
        let vocab = SpecialVocab::<T>::default();
        assert!(vocab.is_empty());
        assert!(vocab.special_pattern().is_none());
        assert_eq!(vocab.max_token(), None);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            SpecialVocab::<T>::try_from_specials([("a", 1), ("a", 2)]),
            Err(TallyError::MalformedVocabulary(_))
        ));
        assert!(matches!(
            SpecialVocab::<T>::try_from_specials([("a", 1), ("b", 1)]),
            Err(TallyError::MalformedVocabulary(_))
        ));
        assert!(matches!(
            SpecialVocab::<T>::try_from_specials([("", 1)]),
            Err(TallyError::MalformedVocabulary(_))
        ));
    }
}
