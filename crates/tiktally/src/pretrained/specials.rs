//! # Special Tokens

/// `<|endoftext|>`
pub const ENDOFTEXT: &str = "<|endoftext|>";
/// `<|fim_prefix|>`
pub const FIM_PREFIX: &str = "<|fim_prefix|>";
/// `<|fim_middle|>`
pub const FIM_MIDDLE: &str = "<|fim_middle|>";
/// `<|fim_suffix|>`
pub const FIM_SUFFIX: &str = "<|fim_suffix|>";
/// `<|endofprompt|>`
pub const ENDOFPROMPT: &str = "<|endofprompt|>";

/// The "`cl100k_base`" special tokens, in declaration order.
pub const CL100K_BASE_SPECIALS: &[(&str, u32)] = &[
    (ENDOFTEXT, 100257),
    (FIM_PREFIX, 100258),
    (FIM_MIDDLE, 100259),
    (FIM_SUFFIX, 100260),
    (ENDOFPROMPT, 100276),
];

/// The Claude vocabulary special tokens, in declaration order.
pub const CLAUDE_SPECIALS: &[(&str, u32)] = &[
    ("<EOT>", 0),
    ("<META>", 1),
    ("<META_START>", 2),
    ("<META_END>", 3),
    ("<SOS>", 4),
];

/// Convert a special token table to owned pairs.
pub fn owned_specials(specials: &[(&str, u32)]) -> Vec<(String, u32)> {
    specials
        .iter()
        .map(|&(text, token)| (text.to_string(), token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::SpecialVocab;

    #[test]
    fn test_specials_are_valid() {
        for table in [CL100K_BASE_SPECIALS, CLAUDE_SPECIALS] {
            let vocab = SpecialVocab::<u32>::try_from_specials(owned_specials(table)).unwrap();
            assert_eq!(vocab.len(), table.len());
            assert_eq!(vocab.texts().next(), Some(table[0].0));
        }
    }
}
