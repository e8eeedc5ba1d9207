#![allow(missing_docs)]

use std::sync::Arc;

use proptest::prelude::*;
use tiktally::{
    SpecialPolicy,
    TokenEncoder,
    TokenEncoderOptions,
    Tokenizer,
    UnifiedTokenVocab,
    encoders::token_span_encoder::{
        SpanEncoder,
        SpanEncoderSelector,
        span_encoders::{MergeScanSpanEncoder, PriorityMergeSpanEncoder},
    },
    pretrained::CL100K_BASE_WORD_PATTERN,
    vocab::SpanMapVocab,
};

const SPECIALS: &[&str] = &["<|endoftext|>", "<|fim_prefix|>"];

/// Every single byte, plus a few dozen common merges.
fn token_spans() -> Vec<(u32, Vec<u8>)> {
    let merges = [
        "th", "he", "in", "er", "an", " t", "re", "on", " a", "en", "at", "ou", "ed", "nd", "ing",
        " th", "the", " the", "is", " i", "es", "or", "ll", "  ", "\n\n", "ab", "ba", "aa", "aaa",
        "abab",
    ];
    (0..=255u8)
        .map(|b| vec![b])
        .chain(merges.iter().map(|m| m.as_bytes().to_vec()))
        .enumerate()
        .map(|(rank, span)| (rank as u32, span))
        .collect()
}

fn vocab() -> Arc<UnifiedTokenVocab<u32>> {
    UnifiedTokenVocab::try_from_parts(
        CL100K_BASE_WORD_PATTERN.to_pattern(),
        token_spans(),
        [(SPECIALS[0], 5000u32), (SPECIALS[1], 5001)],
    )
    .unwrap()
    .into()
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,64}",
        "[ab ]{0,64}",
        "[a-z \n]{0,48}",
    ]
}

fn special_text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[a-z ]{0,8}",
            Just(SPECIALS[0].to_string()),
            Just(SPECIALS[1].to_string()),
        ],
        0..6,
    )
    .prop_map(|parts| parts.concat())
}

fn policy_strategy() -> impl Strategy<Value = SpecialPolicy> {
    prop_oneof![
        Just(SpecialPolicy::default()),
        Just(SpecialPolicy::allow_all()),
        Just(SpecialPolicy::treat_all_as_text()),
        Just(SpecialPolicy::allow_only([SPECIALS[0]])),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn round_trip(text in text_strategy()) {
        let tok = Tokenizer::from_vocab(vocab()).unwrap();
        let tokens = tok.encode(&text).unwrap();
        prop_assert_eq!(tok.decode(&tokens).unwrap(), text);
    }

    #[test]
    fn count_equals_encode_len(
        text in special_text_strategy(),
        policy in policy_strategy(),
    ) {
        let encoder = TokenEncoderOptions::default().build(vocab()).unwrap();
        match encoder.try_encode_with_policy(&text, &policy) {
            Ok(tokens) => prop_assert_eq!(
                encoder.try_count_tokens_with_policy(&text, &policy).unwrap(),
                tokens.len()
            ),
            Err(_) => prop_assert!(encoder.try_count_tokens_with_policy(&text, &policy).is_err()),
        }
    }

    #[test]
    fn allowed_specials_round_trip(text in special_text_strategy()) {
        let tok = Tokenizer::from_vocab(vocab()).unwrap();
        let tokens = tok.encode_with_special_tokens::<&str>(&text, None, None).unwrap();
        prop_assert_eq!(tok.decode(&tokens).unwrap(), text.clone());

        let has_special = SPECIALS.iter().any(|s| text.contains(s));
        prop_assert_eq!(tok.encode(&text).is_err(), has_special);
    }

    #[test]
    fn engines_agree_and_are_deterministic(text in text_strategy()) {
        let vocab = vocab();
        let encoders: Vec<_> = [
            SpanEncoderSelector::Reference,
            SpanEncoderSelector::MergeScan,
            SpanEncoderSelector::PriorityMerge,
        ]
        .into_iter()
        .map(|selector| {
            TokenEncoderOptions::default()
                .with_span_encoder(selector)
                .build(vocab.clone())
                .unwrap()
        })
        .collect();

        let expected = encoders[0].try_encode(&text).unwrap();
        prop_assert_eq!(&encoders[0].try_encode(&text).unwrap(), &expected);
        for encoder in &encoders[1..] {
            prop_assert_eq!(&encoder.try_encode(&text).unwrap(), &expected);
        }
    }

    #[test]
    fn merge_parts_cover_span(span in proptest::collection::vec(any::<u8>(), 2..48)) {
        let spans = SpanMapVocab::<u32>::try_from_token_spans(token_spans()).unwrap();

        let mut scan = MergeScanSpanEncoder::<u32>::default();
        let mut heap = PriorityMergeSpanEncoder::<u32>::default();

        let parts = scan.merge_parts(&spans, &span).to_vec();
        prop_assert_eq!(&parts, &heap.merge_parts(&spans, &span).to_vec());

        // At most `len - 1` merges happen.
        prop_assert!(!parts.is_empty() && parts.len() <= span.len());
        let mut end = 0;
        for part in &parts {
            prop_assert_eq!(part.start, end);
            prop_assert!(spans.lookup_token(&span[part.clone()]).is_some());
            end = part.end;
        }
        prop_assert_eq!(end, span.len());
    }
}
