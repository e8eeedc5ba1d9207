//! # Encoder Test Utilities

use crate::{
    encoders::{
        MissingRankPolicy,
        TokenEncoder,
        token_span_encoder::{SpanEncoder, span_encoders::MergeScanSpanEncoder},
    },
    errors::TallyError,
    segmentation::SpecialPolicy,
    types::TokenType,
    vocab::{
        SpanMapVocab,
        UnifiedTokenVocab,
        utility::testing::{build_test_span_vocab, build_test_vocab},
    },
};

/// Sample text exercised by the common tests.
pub const COMMON_SAMPLES: &[&str] = &[
    "hello world",
    " the thing",
    "abcdefg",
    "thethe",
    "Ünïcödé 漢字",
    "a\n\n  b\tc",
];

/// A small vocabulary whose merge order is easy to trace by hand.
///
/// Single letters rank above every merge.
pub fn merge_trace_vocab<T: TokenType>() -> SpanMapVocab<T> {
    let spans: &[(usize, &str)] = &[
        (100, "a"),
        (101, "b"),
        (102, "c"),
        (103, "d"),
        (104, "x"),
        (105, "y"),
        (1, "bc"),
        (2, "aa"),
        (3, "abc"),
        (4, "bcd"),
        (5, "ab"),
        (6, "cd"),
        (7, "aaaa"),
    ];
    SpanMapVocab::try_from_token_spans(
        spans
            .iter()
            .map(|&(rank, span)| (T::from_usize(rank).unwrap(), span.as_bytes().to_vec())),
    )
    .unwrap()
}

/// Checks every [`SpanEncoder`] must pass.
pub fn common_span_encoder_tests<T: TokenType, SE: SpanEncoder<T>>(mut se: SE) {
    let vocab: SpanMapVocab<T> = build_test_span_vocab();
    let mut reference = MergeScanSpanEncoder::<T>::default();

    for sample in COMMON_SAMPLES {
        let span = sample.as_bytes();

        let parts = se.merge_parts(&vocab, span).to_vec();
        let mut end = 0;
        for part in &parts {
            assert_eq!(part.start, end, "parts of {sample:?} are not contiguous");
            assert!(part.start < part.end);
            assert!(vocab.lookup_token(&span[part.clone()]).is_some());
            end = part.end;
        }
        assert_eq!(end, span.len());

        assert_eq!(parts, reference.merge_parts(&vocab, span).to_vec());

        let mut tokens = Vec::new();
        se.encode_append_compound_span(&vocab, span, MissingRankPolicy::Strict, &mut tokens)
            .unwrap();
        let bytes: Vec<u8> = tokens
            .iter()
            .flat_map(|t| vocab.lookup_span(t).unwrap().to_vec())
            .collect();
        assert_eq!(bytes, span);
    }
}

/// The vocabulary used by [`common_encoder_tests`].
pub fn common_encoder_test_vocab<T: TokenType>() -> UnifiedTokenVocab<T> {
    build_test_vocab()
}

fn decode_bytes<T: TokenType>(
    vocab: &UnifiedTokenVocab<T>,
    tokens: &[T],
) -> Vec<u8> {
    tokens
        .iter()
        .flat_map(|t| vocab.lookup_span(t).unwrap().to_vec())
        .collect()
}

/// Checks every [`TokenEncoder`] over [`common_encoder_test_vocab`] must pass.
pub fn common_encoder_tests<T: TokenType, E: TokenEncoder<T> + ?Sized>(encoder: &E) {
    let vocab = encoder.vocab().clone();
    let rank = |s: &str| vocab.lookup_token(s.as_bytes()).unwrap();

    assert_eq!(encoder.try_encode("").unwrap(), Vec::<T>::new());
    assert_eq!(encoder.try_count_tokens("").unwrap(), 0);

    assert_eq!(
        encoder.try_encode("hello world").unwrap(),
        vec![rank("hello"), rank(" world")]
    );

    for sample in COMMON_SAMPLES {
        let tokens = encoder.try_encode(sample).unwrap();
        assert_eq!(decode_bytes(&vocab, &tokens), sample.as_bytes());
        assert_eq!(encoder.try_count_tokens(sample).unwrap(), tokens.len());
        assert_eq!(encoder.try_encode(sample).unwrap(), tokens);
    }

    let batch = encoder
        .try_encode_batch(COMMON_SAMPLES, &SpecialPolicy::default())
        .unwrap();
    let counts = encoder
        .try_count_tokens_batch(COMMON_SAMPLES, &SpecialPolicy::default())
        .unwrap();
    for ((sample, tokens), count) in COMMON_SAMPLES.iter().zip(&batch).zip(counts) {
        assert_eq!(tokens, &encoder.try_encode(sample).unwrap());
        assert_eq!(count, tokens.len());
    }

    // Specials are disallowed by default.
    let text = "hi <|endoftext|>";
    assert!(matches!(
        encoder.try_encode(text),
        Err(TallyError::DisallowedSpecialTokenFound { ref token, position: 3 })
            if token == "<|endoftext|>"
    ));
    assert!(encoder.try_count_tokens(text).is_err());

    let eot = vocab.special_vocab().lookup_token("<|endoftext|>").unwrap();
    let allowed = encoder
        .try_encode_with_policy("a<|endoftext|>b", &SpecialPolicy::allow_all())
        .unwrap();
    assert_eq!(allowed, vec![rank("a"), eot, rank("b")]);
    assert_eq!(
        encoder
            .try_count_tokens_with_policy("a<|endoftext|>b", &SpecialPolicy::allow_all())
            .unwrap(),
        3
    );

    let as_text = encoder
        .try_encode_with_policy(text, &SpecialPolicy::treat_all_as_text())
        .unwrap();
    assert!(!as_text.contains(&eot));
    assert_eq!(decode_bytes(&vocab, &as_text), text.as_bytes());
}
