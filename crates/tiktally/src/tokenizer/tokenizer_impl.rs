use std::{io::Read, path::Path, sync::Arc};

use crate::{
    decoders::{BatchDecodeResult, DecodeResult, TokenDecoder},
    encoders::TokenEncoder,
    errors::TallyResult,
    segmentation::{ResolvedSpecialPolicy, SpecialPolicy},
    tokenizer::TokenizerOptions,
    types::TokenType,
    vocab::{
        UnifiedTokenVocab,
        io::{load_vocab_artifact_path, read_vocab_artifact},
    },
};

/// Unified Tokenizer.
///
/// Combines:
///  * [`UnifiedTokenVocab`],
///  * [`TokenEncoder`], and
///  * [`TokenDecoder`] wrappers.
///
/// A `Tokenizer` is immutable after construction, and may be shared freely
/// between threads.
#[derive(Clone)]
pub struct Tokenizer<T: TokenType> {
    vocab: Arc<UnifiedTokenVocab<T>>,
    encoder: Arc<dyn TokenEncoder<T>>,
    decoder: Arc<dyn TokenDecoder<T>>,
}

impl<T: TokenType> core::fmt::Debug for Tokenizer<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("pattern", &self.vocab.pattern())
            .field("len", &self.vocab.len())
            .finish()
    }
}

impl<T: TokenType> Tokenizer<T> {
    /// Create a new tokenizer.
    pub fn new(
        vocab: Arc<UnifiedTokenVocab<T>>,
        encoder: Arc<dyn TokenEncoder<T>>,
        decoder: Arc<dyn TokenDecoder<T>>,
    ) -> Self {
        Self {
            vocab,
            encoder,
            decoder,
        }
    }

    /// Build a tokenizer with default options.
    pub fn from_vocab(vocab: Arc<UnifiedTokenVocab<T>>) -> TallyResult<Self> {
        TokenizerOptions::default().build(vocab)
    }

    /// Load a tokenizer from a binary vocabulary artifact file.
    ///
    /// ## Arguments
    /// * `path` - The artifact path.
    /// * `options` - The tokenizer options.
    pub fn from_artifact_path<P: AsRef<Path>>(
        path: P,
        options: &TokenizerOptions,
    ) -> TallyResult<Self> {
        let artifact = load_vocab_artifact_path(path)?;
        options.build(UnifiedTokenVocab::try_from_artifact(&artifact)?.into())
    }

    /// Load a tokenizer from a binary vocabulary artifact stream.
    ///
    /// ## Arguments
    /// * `reader` - The artifact source.
    /// * `options` - The tokenizer options.
    pub fn from_artifact_reader<R: Read>(
        reader: &mut R,
        options: &TokenizerOptions,
    ) -> TallyResult<Self> {
        let artifact = read_vocab_artifact(reader)?;
        options.build(UnifiedTokenVocab::try_from_artifact(&artifact)?.into())
    }

    /// Get the underlying vocabulary.
    pub fn vocab(&self) -> &Arc<UnifiedTokenVocab<T>> {
        &self.vocab
    }

    /// Get the underlying encoder.
    pub fn encoder(&self) -> &Arc<dyn TokenEncoder<T>> {
        &self.encoder
    }

    /// Get the underlying decoder.
    pub fn decoder(&self) -> &Arc<dyn TokenDecoder<T>> {
        &self.decoder
    }

    /// Encode text; no special tokens allowed, all disallowed.
    pub fn encode(
        &self,
        text: &str,
    ) -> TallyResult<Vec<T>> {
        self.encoder.try_encode(text)
    }

    /// Encode text with explicit special token lists.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `allowed` - Specials to emit as tokens; `None` allows all of them.
    /// * `disallowed` - Specials which fail the call; `None` means every special
    ///   which is not allowed.
    pub fn encode_with_special_tokens<S: AsRef<str>>(
        &self,
        text: &str,
        allowed: Option<&[S]>,
        disallowed: Option<&[S]>,
    ) -> TallyResult<Vec<T>> {
        self.encoder
            .try_encode_with_policy(text, &SpecialPolicy::from_options(allowed, disallowed))
    }

    /// Count the tokens [`Self::encode`] would produce.
    pub fn count_tokens(
        &self,
        text: &str,
    ) -> TallyResult<usize> {
        self.encoder.try_count_tokens(text)
    }

    /// Count the tokens [`Self::encode_with_special_tokens`] would produce.
    pub fn count_with_special_tokens<S: AsRef<str>>(
        &self,
        text: &str,
        allowed: Option<&[S]>,
        disallowed: Option<&[S]>,
    ) -> TallyResult<usize> {
        self.encoder
            .try_count_tokens_with_policy(text, &SpecialPolicy::from_options(allowed, disallowed))
    }

    /// Decode tokens to a string; invalid UTF-8 becomes `U+FFFD`.
    pub fn decode(
        &self,
        tokens: &[T],
    ) -> TallyResult<String> {
        Ok(self.decoder.try_decode_to_string(tokens)?.into_value())
    }
}

impl<T: TokenType> TokenEncoder<T> for Tokenizer<T> {
    fn vocab(&self) -> &Arc<UnifiedTokenVocab<T>> {
        &self.vocab
    }

    fn try_encode_append_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
        tokens: &mut Vec<T>,
    ) -> TallyResult<()> {
        self.encoder.try_encode_append_resolved(text, policy, tokens)
    }

    fn try_count_tokens_resolved(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
    ) -> TallyResult<usize> {
        self.encoder.try_count_tokens_resolved(text, policy)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
        policy: &SpecialPolicy,
    ) -> TallyResult<Vec<Vec<T>>> {
        self.encoder.try_encode_batch(batch, policy)
    }

    fn try_count_tokens_batch(
        &self,
        batch: &[&str],
        policy: &SpecialPolicy,
    ) -> TallyResult<Vec<usize>> {
        self.encoder.try_count_tokens_batch(batch, policy)
    }
}

impl<T: TokenType> TokenDecoder<T> for Tokenizer<T> {
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TallyResult<DecodeResult<Vec<u8>>> {
        self.decoder.try_decode_to_bytes(tokens)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> TallyResult<BatchDecodeResult<Vec<u8>>> {
        self.decoder.try_decode_batch_to_bytes(batch)
    }

    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> TallyResult<DecodeResult<String>> {
        self.decoder.try_decode_to_string(tokens)
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> TallyResult<BatchDecodeResult<String>> {
        self.decoder.try_decode_batch_to_strings(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encoders::testing::common_encoder_tests,
        errors::TallyError,
        types::{check_is_send, check_is_sync},
        vocab::{io::write_vocab_artifact, utility::testing::build_test_vocab},
    };

    type T = u32;

    fn tokenizer() -> Tokenizer<T> {
        Tokenizer::from_vocab(build_test_vocab::<T>().into()).unwrap()
    }

    #[test]
    fn test_tokenizer_as_encoder() {
        let tok = tokenizer();
        check_is_send(&tok);
        check_is_sync(&tok);

        common_encoder_tests(&tok);
    }

    #[test]
    fn test_encode_decode() {
        let tok = tokenizer();

        let text = "hello world, the end";
        let tokens = tok.encode(text).unwrap();
        assert_eq!(tok.count_tokens(text).unwrap(), tokens.len());
        assert_eq!(tok.decode(&tokens).unwrap(), text);

        assert!(matches!(
            tok.encode("x<|fim_prefix|>"),
            Err(TallyError::DisallowedSpecialTokenFound { position: 1, .. })
        ));
    }

    #[test]
    fn test_special_token_options() {
        let tok = tokenizer();
        let text = "a<|endoftext|>b<|fim_suffix|>";

        // None allows everything.
        let tokens = tok
            .encode_with_special_tokens::<&str>(text, None, None)
            .unwrap();
        assert_eq!(tokens, vec![97, 1000, 98, 1003]);
        assert_eq!(
            tok.count_with_special_tokens::<&str>(text, None, None)
                .unwrap(),
            4
        );

        // Only one allowed; the other is disallowed by complement.
        assert!(matches!(
            tok.encode_with_special_tokens(text, Some(&["<|endoftext|>"][..]), None),
            Err(TallyError::DisallowedSpecialTokenFound { ref token, position: 15 })
                if token == "<|fim_suffix|>"
        ));

        // Nothing allowed or disallowed; every special is text.
        let empty: &[&str] = &[];
        let tokens = tok
            .encode_with_special_tokens(text, Some(empty), Some(empty))
            .unwrap();
        assert!(tokens.iter().all(|&t| t < 1000));
        assert_eq!(tok.decode(&tokens).unwrap(), text);
    }

    #[test]
    fn test_from_artifact_reader() {
        let artifact = build_test_vocab::<T>().try_to_artifact().unwrap();
        let mut buf = Vec::new();
        write_vocab_artifact(&artifact, &mut buf).unwrap();

        let tok =
            Tokenizer::<T>::from_artifact_reader(&mut buf.as_slice(), &Default::default())
                .unwrap();
        assert_eq!(tok.encode("hello").unwrap(), tokenizer().encode("hello").unwrap());
    }

    #[test]
    fn test_from_artifact_path() {
        tempdir::TempDir::new("tokenizer_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.ttv");
                let artifact = build_test_vocab::<T>().try_to_artifact().unwrap();
                crate::vocab::io::save_vocab_artifact_path(&artifact, &path).unwrap();

                let tok = Tokenizer::<T>::from_artifact_path(
                    &path,
                    &TokenizerOptions::default().with_parallel(true),
                )
                .unwrap();
                assert_eq!(tok.decode(&[104, 105]).unwrap(), "hi");
                Ok(())
            })
            .unwrap();
    }
}
