//! # Binary Vocabulary Artifact
//!
//! The runtime loads vocabularies from a compact binary artifact:
//! ```terminaloutput
//! b"TTV1" ++ bincode(VocabArtifact)
//! ```
//!
//! The artifact carries both directions of each table; loading checks that
//! they agree before anything is built from them.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{TallyError, TallyResult},
    regex::RegexWrapperPattern,
    types::{TokenType, token_from_u64, token_to_u64},
    vocab::UnifiedTokenVocab,
};

/// Leading magic bytes of a vocabulary artifact.
pub const VOCAB_ARTIFACT_MAGIC: &[u8; 4] = b"TTV1";

/// Serialized vocabulary record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabArtifact {
    /// ``{ rank -> bytes }`` for base ranks.
    pub rank_to_bytes: BTreeMap<u64, Vec<u8>>,

    /// ``{ base64(bytes) -> rank }`` for base ranks.
    pub bytes_base64_to_rank: BTreeMap<String, u64>,

    /// ``(text, rank)`` special tokens, in declaration order.
    pub special_tokens: Vec<(String, u64)>,

    /// ``{ rank -> utf8(text) }`` for special ranks.
    pub inverse_special_tokens: BTreeMap<u64, Vec<u8>>,

    /// The word split pattern.
    pub regex_pattern: String,
}

impl VocabArtifact {
    /// Build an artifact, deriving the redundant tables.
    ///
    /// ## Arguments
    /// * `ranks` - The base ``(rank, bytes)`` pairs.
    /// * `specials` - The special ``(text, rank)`` pairs, in declaration order.
    /// * `pattern` - The word split pattern.
    ///
    /// ## Returns
    /// The artifact, or [`TallyError::MalformedVocabulary`] on a duplicate rank or span.
    pub fn try_from_ranks<I, J>(
        ranks: I,
        specials: J,
        pattern: impl Into<String>,
    ) -> TallyResult<Self>
    where
        I: IntoIterator<Item = (u64, Vec<u8>)>,
        J: IntoIterator<Item = (String, u64)>,
    {
        let mut artifact = Self {
            regex_pattern: pattern.into(),
            ..Default::default()
        };

        for (rank, bytes) in ranks {
            let b64 = BASE64_STANDARD.encode(&bytes);
            if artifact.bytes_base64_to_rank.insert(b64, rank).is_some() {
                return Err(TallyError::MalformedVocabulary(format!(
                    "span {bytes:?} is ranked twice"
                )));
            }
            if artifact.rank_to_bytes.insert(rank, bytes).is_some() {
                return Err(TallyError::MalformedVocabulary(format!(
                    "rank {rank} is assigned twice"
                )));
            }
        }

        for (text, rank) in specials {
            if artifact
                .inverse_special_tokens
                .insert(rank, text.as_bytes().to_vec())
                .is_some()
            {
                return Err(TallyError::MalformedVocabulary(format!(
                    "special rank {rank} is assigned twice"
                )));
            }
            artifact.special_tokens.push((text, rank));
        }

        Ok(artifact)
    }

    /// Check that the redundant tables agree.
    pub fn try_validate(&self) -> TallyResult<()> {
        if self.rank_to_bytes.len() != self.bytes_base64_to_rank.len() {
            return Err(TallyError::MalformedVocabulary(format!(
                "{} ranks but {} base64 spans",
                self.rank_to_bytes.len(),
                self.bytes_base64_to_rank.len()
            )));
        }
        for (&rank, bytes) in &self.rank_to_bytes {
            let b64 = BASE64_STANDARD.encode(bytes);
            if self.bytes_base64_to_rank.get(&b64) != Some(&rank) {
                return Err(TallyError::MalformedVocabulary(format!(
                    "rank {rank} does not round-trip through its base64 span {b64:?}"
                )));
            }
        }

        if self.special_tokens.len() != self.inverse_special_tokens.len() {
            return Err(TallyError::MalformedVocabulary(format!(
                "{} special tokens but {} inverse entries",
                self.special_tokens.len(),
                self.inverse_special_tokens.len()
            )));
        }
        for (text, rank) in &self.special_tokens {
            if self.inverse_special_tokens.get(rank).map(Vec::as_slice) != Some(text.as_bytes()) {
                return Err(TallyError::MalformedVocabulary(format!(
                    "special token {text:?} does not round-trip through rank {rank}"
                )));
            }
        }

        Ok(())
    }
}

impl<T: TokenType> UnifiedTokenVocab<T> {
    /// Build a vocabulary from a [`VocabArtifact`].
    ///
    /// ## Returns
    /// The vocabulary, or [`TallyError::MalformedVocabulary`] if the tables are inconsistent.
    pub fn try_from_artifact(artifact: &VocabArtifact) -> TallyResult<Self> {
        artifact.try_validate()?;

        let token_spans = artifact
            .rank_to_bytes
            .iter()
            .map(|(&rank, bytes)| Ok((token_from_u64::<T>(rank)?, bytes.clone())))
            .collect::<TallyResult<Vec<_>>>()?;

        let specials = artifact
            .special_tokens
            .iter()
            .map(|(text, rank)| Ok((text.as_str(), token_from_u64::<T>(*rank)?)))
            .collect::<TallyResult<Vec<_>>>()?;

        Self::try_from_parts(
            RegexWrapperPattern::Adaptive(artifact.regex_pattern.clone()),
            token_spans,
            specials,
        )
    }

    /// Export the vocabulary as a [`VocabArtifact`].
    pub fn try_to_artifact(&self) -> TallyResult<VocabArtifact> {
        let ranks = self
            .span_vocab()
            .iter()
            .map(|(span, token)| Ok((token_to_u64(token)?, span.to_vec())))
            .collect::<TallyResult<Vec<_>>>()?;

        let specials = self
            .special_vocab()
            .iter()
            .map(|(text, token)| Ok((text.to_string(), token_to_u64(token)?)))
            .collect::<TallyResult<Vec<_>>>()?;

        VocabArtifact::try_from_ranks(ranks, specials, self.pattern().as_str())
    }
}

/// Write a [`VocabArtifact`] to a writer.
pub fn write_vocab_artifact<W: Write>(
    artifact: &VocabArtifact,
    writer: &mut W,
) -> TallyResult<()> {
    writer.write_all(VOCAB_ARTIFACT_MAGIC)?;
    bincode::serde::encode_into_std_write(artifact, writer, bincode::config::standard())
        .map_err(|e| TallyError::Parse(format!("artifact encode: {e}")))?;
    Ok(())
}

/// Read a [`VocabArtifact`] from a reader.
///
/// The tables are not cross-checked here; see [`VocabArtifact::try_validate`].
pub fn read_vocab_artifact<R: Read>(reader: &mut R) -> TallyResult<VocabArtifact> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != VOCAB_ARTIFACT_MAGIC {
        return Err(TallyError::MalformedVocabulary(format!(
            "bad artifact header {magic:?}"
        )));
    }

    bincode::serde::decode_from_std_read(reader, bincode::config::standard())
        .map_err(|e| TallyError::MalformedVocabulary(format!("artifact decode: {e}")))
}

/// Save a [`VocabArtifact`] to a file.
pub fn save_vocab_artifact_path<P: AsRef<Path>>(
    artifact: &VocabArtifact,
    path: P,
) -> TallyResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_vocab_artifact(artifact, &mut writer)?;
    writer.flush()?;
    log::debug!("wrote vocab artifact {}", path.display());
    Ok(())
}

/// Load a [`VocabArtifact`] from a file.
pub fn load_vocab_artifact_path<P: AsRef<Path>>(path: P) -> TallyResult<VocabArtifact> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let artifact = read_vocab_artifact(&mut reader)?;
    log::debug!("read vocab artifact {}", path.display());
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::utility::testing::build_test_vocab;

    type T = u32;

    #[test]
    fn test_artifact_file_round_trip() {
        let vocab: UnifiedTokenVocab<T> = build_test_vocab();
        let artifact = vocab.try_to_artifact().unwrap();
        artifact.try_validate().unwrap();

        assert_eq!(artifact.rank_to_bytes.len(), vocab.span_vocab().len());
        assert_eq!(
            artifact
                .special_tokens
                .iter()
                .map(|(text, _)| text.as_str())
                .collect::<Vec<_>>(),
            vocab.special_vocab().texts().collect::<Vec<_>>()
        );

        tempdir::TempDir::new("vocab_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.ttv");

                save_vocab_artifact_path(&artifact, &path).expect("Failed to save artifact");
                let loaded = load_vocab_artifact_path(&path).expect("Failed to load artifact");
                assert_eq!(&loaded, &artifact);

                let rebuilt = UnifiedTokenVocab::<T>::try_from_artifact(&loaded).unwrap();
                assert_eq!(rebuilt.span_vocab(), vocab.span_vocab());
                assert_eq!(rebuilt.special_vocab(), vocab.special_vocab());
                assert_eq!(rebuilt.pattern().as_str(), vocab.pattern().as_str());

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_bad_header() {
        let mut data: &[u8] = b"NOPE\x00\x00";
        assert!(matches!(
            read_vocab_artifact(&mut data),
            Err(TallyError::MalformedVocabulary(_))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let artifact = build_test_vocab::<T>().try_to_artifact().unwrap();
        let mut buf = Vec::new();
        write_vocab_artifact(&artifact, &mut buf).unwrap();
        buf.truncate(buf.len() / 2);

        assert!(read_vocab_artifact(&mut buf.as_slice()).is_err());
    }

    #[test]
    fn test_inconsistent_tables_rejected() {
        let mut artifact = VocabArtifact::try_from_ranks(
            [(0, b"a".to_vec()), (1, b"b".to_vec())],
            [("<|x|>".to_string(), 9)],
            r"\w+",
        )
        .unwrap();
        artifact.try_validate().unwrap();

        let mut broken = artifact.clone();
        broken.bytes_base64_to_rank.insert("YQ==".to_string(), 1);
        assert!(matches!(
            UnifiedTokenVocab::<T>::try_from_artifact(&broken),
            Err(TallyError::MalformedVocabulary(_))
        ));

        artifact.inverse_special_tokens.insert(9, b"<|y|>".to_vec());
        assert!(matches!(
            artifact.try_validate(),
            Err(TallyError::MalformedVocabulary(_))
        ));
    }

    #[test]
    fn test_duplicate_ranks_rejected() {
        assert!(matches!(
            VocabArtifact::try_from_ranks(
                [(0, b"a".to_vec()), (0, b"b".to_vec())],
                Vec::<(String, u64)>::new(),
                "x"
            ),
            Err(TallyError::MalformedVocabulary(_))
        ));
        assert!(matches!(
            VocabArtifact::try_from_ranks(
                [(0, b"a".to_vec()), (1, b"a".to_vec())],
                Vec::<(String, u64)>::new(),
                "x"
            ),
            Err(TallyError::MalformedVocabulary(_))
        ));
    }
}
