//! # JSON Vocabulary Source
//!
//! Vocabulary definitions are published as JSON documents:
//! ```json
//! {
//!   "bpe_ranks": "<label> <offset> <b64> <b64> ...\n...",
//!   "pat_str": "...",
//!   "special_tokens": { "<|endoftext|>": 100257 },
//!   "explicit_n_vocab": 100277
//! }
//! ```
//!
//! Within a `bpe_ranks` line, the n-th base64 span has rank `offset + n`.
//! [`VocabSource::try_to_artifact`] turns a document into a [`VocabArtifact`].

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{TallyError, TallyResult},
    vocab::io::artifact::VocabArtifact,
};

/// A JSON vocabulary source document.
///
/// `special_tokens` keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabSource {
    /// Newline separated rank lines.
    #[serde(default)]
    pub bpe_ranks: Option<String>,

    /// The word split pattern.
    #[serde(default)]
    pub pat_str: Option<String>,

    /// ``{ text -> rank }`` special tokens.
    #[serde(default)]
    pub special_tokens: Option<serde_json::Map<String, serde_json::Value>>,

    /// Expected total of base and special ranks.
    #[serde(default)]
    pub explicit_n_vocab: Option<u64>,
}

/// Parse a `bpe_ranks` blob into ``(rank, bytes)`` pairs.
///
/// Empty lines are skipped.
///
/// ## Arguments
/// * `bpe_ranks` - The newline separated rank lines.
///
/// ## Returns
/// The pairs, in blob order.
pub fn parse_bpe_ranks(bpe_ranks: &str) -> TallyResult<Vec<(u64, Vec<u8>)>> {
    let mut ranks = Vec::new();

    for line in bpe_ranks.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split(' ');
        let _label = parts.next();
        let offset: u64 = parts
            .next()
            .ok_or_else(|| TallyError::Parse(format!("rank line has no offset: {line:?}")))?
            .parse()
            .map_err(|e: core::num::ParseIntError| TallyError::Parse(e.to_string()))?;

        for (idx, b64) in parts.enumerate() {
            let bytes = BASE64_STANDARD
                .decode(b64)
                .map_err(|e| TallyError::Parse(format!("bad base64 {b64:?}: {e}")))?;
            ranks.push((offset + idx as u64, bytes));
        }
    }

    Ok(ranks)
}

impl VocabSource {
    /// The special tokens as ``(text, rank)`` pairs, in document order.
    pub fn special_token_list(&self) -> TallyResult<Vec<(String, u64)>> {
        let Some(specials) = &self.special_tokens else {
            return Ok(Vec::new());
        };
        specials
            .iter()
            .map(|(text, rank)| {
                rank.as_u64()
                    .map(|rank| (text.clone(), rank))
                    .ok_or_else(|| {
                        TallyError::Parse(format!("special token {text:?} has rank {rank}"))
                    })
            })
            .collect()
    }

    /// Build the [`VocabArtifact`] for this source.
    ///
    /// ## Returns
    /// The artifact; or [`TallyError::Parse`] when `bpe_ranks` or `pat_str` is absent,
    /// or [`TallyError::MalformedVocabulary`] when ranks collide or the
    /// `explicit_n_vocab` count disagrees.
    pub fn try_to_artifact(&self) -> TallyResult<VocabArtifact> {
        let bpe_ranks = self
            .bpe_ranks
            .as_deref()
            .ok_or_else(|| TallyError::Parse("source has no bpe_ranks".to_string()))?;
        let pat_str = self
            .pat_str
            .as_deref()
            .ok_or_else(|| TallyError::Parse("source has no pat_str".to_string()))?;

        let artifact = VocabArtifact::try_from_ranks(
            parse_bpe_ranks(bpe_ranks)?,
            self.special_token_list()?,
            pat_str,
        )?;

        if let Some(expected) = self.explicit_n_vocab {
            let actual = (artifact.rank_to_bytes.len() + artifact.special_tokens.len()) as u64;
            if actual != expected {
                return Err(TallyError::MalformedVocabulary(format!(
                    "explicit_n_vocab is {expected}, but source defines {actual} ranks"
                )));
            }
        }

        Ok(artifact)
    }
}

/// Read a [`VocabSource`] from a JSON reader.
pub fn read_vocab_source<R: Read>(reader: R) -> TallyResult<VocabSource> {
    serde_json::from_reader(reader).map_err(|e| TallyError::Parse(e.to_string()))
}

/// Load a [`VocabSource`] from a JSON file.
pub fn load_vocab_source_path<P: AsRef<Path>>(path: P) -> TallyResult<VocabSource> {
    let path = path.as_ref();
    let source = read_vocab_source(BufReader::new(File::open(path)?))?;
    log::debug!("read vocab source {}", path.display());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::UnifiedTokenVocab;

    const SOURCE: &str = r#"{
        "bpe_ranks": "! 0 YQ== Yg== Yw==\n\n! 3 YWI= YmM=\n",
        "pat_str": "\\w+|\\s+",
        "special_tokens": {"<|z|>": 100, "<|a|>": 101},
        "explicit_n_vocab": 7
    }"#;

    #[test]
    fn test_parse_bpe_ranks() {
        let ranks = parse_bpe_ranks("x 10 YQ== Yg==\r\ny 2 Yw==").unwrap();
        assert_eq!(
            ranks,
            vec![(10, b"a".to_vec()), (11, b"b".to_vec()), (2, b"c".to_vec())]
        );

        assert!(matches!(parse_bpe_ranks("x"), Err(TallyError::Parse(_))));
        assert!(matches!(parse_bpe_ranks("x y YQ=="), Err(TallyError::Parse(_))));
        assert!(matches!(parse_bpe_ranks("x 0 ***"), Err(TallyError::Parse(_))));
    }

    #[test]
    fn test_source_to_artifact() {
        let source = read_vocab_source(SOURCE.as_bytes()).unwrap();
        let artifact = source.try_to_artifact().unwrap();

        assert_eq!(artifact.regex_pattern, r"\w+|\s+");
        assert_eq!(artifact.rank_to_bytes.get(&3), Some(&b"ab".to_vec()));
        assert_eq!(artifact.bytes_base64_to_rank.get("YmM="), Some(&4));
        assert_eq!(
            artifact.special_tokens,
            vec![("<|z|>".to_string(), 100), ("<|a|>".to_string(), 101)]
        );

        let vocab = UnifiedTokenVocab::<u32>::try_from_artifact(&artifact).unwrap();
        assert_eq!(vocab.len(), 7);
        assert_eq!(
            vocab.special_vocab().texts().collect::<Vec<_>>(),
            vec!["<|z|>", "<|a|>"]
        );
    }

    #[test]
    fn test_source_file() {
        tempdir::TempDir::new("vocab_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.json");
                std::fs::write(&path, SOURCE)?;

                let source = load_vocab_source_path(&path).expect("Failed to load source");
                assert_eq!(source.explicit_n_vocab, Some(7));

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_source_errors() {
        let missing = read_vocab_source(r#"{"pat_str": "x"}"#.as_bytes()).unwrap();
        assert!(matches!(missing.try_to_artifact(), Err(TallyError::Parse(_))));

        let missing = read_vocab_source(r#"{"bpe_ranks": "! 0 YQ=="}"#.as_bytes()).unwrap();
        assert!(matches!(missing.try_to_artifact(), Err(TallyError::Parse(_))));

        let mut source = read_vocab_source(SOURCE.as_bytes()).unwrap();
        source.explicit_n_vocab = Some(8);
        assert!(matches!(
            source.try_to_artifact(),
            Err(TallyError::MalformedVocabulary(_))
        ));

        let bad_rank = read_vocab_source(
            r#"{"bpe_ranks": "! 0 YQ==", "pat_str": "x", "special_tokens": {"<|x|>": -1}}"#
                .as_bytes(),
        )
        .unwrap();
        assert!(matches!(bad_rank.try_to_artifact(), Err(TallyError::Parse(_))));

        assert!(matches!(
            read_vocab_source("not json".as_bytes()),
            Err(TallyError::Parse(_))
        ));
    }
}
