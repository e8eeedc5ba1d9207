//! # Tiktoken Base64 Vocabulary IO
//!
//! Lines are:
//! ```terminaloutput
//! {BASE64 SPAN} {RANK}
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::{
    errors::{TallyError, TallyResult},
    segmentation::SegmentationConfig,
    types::{TokenType, token_from_u64, token_to_u64},
    vocab::{SpanMapVocab, UnifiedTokenVocab},
};

/// Build a [`UnifiedTokenVocab`] from a base64 rank file.
///
/// ## Arguments
/// * `path` - path to the file.
/// * `segmentation` - the word pattern and special tokens.
pub fn load_base64_unified_vocab_path<T: TokenType>(
    path: impl AsRef<Path>,
    segmentation: SegmentationConfig<T>,
) -> TallyResult<UnifiedTokenVocab<T>> {
    let reader = BufReader::new(File::open(path)?);
    read_base64_unified_vocab(reader, segmentation)
}

/// Build a [`UnifiedTokenVocab`] from a base64 rank line reader.
///
/// ## Arguments
/// * `reader` - the line reader.
/// * `segmentation` - the word pattern and special tokens.
pub fn read_base64_unified_vocab<T: TokenType, R: BufRead>(
    reader: R,
    segmentation: SegmentationConfig<T>,
) -> TallyResult<UnifiedTokenVocab<T>> {
    UnifiedTokenVocab::try_init(segmentation, read_base64_span_vocab(reader)?)
}

/// Load a [`SpanMapVocab`] from a base64 rank file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_base64_span_vocab_path<T, P>(path: P) -> TallyResult<SpanMapVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    read_base64_span_vocab(reader)
}

/// Read a [`SpanMapVocab`] from a base64 rank line reader.
///
/// Empty lines are skipped.
///
/// # Arguments
/// * `reader` - the line reader.
pub fn read_base64_span_vocab<T, R>(reader: R) -> TallyResult<SpanMapVocab<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut token_spans = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let Some((b64, rank)) = line.split_once(' ') else {
            return Err(TallyError::Parse(format!("bad rank line: {line:?}")));
        };

        let span = BASE64_STANDARD
            .decode(b64)
            .map_err(|e| TallyError::Parse(e.to_string()))?;

        let rank: u64 = rank
            .trim()
            .parse()
            .map_err(|e: core::num::ParseIntError| TallyError::Parse(e.to_string()))?;

        token_spans.push((token_from_u64(rank)?, span));
    }

    log::debug!("read {} base64 ranks", token_spans.len());

    SpanMapVocab::try_from_token_spans(token_spans)
}

/// Save a [`SpanMapVocab`] to a base64 rank file.
///
/// # Arguments
/// * `span_vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_base64_span_vocab_path<T: TokenType, P: AsRef<Path>>(
    span_vocab: &SpanMapVocab<T>,
    path: P,
) -> TallyResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_base64_span_vocab(span_vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`SpanMapVocab`] to a [`Write`] writer, in rank order.
///
/// # Arguments
/// * `span_vocab` - the vocabulary to save.
/// * `writer` - the writer to target.
pub fn write_base64_span_vocab<T, W>(
    span_vocab: &SpanMapVocab<T>,
    writer: &mut W,
) -> TallyResult<()>
where
    T: TokenType,
    W: Write,
{
    let mut items: Vec<(T, &[u8])> = span_vocab.iter().map(|(span, token)| (token, span)).collect();
    items.sort_by_key(|(t, _)| *t);

    for (token, span) in items {
        writeln!(
            writer,
            "{} {}",
            BASE64_STANDARD.encode(span),
            token_to_u64(token)?
        )?;
    }

    Ok(())
}
