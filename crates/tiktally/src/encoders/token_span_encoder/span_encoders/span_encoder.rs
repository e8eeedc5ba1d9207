use core::ops::Range;

use crate::{
    encoders::MissingRankPolicy,
    errors::{TallyError, TallyResult},
    types::TokenType,
    vocab::SpanMapVocab,
};

/// A byte-pair merge engine.
///
/// Implementations differ only in how they find the next merge;
/// each merge joins the adjacent pair whose combined bytes have the
/// smallest rank, taking the leftmost pair on ties.
pub trait SpanEncoder<T: TokenType>: Send {
    /// Merge `span` down to its final parts.
    ///
    /// ## Arguments
    /// * `vocab` - The rank vocabulary.
    /// * `span` - The bytes to merge; at least 2 long.
    ///
    /// ## Returns
    /// The final parts, in order, as ranges into `span`.
    fn merge_parts(
        &mut self,
        vocab: &SpanMapVocab<T>,
        span: &[u8],
    ) -> &[Range<usize>];

    /// Visit the ranks of a span which has no rank of its own.
    ///
    /// A 1-byte span is not merged. Final parts without a rank are
    /// skipped, or fail under [`MissingRankPolicy::Strict`].
    ///
    /// ## Arguments
    /// * `vocab` - The rank vocabulary.
    /// * `span` - The byte span.
    /// * `missing_ranks` - What to do with unranked parts.
    /// * `f` - Called with each rank, in order.
    fn for_each_compound_token(
        &mut self,
        vocab: &SpanMapVocab<T>,
        span: &[u8],
        missing_ranks: MissingRankPolicy,
        f: &mut dyn FnMut(T),
    ) -> TallyResult<()> {
        if span.len() < 2 {
            return emit_part(vocab, span, missing_ranks, f);
        }
        for part in self.merge_parts(vocab, span) {
            emit_part(vocab, &span[part.clone()], missing_ranks, f)?;
        }
        Ok(())
    }

    /// Encode a span which has no rank of its own, appending to `tokens`.
    ///
    /// ## Arguments
    /// * `vocab` - The rank vocabulary.
    /// * `span` - The byte span.
    /// * `missing_ranks` - What to do with unranked parts.
    /// * `tokens` - The target token buffer to append to.
    fn encode_append_compound_span(
        &mut self,
        vocab: &SpanMapVocab<T>,
        span: &[u8],
        missing_ranks: MissingRankPolicy,
        tokens: &mut Vec<T>,
    ) -> TallyResult<()> {
        self.for_each_compound_token(vocab, span, missing_ranks, &mut |t| tokens.push(t))
    }
}

fn emit_part<T: TokenType>(
    vocab: &SpanMapVocab<T>,
    part: &[u8],
    missing_ranks: MissingRankPolicy,
    f: &mut dyn FnMut(T),
) -> TallyResult<()> {
    match vocab.lookup_token(part) {
        Some(token) => {
            f(token);
            Ok(())
        }
        None if missing_ranks.is_strict() => Err(TallyError::UnrankedSpan {
            span: part.to_vec(),
        }),
        None => Ok(()),
    }
}
