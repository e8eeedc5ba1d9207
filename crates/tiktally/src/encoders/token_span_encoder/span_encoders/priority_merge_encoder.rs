//! # Priority-merge [`SpanEncoder`].
//!
//! Uses a binary min-heap over a doubly-linked list of parts for O(n log n)
//! BPE merging, replacing the O(n^2) rescans of [`super::MergeScanSpanEncoder`].

use core::{cmp::Reverse, ops::Range};
use std::collections::BinaryHeap;

use crate::{encoders::token_span_encoder::SpanEncoder, types::TokenType, vocab::SpanMapVocab};

const NONE: u32 = u32::MAX;

/// A part of the span; node `i` always starts at byte `i`.
#[derive(Debug, Clone, Copy)]
struct Node {
    end: u32,
    prev: u32,
    next: u32,
}

/// Heap entry representing a potential merge of `left` and `right`.
///
/// Ordered by (rank, `left`) so the lowest-rank, leftmost pair is popped first.
/// `right_end` is stored for O(1) stale-entry detection.
#[derive(Debug, Eq)]
struct MergeEntry<T: Ord> {
    rank: T,
    left: u32,
    right: u32,
    right_end: u32,
}

impl<T: Ord> PartialEq for MergeEntry<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.rank == other.rank && self.left == other.left
    }
}

impl<T: Ord> Ord for MergeEntry<T> {
    fn cmp(
        &self,
        other: &Self,
    ) -> core::cmp::Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.left.cmp(&other.left))
    }
}

impl<T: Ord> PartialOrd for MergeEntry<T> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A [`SpanEncoder`] using a binary min-heap with a doubly-linked list.
///
/// Only the pairs touching a merged boundary are re-ranked after each merge.
/// Merge order, and so output, is identical to [`super::MergeScanSpanEncoder`].
pub struct PriorityMergeSpanEncoder<T: TokenType> {
    nodes: Vec<Node>,
    heap: BinaryHeap<Reverse<MergeEntry<T>>>,
    parts: Vec<Range<usize>>,
}

impl<T: TokenType> Default for PriorityMergeSpanEncoder<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            heap: BinaryHeap::new(),
            parts: Vec::new(),
        }
    }
}

impl<T: TokenType> core::fmt::Debug for PriorityMergeSpanEncoder<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PriorityMergeSpanEncoder").finish()
    }
}

impl<T: TokenType> Clone for PriorityMergeSpanEncoder<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T: TokenType> PriorityMergeSpanEncoder<T> {
    fn push_pair(
        &mut self,
        vocab: &SpanMapVocab<T>,
        span: &[u8],
        left: u32,
    ) {
        let right = self.nodes[left as usize].next;
        if right == NONE {
            return;
        }
        let right_end = self.nodes[right as usize].end;
        if let Some(rank) = vocab.lookup_token(&span[left as usize..right_end as usize]) {
            self.heap.push(Reverse(MergeEntry {
                rank,
                left,
                right,
                right_end,
            }));
        }
    }
}

impl<T: TokenType> SpanEncoder<T> for PriorityMergeSpanEncoder<T> {
    fn merge_parts(
        &mut self,
        vocab: &SpanMapVocab<T>,
        span: &[u8],
    ) -> &[Range<usize>] {
        let n = span.len();
        self.parts.clear();
        if n == 0 {
            return &self.parts;
        }

        // Build doubly-linked list of single-byte parts.
        self.nodes.clear();
        self.nodes.reserve(n);
        for i in 0..n {
            self.nodes.push(Node {
                end: (i + 1) as u32,
                prev: if i == 0 { NONE } else { (i - 1) as u32 },
                next: if i + 1 < n { (i + 1) as u32 } else { NONE },
            });
        }

        // Seed the heap with all initially-mergeable adjacent pairs.
        self.heap.clear();
        for i in 0..(n - 1) {
            self.push_pair(vocab, span, i as u32);
        }

        // Process merges in priority order (lowest rank first).
        while let Some(Reverse(entry)) = self.heap.pop() {
            let li = entry.left as usize;
            let ri = entry.right as usize;

            // Stale unless the pair is still adjacent and covers the same bytes.
            if self.nodes[li].next != entry.right || self.nodes[ri].end != entry.right_end {
                continue;
            }

            // Merge: left absorbs right; right is unlinked.
            let right_next = self.nodes[ri].next;
            self.nodes[li].end = entry.right_end;
            self.nodes[li].next = right_next;
            if right_next != NONE {
                self.nodes[right_next as usize].prev = entry.left;
            }
            self.nodes[ri].prev = NONE;
            self.nodes[ri].next = NONE;

            // Enqueue the pairs touching the new boundary.
            let left_prev = self.nodes[li].prev;
            if left_prev != NONE {
                self.push_pair(vocab, span, left_prev);
            }
            self.push_pair(vocab, span, entry.left);
        }

        // Collect final parts by walking the linked list.
        let mut idx = 0u32;
        while idx != NONE {
            let node = self.nodes[idx as usize];
            self.parts.push(idx as usize..node.end as usize);
            idx = node.next;
        }

        &self.parts
    }
}
