//! # Text Segmentor

use core::ops::Range;

use crate::{
    errors::TallyResult,
    regex::RegexWrapper,
    segmentation::{ResolvedSpecialPolicy, SegmentationConfig},
    types::TokenType,
    vocab::SpecialVocab,
};

/// A run of text produced by [`TextSegmentor`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextRun<T: TokenType> {
    /// Ordinary text; split into words by the word pattern.
    Plain(Range<usize>),

    /// An allowed special token, and its rank.
    Special(Range<usize>, T),
}

impl<T: TokenType> TextRun<T> {
    /// The byte range of the run.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Plain(range) => range.clone(),
            Self::Special(range, _) => range.clone(),
        }
    }
}

/// Word Split + Special Tokens Segmentor
#[derive(Debug, Clone)]
pub struct TextSegmentor<T: TokenType> {
    /// Regex for splitting words.
    word_re: RegexWrapper,

    /// Regex matching every special token text, in declaration order.
    special_re: Option<RegexWrapper>,

    /// The special tokens.
    specials: SpecialVocab<T>,
}

impl<T: TokenType> TextSegmentor<T> {
    /// Create a new text segmentor from the given configuration.
    ///
    /// ## Arguments
    /// * `config` - The segmentation configuration.
    ///
    /// ## Returns
    /// The segmentor, or an error if a pattern does not compile.
    pub fn try_from_config(config: &SegmentationConfig<T>) -> TallyResult<Self> {
        let word_re = config.pattern().compile()?;
        let special_re = match config.special_vocab().special_pattern() {
            Some(pattern) => Some(pattern.compile()?),
            None => None,
        };

        Ok(Self {
            word_re,
            special_re,
            specials: config.special_vocab().clone(),
        })
    }

    /// Get the word split regex.
    pub fn word_regex(&self) -> &RegexWrapper {
        &self.word_re
    }

    /// Get the special tokens.
    pub fn special_vocab(&self) -> &SpecialVocab<T> {
        &self.specials
    }

    /// Visit the runs of `text` in order.
    ///
    /// Fails before visiting anything if `text` contains a disallowed special token.
    ///
    /// Runs cover `text` without gaps. An allowed special token at the start of
    /// the remaining text is preceded by an empty `Plain` run; an empty trailing
    /// `Plain` run is not produced.
    ///
    /// ## Arguments
    /// * `text` - The text to segment.
    /// * `policy` - The resolved special token policy.
    /// * `f` - Called with each run; errors halt the scan.
    pub fn for_each_run<F>(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
        f: &mut F,
    ) -> TallyResult<()>
    where
        F: FnMut(TextRun<T>) -> TallyResult<()>,
    {
        policy.check_text(text)?;

        let mut last = 0;
        if let Some(special_re) = &self.special_re
            && policy.has_allowed()
        {
            let mut cursor = 0;
            while let Some(range) = special_re.find_at(text, cursor)? {
                let matched = &text[range.clone()];

                match self.specials.lookup_token(matched) {
                    Some(token) if policy.is_allowed(matched) => {
                        f(TextRun::Plain(last..range.start))?;
                        last = range.end;
                        cursor = range.end;
                        f(TextRun::Special(range, token))?;
                    }
                    _ => {
                        // not a boundary; retry one char past the match start.
                        let step = matched.chars().next().map_or(1, char::len_utf8);
                        cursor = range.start + step;
                    }
                }
            }
        }

        if last < text.len() {
            f(TextRun::Plain(last..text.len()))?;
        }

        Ok(())
    }

    /// Split text into runs.
    ///
    /// ## Arguments
    /// * `text` - The text to split.
    /// * `policy` - The resolved special token policy.
    pub fn split_runs(
        &self,
        text: &str,
        policy: &ResolvedSpecialPolicy,
    ) -> TallyResult<Vec<TextRun<T>>> {
        let mut runs = Vec::new();
        self.for_each_run(text, policy, &mut |run| {
            runs.push(run);
            Ok(())
        })?;
        Ok(runs)
    }

    /// Visit the words of one plain run.
    ///
    /// The word pattern sees only the run's own text; text it does not match is skipped.
    ///
    /// ## Arguments
    /// * `text` - The full text.
    /// * `run` - The plain run's byte range in `text`.
    /// * `f` - Called with each word's byte range in `text`.
    pub fn for_each_word<F>(
        &self,
        text: &str,
        run: Range<usize>,
        f: &mut F,
    ) -> TallyResult<()>
    where
        F: FnMut(Range<usize>) -> TallyResult<()>,
    {
        let offset = run.start;
        for word in self.word_re.find_iter(&text[run]) {
            let word = word?;
            f(word.start + offset..word.end + offset)?;
        }
        Ok(())
    }

    /// Split a plain run into word ranges.
    pub fn split_words(
        &self,
        text: &str,
        run: Range<usize>,
    ) -> TallyResult<Vec<Range<usize>>> {
        let mut words = Vec::new();
        self.for_each_word(text, run, &mut |word| {
            words.push(word);
            Ok(())
        })?;
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::TallyError,
        pretrained::GPT2_WORD_PATTERN,
        segmentation::SpecialPolicy,
    };

    type T = u32;

    fn segmentor() -> TextSegmentor<T> {
        let specials = SpecialVocab::try_from_specials([
            ("<|endoftext|>", 100),
            ("<|fim|>", 101),
            ("<x>", 102),
            ("<x>y", 103),
        ])
        .unwrap();
        let config = SegmentationConfig::from_pattern(GPT2_WORD_PATTERN).with_specials(specials);
        TextSegmentor::try_from_config(&config).unwrap()
    }

    fn runs(
        segmentor: &TextSegmentor<T>,
        text: &str,
        policy: SpecialPolicy,
    ) -> TallyResult<Vec<TextRun<T>>> {
        let policy = policy.resolve(segmentor.special_vocab())?;
        segmentor.split_runs(text, &policy)
    }

    #[test]
    fn test_empty_text() {
        let seg = segmentor();
        assert!(runs(&seg, "", SpecialPolicy::allow_all()).unwrap().is_empty());
        assert!(runs(&seg, "", SpecialPolicy::default()).unwrap().is_empty());
    }

    #[test]
    fn test_allowed_specials_split() {
        let seg = segmentor();
        let text = "<|endoftext|>hi<|fim|>";
        assert_eq!(
            runs(&seg, text, SpecialPolicy::allow_all()).unwrap(),
            vec![
                TextRun::Plain(0..0),
                TextRun::Special(0..13, 100),
                TextRun::Plain(13..15),
                TextRun::Special(15..22, 101),
            ]
        );
    }

    #[test]
    fn test_unallowed_specials_stay_plain() {
        let seg = segmentor();
        let text = "a<|fim|>b<|endoftext|>c";
        let policy = SpecialPolicy::allow_only(["<|endoftext|>"]).with_disallowed(Vec::<&str>::new());
        assert_eq!(
            runs(&seg, text, policy).unwrap(),
            vec![
                TextRun::Plain(0..9),
                TextRun::Special(9..22, 100),
                TextRun::Plain(22..23),
            ]
        );
    }

    #[test]
    fn test_disallowed_fails_first() {
        let seg = segmentor();
        let err = runs(&seg, "ok <|endoftext|>", SpecialPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            TallyError::DisallowedSpecialTokenFound { position: 3, .. }
        ));
    }

    #[test]
    fn test_overlap_resolution_uses_declaration_order() {
        let seg = segmentor();
        assert_eq!(
            runs(&seg, "a<x>yb", SpecialPolicy::allow_all()).unwrap(),
            vec![
                TextRun::Plain(0..1),
                TextRun::Special(1..4, 102),
                TextRun::Plain(4..6),
            ]
        );

        // "<x>" is found first but not allowed; the scan resumes inside it and
        // never reaches a "<x>y" start, so everything stays plain.
        let policy = SpecialPolicy::allow_only(["<x>y"]).with_disallowed(Vec::<&str>::new());
        assert_eq!(
            runs(&seg, "a<x>yb", policy).unwrap(),
            vec![TextRun::Plain(0..6)]
        );
    }

    #[test]
    fn test_retry_steps_one_char() {
        let seg = segmentor();
        let text = "é<x><|fim|>";
        let policy = SpecialPolicy::allow_only(["<|fim|>"]).with_disallowed(Vec::<&str>::new());
        assert_eq!(
            runs(&seg, text, policy).unwrap(),
            vec![
                TextRun::Plain(0..5),
                TextRun::Special(5..12, 101),
            ]
        );
    }

    #[test]
    fn test_words_per_run() {
        let seg = segmentor();
        let text = "hello world<|fim|> again  ";
        let policy = SpecialPolicy::allow_all()
            .resolve(seg.special_vocab())
            .unwrap();

        let runs = seg.split_runs(text, &policy).unwrap();
        assert_eq!(runs.len(), 3);

        let words = seg.split_words(text, runs[0].range()).unwrap();
        assert_eq!(
            words.iter().map(|r| &text[r.clone()]).collect::<Vec<_>>(),
            vec!["hello", " world"]
        );

        let words = seg.split_words(text, runs[2].range()).unwrap();
        assert_eq!(
            words.iter().map(|r| &text[r.clone()]).collect::<Vec<_>>(),
            vec![" again", "  "]
        );
    }

    #[test]
    fn test_words_see_run_end() {
        let seg = segmentor();
        // at the run end "  " is trailing whitespace, so `\s+(?!\S)` takes both spaces.
        let text = "a  <|fim|>b";
        let policy = SpecialPolicy::allow_all()
            .resolve(seg.special_vocab())
            .unwrap();
        let runs = seg.split_runs(text, &policy).unwrap();
        let words = seg.split_words(text, runs[0].range()).unwrap();
        assert_eq!(
            words.iter().map(|r| &text[r.clone()]).collect::<Vec<_>>(),
            vec!["a", "  "]
        );
    }
}
