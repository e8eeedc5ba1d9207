//! # Special Token Policy
//!
//! Each encode call carries a [`SpecialPolicy`]:
//! * `allowed` - the special tokens which split the text and emit their own rank;
//! * `disallowed` - the special tokens whose presence fails the call.
//!
//! Special tokens in neither set are encoded as ordinary text.
//!
//! The policy is resolved against a [`SpecialVocab`] once per call:
//! * `allowed` = known specials ∩ requested (or all known specials);
//! * `disallowed` = requested, as given (or known specials − `allowed`).

use aho_corasick::{AhoCorasick, MatchKind};

use crate::{
    errors::{TallyError, TallyResult},
    types::{TTHashSet, TokenType},
    vocab::SpecialVocab,
};

/// Which special tokens are treated as tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedSpecial {
    /// Every special token of the vocabulary.
    All,

    /// Only the listed texts; texts the vocabulary does not know are ignored.
    Only(Vec<String>),
}

impl Default for AllowedSpecial {
    fn default() -> Self {
        Self::Only(Vec::new())
    }
}

/// Which special tokens fail the call when present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisallowedSpecial {
    /// Every special token which is not allowed.
    #[default]
    NotAllowed,

    /// Only the listed texts; taken as given.
    Only(Vec<String>),
}

/// Per-call special token policy.
///
/// The default allows nothing and disallows every special token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecialPolicy {
    allowed: AllowedSpecial,
    disallowed: DisallowedSpecial,
}

fn to_strings<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts.into_iter().map(|s| s.as_ref().to_string()).collect()
}

impl SpecialPolicy {
    /// Create a policy.
    pub fn new(
        allowed: AllowedSpecial,
        disallowed: DisallowedSpecial,
    ) -> Self {
        Self {
            allowed,
            disallowed,
        }
    }

    /// Build a policy from optional lists.
    ///
    /// ## Arguments
    /// * `allowed` - `None` allows every special token.
    /// * `disallowed` - `None` disallows every special token which is not allowed.
    pub fn from_options<S: AsRef<str>>(
        allowed: Option<&[S]>,
        disallowed: Option<&[S]>,
    ) -> Self {
        Self {
            allowed: match allowed {
                None => AllowedSpecial::All,
                Some(texts) => AllowedSpecial::Only(to_strings(texts)),
            },
            disallowed: match disallowed {
                None => DisallowedSpecial::NotAllowed,
                Some(texts) => DisallowedSpecial::Only(to_strings(texts)),
            },
        }
    }

    /// Allow every special token.
    pub fn allow_all() -> Self {
        Self::new(AllowedSpecial::All, DisallowedSpecial::NotAllowed)
    }

    /// Allow only the given special tokens; disallow the rest.
    pub fn allow_only<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            AllowedSpecial::Only(to_strings(texts)),
            DisallowedSpecial::NotAllowed,
        )
    }

    /// Encode every special token as ordinary text.
    pub fn treat_all_as_text() -> Self {
        Self::new(AllowedSpecial::default(), DisallowedSpecial::Only(Vec::new()))
    }

    /// Replace the disallowed set.
    pub fn with_disallowed<I, S>(
        self,
        texts: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            disallowed: DisallowedSpecial::Only(to_strings(texts)),
            ..self
        }
    }

    /// Get the allowed selector.
    pub fn allowed(&self) -> &AllowedSpecial {
        &self.allowed
    }

    /// Get the disallowed selector.
    pub fn disallowed(&self) -> &DisallowedSpecial {
        &self.disallowed
    }

    /// Resolve against a vocabulary into concrete sets.
    ///
    /// ## Arguments
    /// * `specials` - The vocabulary's special tokens.
    pub fn resolve<T: TokenType>(
        &self,
        specials: &SpecialVocab<T>,
    ) -> TallyResult<ResolvedSpecialPolicy> {
        let allowed: TTHashSet<String> = match &self.allowed {
            AllowedSpecial::All => specials.texts().map(str::to_string).collect(),
            AllowedSpecial::Only(texts) => texts
                .iter()
                .filter(|t| specials.contains(t))
                .cloned()
                .collect(),
        };

        let disallowed: Vec<String> = match &self.disallowed {
            DisallowedSpecial::NotAllowed => specials
                .texts()
                .filter(|t| !allowed.contains(*t))
                .map(str::to_string)
                .collect(),
            DisallowedSpecial::Only(texts) => {
                // known texts in declaration order, then the rest as given.
                let mut known: Vec<&String> = texts.iter().filter(|t| specials.contains(t)).collect();
                known.sort_by_key(|t| specials.declaration_index(t));
                let mut ordered: Vec<String> = Vec::with_capacity(texts.len());
                for text in known
                    .into_iter()
                    .chain(texts.iter().filter(|t| !specials.contains(t)))
                {
                    if !text.is_empty() && !ordered.contains(text) {
                        ordered.push(text.clone());
                    }
                }
                ordered
            }
        };

        log::debug!(
            "special policy: {} allowed, {} disallowed",
            allowed.len(),
            disallowed.len()
        );

        ResolvedSpecialPolicy::try_new(allowed, disallowed)
    }
}

/// A [`SpecialPolicy`] resolved against one vocabulary.
#[derive(Debug, Clone)]
pub struct ResolvedSpecialPolicy {
    allowed: TTHashSet<String>,
    disallowed: Vec<String>,
    disallowed_matcher: Option<AhoCorasick>,
}

impl ResolvedSpecialPolicy {
    /// Build from concrete sets.
    ///
    /// ## Arguments
    /// * `allowed` - The allowed special token texts.
    /// * `disallowed` - The disallowed texts, in match priority order.
    pub fn try_new(
        allowed: TTHashSet<String>,
        disallowed: Vec<String>,
    ) -> TallyResult<Self> {
        let disallowed_matcher = if disallowed.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostFirst)
                    .build(&disallowed)
                    .map_err(|e| TallyError::Parse(format!("disallowed matcher: {e}")))?,
            )
        };

        Ok(Self {
            allowed,
            disallowed,
            disallowed_matcher,
        })
    }

    /// Is this special token text allowed?
    pub fn is_allowed(
        &self,
        text: &str,
    ) -> bool {
        self.allowed.contains(text)
    }

    /// Are any special tokens allowed?
    pub fn has_allowed(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// The disallowed texts, in match priority order.
    pub fn disallowed(&self) -> &[String] {
        &self.disallowed
    }

    /// Fail if `text` contains any disallowed special token.
    ///
    /// ## Returns
    /// [`TallyError::DisallowedSpecialTokenFound`] for the leftmost occurrence;
    /// at one position the earliest text in [`Self::disallowed`] wins.
    pub fn check_text(
        &self,
        text: &str,
    ) -> TallyResult<()> {
        let Some(matcher) = &self.disallowed_matcher else {
            return Ok(());
        };
        match matcher.find(text) {
            None => Ok(()),
            Some(m) => Err(TallyError::DisallowedSpecialTokenFound {
                token: self.disallowed[m.pattern().as_usize()].clone(),
                position: m.start(),
            }),
        }
    }
}
