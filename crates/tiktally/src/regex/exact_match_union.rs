//! Exact Match Union Patterns

use crate::regex::regex_wrapper::RegexWrapperPattern;

/// Create a union pattern of exact matches.
///
/// This will always be a [`RegexWrapperPattern::Basic`] variant.
///
/// The alternatives keep their given order; `regex` alternation is
/// leftmost-first, so at a shared start position the earlier alternative wins.
///
/// ## Arguments
/// * `alts` - A slice of string-like alternatives to union.
///
/// ## Returns
/// A new `RegexWrapperPattern::Basic` containing the union pattern.
pub fn exact_match_union_regex_pattern<S: AsRef<str>>(alts: &[S]) -> RegexWrapperPattern {
    let parts = alts
        .iter()
        .map(|s| regex::escape(s.as_ref()))
        .collect::<Vec<_>>();
    RegexWrapperPattern::Basic(format!("({})", parts.join("|")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::RegexWrapper;

    #[test]
    fn test_fixed_alternative_list() {
        let alternatives = ["apple", "[x]", "boat"];

        let pattern = exact_match_union_regex_pattern(&alternatives);
        assert_eq!(pattern.as_str(), r"(apple|\[x\]|boat)");

        let re: RegexWrapper = pattern.compile().unwrap();

        let text = "apple 123 [x] xyz boat";
        assert_eq!(
            re.find_iter(text).collect::<Result<Vec<_>, _>>().unwrap(),
            vec![0..5, 10..13, 18..22]
        );
    }

    #[test]
    fn test_declaration_order_wins() {
        let re = exact_match_union_regex_pattern(&["<a>", "<a>b"])
            .compile()
            .unwrap();
        assert_eq!(re.find_at("x<a>b", 0).unwrap(), Some(1..4));

        let re = exact_match_union_regex_pattern(&["<a>b", "<a>"])
            .compile()
            .unwrap();
        assert_eq!(re.find_at("x<a>b", 0).unwrap(), Some(1..5));
    }
}
