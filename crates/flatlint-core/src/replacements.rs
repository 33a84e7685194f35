//! Built-in rules that were removed, and what replaced them.

const REMOVED_RULES: &[(&str, &[&str])] = &[
    ("generator-star", &["generator-star-spacing"]),
    ("global-strict", &["strict"]),
    ("no-arrow-condition", &["no-confusing-arrow", "no-constant-condition"]),
    ("no-comma-dangle", &["comma-dangle"]),
    ("no-empty-class", &["no-empty-character-class"]),
    ("no-empty-label", &["no-labels"]),
    ("no-extra-strict", &["strict"]),
    ("no-reserved-keys", &["quote-props"]),
    ("no-space-before-semi", &["semi-spacing"]),
    ("no-spaced-func", &["func-call-spacing"]),
    ("no-wrap-func", &["no-extra-parens"]),
    ("space-after-function-name", &["space-before-function-paren"]),
    ("space-after-keywords", &["keyword-spacing"]),
    ("space-before-function-parentheses", &["space-before-function-paren"]),
    ("space-before-keywords", &["keyword-spacing"]),
    (
        "space-in-brackets",
        &["object-curly-spacing", "array-bracket-spacing", "computed-property-spacing"],
    ),
    ("space-return-throw-case", &["keyword-spacing"]),
    ("space-unary-word-ops", &["space-unary-ops"]),
    ("spaced-line-comment", &["spaced-comment"]),
];

/// Returns the rules that replaced the removed rule `rule_id`, if any.
#[must_use]
pub fn replacements_for(rule_id: &str) -> Option<&'static [&'static str]> {
    REMOVED_RULES
        .iter()
        .find(|(removed, _)| *removed == rule_id)
        .map(|(_, replacements)| *replacements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_removed_rule() {
        assert_eq!(
            replacements_for("no-comma-dangle"),
            Some(&["comma-dangle"][..])
        );
        assert_eq!(replacements_for("space-in-brackets").map(<[_]>::len), Some(3));
    }

    #[test]
    fn unknown_rule_has_no_replacement() {
        assert_eq!(replacements_for("semi"), None);
    }

    #[test]
    fn every_entry_names_a_replacement() {
        assert!(REMOVED_RULES.iter().all(|(_, r)| !r.is_empty()));
    }
}
