//! Variable name predicates
//!
//! Syntax validity and case-insensitive uniqueness are separate checks; the
//! header interpreter applies syntax first, then uniqueness.

use regex::Regex;
use std::sync::OnceLock;

/// Decides whether a name is acceptable as a variable name
pub trait IdentifierSyntax {
    fn is_acceptable(&self, name: &str) -> bool;
}

/// Letter first, then letters, digits or underscores
#[derive(Debug, Clone, Copy, Default)]
pub struct HdlIdentifierSyntax;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is a valid regex")
    })
}

impl IdentifierSyntax for HdlIdentifierSyntax {
    fn is_acceptable(&self, name: &str) -> bool {
        identifier_pattern().is_match(name)
    }
}

impl<F> IdentifierSyntax for F
where
    F: Fn(&str) -> bool,
{
    fn is_acceptable(&self, name: &str) -> bool {
        self(name)
    }
}

/// Case-insensitive name equality
pub fn names_collide(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whether `name` collides with any of `existing`
pub fn is_duplicate<'a, I>(name: &str, existing: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    existing.into_iter().any(|other| names_collide(name, other))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hdl_identifier_syntax() {
        let syntax = HdlIdentifierSyntax;
        for ok in ["A", "b", "MyNiceSignal", "d_out", "X1_2"] {
            assert!(syntax.is_acceptable(ok), "{ok}");
        }
        for bad in ["", "1A", "_a", "a b", "B[3", "a-b", "é", "|"] {
            assert!(!syntax.is_acceptable(bad), "{bad}");
        }
    }

    #[test]
    fn test_closure_syntax() {
        let short_names = |name: &str| name.len() <= 2;
        assert!(short_names.is_acceptable("ab"));
        assert!(!short_names.is_acceptable("abc"));
    }

    #[test]
    fn test_case_insensitive_duplicates() {
        assert!(names_collide("Sum", "SUM"));
        assert!(!names_collide("Sum", "Sum1"));
        assert!(is_duplicate("cin", ["A", "B", "CIN"]));
        assert!(!is_duplicate("cout", ["A", "B", "CIN"]));
        assert!(!is_duplicate("A", std::iter::empty()));
    }

    #[test]
    fn test_predicates_are_independent() {
        // Syntactically bad names can still collide, and good ones can be new
        assert!(is_duplicate("1x", ["1X"]));
        assert!(HdlIdentifierSyntax.is_acceptable("Fresh"));
        assert!(!is_duplicate("Fresh", ["Stale"]));
    }
}
