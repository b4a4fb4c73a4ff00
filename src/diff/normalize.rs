//! Value normalization applied before any field comparison

/// Canonical form of a field for comparison: surrounding whitespace removed,
/// lowercased. Numeric spellings are left alone, so "1.0" and "1" differ.
pub fn normalize(field: &str) -> String {
    field.trim().to_lowercase()
}

/// Compare two raw fields after normalization
pub fn normalized_eq(a: &str, b: &str) -> bool {
    a == b || normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" Foo "), "foo");
        assert_eq!(normalize("\tBAR\n"), "bar");
        assert_eq!(normalize("ÄÖ"), "äö");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalized_eq() {
        assert!(normalized_eq(" Foo ", "foo"));
        assert!(!normalized_eq("1.0", "1"));
        assert!(!normalized_eq("foo bar", "foobar"));
    }
}
