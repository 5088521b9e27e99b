use nanoid::nanoid;

/// Generates a short id for URL shortening. Delegates to nanoid, whose
/// default alphabet (A-Za-z0-9_-) is URL-safe; uniqueness is statistical
/// and ultimately enforced by the store's unique constraint.
pub fn generate_short_id(length: usize) -> String {
    nanoid!(length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_short_id(8).len(), 8);
        assert_eq!(generate_short_id(21).len(), 21);
    }

    #[test]
    fn generates_url_safe_characters() {
        let id = generate_short_id(64);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(generate_short_id(8), generate_short_id(8));
    }
}
