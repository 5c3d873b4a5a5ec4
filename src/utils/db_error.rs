//! Helpers for interpreting PostgreSQL constraint violations.

/// Unique constraint on `customers.email`.
pub const CUSTOMERS_EMAIL_KEY: &str = "customers_email_key";

/// Unique constraint on `mechanics.email`.
pub const MECHANICS_EMAIL_KEY: &str = "mechanics_email_key";

/// Maps a violated unique constraint to the message shown to API clients.
pub fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(CUSTOMERS_EMAIL_KEY) => "Email already associated with an account.",
        Some(MECHANICS_EMAIL_KEY) => "Email already associated with a mechanic.",
        _ => "Unique constraint violation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_known_constraints() {
        assert_eq!(
            conflict_message(Some(CUSTOMERS_EMAIL_KEY)),
            "Email already associated with an account."
        );
        assert_eq!(
            conflict_message(Some(MECHANICS_EMAIL_KEY)),
            "Email already associated with a mechanic."
        );
    }

    #[test]
    fn test_conflict_message_fallback() {
        assert_eq!(conflict_message(None), "Unique constraint violation");
        assert_eq!(
            conflict_message(Some("other_key")),
            "Unique constraint violation"
        );
    }
}
