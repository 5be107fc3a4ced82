//! Shared text helpers for terminal output

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_kept() {
        assert_eq!(truncate_str("Rust", 10), "Rust");
        assert_eq!(truncate_str("Kotlin", 6), "Kotlin");
    }

    #[test]
    fn long_names_are_cut() {
        assert_eq!(truncate_str("Kotlin Multiplatform", 10), "Kotlin ...");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate_str("Prøve", 5), "Prøve");
        assert_eq!(truncate_str("Unngå nå", 6), "Unn...");
    }
}
