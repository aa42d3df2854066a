/// Builds an anchored regex from the common prefix and suffix of two strings.
///
/// `("/admin.php", "/users.php")` gives `^/.*\.php$`. Identical strings give
/// an exact-match pattern.
pub fn generate_matching_regex(first: &str, second: &str) -> String {
    let first_chars: Vec<char> = first.chars().collect();
    let second_chars: Vec<char> = second.chars().collect();

    let prefix_len = first_chars
        .iter()
        .zip(&second_chars)
        .take_while(|(a, b)| a == b)
        .count();

    if prefix_len == first_chars.len() && prefix_len == second_chars.len() {
        return format!("^{}$", regex::escape(first));
    }

    let max_suffix = first_chars.len().min(second_chars.len()) - prefix_len;
    let suffix_len = first_chars
        .iter()
        .rev()
        .zip(second_chars.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    let prefix: String = first_chars[..prefix_len].iter().collect();
    let suffix: String = first_chars[first_chars.len() - suffix_len..].iter().collect();

    format!("^{}.*{}$", regex::escape(&prefix), regex::escape(&suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_suffix() {
        assert_eq!(generate_matching_regex("/admin.php", "/users.php"), r"^/.*\.php$");
        assert_eq!(generate_matching_regex("/admin.php", "/login.php"), r"^/.*in\.php$");
        assert_eq!(generate_matching_regex("backup", "backup.old"), "^backup.*$");
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(generate_matching_regex("a.b", "a.b"), r"^a\.b$");
    }

    #[test]
    fn test_generated_pattern_matches_both_inputs() {
        let pattern = generate_matching_regex("users/42/profile", "users/977/profile");
        let re = regex::Regex::new(&pattern).unwrap();

        assert!(re.is_match("users/42/profile"));
        assert!(re.is_match("users/977/profile"));
        assert!(!re.is_match("posts/1/edit"));
    }
}
