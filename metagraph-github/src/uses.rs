//! "Uses: #12 #13" references in issue bodies

/// Line prefix marking the list of referenced issues
pub const USES_PREFIX: &str = "Uses:";

/// Tokens from the first line starting with `Uses:`
///
/// The line is split once on `": "` and the remainder on single spaces, so
/// repeated spaces yield empty tokens. Only the first such line counts.
pub fn extract_uses_list(body: &str) -> Vec<&str> {
    body.lines()
        .find(|line| line.starts_with(USES_PREFIX))
        .and_then(|line| line.split_once(": "))
        .map(|(_, rest)| rest.split(' ').collect())
        .unwrap_or_default()
}

/// Turn a `#123` token into the item key `i123`
pub fn reference_key(token: &str) -> String {
    match token.strip_prefix('#') {
        Some(number) => format!("i{}", number),
        None => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_uses() {
        assert_eq!(extract_uses_list("Uses: #1 #2\nOther text"), vec!["#1", "#2"]);
    }

    #[test]
    fn test_no_uses_line() {
        assert!(extract_uses_list("").is_empty());
        assert!(extract_uses_list("Some description\nwithout references").is_empty());
        // prefix must start the line
        assert!(extract_uses_list("This issue Uses: #4").is_empty());
    }

    #[test]
    fn test_only_first_uses_line() {
        let body = "Intro\nUses: #3\nUses: #4 #5";
        assert_eq!(extract_uses_list(body), vec!["#3"]);
    }

    #[test]
    fn test_double_space_yields_empty_token() {
        assert_eq!(extract_uses_list("Uses: #1  #2"), vec!["#1", "", "#2"]);
    }

    #[test]
    fn test_crlf_body() {
        assert_eq!(extract_uses_list("Uses: #7 #8\r\nMore"), vec!["#7", "#8"]);
    }

    #[test]
    fn test_prefix_without_separator() {
        assert!(extract_uses_list("Uses:#1").is_empty());
    }

    #[test]
    fn test_reference_key() {
        assert_eq!(reference_key("#12"), "i12");
        assert_eq!(reference_key("i12"), "i12");
    }
}
