/// Text following the first `marker` on a single line.
///
/// One marker, one style: block comments and markers inside string literals
/// are not recognised.
pub fn extract<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    line.find(marker).map(|idx| &line[idx + marker.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_text_after_first_marker() {
        assert_eq!(extract("x = 1  # set x # twice", "#"), Some(" set x # twice"));
        assert_eq!(extract("# whole line", "#"), Some(" whole line"));
        assert_eq!(extract("x = 1", "#"), None);
    }

    #[test]
    fn test_marker_inside_string_still_counts() {
        assert_eq!(extract("s = 'a#b'", "#"), Some("b'"));
    }

    #[test]
    fn test_multi_char_marker() {
        assert_eq!(extract("let x = 1; // note", "//"), Some(" note"));
        assert_eq!(extract("a / b", "//"), None);
    }

    #[test]
    fn test_empty_marker_never_matches() {
        assert_eq!(extract("anything", ""), None);
    }
}
