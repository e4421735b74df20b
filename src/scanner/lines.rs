//! Line numbering shared by the comment and string-literal passes.
//!
//! A line ends at `\n`, `\r\n`, a lone `\r`, or any of the other Unicode
//! line boundaries (vertical tab, form feed, the file/group/record
//! separators, NEL, LINE SEPARATOR, PARAGRAPH SEPARATOR).

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Iterator over the lines of a string, without their terminators.
///
/// A trailing terminator does not start an extra empty line.
pub struct Lines<'a> {
    rest: &'a str,
}

pub fn split(content: &str) -> Lines<'_> {
    Lines { rest: content }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let Some((idx, c)) = self.rest.char_indices().find(|&(_, c)| is_line_break(c)) else {
            let line = self.rest;
            self.rest = "";
            return Some(line);
        };

        let line = &self.rest[..idx];
        let mut end = idx + c.len_utf8();
        if c == '\r' && self.rest[end..].starts_with('\n') {
            end += 1;
        }
        self.rest = &self.rest[end..];
        Some(line)
    }
}

/// 1-based line containing byte `offset`, counted the same way [`split`]
/// numbers lines.
pub fn line_at(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    let Some(prefix) = content.get(..offset) else {
        return 1;
    };

    let mut breaks = 0;
    let mut prev = None;
    for c in prefix.chars() {
        if is_line_break(c) && !(c == '\n' && prev == Some('\r')) {
            breaks += 1;
        }
        prev = Some(c);
    }
    // `offset` sits between the halves of a `\r\n`.
    if prev == Some('\r') && content[offset..].starts_with('\n') {
        breaks -= 1;
    }

    breaks + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(content: &str) -> Vec<&str> {
        split(content).collect()
    }

    #[test]
    fn test_split_on_every_terminator() {
        assert_eq!(lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(lines("a\x0cb\x0bc"), vec!["a", "b", "c"]);
        assert_eq!(lines("a\u{2028}b\u{85}c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trailing_and_blank_lines() {
        assert_eq!(lines("a\n"), vec!["a"]);
        assert_eq!(lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(lines("\r\n"), vec![""]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn test_line_at() {
        let content = "one\ntwo\nthree";
        assert_eq!(line_at(content, 0), 1);
        assert_eq!(line_at(content, 4), 2);
        assert_eq!(line_at(content, 8), 3);
        assert_eq!(line_at(content, 999), 3);
    }

    #[test]
    fn test_line_at_agrees_with_split() {
        let content = "# a\r\n# b\r# c\x0c# d\u{2029}# e";
        for (idx, line) in split(content).enumerate() {
            let offset = line.as_ptr() as usize - content.as_ptr() as usize;
            assert_eq!(line_at(content, offset), idx + 1, "line {:?}", line);
        }
    }

    #[test]
    fn test_line_at_inside_crlf() {
        let content = "a\r\nb";
        assert_eq!(line_at(content, 2), 1);
        assert_eq!(line_at(content, 3), 2);
    }
}
