mod common;

use common::{checker, Tripwire};
use spellscan::scanner::{LineAttribution, Scanner};
use spellscan::{Finding, Issue, Source};
use std::collections::HashSet;
use std::fs;

fn findings(issues: &[Issue]) -> Vec<(&str, usize, Source)> {
    issues
        .iter()
        .filter_map(Issue::finding)
        .map(|f| (f.word.as_str(), f.line, f.source))
        .collect()
}

fn words(issues: &[Issue]) -> HashSet<&str> {
    issues
        .iter()
        .filter_map(Issue::finding)
        .map(|f| f.word.as_str())
        .collect()
}

#[test]
fn test_comment_and_string_sources() {
    let oracle = checker();
    let content = "# commmentt with a speling error\ns = 'strng with errr'\n";
    let issues = Scanner::new(&oracle).scan("test.py", content);

    assert_eq!(
        findings(&issues),
        vec![
            ("commmentt", 1, Source::Comment),
            ("speling", 1, Source::Comment),
            ("strng", 2, Source::Code),
            ("errr", 2, Source::Code),
        ]
    );
}

#[test]
fn test_all_delimiters_and_multiline_literals() {
    let oracle = checker();
    let content = concat!(
        "# This commmentt has missspelled words\n",
        "x = 'spleling erorr'\n",
        "y = \"anothr errr here\"\n",
        "z = '''multi\nline\nstrng with eror'''\n",
    );
    let issues = Scanner::new(&oracle).scan("test.py", content);

    let expected: HashSet<&str> = [
        "commmentt",
        "missspelled",
        "spleling",
        "erorr",
        "anothr",
        "errr",
        "strng",
        "eror",
    ]
    .into_iter()
    .collect();
    assert_eq!(words(&issues), expected);
    assert!(issues.iter().all(|i| i.source().is_some()));
}

#[test]
fn test_triple_double_quoted_block() {
    let oracle = checker();
    let content = "s = \"\"\"\nthis is a multline\nstrng with eror\n\"\"\"\n";
    let issues = Scanner::new(&oracle).scan("test.py", content);

    assert_eq!(
        findings(&issues),
        vec![
            ("multline", 1, Source::Code),
            ("strng", 1, Source::Code),
            ("eror", 1, Source::Code),
        ]
    );
}

#[test]
fn test_several_literals_and_trailing_comment_on_one_line() {
    let oracle = checker();
    let content = "a = 'misspeled' + \"errored\"  # commmentt\n";
    let issues = Scanner::new(&oracle).scan("test.py", content);

    assert_eq!(
        findings(&issues),
        vec![
            ("commmentt", 1, Source::Comment),
            ("misspeled", 1, Source::Code),
            ("errored", 1, Source::Code),
        ]
    );
}

#[test]
fn test_clean_file_is_empty() {
    let oracle = checker();
    let content = "# This comment has no mistakes\nx = 'correct string here'\n";
    assert!(Scanner::new(&oracle).scan("test.py", content).is_empty());
}

#[test]
fn test_empty_content() {
    let oracle = checker();
    assert!(Scanner::new(&oracle).scan("empty.py", "").is_empty());
}

#[test]
fn test_suggestions_come_from_the_dictionary() {
    let oracle = checker();
    let issues = Scanner::new(&oracle).scan("test.py", "# Strng\n");

    assert_eq!(
        issues,
        vec![Issue::Finding(Finding {
            file: "test.py".to_string(),
            line: 1,
            word: "Strng".to_string(),
            suggestion: Some("String".to_string()),
            source: Source::Comment,
        })]
    );
}

#[test]
fn test_scanning_twice_gives_the_same_result() {
    let oracle = checker();
    let scanner = Scanner::new(&oracle);
    let content = "# speling\nx = 'strng'\ny = \"errr\" # anothr\n";

    assert_eq!(scanner.scan("t.py", content), scanner.scan("t.py", content));
}

// A literal whose text first appears elsewhere is attributed to that earlier
// line under the default attribution.
#[test]
fn test_repeated_text_attributed_to_first_occurrence() {
    let oracle = checker();
    let content = "# wrng appears here first\ns = 'wrng'\n";

    let issues = Scanner::new(&oracle).scan("t.py", content);
    assert_eq!(
        findings(&issues),
        vec![("wrng", 1, Source::Comment), ("wrng", 1, Source::Code)]
    );

    let issues = Scanner::new(&oracle)
        .with_line_attribution(LineAttribution::SpanStart)
        .scan("t.py", content);
    assert_eq!(
        findings(&issues),
        vec![("wrng", 1, Source::Comment), ("wrng", 2, Source::Code)]
    );
}

#[test]
fn test_repeated_literal_reports_first_line_twice() {
    let oracle = checker();
    let content = "a = 'wrng'\nb = 1\nc = 'wrng'\n";
    let issues = Scanner::new(&oracle).scan("t.py", content);

    assert_eq!(
        findings(&issues),
        vec![("wrng", 1, Source::Code), ("wrng", 1, Source::Code)]
    );
}

#[test]
fn test_failing_line_does_not_hide_other_lines() {
    let oracle = Tripwire::new("kaboom");
    let content = "# first speling\n# kaboom\n# errr here\nx = 'strng'\n";
    let issues = Scanner::new(&oracle).scan("t.py", content);

    assert_eq!(
        findings(&issues),
        vec![
            ("speling", 1, Source::Comment),
            ("errr", 3, Source::Comment),
            ("strng", 4, Source::Code),
        ]
    );
    let errors: Vec<_> = issues.iter().filter_map(Issue::error).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("tripwire hit"));
}

#[test]
fn test_failing_literal_pass_keeps_comment_results() {
    let oracle = Tripwire::new("kaboom");
    let content = "# speling\nx = 'kaboom'\n";
    let issues = Scanner::new(&oracle).scan("t.py", content);

    assert_eq!(findings(&issues), vec![("speling", 1, Source::Comment)]);
    assert_eq!(issues.len(), 2);
    assert_eq!(
        issues[1].error(),
        Some("Failed to process string literals: tripwire hit on 'kaboom'")
    );
}

#[test]
fn test_read_failure_is_single_error_record() {
    let oracle = checker();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_there.py");

    let issues = Scanner::new(&oracle).scan_file(&path, "not_there.py");
    assert_eq!(issues.len(), 1);
    let error = issues[0].error().unwrap();
    assert!(error.starts_with("Could not read file:"));

    let underlying = fs::read_to_string(&path).unwrap_err().to_string();
    assert!(error.contains(&underlying));
}

#[test]
fn test_non_utf8_file_is_a_read_failure() {
    let oracle = checker();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.py");
    fs::write(&path, b"# caf\xe9\n").unwrap();

    let issues = Scanner::new(&oracle).scan_file(&path, "latin1.py");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].error().is_some());
}
