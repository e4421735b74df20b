use crate::checker::dictionary::Dictionary;

const MAX_DISTANCE: usize = 2;
const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Best single correction for a lower-case `word`, if any is close enough.
///
/// Single edits win over anything found by the wider searches; ties go to
/// the smaller edit distance, then alphabetical order.
pub fn best(word: &str, dictionary: &Dictionary) -> Option<String> {
    if word.is_empty() {
        return None;
    }

    // 1. Single edits (cheap, and always the closest possible)
    let nearest = single_edits(word)
        .into_iter()
        .filter(|candidate| candidate != word && dictionary.contains(candidate))
        .min();
    if nearest.is_some() {
        return nearest;
    }

    // 2. Prefix neighbourhoods, longest prefix first
    for prefix_len in [3, 2] {
        if word.len() < prefix_len || !word.is_char_boundary(prefix_len) {
            continue;
        }
        let nearest = closest(word, dictionary.words_with_prefix(&word[..prefix_len]));
        if nearest.is_some() {
            return nearest;
        }
    }

    // 3. Short words rarely share a useful prefix; scan length-compatible words
    if word.len() <= 3 {
        let compatible = dictionary
            .all_words()
            .into_iter()
            .filter(|w| w.len().abs_diff(word.len()) <= 1);
        return closest(word, compatible);
    }

    None
}

fn closest(word: &str, words: impl IntoIterator<Item = String>) -> Option<String> {
    words
        .into_iter()
        .filter(|w| w != word)
        .filter_map(|w| {
            let dist = edit_distance(word, &w);
            (dist <= MAX_DISTANCE).then_some((dist, w))
        })
        .min()
        .map(|(_, w)| w)
}

/// Levenshtein distance between two strings
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Every string one deletion, transposition, replacement or insertion away.
fn single_edits(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut edits = Vec::new();

    for i in 0..chars.len() {
        let mut deleted = chars.clone();
        deleted.remove(i);
        edits.push(deleted.into_iter().collect());
    }

    for i in 0..chars.len().saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        edits.push(swapped.into_iter().collect());
    }

    for letter in ALPHABET.chars() {
        for i in 0..chars.len() {
            if chars[i] != letter {
                let mut replaced = chars.clone();
                replaced[i] = letter;
                edits.push(replaced.into_iter().collect());
            }
        }
        for i in 0..=chars.len() {
            let mut inserted = chars.clone();
            inserted.insert(i, letter);
            edits.push(inserted.into_iter().collect());
        }
    }

    edits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> Dictionary {
        Dictionary::from_words(words.iter().copied()).unwrap()
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("hello", "hello"), 0);
        assert_eq!(edit_distance("hello", "hallo"), 1);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("hello", "world"), 4);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_single_edits() {
        let edits = single_edits("helo");
        assert!(edits.contains(&"hello".to_string())); // insertion
        assert!(edits.contains(&"hel".to_string())); // deletion
        assert!(edits.contains(&"ehlo".to_string())); // transposition
        assert!(edits.contains(&"halo".to_string())); // replacement
    }

    #[test]
    fn test_best_prefers_single_edit() {
        let d = dict(&["string", "strong", "spring"]);
        assert_eq!(best("strng", &d), Some("string".to_string()));
    }

    #[test]
    fn test_best_falls_back_to_two_edits() {
        let d = dict(&["comment", "common"]);
        assert_eq!(best("commmentt", &d), Some("comment".to_string()));
    }

    #[test]
    fn test_no_candidate() {
        let d = dict(&["alpha", "beta"]);
        assert_eq!(best("zzzzzz", &d), None);
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let d = dict(&["cat", "car", "cart", "care"]);
        assert_eq!(best("cax", &d), Some("car".to_string()));
        assert_eq!(best("carx", &d), Some("car".to_string()));
    }

    #[test]
    fn test_short_word_scan() {
        let d = dict(&["ox", "zebra"]);
        assert_eq!(best("xz", &d), Some("ox".to_string()));
    }
}
