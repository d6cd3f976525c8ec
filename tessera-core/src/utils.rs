//! Shared utility functions for code generation.

/// Split an identifier into its words.
///
/// Words are separated by `-`, `_`, `/` or whitespace, and by case changes
/// inside a word: `"GetMetadataArg"` yields `["Get", "Metadata", "Arg"]`
/// and `"HTTPError"` yields `["HTTP", "Error"]`.
pub fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in s
        .split(|c: char| matches!(c, '-' | '_' | '/') || c.is_whitespace())
        .filter(|chunk| !chunk.is_empty())
    {
        let found = split_case(chunk);
        if found.is_empty() {
            words.push(chunk.to_string());
        } else {
            words.extend(found);
        }
    }
    words
}

fn is_lower_or_digit(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Find the case-delimited words of a chunk without separators.
///
/// A chunk may start with a run of lowercase letters and digits; after that
/// every word starts with an uppercase letter. A run of capitals followed by
/// a capitalised word is an acronym (`"HTTPError"`). Characters that fit
/// none of these shapes are dropped.
fn split_case(chunk: &str) -> Vec<String> {
    let chars: Vec<char> = chunk.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;

    if chars.first().copied().is_some_and(is_lower_or_digit) {
        let end = run_end(&chars, 0, is_lower_or_digit);
        words.push(chars[..end].iter().collect());
        i = end;
    }

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }
        if chars.get(i + 1).copied().is_some_and(is_lower_or_digit) {
            let end = run_end(&chars, i + 1, is_lower_or_digit);
            words.push(chars[i..end].iter().collect());
            i = end;
            continue;
        }
        let end = run_end(&chars, i, |c| c.is_ascii_uppercase());
        if end == chars.len() {
            words.push(chars[i..end].iter().collect());
            i = end;
        } else if is_lower_or_digit(chars[end]) {
            // The last capital starts the next word.
            words.push(chars[i..end - 1].iter().collect());
            i = end - 1;
        } else {
            i = end;
        }
    }
    words
}

fn run_end(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> usize {
    chars[start..]
        .iter()
        .position(|c| !pred(*c))
        .map_or(chars.len(), |offset| start + offset)
}

/// Convert a string to PascalCase (e.g., "get_metadata_arg" -> "GetMetadataArg")
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "GetMetadata" -> "get_metadata")
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
