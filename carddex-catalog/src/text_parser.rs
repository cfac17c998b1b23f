//! Scanner for quoted card-name citations in effect text.
//!
//! Effect text cites other cards by wrapping their exact name in matching
//! quote characters (`"Neos"` or `'Neos'`). Store-side full-text search can
//! only establish that a phrase appears somewhere in the text; this scanner
//! confirms an exact quoted citation without partial-name false positives
//! ("Neos" inside `"Neos2"` never counts).

/// Count non-overlapping quoted occurrences of `needle` in `text`.
///
/// A candidate starts at a `"` or `'`. The token between the quotes must
/// match `needle` exactly (case-sensitive) and be followed by the *same*
/// quote character that opened it — `"x'` is never a match. An unterminated
/// quote at the tail of the text never counts, even if the content would
/// otherwise match. With `stop_at_first`, returns 1 as soon as any
/// occurrence is found.
///
/// After a match the scan resumes just past the closing delimiter, so
/// matches never overlap.
///
/// # Examples
///
/// ```
/// use carddex_catalog::text_parser::quoted_occurrences;
///
/// let text = r#""Neos" is a powerful monster and his name is "Neos""#;
/// assert_eq!(quoted_occurrences(text, "Neos", false), 2);
/// assert_eq!(quoted_occurrences(text, "Neos", true), 1);
/// assert_eq!(quoted_occurrences(text, "Neos2", false), 0);
/// ```
pub fn quoted_occurrences(text: &str, needle: &str, stop_at_first: bool) -> usize {
    let runes: Vec<char> = text.chars().collect();
    let needle_runes: Vec<char> = needle.chars().collect();
    let text_len = runes.len();
    let needle_len = needle_runes.len();

    let mut occurrences = 0;

    let mut i = 0;
    while i < text_len {
        if runes[i] == '"' || runes[i] == '\'' {
            let start = i + 1;
            let end = start + needle_len;

            // Not enough text left for the token plus its closing quote.
            // Later candidates only start further right, so stop scanning.
            if end >= text_len {
                break;
            }

            if runes[end] == runes[i] && runes[start..end] == needle_runes[..] {
                if stop_at_first {
                    return 1;
                }
                occurrences += 1;
                // Resume just past the closing delimiter.
                i = end;
            }
        }
        i += 1;
    }

    occurrences
}

/// Whether `needle` appears as a quoted token exactly once in `text`.
pub fn contains_exactly_once(text: &str, needle: &str) -> bool {
    quoted_occurrences(text, needle, false) == 1
}

/// Strip quote artifacts from a token extracted between quote characters.
///
/// Steps run in this order: surrounding whitespace is trimmed, punctuation
/// glued to a closing quote (`".` `",` `'.` `',`) is removed, then a single
/// leading and trailing `'` and `"` are stripped. The order is load-bearing:
/// trimming quotes first would leave the glued punctuation behind as token
/// content. Only the outermost quote character is trimmed, so interior
/// apostrophes survive.
///
/// # Examples
///
/// ```
/// use carddex_catalog::text_parser::normalize_token;
///
/// assert_eq!(normalize_token(r#"HERO"."#), "HERO");
/// assert_eq!(normalize_token("'HERO\""), "HERO");
/// assert_eq!(normalize_token("Magicians' Souls"), "Magicians' Souls");
/// ```
pub fn normalize_token(token: &str) -> String {
    let mut token = token.trim().to_string();
    for glued in ["\".", "\",", "'.", "',"] {
        token = token.replace(glued, "");
    }

    let token = token.strip_prefix('\'').unwrap_or(&token);
    let token = token.strip_suffix('\'').unwrap_or(token);
    let token = token.strip_prefix('"').unwrap_or(token);
    let token = token.strip_suffix('"').unwrap_or(token);
    token.to_string()
}
