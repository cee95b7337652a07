//=========================================================================
// Phrase Utilities
//=========================================================================
//
// Builds the consistent spoken phrases handlers announce: positional
// "X, N of M" lines, markup-free labels, and neutral fallbacks for
// host text that is missing or placeholder junk.
//
// Everything here is pure string work; host reads happen upstream and
// arrive as `Option<&str>` / plain values.
//
//=========================================================================

//=== Position Phrases ====================================================

/// Formats the standard positional phrase: `"Label, N of M"`.
///
/// `index` is zero-based (as host cursors are); display is one-based.
pub fn position(label: &str, index: usize, count: usize) -> String {
    format!("{}, {} of {}", label, index + 1, count)
}

/// Neutral label for an item whose text could not be read: `"Option N"`.
///
/// `index` is zero-based; display is one-based.
pub fn option_fallback(index: usize) -> String {
    format!("Option {}", index + 1)
}

//=== Label Cleaning ======================================================

/// Strips angle-bracket markup tags (`<color=...>`, `</b>`, …) from host
/// text and collapses any whitespace runs the removal leaves behind.
///
/// Unterminated tags are stripped to the end of the string rather than
/// spoken as raw markup.
pub fn strip_markup(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut in_tag = false;

    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => cleaned.push(ch),
            _ => {}
        }
    }

    // Collapse whitespace runs left by removed tags.
    let mut out = String::with_capacity(cleaned.len());
    let mut last_was_space = false;
    for ch in cleaned.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

/// Returns `true` for text that carries no spoken value: empty or
/// whitespace, bare dashes, or the `???` placeholder hosts show for
/// undiscovered entries.
pub fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.chars().all(|c| c == '-') || trimmed == "???"
}

/// The handler-facing composition: strips markup from a host label and
/// falls back to `"Option N"` when the read failed or produced a
/// placeholder.
pub fn label_or_fallback(raw: Option<&str>, index: usize) -> String {
    match raw {
        Some(text) => {
            let cleaned = strip_markup(text);
            if is_placeholder(&cleaned) {
                option_fallback(index)
            } else {
                cleaned
            }
        }
        None => option_fallback(index),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Position Tests
    //=====================================================================

    /// Tests one-based display over zero-based cursors.
    #[test]
    fn position_is_one_based() {
        assert_eq!(position("Potion", 0, 8), "Potion, 1 of 8");
        assert_eq!(position("Ether", 7, 8), "Ether, 8 of 8");
    }

    /// Tests the neutral fallback label.
    #[test]
    fn option_fallback_is_one_based() {
        assert_eq!(option_fallback(0), "Option 1");
        assert_eq!(option_fallback(4), "Option 5");
    }

    //=====================================================================
    // Markup Tests
    //=====================================================================

    /// Tests rich-text tags are removed.
    #[test]
    fn strip_markup_removes_tags() {
        assert_eq!(strip_markup("<color=#ff0000>Fire</color> Sword"), "Fire Sword");
        assert_eq!(strip_markup("<b><i>Rare</i></b>"), "Rare");
    }

    /// Tests plain text passes through untouched.
    #[test]
    fn strip_markup_passthrough() {
        assert_eq!(strip_markup("Plain Shield"), "Plain Shield");
    }

    /// Tests an unterminated tag is stripped, not spoken.
    #[test]
    fn strip_markup_unterminated_tag() {
        assert_eq!(strip_markup("Sword <color=#00ff"), "Sword");
    }

    /// Tests whitespace left by removed tags collapses.
    #[test]
    fn strip_markup_collapses_whitespace() {
        assert_eq!(strip_markup("A <sprite=3> B"), "A B");
    }

    //=====================================================================
    // Placeholder Tests
    //=====================================================================

    /// Tests placeholder detection.
    #[test]
    fn placeholder_detection() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("-"));
        assert!(is_placeholder("--"));
        assert!(is_placeholder("???"));
        assert!(!is_placeholder("Potion"));
        assert!(!is_placeholder("-5"));
    }

    //=====================================================================
    // Composition Tests
    //=====================================================================

    /// Tests the missing-read fallback.
    #[test]
    fn label_or_fallback_on_missing_read() {
        assert_eq!(label_or_fallback(None, 2), "Option 3");
    }

    /// Tests placeholder text falls back too.
    #[test]
    fn label_or_fallback_on_placeholder() {
        assert_eq!(label_or_fallback(Some("???"), 0), "Option 1");
        assert_eq!(label_or_fallback(Some("<i>-</i>"), 1), "Option 2");
    }

    /// Tests a real label is cleaned and kept.
    #[test]
    fn label_or_fallback_keeps_real_labels() {
        assert_eq!(label_or_fallback(Some("<b>Elixir</b>"), 3), "Elixir");
    }
}
