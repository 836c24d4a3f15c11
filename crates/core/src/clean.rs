//! Text cleaning for slide rendering.
//!
//! Strips inline markdown markup, swaps emoji that presentation fonts
//! cannot draw, wraps and shortens lines, and builds heading anchors.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

static ITALIC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());

static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Matches a numbered slide prefix such as `Slide 12 – ` at the start of a title.
static SLIDE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Slide \d+\s*[–—-]\s*").unwrap());

/// Anything that may not appear in a heading anchor.
static NON_ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").unwrap());

/// Characters dropped from titles before building an anchor.
const ANCHOR_DROP_CHARS: &[char] = &[':', '(', ')', ',', '&', '–', '\u{2018}', '\u{2019}'];

/// Emoji replaced in deck text. Entries with an empty replacement are removed.
const EMOJI_REPLACEMENTS: &[(&str, &str)] = &[
    ("✅", "[OK]"),
    ("❌", "[X]"),
    ("⭐", "*"),
    ("✨", "*"),
    ("🎯", "*"),
    ("📊", ""),
    ("🖥️", ""),
    ("📱", ""),
    ("🎬", ""),
];

/// Remove bold, italic and inline-code markers, then trim.
pub fn clean_markup(text: &str) -> String {
    let text = BOLD_REGEX.replace_all(text, "$1");
    let text = ITALIC_REGEX.replace_all(&text, "$1");
    let text = CODE_REGEX.replace_all(&text, "$1");
    text.trim().to_string()
}

/// Remove only bold and inline-code markers, then trim.
///
/// Bullet points keep single asterisks since they are often literal.
pub fn clean_bullet(text: &str) -> String {
    let text = BOLD_REGEX.replace_all(text, "$1");
    let text = CODE_REGEX.replace_all(&text, "$1");
    text.trim().to_string()
}

/// Replace emoji that slide fonts render as boxes.
pub fn replace_emoji(text: &str) -> String {
    let mut out = text.to_string();
    for (emoji, replacement) in EMOJI_REPLACEMENTS {
        if out.contains(emoji) {
            out = out.replace(emoji, replacement);
        }
    }
    out
}

/// Markup and emoji cleaning for text placed in a deck.
pub fn clean_for_deck(text: &str) -> String {
    replace_emoji(&clean_markup(text)).trim().to_string()
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Collapse whitespace and shorten to `max_chars`, ending in `...` when cut.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = collapsed.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Greedy word wrap to lines of at most `max_chars` characters.
///
/// A single word longer than the limit gets a line of its own.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len + word_len + 1 <= max_chars {
            current.push(word);
            current_len += word_len + 1;
        } else {
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word];
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}

/// Remove a `Slide N – ` prefix from a slide title.
pub fn strip_slide_prefix(title: &str) -> String {
    SLIDE_PREFIX_REGEX.replace(title, "").to_string()
}

/// Build the fragment identifier markdown renderers give a heading.
pub fn anchor_slug(title: &str) -> String {
    let lowered = title.to_lowercase().replace(' ', "-");
    let dropped: String = lowered
        .chars()
        .filter(|c| !ANCHOR_DROP_CHARS.contains(c))
        .collect();
    NON_ANCHOR_REGEX.replace_all(&dropped, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markup() {
        assert_eq!(clean_markup("**Bold** text"), "Bold text");
        assert_eq!(clean_markup("an *italic* word"), "an italic word");
        assert_eq!(clean_markup("call `df.head()` first"), "call df.head() first");
        assert_eq!(clean_markup("  padded  "), "padded");
    }

    #[test]
    fn test_clean_bullet_keeps_single_asterisk() {
        assert_eq!(clean_bullet("**Key** idea with `code`"), "Key idea with code");
        assert_eq!(clean_bullet("a * b"), "a * b");
    }

    #[test]
    fn test_replace_emoji() {
        assert_eq!(replace_emoji("✅ Good"), "[OK] Good");
        assert_eq!(replace_emoji("❌ Bad"), "[X] Bad");
        assert_eq!(replace_emoji("📊 Chart"), " Chart");
        assert_eq!(clean_for_deck("📊 **Chart**"), "Chart");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a   b\n\tc "), "a b c");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("abcdefghijkl", 10), "abcdefg...");
        assert_eq!(ellipsize("héllo wörld again", 8), "héllo...");
    }

    #[test]
    fn test_wrap_words() {
        let lines = wrap_words("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(lines, vec!["the quick", "brown fox jumps", "over the lazy", "dog"]);
        for line in &lines {
            assert!(line.chars().count() <= 15);
        }
    }

    #[test]
    fn test_wrap_words_long_word() {
        let lines = wrap_words("a supercalifragilistic b", 10);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_words_empty() {
        assert!(wrap_words("   ", 10).is_empty());
    }

    #[test]
    fn test_strip_slide_prefix() {
        assert_eq!(strip_slide_prefix("Slide 3 – Gestalt Principles"), "Gestalt Principles");
        assert_eq!(strip_slide_prefix("Slide 12 - Color"), "Color");
        assert_eq!(strip_slide_prefix("Gestalt Principles"), "Gestalt Principles");
    }

    #[test]
    fn test_anchor_slug() {
        assert_eq!(anchor_slug("Gestalt Principles"), "gestalt-principles");
        assert_eq!(anchor_slug("Data Types & Encodings"), "data-types--encodings");
        assert_eq!(anchor_slug("What's Next: (Part 2)"), "whats-next-part-2");
        assert_eq!(anchor_slug("Color, Shape and Size"), "color-shape-and-size");
    }
}
