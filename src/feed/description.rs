//! Description cleanup

/// Longest description the aggregator accepts, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Strip markup, collapse whitespace runs to single spaces, trim, then truncate to
/// [`MAX_DESCRIPTION_CHARS`] characters.
#[must_use]
pub fn clean_description(raw: &str) -> String {
    let stripped = strip_markup(raw);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => collapsed.get(..cut).unwrap_or(&collapsed).to_string(),
        None => collapsed,
    }
}

/// Remove every `<...>` tag. A `<` with no closing `>` is kept as text.
#[must_use]
pub fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut tag: Option<String> = None;

    for c in raw.chars() {
        if let Some(pending) = tag.as_mut() {
            if c == '>' {
                tag = None;
            } else {
                pending.push(c);
            }
        } else if c == '<' {
            tag = Some(String::from('<'));
        } else {
            out.push(c);
        }
    }

    if let Some(pending) = tag {
        out.push_str(&pending);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let raw = "<p>Pure   <strong>cold-pressed</strong>\n\n oil.</p>\t<br/>";

        assert_eq!(clean_description(raw), "Pure cold-pressed oil.");
    }

    #[test]
    fn unclosed_angle_bracket_is_kept() {
        assert_eq!(strip_markup("Fits 3 < 4 cups"), "Fits 3 < 4 cups");
        assert_eq!(strip_markup("a <b>bold</b> < c"), "a bold < c");
    }

    #[test]
    fn truncates_to_limit_in_characters() {
        let raw = "é".repeat(MAX_DESCRIPTION_CHARS + 250);
        let cleaned = clean_description(&raw);

        assert_eq!(cleaned.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn short_descriptions_are_untouched() {
        assert_eq!(clean_description("Handmade soap"), "Handmade soap");
        assert_eq!(clean_description("   "), "");
    }
}
