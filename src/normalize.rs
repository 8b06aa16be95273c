//! Text normalization for label mutations.
//!
//! Broadcast values arrive in robot-code spelling (`Picking_up`, `HighCone`,
//! `Neither`). Labels show them as human-readable title case.

/// Domain token substitutions applied before casing.
pub const TOKEN_SUBSTITUTIONS: &[(&str, &str)] = &[("Neither", "None")];

/// Title-case in place: a letter is upper-cased when it follows a non-letter,
/// lower-cased otherwise. Non-letters are kept as is.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Apply [`TOKEN_SUBSTITUTIONS`].
pub fn substitute_tokens(s: &str) -> String {
    TOKEN_SUBSTITUTIONS
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Underscores become spaces, then [`title_case`]. Optionally substitutes domain tokens first.
pub fn label_text(raw: &str, substitute: bool) -> String {
    let s = if substitute {
        substitute_tokens(raw)
    } else {
        raw.to_string()
    };
    title_case(&s.replace('_', " "))
}

/// Split into words at separators (`_`, `-`, `.`, whitespace) and at lower→upper
/// camel boundaries, then capitalize each word: `HighCone` → `High Cone`.
pub fn camel_title_case(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in raw.chars() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev = Some(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_lowers_inner_letters() {
        assert_eq!(title_case("picking up"), "Picking Up");
        assert_eq!(title_case("SCORING"), "Scoring");
        assert_eq!(title_case("mid2cube"), "Mid2Cube");
    }

    #[test]
    fn label_text_replaces_underscores() {
        assert_eq!(label_text("Picking_up", false), "Picking Up");
        assert_eq!(label_text("Neither", true), "None");
        assert_eq!(label_text("Neither", false), "Neither");
    }

    #[test]
    fn camel_words_are_split() {
        assert_eq!(camel_title_case("HighCone"), "High Cone");
        assert_eq!(camel_title_case("mid_cube"), "Mid Cube");
        assert_eq!(camel_title_case("Mid__Cube"), "Mid Cube");
        assert_eq!(camel_title_case(""), "");
    }
}
