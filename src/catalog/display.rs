/// Turn a file stem into a catalog id: lowercase ASCII alphanumerics, with any
/// other run of characters collapsed into a single `-`.
///
/// Returns an empty string when the stem has no usable characters.
pub fn slug(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut pending_dash = false;

    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Build a display title from a file stem: `ocean_waves-night` -> `Ocean Waves Night`.
pub fn title_from_stem(stem: &str) -> String {
    let words: Vec<String> = stem
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        stem.to_string()
    } else {
        words.join(" ")
    }
}
