//! Filename sanitization restricted to a portable character set.

/// Maximum length of a file stem, in characters.
pub const MAX_STEM_CHARS: usize = 120;

/// Sanitizes a candidate file stem.
///
/// - Keeps ASCII letters, digits, `-`, `_` and `.`; everything else becomes `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots and underscores
/// - Limits length to [`MAX_STEM_CHARS`]
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replacement = if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            c
        } else {
            '_'
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    // Only ASCII is left, so chars and bytes line up.
    trimmed.chars().take(MAX_STEM_CHARS).collect()
}
