//! Object naming for uploaded photos.
//!
//! Client-supplied file names become object names in the blob store, so they
//! are reduced to a safe character set before use.

/// Maximum object name length in bytes.
pub const MAX_OBJECT_NAME_LEN: usize = 255;

/// Reduce a client-supplied file name to `[A-Za-z0-9._-]`.
///
/// Any directory components are dropped, other characters become `_`, and
/// leading dots are stripped so the result can never be `.`/`..` or a hidden
/// file. Falls back to a random name when nothing usable remains.
pub fn sanitize_object_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let sanitized: String = base
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect();

    let trimmed = sanitized.trim_start_matches('.');
    if trimmed.is_empty() {
        return generated_object_name();
    }

    truncate_on_char_boundary(trimmed, MAX_OBJECT_NAME_LEN).to_string()
}

/// Random object name used when the client sent no usable file name.
pub fn generated_object_name() -> String {
    format!("upload-{}", uuid::Uuid::new_v4())
}

/// Whether `name` is already safe to use as an object name.
pub fn is_safe_object_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_OBJECT_NAME_LEN
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
