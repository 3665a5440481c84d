//! Naming and size helpers for uploaded files.
//!
//! Uploaded files are stored flat in the upload directory under a name
//! derived from the client's filename plus a random token. The token is
//! what keeps `/file/{name}` unguessable, so downloads need no login.

use rand::Rng;

/// Length of the random token embedded in stored filenames.
pub const TOKEN_LENGTH: usize = 8;

/// Longest base name (in characters) kept from the client's filename.
const MAX_BASE_LEN: usize = 64;

/// Longest extension (in characters) kept from the client's filename.
const MAX_EXT_LEN: usize = 16;

/// Base name used when the client's filename has nothing usable.
const FALLBACK_BASE: &str = "upload";

/// Derive a fresh on-disk filename for a client-supplied filename.
///
/// `"../notes/My Essay.final.pdf"` becomes something like
/// `"My_Essay.final.Xq3v9LmA.pdf"`.
pub fn stored_filename(original: &str) -> String {
    let token: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    stored_filename_with_token(original, &token)
}

/// Deterministic core of [`stored_filename`].
pub fn stored_filename_with_token(original: &str, token: &str) -> String {
    let basename = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or("");

    let (base, ext) = match basename.rfind('.') {
        Some(i) if i > 0 => (&basename[..i], &basename[i + 1..]),
        _ => (basename, ""),
    };

    let base: String = base.chars().map(replace_unsafe).collect();
    let base: String = base
        .trim_start_matches('.')
        .chars()
        .take(MAX_BASE_LEN)
        .collect();
    let base = if base.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        base
    };

    let ext: String = ext.chars().map(replace_unsafe).take(MAX_EXT_LEN).collect();

    if ext.is_empty() {
        format!("{base}.{token}")
    } else {
        format!("{base}.{token}.{ext}")
    }
}

/// Characters outside `[A-Za-z0-9._-]` become `_`.
fn replace_unsafe(c: char) -> char {
    if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
        c
    } else {
        '_'
    }
}

/// Whether `name` can be resolved inside the upload directory without
/// escaping it.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.chars().any(|c| matches!(c, '/' | '\\' | '\0'))
}

/// Human-readable binary size, e.g. `512 B`, `1.5 KiB`, `2.9 MiB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    value /= 1024.0;
    while (value * 10.0).round() / 10.0 >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
