use lazy_static::lazy_static;
use regex::Regex;

use super::OutputFormat;

/// Longest base name kept, in bytes; leaves room for the extension within
/// the common 255-byte file name limit.
const MAX_BASE_LEN: usize = 200;

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^\w.\- ]").unwrap();
}

/// Resolve the file name a result is stored under.
///
/// A custom name keeps its base but always ends in the extension of
/// `format`; an empty one gets a generated unique name. Only the last path
/// component of a custom name is used and unsafe characters are replaced.
pub fn normalize(custom: Option<&str>, format: OutputFormat) -> String {
    let ext = format.extension();
    let custom = custom.map(str::trim).filter(|name| !name.is_empty());

    let Some(name) = custom else {
        return generate(format);
    };

    let safe = sanitize(name);
    if safe != name {
        tracing::warn!("Custom file name {:?} sanitized to {:?}", name, safe);
    }
    if safe.is_empty() || safe.trim_matches('.').is_empty() {
        return generate(format);
    }

    let base = match safe.strip_suffix(&format!(".{}", ext)) {
        Some(base) => base,
        None => strip_extension(&safe),
    };
    let full_len = base.len();
    let base = truncate(base, MAX_BASE_LEN);
    if base.len() < full_len {
        tracing::warn!("Custom file name truncated to {} bytes", MAX_BASE_LEN);
    }

    format!("{}.{}", base, ext)
}

pub fn generate(format: OutputFormat) -> String {
    format!("tts-{}.{}", uuid::Uuid::new_v4(), format.extension())
}

fn sanitize(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    UNSAFE_CHARS.replace_all(last, "_").into_owned()
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Removes a trailing `.ext`. Leading dots do not start an extension.
fn strip_extension(name: &str) -> &str {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => &name[..leading + idx],
        None => name,
    }
}
