use std::fmt;

use crate::api::error;

/// Longest name accepted from a client, leaving room for a disambiguation prefix.
pub const MAX_NAME_LEN: usize = 200;

/// Longest name the store may hold, which is the filesystem's segment limit.
pub const MAX_STORED_LEN: usize = 255;

/// A single path segment that is safe to join onto the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeName(String);

impl SafeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts a name only if it is already in sanitized form.
    pub fn from_stored(raw: &str) -> Option<SafeName> {
        sanitize_stored(raw).ok().filter(|name| name.0 == raw)
    }

    /// Same name with `prefix-` in front. The prefix must be a plain token.
    pub(crate) fn prefixed(&self, prefix: &str) -> SafeName {
        SafeName(format!("{}-{}", prefix, self.0))
    }
}

impl fmt::Display for SafeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// Name is empty, whitespace-only, or nothing remains after stripping directories.
    Empty,
    NullByte,
    ControlCharacter,
    /// Leading separator or drive prefix.
    AbsolutePath,
    /// Colon outside a drive prefix (Windows streams and devices).
    ReservedCharacter,
    PathTraversal,
    Hidden,
    TooLong,
}

impl NameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::AbsolutePath => "Invalid filename: absolute paths are not allowed",
            Self::ReservedCharacter => "Invalid filename: ':' is not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::TooLong => "Invalid filename: name is too long",
        }
    }
}

impl From<NameError> for error::SystemError {
    fn from(err: NameError) -> Self {
        error::SystemError::bad_request(err.message())
    }
}

fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Reduces an untrusted client filename to a single safe path segment.
///
/// Inputs that try to leave the directory they are joined to (`..` segments,
/// absolute paths, drive prefixes) are rejected outright. Plain directory
/// components are stripped, so `albums/2024/cover.jpg` becomes `cover.jpg`.
pub fn sanitize(raw: &str) -> Result<SafeName, NameError> {
    sanitize_within(raw, MAX_NAME_LEN)
}

/// Like [`sanitize`], but allows the extra length of a disambiguated name.
pub fn sanitize_stored(raw: &str) -> Result<SafeName, NameError> {
    sanitize_within(raw, MAX_STORED_LEN)
}

fn sanitize_within(raw: &str, max_len: usize) -> Result<SafeName, NameError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }

    if trimmed.contains('\0') {
        return Err(NameError::NullByte);
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(NameError::ControlCharacter);
    }

    if trimmed.starts_with('/') || trimmed.starts_with('\\') || has_drive_prefix(trimmed) {
        return Err(NameError::AbsolutePath);
    }

    if trimmed.contains(':') {
        return Err(NameError::ReservedCharacter);
    }

    let segments: Vec<&str> = trimmed.split(['/', '\\']).map(str::trim).collect();
    if segments.iter().any(|segment| *segment == "..") {
        return Err(NameError::PathTraversal);
    }

    let last = segments.last().copied().unwrap_or_default();
    if last.is_empty() || last == "." {
        return Err(NameError::Empty);
    }

    if last.starts_with('.') {
        return Err(NameError::Hidden);
    }

    if last.len() > max_len {
        return Err(NameError::TooLong);
    }

    Ok(SafeName(last.to_string()))
}
