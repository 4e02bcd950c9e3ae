//! Archive path strings.
//!
//! Archive paths are plain strings joined by a single backslash, whatever
//! the host platform uses. Nothing here touches [`std::path`]; the host's
//! own conventions never apply to paths inside an archive.

use unicode_normalization::UnicodeNormalization;

/// The one separator character archive listings use.
pub const SEPARATOR: char = '\\';

/// Splits `path` on its last separator into `(parent, leaf)`.
///
/// A path without a separator lives in the root, so the parent is `""`.
///
/// ```
/// use mpqt_core::path::split;
///
/// assert_eq!(split("World\\Maps\\Azeroth.wdt"), ("World\\Maps", "Azeroth.wdt"));
/// assert_eq!(split("readme.txt"), ("", "readme.txt"));
/// ```
pub fn split(path: &str) -> (&str, &str) {
    path.rsplit_once(SEPARATOR).unwrap_or(("", path))
}

/// Joins a parent path and a leaf name. Inverse of [`split`].
pub fn join(parent: &str, leaf: &str) -> String {
    if parent.is_empty() {
        leaf.to_owned()
    } else {
        format!("{parent}{SEPARATOR}{leaf}")
    }
}

/// Drops empty components so leading, trailing and doubled separators
/// never produce empty directory names.
///
/// Returns an empty string for a path made only of separators.
pub fn clean(path: &str) -> String {
    path.split(SEPARATOR)
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
}

/// Canonical lookup form of a directory path: NFC-composed, lowercased.
pub fn fold_key(path: &str) -> String {
    path.nfc().collect::<String>().to_lowercase()
}

/// Returns the extension of `name` including its dot (`".blp"`), or `""`.
///
/// Leading dots do not start an extension, so `".profile"` has none.
pub fn extension(name: &str) -> &str {
    let stripped = name.trim_start_matches('.');
    let offset = name.len() - stripped.len();
    match stripped.rfind('.') {
        Some(pos) => &name[offset + pos..],
        None => "",
    }
}

/// Converts location-bar text (`/World/Maps`) into an archive path.
///
/// Both `/` and `\` are accepted as separators; empty components are dropped.
pub fn from_location(text: &str) -> String {
    text.trim()
        .split(['/', SEPARATOR])
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
}

/// Converts an archive path into location-bar text. The root becomes `/`.
pub fn to_location(path: &str) -> String {
    format!("/{}", path.replace(SEPARATOR, "/"))
}
