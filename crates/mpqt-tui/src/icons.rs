//! Nerd Font glyphs for content-type icon names.
//!
//! The engine resolves each entry to a freedesktop-style icon name through
//! its type's fallback chain; [`GlyphTheme`] is the set of names this
//! terminal theme can draw, so the chain stops at the first one it knows.

use mpqt_core::IconTheme;

/// Glyph for the `application-octet-stream` fallback icon.
const FALLBACK_GLYPH: &str = "\u{f15b} ";

const GLYPHS: &[(&str, &str)] = &[
    ("folder", "\u{f07b} "),
    // Specific types
    ("image-vnd.bliz-blp", "\u{f1c5} "),
    ("text-x-lua", "\u{e620} "),
    ("application-vnd.bliz-mpq", "\u{f187} "),
    ("application-pdf", "\u{f1c1} "),
    ("application-zip", "\u{f410} "),
    // Generic icons
    ("text-x-generic", "\u{f15c} "),
    ("text-html", "\u{e736} "),
    ("text-x-script", "\u{f489} "),
    ("x-office-spreadsheet", "\u{f1c3} "),
    ("x-office-document", "\u{f1c2} "),
    ("application-x-executable", "\u{f013} "),
    ("audio-x-generic", "\u{f001} "),
    ("image-x-generic", "\u{f03e} "),
    ("video-x-generic", "\u{f03d} "),
    ("font-x-generic", "\u{f031} "),
    ("package-x-generic", "\u{f187} "),
    ("3d-x-generic", "\u{f1b2} "),
    ("application-octet-stream", FALLBACK_GLYPH),
];

/// The icon names the terminal can render.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphTheme;

impl IconTheme for GlyphTheme {
    fn has_icon(&self, name: &str) -> bool {
        GLYPHS.iter().any(|(icon, _)| *icon == name)
    }
}

/// Returns the glyph (with a trailing space) for `icon_name`.
pub fn glyph_for(icon_name: &str) -> &'static str {
    GLYPHS
        .iter()
        .find(|(icon, _)| *icon == icon_name)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(FALLBACK_GLYPH)
}

/// The plain-text marker used when icons are disabled.
pub fn plain_marker(is_dir: bool) -> &'static str {
    if is_dir {
        "/"
    } else {
        " "
    }
}
