//! Compiled content-type table.
//!
//! Generic entries follow the freedesktop shared-mime-info database
//! (comment, `sub-class-of`, `alias`, `generic-icon`); the Blizzard entries
//! cover the formats found inside MPQ archives.

/// One row of the compiled table. Empty strings mean "not declared".
pub(crate) struct StaticType {
    pub name: &'static str,
    pub comment: &'static str,
    pub generic_icon: &'static str,
    pub parent: &'static str,
    pub alias_of: &'static str,
}

pub(crate) const DEFAULT_TYPE: &str = "application/octet-stream";
pub(crate) const DIRECTORY_TYPE: &str = "inode/directory";
pub(crate) const DEFAULT_ICON: &str = "application-octet-stream";

const fn ty(
    name: &'static str,
    comment: &'static str,
    generic_icon: &'static str,
    parent: &'static str,
) -> StaticType {
    StaticType {
        name,
        comment,
        generic_icon,
        parent,
        alias_of: "",
    }
}

const fn alias(name: &'static str, alias_of: &'static str) -> StaticType {
    StaticType {
        name,
        comment: "",
        generic_icon: "",
        parent: "",
        alias_of,
    }
}

pub(crate) static TYPES: &[StaticType] = &[
    ty(DEFAULT_TYPE, "unknown", "", ""),
    ty(DIRECTORY_TYPE, "folder", "folder", ""),
    // Text
    ty("text/plain", "plain text document", "text-x-generic", ""),
    ty("text/html", "HTML document", "text-html", "text/plain"),
    ty("application/xml", "XML document", "text-html", "text/plain"),
    alias("text/xml", "application/xml"),
    ty("text/x-lua", "Lua script", "text-x-script", "application/x-executable"),
    ty("text/csv", "CSV document", "x-office-spreadsheet", "text/plain"),
    ty("application/x-wine-extension-ini", "configuration file", "text-x-generic", "text/plain"),
    // Executables
    ty("application/x-executable", "executable", "application-x-executable", ""),
    ty(
        "application/x-ms-dos-executable",
        "DOS/Windows executable",
        "application-x-executable",
        "application/x-executable",
    ),
    ty(
        "application/x-sharedlib",
        "shared library",
        "application-x-executable",
        "application/x-executable",
    ),
    // Audio
    ty("audio/mpeg", "MP3 audio", "audio-x-generic", ""),
    ty("audio/x-wav", "WAV audio", "audio-x-generic", ""),
    ty("application/ogg", "Ogg multimedia file", "", ""),
    ty("audio/ogg", "Ogg Audio", "audio-x-generic", "application/ogg"),
    // Images
    ty("image/png", "PNG image", "image-x-generic", ""),
    ty("image/jpeg", "JPEG image", "image-x-generic", ""),
    ty("image/gif", "GIF image", "image-x-generic", ""),
    ty("image/bmp", "Windows BMP image", "image-x-generic", ""),
    alias("image/x-ms-bmp", "image/bmp"),
    ty("image/x-tga", "TGA image", "image-x-generic", ""),
    // Video
    ty("video/x-msvideo", "AVI video", "video-x-generic", ""),
    // Fonts
    ty("font/ttf", "TrueType font", "font-x-generic", ""),
    alias("application/x-font-ttf", "font/ttf"),
    // Documents and archives
    ty("application/pdf", "PDF document", "x-office-document", ""),
    ty("application/zip", "Zip archive", "package-x-generic", ""),
    // Blizzard formats
    ty("application/vnd.bliz-anim", "Model ANIM data", "3d-x-generic", ""),
    ty("application/vnd.bliz-dbc", "WoW database file", "x-office-spreadsheet", ""),
    ty("application/vnd.bliz-mdx", "Blizzard MDX model", "3d-x-generic", ""),
    ty("application/vnd.bliz-mpq", "MPQ archive", "package-x-generic", ""),
    ty("application/vnd.bliz-skin", "Model SKIN data", "3d-x-generic", ""),
    ty("application/vnd.bliz-wmo", "World model object", "3d-x-generic", ""),
    ty("image/vnd.bliz-blp", "BLP image", "image-x-generic", ""),
];

/// Extension (with dot) to type name.
pub(crate) static EXTENSIONS: &[(&str, &str)] = &[
    (".txt", "text/plain"),
    (".log", "text/plain"),
    (".toc", "text/plain"),
    (".htm", "text/html"),
    (".html", "text/html"),
    (".xml", "application/xml"),
    (".lua", "text/x-lua"),
    (".csv", "text/csv"),
    (".ini", "application/x-wine-extension-ini"),
    (".exe", "application/x-ms-dos-executable"),
    (".dll", "application/x-sharedlib"),
    (".mp3", "audio/mpeg"),
    (".wav", "audio/x-wav"),
    (".ogg", "audio/ogg"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".bmp", "image/x-ms-bmp"),
    (".tga", "image/x-tga"),
    (".avi", "video/x-msvideo"),
    (".ttf", "application/x-font-ttf"),
    (".pdf", "application/pdf"),
    (".zip", "application/zip"),
    (".anim", "application/vnd.bliz-anim"),
    (".dbc", "application/vnd.bliz-dbc"),
    (".db2", "application/vnd.bliz-dbc"),
    (".wdb", "application/vnd.bliz-dbc"),
    (".mdx", "application/vnd.bliz-mdx"),
    (".m2", "application/vnd.bliz-mdx"),
    (".m3", "application/vnd.bliz-mdx"),
    (".mpq", "application/vnd.bliz-mpq"),
    (".skin", "application/vnd.bliz-skin"),
    (".wmo", "application/vnd.bliz-wmo"),
    (".blp", "image/vnd.bliz-blp"),
];
