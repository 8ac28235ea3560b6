//! Binary file heuristics layered on top of glob scope.

use std::path::Path;

/// Bytes inspected when sniffing content.
pub const SNIFF_LEN: usize = 8 * 1024;

/// Share of suspicious control bytes above which a prefix counts as binary.
const CONTROL_RATIO_PERCENT: usize = 30;

const BINARY_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tif", "tiff", "psd", "icns",
    // archives
    "zip", "gz", "tgz", "bz2", "xz", "zst", "7z", "rar", "tar", "jar", "war",
    // executables and objects
    "exe", "dll", "so", "dylib", "o", "a", "lib", "obj", "bin", "class", "pyc", "wasm",
    // media, fonts, documents, databases
    "pdf", "mp3", "mp4", "mov", "avi", "wav", "flac", "ogg", "ttf", "otf", "woff", "woff2",
    "eot", "sqlite", "db",
];

/// Extension denylist check, case-insensitive.
#[must_use]
pub fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Content sniffing over the first [`SNIFF_LEN`] bytes: any NUL byte, or a
/// high share of control bytes that never appear in text.
#[must_use]
pub fn looks_binary(bytes: &[u8]) -> bool {
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];
    if prefix.is_empty() {
        return false;
    }
    if memchr::memchr(0, prefix).is_some() {
        return true;
    }
    let suspicious = prefix.iter().filter(|&&b| is_suspicious_control(b)).count();
    suspicious * 100 > prefix.len() * CONTROL_RATIO_PERCENT
}

/// Extension or content says binary.
#[must_use]
pub fn is_binary(path: &Path, bytes: &[u8]) -> bool {
    has_binary_extension(path) || looks_binary(bytes)
}

const fn is_suspicious_control(byte: u8) -> bool {
    // tab, LF, FF, CR and ESC show up in ordinary text files
    (byte < 0x20 && !matches!(byte, b'\t' | b'\n' | 0x0c | b'\r' | 0x1b)) || byte == 0x7f
}

#[cfg(test)]
#[path = "binary_tests.rs"]
mod tests;
