//! Filename cleaning and branding.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::WordList;

/// Base name used when cleaning removes everything.
pub const FALLBACK_BASE: &str = "file";

/// Marker appended to every processed filename before its extension.
pub const BRANDING_SUFFIX: &str = "_OldTown";

#[allow(clippy::expect_used)]
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_|\s]+").expect("separator pattern compiles"));

/// Splits a filename into base and extension at the last `.`.
///
/// The extension keeps its leading dot. A dot only starts an extension when
/// something other than dots comes before it, so `.bashrc` has none.
#[must_use]
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if filename[..idx].chars().any(|c| c != '.') => filename.split_at(idx),
        _ => (filename, ""),
    }
}

/// A cleaned filename. The extension is the one the original name had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedName {
    base: String,
    extension: String,
}

impl CleanedName {
    /// Cleaned base name, without extension.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Extension of the original filename, with its leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl fmt::Display for CleanedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.extension)
    }
}

/// Strips the listed words from the base name and tidies the result.
///
/// Without a word list the filename is kept unchanged.
#[must_use]
pub fn clean_filename(filename: &str, words: Option<&WordList>) -> CleanedName {
    let (base, ext) = split_extension(filename);

    let Some(words) = words else {
        warn!("Word list unavailable, keeping original filename: {}", filename);
        return CleanedName {
            base: base.to_owned(),
            extension: ext.to_owned(),
        };
    };

    let stripped = words.strip_from(base);
    let mut cleaned = collapse_separators(&stripped);
    if cleaned.is_empty() {
        cleaned = FALLBACK_BASE.to_owned();
    }

    debug!("Cleaned base \"{}\" -> \"{}\"", base, cleaned);
    CleanedName {
        base: cleaned,
        extension: ext.to_owned(),
    }
}

/// Turns a cleaned filename into the name the file is sent back under.
#[must_use]
pub fn brand_filename(cleaned: &CleanedName) -> String {
    format!(
        "{}{BRANDING_SUFFIX}{}",
        cleaned.base.trim().replace(' ', "_"),
        cleaned.extension
    )
}

/// Collapses runs of underscores, pipes and whitespace to a single space, then trims.
fn collapse_separators(text: &str) -> String {
    SEPARATORS.replace_all(text, " ").trim().to_owned()
}
