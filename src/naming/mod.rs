//! Filename handling.
//!
//! Loads the list of words to strip and turns an incoming document's
//! filename into the branded name it is sent back under.

mod cleaner;
mod words;

pub use cleaner::{
    BRANDING_SUFFIX, CleanedName, FALLBACK_BASE, brand_filename, clean_filename,
    split_extension,
};
pub use words::{WordList, WordListError};
