//! Word list loading.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a word list.
#[derive(Debug, Error)]
pub enum WordListError {
    #[error("Failed to read word list file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build matcher for word '{word}': {source}")]
    Pattern {
        word: String,
        #[source]
        source: regex::Error,
    },
}

/// A word to strip from filenames, with its compiled matcher.
#[derive(Debug, Clone)]
struct Entry {
    word: String,
    matcher: Regex,
}

/// Ordered list of literal words removed from filenames.
///
/// Each entry matches case-insensitively as a plain substring, so a word can
/// be removed from inside a longer word. Entries are applied in file order.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    entries: Vec<Entry>,
}

impl WordList {
    /// Loads a newline-delimited word list from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a word cannot be compiled
    /// into a matcher.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let list = Self::parse(&content)?;
        debug!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    /// Parses word list text. Lines are trimmed and blank lines skipped.
    pub fn parse(content: &str) -> Result<Self, WordListError> {
        Self::from_words(content.lines())
    }

    /// Builds a word list from in-memory words. Blank words are skipped.
    pub fn from_words<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = words
            .into_iter()
            .filter_map(|w| {
                let word = w.as_ref().trim();
                (!word.is_empty()).then(|| Entry::new(word))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Removes every occurrence of every word from `text`, in list order.
    #[must_use]
    pub fn strip_from(&self, text: &str) -> String {
        self.entries.iter().fold(text.to_owned(), |acc, entry| {
            entry.matcher.replace_all(&acc, "").into_owned()
        })
    }

    /// Returns the words in load order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.word.as_str())
    }

    /// Returns the number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the list has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Entry {
    fn new(word: &str) -> Result<Self, WordListError> {
        let matcher = RegexBuilder::new(&regex::escape(word))
            .case_insensitive(true)
            .build()
            .map_err(|source| WordListError::Pattern {
                word: word.to_owned(),
                source,
            })?;

        Ok(Self {
            word: word.to_owned(),
            matcher,
        })
    }
}
