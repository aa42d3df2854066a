use super::errors::DictionaryError;
use super::expand::expand_entry;
use super::loader::{collect_files, read_entries};
use super::models::WordlistDictionary;
use dirsift_config::DictionarySettings;
use dirsift_scanner::Dictionary;
use dirsift_utils::normalize_extension;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

type Result<T> = std::result::Result<T, DictionaryError>;

impl WordlistDictionary {
    /// Loads and expands every word list; files or directories of `*.txt`
    pub fn from_wordlists<P: AsRef<Path>>(wordlists: &[P], settings: &DictionarySettings) -> Result<Self> {
        let mut entries = Vec::new();
        for wordlist in wordlists {
            for file in collect_files(wordlist.as_ref())? {
                let lines = read_entries(&file)?;
                tracing::debug!("Read {} entries from {}", lines.len(), file.display());
                entries.extend(lines);
            }
        }

        let dictionary = Self::from_entries(entries, settings);
        tracing::info!("Loaded {} candidate paths", dictionary.paths.len());
        Ok(dictionary)
    }

    /// Expands raw entries, dropping duplicates while keeping first-seen order
    pub fn from_entries<I, S>(entries: I, settings: &DictionarySettings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions: Vec<String> = Vec::new();
        for extension in &settings.extensions {
            let extension = normalize_extension(extension);
            if !extension.is_empty() && !extensions.contains(&extension) {
                extensions.push(extension);
            }
        }

        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        for entry in entries {
            for path in expand_entry(entry.as_ref(), &extensions, settings) {
                if seen.insert(path.clone()) {
                    paths.push(path);
                }
            }
        }

        Self {
            paths,
            extensions,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

impl Dictionary for WordlistDictionary {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn reset(&self) {
        self.cursor.store(0, Ordering::SeqCst);
    }

    fn next_path(&self) -> Option<String> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.paths.get(index).cloned()
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }
}
