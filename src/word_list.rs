use smallvec::SmallVec;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::{WordId, MAX_SLOT_LENGTH};

/// A struct representing a word that can be chosen for a slot. `chars` is what crossings are
/// checked against; lengths are counted in chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub chars: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: &str) -> Word {
        Word {
            string: string.to_string(),
            chars: string.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, cell_idx: usize) -> Option<char> {
        self.chars.get(cell_idx).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListError {
    NoWords,
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordListError::NoWords => write!(f, "word list contains no words"),
        }
    }
}

impl Error for WordListError {}

/// The vocabulary available to every slot. Ids are dense and follow first-seen order, and each
/// distinct string appears exactly once.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
    ids_by_string: HashMap<String, WordId>,
}

impl WordList {
    /// Build a word list from the given strings as-is, apart from trimming. Blank entries and
    /// repeats are dropped.
    pub fn new<I, S>(words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_list = WordList::default();
        for word in words {
            word_list.insert(word.as_ref());
        }
        word_list
    }

    /// Parse a word-list file: one word per line, normalized to upper case.
    pub fn parse(contents: &str) -> Result<WordList, WordListError> {
        let word_list = WordList::new(contents.lines().map(|line| line.trim().to_uppercase()));
        if word_list.is_empty() {
            return Err(WordListError::NoWords);
        }
        Ok(word_list)
    }

    fn insert(&mut self, word: &str) -> Option<WordId> {
        let word = word.trim();
        if word.is_empty() || self.ids_by_string.contains_key(word) {
            return None;
        }

        let word_id = self.words.len();
        self.words.push(Word::new(word));
        self.ids_by_string.insert(word.to_string(), word_id);
        Some(word_id)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    /// Like `get`, but `None` for an id outside the list.
    pub fn try_get(&self, word_id: WordId) -> Option<&Word> {
        self.words.get(word_id)
    }

    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.ids_by_string.get(word).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::{WordList, WordListError};

    #[test]
    fn test_new_dedupes_in_first_seen_order() {
        let words = WordList::new(["cat", " dog ", "", "cat", "owl"]);

        assert_eq!(words.len(), 3);
        assert_eq!(words.id_of("cat"), Some(0));
        assert_eq!(words.id_of("dog"), Some(1));
        assert_eq!(words.id_of("owl"), Some(2));
        assert_eq!(words.id_of("fox"), None);
    }

    #[test]
    fn test_parse_uppercases_lines() {
        let words = WordList::parse("apple\nBanana\n\n  cherry  \napple\n").unwrap();

        let strings: Vec<&str> = words.iter().map(|(_, word)| word.string.as_str()).collect();
        assert_eq!(strings, vec!["APPLE", "BANANA", "CHERRY"]);
    }

    #[test]
    fn test_parse_rejects_empty_list() {
        assert_eq!(WordList::parse("\n  \n").unwrap_err(), WordListError::NoWords);
    }

    #[test]
    fn test_lengths_count_chars() {
        let words = WordList::new(["café"]);
        let word = words.get(0);

        assert_eq!(word.len(), 4);
        assert_eq!(word.char_at(3), Some('é'));
        assert_eq!(word.char_at(4), None);
    }
}
