use std::collections::HashSet;

use crate::puzzle::{Puzzle, Variable};
use crate::word_list::WordList;
use crate::{VariableId, WordId};

/// A partial mapping from slots to chosen words.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    choices: Vec<Option<WordId>>,
}

impl Assignment {
    /// An empty assignment sized for the given puzzle.
    pub fn new(puzzle: &Puzzle) -> Assignment {
        Assignment {
            choices: vec![None; puzzle.variable_count()],
        }
    }

    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.choices.get(variable_id).copied().flatten()
    }

    pub fn is_assigned(&self, variable_id: VariableId) -> bool {
        self.get(variable_id).is_some()
    }

    /// Assign a word to a slot, returning the word it replaced.
    pub fn insert(&mut self, variable_id: VariableId, word_id: WordId) -> Option<WordId> {
        if variable_id >= self.choices.len() {
            self.choices.resize(variable_id + 1, None);
        }
        self.choices[variable_id].replace(word_id)
    }

    pub fn remove(&mut self, variable_id: VariableId) -> Option<WordId> {
        self.choices.get_mut(variable_id).and_then(|choice| choice.take())
    }

    pub fn len(&self) -> usize {
        self.choices.iter().filter(|choice| choice.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.iter().all(|choice| choice.is_none())
    }

    /// Does this assign a word to every slot in the puzzle?
    pub fn is_complete(&self, puzzle: &Puzzle) -> bool {
        (0..puzzle.variable_count()).all(|variable_id| self.is_assigned(variable_id))
    }

    /// The assigned (slot, word) pairs in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.choices
            .iter()
            .enumerate()
            .filter_map(|(variable_id, choice)| choice.map(|word_id| (variable_id, word_id)))
    }

    /// The assigned slots with their words spelled out.
    pub fn words<'a>(
        &'a self,
        puzzle: &'a Puzzle,
        words: &'a WordList,
    ) -> impl Iterator<Item = (&'a Variable, &'a str)> + 'a {
        self.iter().map(move |(variable_id, word_id)| {
            (
                puzzle.variable(variable_id),
                words.get(word_id).string.as_str(),
            )
        })
    }
}

// Unassigned slots past the end of `choices` are the same as explicit `None`s.
impl PartialEq for Assignment {
    fn eq(&self, other: &Assignment) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Assignment {}

/// Check an assignment against every constraint: no word is used twice, every word fits its
/// slot, and crossing slots agree on the shared letter. Only assigned slots are visited. An
/// assignment naming a slot or word the puzzle doesn't have is never consistent.
pub fn consistent(puzzle: &Puzzle, words: &WordList, assignment: &Assignment) -> bool {
    let mut used: HashSet<WordId> = HashSet::with_capacity(assignment.len());

    for (variable_id, word_id) in assignment.iter() {
        // Word ids are unique per string, so comparing ids is comparing words.
        if !used.insert(word_id) {
            return false;
        }

        let variable = match puzzle.variables().get(variable_id) {
            Some(variable) => variable,
            None => return false,
        };
        let word = match words.try_get(word_id) {
            Some(word) => word,
            None => return false,
        };
        if word.len() != variable.length {
            return false;
        }

        for &neighbor_id in puzzle.neighbors(variable_id) {
            let neighbor_word = match assignment.get(neighbor_id) {
                Some(neighbor_word_id) => match words.try_get(neighbor_word_id) {
                    Some(neighbor_word) => neighbor_word,
                    None => return false,
                },
                None => continue,
            };

            if let Some(overlap) = puzzle.overlap(variable_id, neighbor_id) {
                if word.char_at(overlap.own_cell) != neighbor_word.char_at(overlap.other_cell) {
                    return false;
                }
            }
        }
    }

    true
}
