use bit_set::BitSet;
use log::debug;
use std::collections::HashSet;

use crate::puzzle::Puzzle;
use crate::word_list::WordList;
use crate::{VariableId, WordId};

/// The candidate words still available to each slot, indexed by `VariableId`. Iteration over a
/// domain is always in ascending `WordId` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    domains: Vec<BitSet>,
}

impl Domains {
    /// Start every slot off with the whole word list.
    pub fn new(puzzle: &Puzzle, words: &WordList) -> Domains {
        let all_words: BitSet = (0..words.len()).collect();

        Domains {
            domains: (0..puzzle.variable_count())
                .map(|_| all_words.clone())
                .collect(),
        }
    }

    /// Start each slot off with its own candidate set, indexed by `VariableId`.
    pub fn from_options<I, O>(options: I) -> Domains
    where
        I: IntoIterator<Item = O>,
        O: IntoIterator<Item = WordId>,
    {
        Domains {
            domains: options
                .into_iter()
                .map(|variable_options| variable_options.into_iter().collect())
                .collect(),
        }
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.domains[variable_id].len()
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.domains[variable_id].is_empty()
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.domains[variable_id].contains(word_id)
    }

    pub fn iter(&self, variable_id: VariableId) -> impl Iterator<Item = WordId> + '_ {
        self.domains[variable_id].iter()
    }

    pub fn variable_count(&self) -> usize {
        self.domains.len()
    }

    /// The first slot with nothing left to choose from, if any.
    pub fn first_empty(&self) -> Option<VariableId> {
        self.domains.iter().position(|domain| domain.is_empty())
    }

    pub fn total_options(&self) -> usize {
        self.domains.iter().map(|domain| domain.len()).sum()
    }

    /// Remove every candidate whose length differs from its slot's length. An emptied domain is
    /// left for arc consistency or the search to report.
    pub fn enforce_node_consistency(&mut self, puzzle: &Puzzle, words: &WordList) {
        let before = self.total_options();

        for (variable_id, variable) in puzzle.variables().iter().enumerate() {
            let domain = &mut self.domains[variable_id];
            let wrong_length: Vec<WordId> = domain
                .iter()
                .filter(|&word_id| words.get(word_id).len() != variable.length)
                .collect();

            for word_id in wrong_length {
                domain.remove(word_id);
            }
        }

        debug!(
            "node consistency removed {} of {} options",
            before - self.total_options(),
            before
        );
    }

    /// Make `x` arc consistent with `y`: drop each option for `x` whose letter at the crossing
    /// doesn't appear at that cell in any option for `y`. Returns whether anything was dropped.
    /// Slots that don't cross are left alone.
    pub fn revise(
        &mut self,
        puzzle: &Puzzle,
        words: &WordList,
        x: VariableId,
        y: VariableId,
    ) -> bool {
        let overlap = match puzzle.overlap(x, y) {
            Some(overlap) => overlap,
            None => return false,
        };

        // Which letters can `y` still put in the shared cell?
        let supported_chars: HashSet<char> = self.domains[y]
            .iter()
            .filter_map(|word_id| words.get(word_id).char_at(overlap.other_cell))
            .collect();

        let unsupported: Vec<WordId> = self.domains[x]
            .iter()
            .filter(|&word_id| {
                words
                    .get(word_id)
                    .char_at(overlap.own_cell)
                    .map_or(true, |c| !supported_chars.contains(&c))
            })
            .collect();

        for &word_id in &unsupported {
            self.domains[x].remove(word_id);
        }

        !unsupported.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Domains;
    use crate::puzzle::{Direction, Puzzle, Variable};
    use crate::word_list::WordList;

    /// Two length-3 slots crossing at their first cells.
    fn corner() -> Puzzle {
        Puzzle::new(
            3,
            3,
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 0, Direction::Down, 3),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_offers_every_word_to_every_slot() {
        let puzzle = corner();
        let words = WordList::new(["cat", "car", "dog"]);
        let domains = Domains::new(&puzzle, &words);

        assert_eq!(domains.variable_count(), 2);
        assert_eq!(domains.len(0), 3);
        assert_eq!(domains.iter(1).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(domains.first_empty(), None);
    }

    #[test]
    fn test_node_consistency_removes_exactly_wrong_lengths() {
        let puzzle = Puzzle::from_structure("_____").unwrap();
        let words = WordList::new(["chair", "table", "cat", "sofas", "tables"]);
        let mut domains = Domains::new(&puzzle, &words);

        domains.enforce_node_consistency(&puzzle, &words);

        let expected = words.iter().filter(|(_, word)| word.len() == 5).count();
        assert_eq!(domains.len(0), expected);
        assert!(domains.contains(0, words.id_of("chair").unwrap()));
        assert!(domains.contains(0, words.id_of("table").unwrap()));
        assert!(domains.contains(0, words.id_of("sofas").unwrap()));
        assert!(!domains.contains(0, words.id_of("cat").unwrap()));
        assert!(!domains.contains(0, words.id_of("tables").unwrap()));
    }

    #[test]
    fn test_node_consistency_can_empty_a_domain() {
        let puzzle = Puzzle::from_structure("____").unwrap();
        let words = WordList::new(["cat", "horse"]);
        let mut domains = Domains::new(&puzzle, &words);

        domains.enforce_node_consistency(&puzzle, &words);

        assert_eq!(domains.first_empty(), Some(0));
    }

    #[test]
    fn test_revise_drops_unsupported_options() {
        let puzzle = corner();
        let words = WordList::new(["cat", "dog", "cow"]);
        let cat = words.id_of("cat").unwrap();
        let dog = words.id_of("dog").unwrap();
        let cow = words.id_of("cow").unwrap();
        let mut domains = Domains::from_options(vec![vec![cat, dog], vec![cow]]);

        assert!(domains.revise(&puzzle, &words, 0, 1));
        assert_eq!(domains.iter(0).collect::<Vec<_>>(), vec![cat]);

        // Nothing left to remove the second time around.
        assert!(!domains.revise(&puzzle, &words, 0, 1));
        assert!(!domains.revise(&puzzle, &words, 1, 0));
        assert_eq!(domains.iter(1).collect::<Vec<_>>(), vec![cow]);
    }

    #[test]
    fn test_revise_ignores_slots_that_dont_cross() {
        let puzzle = Puzzle::from_structure("___\n###\n___").unwrap();
        let words = WordList::new(["cat", "dog"]);
        let mut domains = Domains::from_options(vec![vec![0], vec![1]]);

        assert!(!domains.revise(&puzzle, &words, 0, 1));
        assert_eq!(domains.len(0), 1);
    }
}
