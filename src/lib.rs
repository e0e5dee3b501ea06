//! Fill crossword grids by treating each slot as a variable in a constraint satisfaction problem:
//! node consistency and AC-3 prune each slot's candidate words, then a backtracking search picks
//! a word for every slot so that crossings agree and no word repeats.

pub mod arc_consistency;
pub mod assignment;
pub mod backtracking_search;
pub mod config;
pub mod domains;
pub mod puzzle;
pub mod render;
pub mod word_list;

pub use arc_consistency::{
    establish_arc_consistency, ArcConsistencyFailure, ArcConsistencySuccess,
};
pub use assignment::{consistent, Assignment};
pub use backtracking_search::{
    fill_with_domains, find_fill, FillError, FillFailure, FillSuccess, Statistics,
};
pub use config::FillConfig;
pub use domains::Domains;
pub use puzzle::{Direction, Overlap, Puzzle, PuzzleError, Variable};
pub use render::{letter_grid, render_grid};
pub use word_list::{Word, WordList, WordListError};

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// An identifier for a given slot, based on its index in the Puzzle's `variables`, which are kept
/// in row-major order of their start cells.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the `WordList`.
pub type WordId = usize;

#[cfg(test)]
mod tests {
    use crate::{consistent, find_fill, render_grid, FillConfig, Puzzle, WordList};

    /// #___#
    /// #_##_
    /// #_##_
    /// #____
    /// #####
    #[test]
    fn test_find_fill_for_small_structure() {
        let puzzle = Puzzle::from_structure("#___#\n#_##_\n#_##_\n#____\n#####").unwrap();
        let words =
            WordList::parse("one\nover\nrest\nsat\nten\nfour\nnine\ntwo\nten\n").unwrap();

        let result =
            find_fill(&puzzle, &words, &FillConfig::default()).expect("Failed to find a fill");

        assert_eq!(puzzle.variable_count(), 4);
        assert!(consistent(&puzzle, &words, &result.assignment));
        assert_eq!(
            render_grid(&puzzle, &words, &result.assignment),
            "█ONE█\n█V██S\n█E██A\n█REST\n█████"
        );
        println!("{:?}", result.statistics);
    }
}
