use crate::assignment::Assignment;
use crate::puzzle::Puzzle;
use crate::word_list::WordList;

/// Drawn in place of blocked cells.
pub const BLOCK: char = '█';

/// Lay the assigned words out on the grid. Cells no assigned word covers are `None`.
pub fn letter_grid(
    puzzle: &Puzzle,
    words: &WordList,
    assignment: &Assignment,
) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; puzzle.width()]; puzzle.height()];

    for (variable_id, word_id) in assignment.iter() {
        let word = words.get(word_id);
        for ((row, col), &c) in puzzle.variable(variable_id).cells().zip(&word.chars) {
            letters[row][col] = Some(c);
        }
    }

    letters
}

/// Turn the given puzzle and assignment into a rendered string, one line per row. Open cells
/// that nothing was written into are left blank.
pub fn render_grid(puzzle: &Puzzle, words: &WordList, assignment: &Assignment) -> String {
    let letters = letter_grid(puzzle, words, assignment);

    letters
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, letter)| {
                    if puzzle.is_open(row, col) {
                        letter.unwrap_or(' ')
                    } else {
                        BLOCK
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
