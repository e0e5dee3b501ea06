use smallvec::{smallvec, SmallVec};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::{VariableId, MAX_SLOT_LENGTH};

/// Zero-indexed (row, col) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// The character marking an open cell in a structure file. Anything else is a block.
pub const OPEN_CELL: char = '_';

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A single slot in the grid. Field order matters: the derived ordering is row-major by start
/// cell, which is the order the puzzle assigns `VariableId`s in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable {
            row,
            col,
            direction,
            length,
        }
    }

    /// Generate the coords for each cell of this slot.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| match self.direction {
            Direction::Across => (self.row, self.col + cell_idx),
            Direction::Down => (self.row + cell_idx, self.col),
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} {}", self.row, self.col, direction, self.length)
    }
}

/// The cell shared by two crossing slots: `own_cell` indexes into the first slot of the pair and
/// `other_cell` into the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overlap {
    pub own_cell: usize,
    pub other_cell: usize,
}

/// Problems with the grid structure itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    Empty,
    ZeroLength { variable: Variable },
    OutOfBounds { variable: Variable },
    DuplicateVariable { variable: Variable },
    /// Two slots share more than one cell, which a single crossing can't describe.
    MultipleCrossings { x: Variable, y: Variable },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Empty => write!(f, "structure has no cells"),
            PuzzleError::ZeroLength { variable } => write!(f, "slot {} has zero length", variable),
            PuzzleError::OutOfBounds { variable } => {
                write!(f, "slot {} extends outside the grid", variable)
            }
            PuzzleError::DuplicateVariable { variable } => {
                write!(f, "slot {} appears more than once", variable)
            }
            PuzzleError::MultipleCrossings { x, y } => {
                write!(f, "slots {} and {} share more than one cell", x, y)
            }
        }
    }
}

impl Error for PuzzleError {}

/// The static shape of a crossword: its slots and how they cross. Read-only once built.
#[derive(Debug, Clone)]
pub struct Puzzle {
    width: usize,
    height: usize,
    structure: Vec<Vec<bool>>,
    variables: Vec<Variable>,
    neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>>,
    overlaps: HashMap<(VariableId, VariableId), Overlap>,
}

/// Find every run of at least two consecutive open cells, as (start index, length) pairs.
fn find_runs<I: IntoIterator<Item = bool>>(cells: I) -> Vec<(usize, usize)> {
    let mut result = vec![];
    let mut start = None;
    let mut length = 0;

    for (idx, open) in cells.into_iter().enumerate() {
        if open {
            if start.is_none() {
                start = Some(idx);
            }
            length += 1;
        } else {
            if let Some(start) = start {
                if length > 1 {
                    result.push((start, length));
                }
            }
            start = None;
            length = 0;
        }
    }

    // have to process end of line
    if let Some(start) = start {
        if length > 1 {
            result.push((start, length));
        }
    }

    result
}

impl Puzzle {
    /// Parse a structure where `_` marks an open cell. Rows may be ragged; missing cells are
    /// treated as blocks and the width is that of the longest row.
    pub fn from_structure(structure: &str) -> Result<Puzzle, PuzzleError> {
        let rows: Vec<Vec<bool>> = structure
            .lines()
            .map(|line| line.chars().map(|c| c == OPEN_CELL).collect())
            .collect();

        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        if width == 0 {
            return Err(PuzzleError::Empty);
        }

        let structure: Vec<Vec<bool>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let mut variables = vec![];
        for (row, cells) in structure.iter().enumerate() {
            for (col, length) in find_runs(cells.iter().copied()) {
                variables.push(Variable::new(row, col, Direction::Across, length));
            }
        }
        for col in 0..width {
            for (row, length) in find_runs(structure.iter().map(|cells| cells[col])) {
                variables.push(Variable::new(row, col, Direction::Down, length));
            }
        }

        Puzzle::build(width, height, structure, variables)
    }

    /// Build a puzzle from slots that were already located by some other loader. Every cell
    /// covered by a slot is considered open.
    pub fn new(
        width: usize,
        height: usize,
        variables: Vec<Variable>,
    ) -> Result<Puzzle, PuzzleError> {
        if width == 0 || height == 0 {
            return Err(PuzzleError::Empty);
        }

        let mut structure = vec![vec![false; width]; height];
        for variable in &variables {
            if variable.length == 0 {
                return Err(PuzzleError::ZeroLength {
                    variable: variable.clone(),
                });
            }
            if variable.cells().any(|(row, col)| row >= height || col >= width) {
                return Err(PuzzleError::OutOfBounds {
                    variable: variable.clone(),
                });
            }
            for (row, col) in variable.cells() {
                structure[row][col] = true;
            }
        }

        Puzzle::build(width, height, structure, variables)
    }

    fn build(
        width: usize,
        height: usize,
        structure: Vec<Vec<bool>>,
        mut variables: Vec<Variable>,
    ) -> Result<Puzzle, PuzzleError> {
        variables.sort();
        if let Some(pair) = variables.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(PuzzleError::DuplicateVariable {
                variable: pair[0].clone(),
            });
        }

        // Map each cell to the slots passing through it, so crossings can be read off directly.
        let mut slots_by_cell: HashMap<GridCoord, SmallVec<[(VariableId, usize); 2]>> =
            HashMap::new();
        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, cell) in variable.cells().enumerate() {
                slots_by_cell
                    .entry(cell)
                    .or_insert_with(|| smallvec![])
                    .push((variable_id, cell_idx));
            }
        }

        // Any pair of slots shares at most one cell.
        let mut overlaps: HashMap<(VariableId, VariableId), Overlap> = HashMap::new();
        let mut neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>> =
            variables.iter().map(|_| smallvec![]).collect();

        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, cell) in variable.cells().enumerate() {
                for &(other_id, other_cell_idx) in &slots_by_cell[&cell] {
                    if other_id == variable_id {
                        continue;
                    }
                    match overlaps.entry((variable_id, other_id)) {
                        Entry::Occupied(_) => {
                            return Err(PuzzleError::MultipleCrossings {
                                x: variable.clone(),
                                y: variables[other_id].clone(),
                            });
                        }
                        Entry::Vacant(entry) => {
                            neighbors[variable_id].push(other_id);
                            entry.insert(Overlap {
                                own_cell: cell_idx,
                                other_cell: other_cell_idx,
                            });
                        }
                    }
                }
            }
        }

        for variable_neighbors in &mut neighbors {
            variable_neighbors.sort_unstable();
        }

        Ok(Puzzle {
            width,
            height,
            structure,
            variables,
            neighbors,
            overlaps,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    /// Look up the id of a slot; ids follow the sorted order of the slots.
    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.variables.binary_search(variable).ok()
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.structure
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Every slot crossing the given one, in ascending id order.
    pub fn neighbors(&self, variable_id: VariableId) -> &[VariableId] {
        &self.neighbors[variable_id]
    }

    pub fn degree(&self, variable_id: VariableId) -> usize {
        self.neighbors[variable_id].len()
    }

    /// Where `x` and `y` cross, with `own_cell` indexing into `x`. `None` if they don't.
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{find_runs, Direction, Overlap, Puzzle, PuzzleError, Variable};

    /// ___
    /// _#_
    /// ___
    fn ring() -> Puzzle {
        Puzzle::from_structure("___\n_#_\n___").unwrap()
    }

    #[test]
    fn test_find_runs_skips_single_cells() {
        let cells = [true, false, true, true, false, true, true, true];
        assert_eq!(find_runs(cells), vec![(2, 2), (5, 3)]);
        assert!(find_runs([true]).is_empty());
        assert!(find_runs([false, false]).is_empty());
    }

    #[test]
    fn test_from_structure_finds_slots_in_row_major_order() {
        let puzzle = ring();

        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.height(), 3);
        assert_eq!(
            puzzle.variables(),
            &[
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 0, Direction::Down, 3),
                Variable::new(0, 2, Direction::Down, 3),
                Variable::new(2, 0, Direction::Across, 3),
            ]
        );
        assert!(puzzle.is_open(1, 0));
        assert!(!puzzle.is_open(1, 1));
        assert!(!puzzle.is_open(5, 5));
    }

    #[test]
    fn test_overlaps_are_recorded_in_both_directions() {
        let puzzle = ring();

        assert_eq!(
            puzzle.overlap(0, 2),
            Some(Overlap {
                own_cell: 2,
                other_cell: 0
            })
        );
        assert_eq!(
            puzzle.overlap(2, 0),
            Some(Overlap {
                own_cell: 0,
                other_cell: 2
            })
        );
        assert_eq!(
            puzzle.overlap(0, 1),
            Some(Overlap {
                own_cell: 0,
                other_cell: 0
            })
        );
        assert_eq!(puzzle.overlap(0, 3), None);
        assert_eq!(puzzle.overlap(1, 2), None);
    }

    #[test]
    fn test_neighbors_and_degree() {
        let puzzle = ring();

        assert_eq!(puzzle.neighbors(0), &[1, 2]);
        assert_eq!(puzzle.neighbors(1), &[0, 3]);
        assert_eq!(puzzle.neighbors(3), &[1, 2]);
        assert_eq!(puzzle.degree(2), 2);
    }

    #[test]
    fn test_ragged_rows_are_padded_with_blocks() {
        let puzzle = Puzzle::from_structure("#____\n#_\n#_\n#_").unwrap();

        assert_eq!(puzzle.width(), 5);
        assert_eq!(
            puzzle.variables(),
            &[
                Variable::new(0, 1, Direction::Across, 4),
                Variable::new(0, 1, Direction::Down, 4),
            ]
        );
        assert_eq!(puzzle.degree(0), 1);
    }

    #[test]
    fn test_new_places_supplied_slots() {
        let puzzle = Puzzle::new(
            3,
            3,
            vec![
                Variable::new(0, 1, Direction::Down, 3),
                Variable::new(1, 0, Direction::Across, 3),
            ],
        )
        .unwrap();

        let down = puzzle
            .variable_id(&Variable::new(0, 1, Direction::Down, 3))
            .unwrap();
        let across = puzzle
            .variable_id(&Variable::new(1, 0, Direction::Across, 3))
            .unwrap();

        assert_eq!(
            puzzle.overlap(down, across),
            Some(Overlap {
                own_cell: 1,
                other_cell: 1
            })
        );
        assert!(puzzle.is_open(1, 1));
        assert!(!puzzle.is_open(0, 0));
    }

    #[test]
    fn test_new_rejects_bad_slots() {
        let slot = Variable::new(0, 0, Direction::Across, 4);
        assert_eq!(
            Puzzle::new(3, 3, vec![slot.clone()]).unwrap_err(),
            PuzzleError::OutOfBounds { variable: slot }
        );

        let slot = Variable::new(0, 0, Direction::Down, 0);
        assert_eq!(
            Puzzle::new(3, 3, vec![slot.clone()]).unwrap_err(),
            PuzzleError::ZeroLength { variable: slot }
        );

        let slot = Variable::new(0, 0, Direction::Down, 2);
        assert_eq!(
            Puzzle::new(3, 3, vec![slot.clone(), slot.clone()]).unwrap_err(),
            PuzzleError::DuplicateVariable { variable: slot }
        );

        // Parallel runs over the same cells would need two letters to agree at once.
        let first = Variable::new(0, 0, Direction::Across, 3);
        let second = Variable::new(0, 1, Direction::Across, 3);
        assert_eq!(
            Puzzle::new(4, 1, vec![second.clone(), first.clone()]).unwrap_err(),
            PuzzleError::MultipleCrossings {
                x: first,
                y: second
            }
        );

        assert_eq!(Puzzle::from_structure("").unwrap_err(), PuzzleError::Empty);
    }
}
