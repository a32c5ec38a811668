use thiserror::Error;

use std::fmt;
use std::str::FromStr;

use crate::{CELLS, SIZE};

/// Errors raised at the boundary between callers and the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid coordinate ({row}, {col}), rows and columns must be between 0 and 2")]
    InvalidCoordinate { row: usize, col: usize },
}

/// The symbol a player places on the board
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mark {
    /// The human player, `X`
    Human,
    /// The automated player, `O`
    Ai,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::Human => Mark::Ai,
            Mark::Ai => Mark::Human,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Mark::Human => "X",
            Mark::Ai => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Human,
    Ai,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Mark::Human),
            Cell::Ai => Some(Mark::Ai),
        }
    }

    /// The symbol used by hosting layers, `""` for an empty cell
    pub fn symbol(self) -> &'static str {
        self.mark().map_or("", Mark::symbol)
    }

    fn parse_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "" => Some(Cell::Empty),
            "X" => Some(Cell::Human),
            "O" => Some(Cell::Ai),
            _ => None,
        }
    }

    fn notation(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'X',
            Cell::Ai => 'O',
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Human => Cell::Human,
            Mark::Ai => Cell::Ai,
        }
    }
}

/// A cell coordinate, 0-indexed from the top left corner
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Creates a move, failing if either coordinate is outside the board
    pub fn new(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= SIZE || col >= SIZE {
            return Err(BoardError::InvalidCoordinate { row, col });
        }
        Ok(Self { row, col })
    }

    /// Creates a move from coordinates known to be in range
    ///
    /// # Panics
    /// Panics if either coordinate is outside the board
    pub const fn at(row: usize, col: usize) -> Self {
        assert!(row < SIZE && col < SIZE, "coordinate out of range");
        Self { row, col }
    }

    /// Creates a move from a row-major cell index
    pub fn from_index(index: usize) -> Result<Self, BoardError> {
        if index >= CELLS {
            return Err(BoardError::InvalidCoordinate {
                row: index / SIZE,
                col: index % SIZE,
            });
        }
        Ok(Self::at(index / SIZE, index % SIZE))
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index of the cell
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Every cell of the board in row-major order
pub const ALL_MOVES: [Move; CELLS] = [
    Move::at(0, 0),
    Move::at(0, 1),
    Move::at(0, 2),
    Move::at(1, 0),
    Move::at(1, 1),
    Move::at(1, 2),
    Move::at(2, 0),
    Move::at(2, 1),
    Move::at(2, 2),
];

/// A 3x3 Tic-Tac-Toe board
///
/// # Notes
/// The board only guarantees that it is well formed (3x3, cells drawn from
/// `Empty`, `Human` and `Ai`). Turn alternation is not enforced, so any
/// combination of marks can be represented.
///
/// Boards are `Copy`; the engine works on its own copies and never hands a
/// mutated board back to the caller.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    // cells are stored left-to-right, top-to-bottom
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Builds a board from a grid of cell symbols (`""`, `"X"` or `"O"`)
    ///
    /// This is the validating boundary for untrusted input: the grid must be
    /// exactly 3 rows of exactly 3 cells.
    pub fn from_rows<R, S>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if rows.len() != SIZE {
            return Err(BoardError::InvalidInput(format!(
                "expected {} rows, found {}",
                SIZE,
                rows.len()
            )));
        }
        let mut board = Self::new();
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != SIZE {
                return Err(BoardError::InvalidInput(format!(
                    "expected {} cells in row {}, found {}",
                    SIZE,
                    row,
                    cells.len()
                )));
            }
            for (col, symbol) in cells.iter().enumerate() {
                let symbol = symbol.as_ref();
                let cell = Cell::parse_symbol(symbol).ok_or_else(|| {
                    BoardError::InvalidInput(format!(
                        "illegal cell value {:?} at ({}, {})",
                        symbol, row, col
                    ))
                })?;
                board.cells[row * SIZE + col] = cell;
            }
        }
        Ok(board)
    }

    /// The grid as rows of cells, top row first
    pub fn rows(&self) -> [[Cell; SIZE]; SIZE] {
        let mut rows = [[Cell::Empty; SIZE]; SIZE];
        for mv in ALL_MOVES.iter() {
            rows[mv.row][mv.col] = self.get(*mv);
        }
        rows
    }

    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.index()]
    }

    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv).is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, mark: Mark) -> usize {
        let target = Cell::from(mark);
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        ALL_MOVES.iter().copied().filter(move |&mv| self.is_empty(mv))
    }

    /// Returns a copy of the board with `mark` placed at `mv`
    pub fn with_move(&self, mv: Move, mark: Mark) -> Result<Self, BoardError> {
        if !self.is_empty(mv) {
            return Err(BoardError::InvalidInput(format!(
                "cell {} is already occupied",
                mv
            )));
        }
        let mut next = *self;
        next.place(mv, mark);
        Ok(next)
    }

    // working-copy mutation for search, callers must clear what they place
    pub(crate) fn place(&mut self, mv: Move, mark: Mark) {
        debug_assert!(self.is_empty(mv), "placing on occupied cell {}", mv);
        self.cells[mv.index()] = Cell::from(mark);
    }

    pub(crate) fn clear(&mut self, mv: Move) {
        self.cells[mv.index()] = Cell::Empty;
    }

    /// The board rotated a quarter turn clockwise
    pub fn rotated(&self) -> Self {
        let mut next = Self::new();
        for mv in ALL_MOVES.iter() {
            // (r, c) moves to (c, SIZE - 1 - r)
            next.cells[mv.col * SIZE + (SIZE - 1 - mv.row)] = self.get(*mv);
        }
        next
    }

    /// The board mirrored left to right
    pub fn mirrored(&self) -> Self {
        let mut next = Self::new();
        for mv in ALL_MOVES.iter() {
            next.cells[mv.row * SIZE + (SIZE - 1 - mv.col)] = self.get(*mv);
        }
        next
    }

    /// Unique key of the position, each cell a base-3 digit
    pub fn key(&self) -> u16 {
        self.cells.iter().fold(0, |key, cell| {
            key * 3
                + match cell {
                    Cell::Empty => 0,
                    Cell::Human => 1,
                    Cell::Ai => 2,
                }
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, cell) in self.cells.iter().enumerate() {
            if idx != 0 && idx % SIZE == 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", cell.notation())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses compact notation such as `XX./.O./...`
    ///
    /// `.`, `_`, `-` and spaces are empty cells, `/` separators are optional.
    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let mut board = Self::new();
        let mut filled = 0;

        for symbol in notation.chars().filter(|&c| c != '/' && c != '\n') {
            let cell = match symbol.to_ascii_uppercase() {
                '.' | '_' | '-' | ' ' => Cell::Empty,
                'X' => Cell::Human,
                'O' => Cell::Ai,
                _ => {
                    return Err(BoardError::InvalidInput(format!(
                        "could not parse '{}' as a cell",
                        symbol
                    )))
                }
            };
            if filled == CELLS {
                return Err(BoardError::InvalidInput(format!(
                    "more than {} cells in '{}'",
                    CELLS, notation
                )));
            }
            board.cells[filled] = cell;
            filled += 1;
        }

        if filled != CELLS {
            return Err(BoardError::InvalidInput(format!(
                "expected {} cells, found {} in '{}'",
                CELLS, filled, notation
            )));
        }
        Ok(board)
    }
}
