//! Board representation: tiles, pieces, parsing and serialization.
//!
//! A board is an immutable value. Moving a piece produces a new board with
//! exactly the source cell cleared and the destination cell filled; the
//! textual serialization of a board is its canonical identity during search.

use std::fmt;
use std::ops::Add;

use thiserror::Error;

/// A typed piece, ordered by ascending movement cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    A,
    B,
    C,
    D,
}

impl Piece {
    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            'A' => Some(Piece::A),
            'B' => Some(Piece::B),
            'C' => Some(Piece::C),
            'D' => Some(Piece::D),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Piece::A => 'A',
            Piece::B => 'B',
            Piece::C => 'C',
            Piece::D => 'D',
        }
    }

    /// Energy spent per step of movement
    pub fn energy_per_step(self) -> u64 {
        match self {
            Piece::A => 1,
            Piece::B => 10,
            Piece::C => 100,
            Piece::D => 1000,
        }
    }

    /// The piece type a room column is reserved for, by column index
    fn expected_for_column(col: usize) -> Option<Piece> {
        match col {
            3 => Some(Piece::A),
            5 => Some(Piece::B),
            7 => Some(Piece::C),
            9 => Some(Piece::D),
            _ => None,
        }
    }
}

/// Position on the grid (row 0 is the top wall row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.row + other.row, self.col + other.col)
    }
}

/// What a cell fundamentally is, fixed for the life of the board.
///
/// The occupant lives outside the kind so that a piece on a wall is
/// unrepresentable and a room's expected type can never be mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Outside the walls; never occupiable
    Empty,
    Wall,
    /// Walkway cell; `entrance` marks the cell directly above a room column
    Hall { entrance: bool },
    /// Room cell reserved for exactly one piece type
    Room { expected: Piece },
}

/// A single cell: its fixed kind plus the piece currently standing on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub occupant: Option<Piece>,
}

impl Tile {
    fn vacant(kind: TileKind) -> Tile {
        Tile {
            kind,
            occupant: None,
        }
    }

    pub fn is_occupiable(&self) -> bool {
        matches!(self.kind, TileKind::Hall { .. } | TileKind::Room { .. })
    }

    pub fn is_entrance(&self) -> bool {
        matches!(self.kind, TileKind::Hall { entrance: true })
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// True iff this is a room cell holding the piece type it is reserved for
    pub fn occupant_is_correct(&self) -> bool {
        match self.kind {
            TileKind::Room { expected } => self.occupant == Some(expected),
            _ => false,
        }
    }

    fn to_char(self) -> char {
        if let Some(piece) = self.occupant {
            return piece.to_char();
        }
        match self.kind {
            TileKind::Wall => '#',
            TileKind::Hall { .. } => '.',
            TileKind::Room { .. } | TileKind::Empty => ' ',
        }
    }
}

/// Rejection reasons for a textual board description
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input contains no rows")]
    EmptyInput,
    #[error("illegal character {ch:?} at line {line}, column {column}")]
    IllegalCharacter { line: usize, column: usize, ch: char },
    #[error("piece {ch:?} at line {line}, column {column} is outside a room column")]
    PieceOutsideRoomColumn { line: usize, column: usize, ch: char },
    #[error("line {line} is longer than the board width {width}")]
    RowTooLong { line: usize, width: usize },
}

/// An immutable rectangular grid of tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Parse a line-oriented board description.
    ///
    /// The first row fixes the width. Rows shorter than the width are padded
    /// with `Empty` cells; rows longer than it are rejected, as are illegal
    /// characters and pieces outside the four room columns.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Board, ParseError> {
        let rows: Vec<Vec<char>> = lines.iter().map(|l| l.as_ref().chars().collect()).collect();
        if rows.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let width = rows[0].len();
        let height = rows.len();
        let mut tiles = Vec::with_capacity(width * height);

        for (row, chars) in rows.iter().enumerate() {
            if chars.len() > width {
                return Err(ParseError::RowTooLong {
                    line: row + 1,
                    width,
                });
            }

            for col in 0..width {
                let c = chars.get(col).copied().unwrap_or(' ');
                let tile = match c {
                    '#' => Tile::vacant(TileKind::Wall),
                    '.' => {
                        // A hall cell is an entrance when the cell one row
                        // below is not a wall (it tops a room column).
                        let entrance = rows
                            .get(row + 1)
                            .is_some_and(|r| r.get(col).copied().unwrap_or(' ') != '#');
                        Tile::vacant(TileKind::Hall { entrance })
                    }
                    ' ' => Tile::vacant(TileKind::Empty),
                    _ => match Piece::from_char(c) {
                        Some(piece) => {
                            let expected = Piece::expected_for_column(col).ok_or(
                                ParseError::PieceOutsideRoomColumn {
                                    line: row + 1,
                                    column: col + 1,
                                    ch: c,
                                },
                            )?;
                            Tile {
                                kind: TileKind::Room { expected },
                                occupant: Some(piece),
                            }
                        }
                        None => {
                            return Err(ParseError::IllegalCharacter {
                                line: row + 1,
                                column: col + 1,
                                ch: c,
                            })
                        }
                    },
                };
                tiles.push(tile);
            }
        }

        Ok(Board {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at a position, bounds-checked
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        if pos.row < 0
            || pos.col < 0
            || pos.row as usize >= self.height
            || pos.col as usize >= self.width
        {
            return None;
        }
        self.tiles.get(pos.row as usize * self.width + pos.col as usize)
    }

    /// All cells in row-major scan order
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, tile)| {
            let pos = Position::new((i / self.width) as i32, (i % self.width) as i32);
            (pos, tile)
        })
    }

    /// Produce a new board with the occupant moved from `source` to
    /// `destination`. The copy is blind: callers enforce move legality.
    /// `self` remains valid and unchanged.
    pub fn move_occupant(&self, source: Position, destination: Position) -> Board {
        debug_assert!(self.get(source).is_some_and(Tile::is_occupied));
        debug_assert!(self
            .get(destination)
            .is_some_and(|t| t.is_occupiable() && !t.is_occupied()));

        let mut tiles = self.tiles.clone();
        let src = source.row as usize * self.width + source.col as usize;
        let dst = destination.row as usize * self.width + destination.col as usize;
        tiles[dst].occupant = tiles[src].occupant.take();

        Board {
            width: self.width,
            height: self.height,
            tiles,
        }
    }

    /// The finished board this topology must reach, selected by row count.
    ///
    /// Only the 5-row (2-deep rooms) and 7-row (4-deep rooms) layouts have a
    /// known goal; every other height is an unsupported topology.
    pub fn goal_for_height(rows: usize) -> Option<Board> {
        const GOAL_5: [&str; 5] = [
            "#############",
            "#...........#",
            "###A#B#C#D###",
            "  #A#B#C#D#",
            "  #########",
        ];
        const GOAL_7: [&str; 7] = [
            "#############",
            "#...........#",
            "###A#B#C#D###",
            "  #A#B#C#D#",
            "  #A#B#C#D#",
            "  #A#B#C#D#",
            "  #########",
        ];

        let lines: &[&str] = match rows {
            5 => &GOAL_5,
            7 => &GOAL_7,
            _ => return None,
        };
        Some(Board::parse(lines).expect("hard-coded goal layout parses"))
    }
}

impl fmt::Display for Board {
    /// Canonical serialization: one character per cell, row-major, rows
    /// separated by `\n`. Injective in occupant placement for a fixed
    /// topology, so the rendered text doubles as the search-vertex identity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                let tile = self.tiles[row * self.width + col];
                write!(f, "{}", tile.to_char())?;
            }
        }
        Ok(())
    }
}
