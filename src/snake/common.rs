use std::{fmt, str::FromStr};

/// A grid cell, addressed by column and row. Row 0 is the top of the board.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    pub fn neighbor(&self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self::new(self.column + dc, self.row + dr)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Right,
    Down,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `false` when `direction` would turn the snake straight back into itself.
    pub fn allows(&self, direction: &Self) -> bool {
        !matches!(
            (self, direction),
            (Direction::Up, Direction::Down)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Down, Direction::Up)
        )
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(other.to_string()),
        }
    }
}

/// The playing field. Valid cells are `[0, columns) x [0, rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub columns: i32,
    pub rows: i32,
}

impl Board {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        (0..self.columns).contains(&cell.column) && (0..self.rows).contains(&cell.row)
    }

    pub fn cell_count(&self) -> usize {
        (self.columns.max(0) * self.rows.max(0)) as usize
    }

    /// Every cell of the board, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.columns).flat_map(move |column| (0..self.rows).map(move |row| Cell::new(column, row)))
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.columns / 2, self.rows / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, Cell, Direction};

    #[test]
    fn test_opposite_directions_are_not_allowed() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!direction.allows(&direction.opposite()));
            assert!(direction.allows(&direction));
        }
        assert!(Direction::Up.allows(&Direction::Left));
        assert!(Direction::Right.allows(&Direction::Down));
    }

    #[test]
    fn test_neighbor_moves_one_cell() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.neighbor(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.neighbor(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.neighbor(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.neighbor(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn test_board_bounds() {
        let board = Board::new(32, 24);
        assert!(board.contains(&Cell::new(0, 0)));
        assert!(board.contains(&Cell::new(31, 23)));
        assert!(!board.contains(&Cell::new(-1, 0)));
        assert!(!board.contains(&Cell::new(32, 0)));
        assert!(!board.contains(&Cell::new(0, 24)));
        assert_eq!(board.cells().count(), board.cell_count());
        assert_eq!(board.center(), Cell::new(16, 12));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("Right".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(" up ".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("north".parse::<Direction>(), Err("north".to_string()));
    }
}
