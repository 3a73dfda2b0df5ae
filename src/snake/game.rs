use std::{
    collections::{HashSet, VecDeque},
    str::FromStr,
};

use super::{
    common::{Board, Cell, Direction},
    food::{spawn_food, FoodRng},
};
use thiserror::Error;
use tracing::{debug, info};

/// Why a round ended badly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    #[error("Snake hit the wall at {0}")]
    Wall(Cell),
    #[error("Snake is eating itself at {0}")]
    Body(Cell),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout is missing the {0} line")]
    MissingLine(&'static str),
    #[error("Invalid cell {0:?}, expected `column,row`")]
    InvalidCell(String),
    #[error("Invalid board size {0:?}, expected `columns,rows`")]
    InvalidBoard(String),
    #[error("Invalid heading {0:?}")]
    InvalidHeading(String),
    #[error("Snake must have at least one cell")]
    EmptySnake,
    #[error("Snake covers {0} more than once")]
    DuplicateCell(Cell),
    #[error("{0} is outside the board")]
    OutOfBoard(Cell),
    #[error("Food at {0} is on the snake")]
    FoodOnSnake(Cell),
}

/// Snake body, head first, with an index of the occupied cells.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
}

impl Snake {
    pub fn new(cells: Vec<Cell>) -> Result<Self, LayoutError> {
        if cells.is_empty() {
            return Err(LayoutError::EmptySnake);
        }

        let mut occupied = HashSet::with_capacity(cells.len());
        for cell in &cells {
            if !occupied.insert(*cell) {
                return Err(LayoutError::DuplicateCell(*cell));
            }
        }

        Ok(Self {
            body: cells.into(),
            occupied,
        })
    }

    /// A straight snake with its head on the board center, trailing to the left.
    pub fn initial(board: &Board, length: usize) -> Self {
        let head = board.center();
        let body: VecDeque<Cell> = (0..length.max(1) as i32)
            .map(|i| Cell::new(head.column - i, head.row))
            .collect();
        let occupied = body.iter().copied().collect();

        Self { body, occupied }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn occupies(&self, cell: &Cell) -> bool {
        self.occupied.contains(cell)
    }

    /// Whether moving the head onto `cell` bites the body.
    ///
    /// The tail only counts when the snake grows this tick, otherwise it
    /// vacates its cell before the head arrives.
    pub fn collides(&self, cell: &Cell, grows: bool) -> bool {
        self.occupies(cell) && (grows || *cell != self.tail())
    }

    fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
        self.occupied.insert(cell);
    }

    fn pop_tail(&mut self) {
        if let Some(tail) = self.body.pop_back() {
            // the new head may sit on the old tail cell
            if tail != self.head() {
                self.occupied.remove(&tail);
            }
        }
    }
}

/// Result of one engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Grew,
    /// The snake ate and now covers every cell.
    Filled,
    Crashed(Collision),
}

#[derive(Debug, Clone)]
pub struct SnakeGame {
    board: Board,
    snake: Snake,
    heading: Direction,
    food: Option<Cell>,
    rng: FoodRng,
}

impl SnakeGame {
    pub fn new(board: Board, initial_length: usize, mut rng: FoodRng) -> Self {
        let snake = Snake::initial(&board, initial_length);
        let food = spawn_food(&snake, &board, &mut rng);

        info!("new round on a {}x{} board", board.columns, board.rows);

        Self {
            board,
            snake,
            heading: Direction::Right,
            food,
            rng,
        }
    }

    pub fn with_rng(mut self, rng: FoodRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn food_rng(&self) -> &FoodRng {
        &self.rng
    }

    /// Replaces the heading unless `direction` reverses it. Returns whether it was applied.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.heading.allows(&direction) {
            debug!("ignoring reversal from {:?} to {:?}", self.heading, direction);
            return false;
        }

        self.heading = direction;
        true
    }

    /// Moves the snake one cell along the current heading.
    ///
    /// On a crash the snake is left exactly as it was before the call.
    pub fn advance(&mut self) -> TickOutcome {
        let new_head = self.snake.head().neighbor(self.heading);

        debug!("advance {:?} to {}", self.heading, new_head);

        if !self.board.contains(&new_head) {
            return TickOutcome::Crashed(Collision::Wall(new_head));
        }

        let grows = self.food == Some(new_head);

        if self.snake.collides(&new_head, grows) {
            return TickOutcome::Crashed(Collision::Body(new_head));
        }

        self.snake.push_head(new_head);

        if !grows {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.food = spawn_food(&self.snake, &self.board, &mut self.rng);
        match self.food {
            None => TickOutcome::Filled,
            Some(_) => TickOutcome::Grew,
        }
    }
}

fn parse_cell(s: &str) -> Result<Cell, LayoutError> {
    let (column, row) = s
        .trim()
        .split_once(',')
        .ok_or_else(|| LayoutError::InvalidCell(s.to_string()))?;
    match (column.trim().parse(), row.trim().parse()) {
        (Ok(column), Ok(row)) => Ok(Cell::new(column, row)),
        _ => Err(LayoutError::InvalidCell(s.to_string())),
    }
}

/// Text layout, one item per non-empty line:
///
/// ```text
/// 32,24          board columns,rows
/// right          heading
/// 6,5            food, or `-` for none
/// 5,5;4,5;3,5    snake cells, head first
/// ```
impl FromStr for SnakeGame {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());

        let dimension = lines.next().ok_or(LayoutError::MissingLine("board"))?;
        let board = parse_cell(dimension)
            .map(|c| Board::new(c.column, c.row))
            .map_err(|_| LayoutError::InvalidBoard(dimension.to_string()))?;
        if board.columns <= 0 || board.rows <= 0 {
            return Err(LayoutError::InvalidBoard(dimension.to_string()));
        }

        let heading = lines.next().ok_or(LayoutError::MissingLine("heading"))?;
        let heading: Direction = heading.parse().map_err(LayoutError::InvalidHeading)?;

        let food = match lines.next().ok_or(LayoutError::MissingLine("food"))? {
            "-" => None,
            food => Some(parse_cell(food)?),
        };

        let snake = lines.next().ok_or(LayoutError::MissingLine("snake"))?;
        let snake = Snake::new(
            snake
                .split(';')
                .map(parse_cell)
                .collect::<Result<Vec<_>, _>>()?,
        )?;

        if let Some(cell) = snake.cells().find(|cell| !board.contains(cell)) {
            return Err(LayoutError::OutOfBoard(*cell));
        }
        if let Some(food) = food {
            if !board.contains(&food) {
                return Err(LayoutError::OutOfBoard(food));
            }
            if snake.occupies(&food) {
                return Err(LayoutError::FoodOnSnake(food));
            }
        }

        Ok(Self {
            board,
            snake,
            heading,
            food,
            rng: FoodRng::from_entropy(),
        })
    }
}
