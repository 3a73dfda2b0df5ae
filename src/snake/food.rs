use tracing::debug;

use super::{
    common::{Board, Cell},
    game::Snake,
};

/// Seedable source for food placement.
///
/// Only the seed state is stored, so the type stays `Send + Sync` and can live
/// inside a bevy resource.
#[derive(Debug, Clone)]
pub struct FoodRng {
    state: u64,
}

impl FoodRng {
    pub fn from_entropy() -> Self {
        Self::seeded(fastrand::u64(..))
    }

    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform index in `0..upper`. `upper` must be positive.
    pub fn pick(&mut self, upper: usize) -> usize {
        let rng = fastrand::Rng::with_seed(self.state);
        let index = rng.usize(0..upper);
        self.state = rng.u64(..);
        index
    }
}

/// Chooses a free cell uniformly at random, or `None` when the snake covers the board.
pub fn spawn_food(snake: &Snake, board: &Board, rng: &mut FoodRng) -> Option<Cell> {
    let free_cells: Vec<Cell> = board.cells().filter(|cell| !snake.occupies(cell)).collect();

    if free_cells.is_empty() {
        debug!("no free cell left for food");
        return None;
    }

    let position = free_cells[rng.pick(free_cells.len())];
    debug!("food placed at {}", position);

    Some(position)
}
