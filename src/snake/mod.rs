pub mod common;
pub mod flow;
pub mod food;
pub mod frame;
pub mod game;

pub use common::{Board, Cell, Direction};
pub use flow::{FlowState, GameFlow, GameResult, InputEvent, RoundEnd};
pub use food::{spawn_food, FoodRng};
pub use frame::{frame, Anchor, DrawCommand, LabelRole, Paint};
pub use game::{Collision, LayoutError, Snake, SnakeGame, TickOutcome};
