use tracing::{debug, info};

use super::{
    common::{Board, Direction},
    food::FoodRng,
    game::{SnakeGame, TickOutcome},
};

/// Discrete input understood by the game. Anything else is dropped by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Confirm,
    Cancel,
    Direction(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    GameOver,
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Playing,
    RoundEnded { kind: RoundEnd, score: u32 },
    Quit,
}

/// What the loop should do after an input or a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Quit,
    Continue,
    Terminal { kind: RoundEnd, score: u32 },
}

/// Owns the running round and moves between playing, end of round and quit.
#[derive(Debug, Clone)]
pub struct GameFlow {
    initial_length: usize,
    state: FlowState,
    game: SnakeGame,
    score: u32,
    requested: Option<Direction>,
}

impl GameFlow {
    pub fn new(board: Board, initial_length: usize, rng: FoodRng) -> Self {
        Self::from_game(SnakeGame::new(board, initial_length, rng), initial_length)
    }

    /// Starts playing on an already prepared game. Restarts use `initial_length`.
    pub fn from_game(game: SnakeGame, initial_length: usize) -> Self {
        Self {
            initial_length,
            state: FlowState::Playing,
            game,
            score: 0,
            requested: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn requested_heading(&self) -> Option<Direction> {
        self.requested
    }

    pub fn result(&self) -> GameResult {
        match self.state {
            FlowState::Playing => GameResult::Continue,
            FlowState::RoundEnded { kind, score } => GameResult::Terminal { kind, score },
            FlowState::Quit => GameResult::Quit,
        }
    }

    /// Applies one input event. Quit and Cancel end the game from any state.
    pub fn handle_input(&mut self, event: InputEvent) -> GameResult {
        if self.state == FlowState::Quit {
            return GameResult::Quit;
        }

        match (event, self.state) {
            (InputEvent::Quit | InputEvent::Cancel, _) => {
                info!("quit requested");
                self.state = FlowState::Quit;
            }
            (InputEvent::Direction(direction), FlowState::Playing) => {
                // last request that does not reverse the snake wins
                if self.game.heading().allows(&direction) {
                    self.requested = Some(direction);
                } else {
                    debug!("dropping reversal request {:?}", direction);
                }
            }
            (InputEvent::Confirm, FlowState::RoundEnded { .. }) => self.restart(),
            _ => {}
        }

        self.result()
    }

    /// Evaluates one tick. Does nothing outside of `Playing`.
    pub fn tick(&mut self) -> GameResult {
        if self.state != FlowState::Playing {
            return self.result();
        }

        if let Some(direction) = self.requested.take() {
            self.game.steer(direction);
        }

        match self.game.advance() {
            TickOutcome::Moved => {}
            TickOutcome::Grew => {
                self.score += 1;
                info!("score: {}", self.score);
            }
            TickOutcome::Filled => {
                self.score += 1;
                info!("board filled with score {}", self.score);
                self.end_round(RoundEnd::Win);
            }
            TickOutcome::Crashed(collision) => {
                info!("{}", collision);
                self.end_round(RoundEnd::GameOver);
            }
        }

        self.result()
    }

    fn end_round(&mut self, kind: RoundEnd) {
        self.state = FlowState::RoundEnded {
            kind,
            score: self.score,
        };
    }

    fn restart(&mut self) {
        let board = *self.game.board();
        let rng = self.game.food_rng().clone();

        self.game = SnakeGame::new(board, self.initial_length, rng);
        self.score = 0;
        self.requested = None;
        self.state = FlowState::Playing;
    }
}

#[cfg(test)]
mod tests {
    use crate::snake::{
        common::{Board, Cell, Direction},
        food::FoodRng,
        game::SnakeGame,
    };

    use super::{FlowState, GameFlow, GameResult, InputEvent, RoundEnd};

    fn flow(layout: &str) -> GameFlow {
        let game = layout
            .parse::<SnakeGame>()
            .unwrap()
            .with_rng(FoodRng::seeded(3));
        GameFlow::from_game(game, 3)
    }

    fn head(flow: &GameFlow) -> Cell {
        flow.game().snake().head()
    }

    #[test]
    fn test_starts_playing_with_fresh_round() {
        let flow = GameFlow::new(Board::new(32, 24), 3, FoodRng::seeded(1));

        assert_eq!(flow.state(), FlowState::Playing);
        assert_eq!(flow.score(), 0);
        assert_eq!(flow.game().snake().len(), 3);
        assert_eq!(flow.game().heading(), Direction::Right);
        assert!(flow.game().food().is_some());
    }

    #[test]
    fn test_eating_increments_score() {
        let mut flow = flow(
            r#"
32,24
right
6,5
5,5;4,5;3,5"#,
        );

        assert_eq!(flow.tick(), GameResult::Continue);
        assert_eq!(flow.score(), 1);
        assert_eq!(flow.game().snake().len(), 4);
    }

    #[test]
    fn test_wall_ends_the_round() {
        let mut flow = flow(
            r#"
32,24
left
20,20
0,5;1,5;2,5"#,
        );

        assert_eq!(
            flow.tick(),
            GameResult::Terminal {
                kind: RoundEnd::GameOver,
                score: 0
            }
        );
        assert_eq!(
            flow.state(),
            FlowState::RoundEnded {
                kind: RoundEnd::GameOver,
                score: 0
            }
        );

        // ticks after the end are ignored
        assert!(matches!(flow.tick(), GameResult::Terminal { .. }));
        assert_eq!(head(&flow), Cell::new(0, 5));
    }

    #[test]
    fn test_reverse_request_keeps_heading() {
        let mut flow = flow(
            r#"
32,24
right
-
5,5;4,5;3,5"#,
        );

        flow.handle_input(InputEvent::Direction(Direction::Left));
        assert_eq!(flow.requested_heading(), None);

        assert_eq!(flow.tick(), GameResult::Continue);
        assert_eq!(flow.game().heading(), Direction::Right);
        assert_eq!(head(&flow), Cell::new(6, 5));
    }

    #[test]
    fn test_last_valid_request_wins() {
        let mut flow = flow(
            r#"
32,24
right
-
5,5;4,5;3,5"#,
        );

        flow.handle_input(InputEvent::Direction(Direction::Up));
        flow.handle_input(InputEvent::Direction(Direction::Down));
        // a reversal does not overwrite the pending valid request
        flow.handle_input(InputEvent::Direction(Direction::Left));
        assert_eq!(flow.requested_heading(), Some(Direction::Down));

        flow.tick();
        assert_eq!(flow.game().heading(), Direction::Down);
        assert_eq!(head(&flow), Cell::new(5, 6));
        assert_eq!(flow.requested_heading(), None);

        // without new input the heading persists
        flow.tick();
        assert_eq!(head(&flow), Cell::new(5, 7));
    }

    #[test]
    fn test_filling_the_board_wins() {
        let mut flow = flow(
            r#"
2,2
down
0,1
0,0;1,0;1,1"#,
        );

        assert_eq!(
            flow.tick(),
            GameResult::Terminal {
                kind: RoundEnd::Win,
                score: 1
            }
        );
    }

    #[test]
    fn test_confirm_restarts_after_round_end() {
        let mut flow = flow(
            r#"
32,24
right
6,5
5,5;4,5;3,5"#,
        );
        flow.tick();
        flow.handle_input(InputEvent::Direction(Direction::Up));
        for _ in 0..10 {
            flow.tick();
        }
        assert!(matches!(
            flow.state(),
            FlowState::RoundEnded {
                kind: RoundEnd::GameOver,
                ..
            }
        ));

        // direction input is ignored once the round is over
        flow.handle_input(InputEvent::Direction(Direction::Left));
        assert_eq!(flow.requested_heading(), None);

        assert_eq!(flow.handle_input(InputEvent::Confirm), GameResult::Continue);
        assert_eq!(flow.state(), FlowState::Playing);
        assert_eq!(flow.score(), 0);
        assert_eq!(flow.game().snake().len(), 3);
        assert_eq!(head(&flow), Cell::new(16, 12));
        assert_eq!(flow.game().heading(), Direction::Right);
    }

    #[test]
    fn test_confirm_while_playing_is_a_no_op() {
        let mut flow = flow(
            r#"
32,24
right
-
5,5;4,5;3,5"#,
        );

        assert_eq!(flow.handle_input(InputEvent::Confirm), GameResult::Continue);
        assert_eq!(head(&flow), Cell::new(5, 5));
    }

    #[test]
    fn test_quit_and_cancel_are_absorbing() {
        let mut flow = GameFlow::new(Board::new(32, 24), 3, FoodRng::seeded(1));
        assert_eq!(flow.handle_input(InputEvent::Cancel), GameResult::Quit);
        assert_eq!(flow.handle_input(InputEvent::Confirm), GameResult::Quit);
        assert_eq!(flow.tick(), GameResult::Quit);
        assert_eq!(flow.state(), FlowState::Quit);

        let mut flow = GameFlow::new(Board::new(32, 24), 3, FoodRng::seeded(1));
        let before = head(&flow);
        assert_eq!(flow.handle_input(InputEvent::Quit), GameResult::Quit);
        assert_eq!(flow.tick(), GameResult::Quit);
        assert_eq!(head(&flow), before);
    }

    #[test]
    fn test_cancel_quits_from_round_end() {
        let mut flow = flow(
            r#"
32,24
left
-
0,5;1,5;2,5"#,
        );
        flow.tick();
        assert!(matches!(flow.result(), GameResult::Terminal { .. }));

        assert_eq!(flow.handle_input(InputEvent::Cancel), GameResult::Quit);
    }
}
