//! Translation of the game state into draw commands.
//!
//! The adapter owns pixels and colors; commands only name cells, paints and
//! label roles. Label offsets are in pixels with `y` growing downwards.

use super::{
    common::Cell,
    flow::{FlowState, GameFlow, RoundEnd},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    SnakeHead,
    SnakeBody,
    Food,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelRole {
    Score,
    Title,
    Subtitle,
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Top left corner of the text, measured from the top left of the board.
    TopLeft { x: f32, y: f32 },
    /// Text centered horizontally, `offset_y` below the board center.
    Center { offset_y: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        cell: Cell,
        paint: Paint,
    },
    Text {
        role: LabelRole,
        text: String,
        anchor: Anchor,
    },
}

pub const RESTART_PROMPT: &str = "Press Enter to Play Again, Esc to Quit";

pub fn frame(flow: &GameFlow) -> Vec<DrawCommand> {
    match flow.state() {
        FlowState::Playing => playing_frame(flow),
        FlowState::RoundEnded { kind, score } => round_ended_frame(kind, score),
        FlowState::Quit => vec![],
    }
}

fn playing_frame(flow: &GameFlow) -> Vec<DrawCommand> {
    let game = flow.game();
    let mut commands = Vec::with_capacity(game.snake().len() + 2);

    if let Some(cell) = game.food() {
        commands.push(DrawCommand::Rect {
            cell,
            paint: Paint::Food,
        });
    }

    for (i, cell) in game.snake().cells().enumerate() {
        let paint = if i == 0 {
            Paint::SnakeHead
        } else {
            Paint::SnakeBody
        };
        commands.push(DrawCommand::Rect { cell: *cell, paint });
    }

    commands.push(DrawCommand::Text {
        role: LabelRole::Score,
        text: format!("Score: {}", flow.score()),
        anchor: Anchor::TopLeft { x: 10., y: 8. },
    });

    commands
}

fn round_ended_frame(kind: RoundEnd, score: u32) -> Vec<DrawCommand> {
    let title = match kind {
        RoundEnd::Win => "You Win!",
        RoundEnd::GameOver => "Game Over!",
    };

    vec![
        DrawCommand::Text {
            role: LabelRole::Title,
            text: title.to_string(),
            anchor: Anchor::Center { offset_y: -40. },
        },
        DrawCommand::Text {
            role: LabelRole::Subtitle,
            text: format!("Score: {}", score),
            anchor: Anchor::Center { offset_y: 10. },
        },
        DrawCommand::Text {
            role: LabelRole::Prompt,
            text: RESTART_PROMPT.to_string(),
            anchor: Anchor::Center { offset_y: 40. },
        },
    ]
}
