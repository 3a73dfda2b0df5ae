use bevy::prelude::Color;
use thiserror::Error;

use crate::snake::Board;

pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;
pub const CELL_SIZE: u32 = 20;
pub const TICKS_PER_SECOND: f32 = 12.;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const FONT_PATH: &str = "fonts/FiraSans-Bold.ttf";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationError {
    #[error("Cell size must be positive")]
    ZeroCellSize,
    #[error("Window {width}x{height} is not a whole number of {cell_size}px cells")]
    NotAligned {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("A {columns}x{rows} board cannot hold a snake of length {length} and its food")]
    BoardTooSmall {
        columns: i32,
        rows: i32,
        length: usize,
    },
    #[error("Tick rate must be a positive number, got {0}")]
    InvalidTickRate(f32),
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            grid: Color::rgb_u8(40, 40, 40),
            snake_head: Color::rgb_u8(0, 200, 0),
            snake_body: Color::rgb_u8(0, 160, 0),
            food: Color::rgb_u8(220, 20, 60),
            text: Color::WHITE,
        }
    }
}

/// Everything fixed at startup. Built once, validated, then shared read-only.
#[derive(Debug, Clone)]
pub struct GameConfiguration {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub ticks_per_second: f32,
    pub initial_length: usize,
    pub palette: Palette,
    pub font_path: &'static str,
    pub font_size: f32,
    pub title_font_size: f32,
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self {
            title: "Snake".to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            cell_size: CELL_SIZE,
            ticks_per_second: TICKS_PER_SECOND,
            initial_length: INITIAL_SNAKE_LENGTH,
            palette: Palette::default(),
            font_path: FONT_PATH,
            font_size: 28.,
            title_font_size: 56.,
        }
    }
}

impl GameConfiguration {
    pub fn board(&self) -> Board {
        let cell_size = self.cell_size.max(1);
        Board::new(
            (self.width / cell_size) as i32,
            (self.height / cell_size) as i32,
        )
    }

    pub fn tick_seconds(&self) -> f32 {
        1. / self.ticks_per_second
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.cell_size == 0 {
            return Err(ConfigurationError::ZeroCellSize);
        }

        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return Err(ConfigurationError::NotAligned {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }

        let board = self.board();
        // the initial snake trails left from the center and needs room for food
        let fits = self.initial_length > 0
            && board.rows > 0
            && (board.columns / 2) as usize + 1 >= self.initial_length
            && board.cell_count() > self.initial_length;
        if !fits {
            return Err(ConfigurationError::BoardTooSmall {
                columns: board.columns,
                rows: board.rows,
                length: self.initial_length,
            });
        }

        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.) {
            return Err(ConfigurationError::InvalidTickRate(self.ticks_per_second));
        }

        Ok(())
    }
}
