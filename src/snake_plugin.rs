use bevy::{
    app::AppExit,
    input::{keyboard::KeyboardInput, ButtonState},
    prelude::*,
};

use crate::{
    configuration::GameConfiguration,
    snake::{Cell, Direction, FlowState, FoodRng, GameFlow, GameResult, InputEvent, Paint},
};

use self::{
    components::*,
    events::{GameTick, RoundEndedEvent},
    resources::{DrawConfigurationResource, Frame, GameTimerResource},
};

// Grid lines sit under everything, the snake never overlaps the food
const GRID_Z: f32 = 0.;
const FOOD_Z: f32 = 1.;
const SNAKE_Z: f32 = 2.;
pub const LABEL_Z: f32 = 10.;

const GRID_LINE_WIDTH: f32 = 1.;

pub struct SnakePlugin {
    pub configuration: GameConfiguration,
}

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        let configuration = self.configuration.clone();

        let flow = GameFlow::new(
            configuration.board(),
            configuration.initial_length,
            FoodRng::from_entropy(),
        );
        let frame = Frame(crate::snake::frame(&flow));

        let cell_size = configuration.cell_size as f32;
        let size = (configuration.width as f32, configuration.height as f32);

        app.insert_resource(DrawConfigurationResource {
            cell_size,
            half_cell: cell_size / 2.,
            origin: (-size.0 / 2., size.1 / 2.),
            size,
        })
        .insert_resource(GameTimerResource(Timer::from_seconds(
            configuration.tick_seconds(),
            true,
        )))
        .insert_resource(flow)
        .insert_resource(frame)
        .insert_resource(configuration)
        .add_event::<GameTick>()
        .add_event::<RoundEndedEvent>()
        .add_startup_system(draw_field)
        .add_startup_system(draw_cells)
        .add_system(game_tick)
        .add_system(read_input.label("input"))
        .add_system(play.label("play").after("input"))
        .add_system(update_frame.label("frame").after("play"))
        .add_system(update_cells.after("frame"));
    }
}

fn game_tick(
    time: Res<Time>,
    mut game_timers: ResMut<GameTimerResource>,
    mut tick_event_writer: EventWriter<GameTick>,
) {
    let game_timers = &mut game_timers.0;
    if !game_timers.tick(time.delta()).just_finished() {
        return;
    }

    debug!("tick!");

    tick_event_writer.send(GameTick);
}

fn read_input(
    mut keyboard_input_events: EventReader<KeyboardInput>,
    mut flow: ResMut<GameFlow>,
    mut app_exit_writer: EventWriter<AppExit>,
) {
    let events: Vec<InputEvent> = keyboard_input_events
        .iter()
        .filter(|ki| ki.state == ButtonState::Pressed)
        .filter_map(|ki| ki.key_code)
        .filter_map(input_event)
        .collect();

    for event in events {
        if flow.handle_input(event) == GameResult::Quit {
            info!("bye!");
            app_exit_writer.send(AppExit);
            return;
        }
    }
}

fn input_event(key_code: KeyCode) -> Option<InputEvent> {
    let event = match key_code {
        KeyCode::Up | KeyCode::W => InputEvent::Direction(Direction::Up),
        KeyCode::Down | KeyCode::S => InputEvent::Direction(Direction::Down),
        KeyCode::Left | KeyCode::A => InputEvent::Direction(Direction::Left),
        KeyCode::Right | KeyCode::D => InputEvent::Direction(Direction::Right),
        KeyCode::Return | KeyCode::NumpadEnter => InputEvent::Confirm,
        KeyCode::Escape => InputEvent::Cancel,
        _ => return None,
    };
    Some(event)
}

fn play(
    mut tick_event: EventReader<GameTick>,
    mut flow: ResMut<GameFlow>,
    mut round_ended_event_writer: EventWriter<RoundEndedEvent>,
) {
    let ticks = tick_event.iter().count();

    for _ in 0..ticks {
        // read through Deref first so idle ticks don't mark the flow as changed
        if flow.state() != FlowState::Playing {
            break;
        }

        if let GameResult::Terminal { kind, score } = flow.tick() {
            round_ended_event_writer.send(RoundEndedEvent { kind, score });
        }
    }
}

fn update_frame(flow: Res<GameFlow>, mut frame: ResMut<Frame>) {
    if !flow.is_changed() {
        return;
    }

    frame.0 = crate::snake::frame(&flow);
}

fn update_cells(
    mut commands: Commands,
    configuration: Res<GameConfiguration>,
    draw_configuration: Res<DrawConfigurationResource>,
    frame: Res<Frame>,
    mut cell_query: Query<(Entity, &mut Transform, &mut Sprite), With<CellComponent>>,
) {
    if !frame.is_changed() {
        return;
    }

    let mut sprites = cell_query.iter_mut();
    for (cell, paint) in frame.rects() {
        match sprites.next() {
            Some((_, mut transform, mut sprite)) => {
                move_to(&mut transform, &cell, &draw_configuration);
                transform.translation.z = z_of(paint);
                sprite.color = color_of(paint, &configuration);
            }
            None => {
                spawn_cell(
                    &mut commands,
                    &cell,
                    paint,
                    &configuration,
                    &draw_configuration,
                );
            }
        }
    }

    // Leftovers belong to a longer snake from a previous round
    sprites.for_each(|(entity, _, _)| {
        commands.entity(entity).despawn();
    });
}

fn draw_cells(
    mut commands: Commands,
    configuration: Res<GameConfiguration>,
    draw_configuration: Res<DrawConfigurationResource>,
    frame: Res<Frame>,
) {
    for (cell, paint) in frame.rects() {
        spawn_cell(
            &mut commands,
            &cell,
            paint,
            &configuration,
            &draw_configuration,
        );
    }
}

fn draw_field(
    mut commands: Commands,
    configuration: Res<GameConfiguration>,
    draw_configuration: Res<DrawConfigurationResource>,
) {
    let board = configuration.board();
    let (width, height) = draw_configuration.size;
    let (left, top) = draw_configuration.origin;
    let color = configuration.palette.grid;

    for column in 0..board.columns {
        let x = left + column as f32 * draw_configuration.cell_size;
        spawn_line(
            &mut commands,
            color,
            Vec2::new(GRID_LINE_WIDTH, height),
            Vec2::new(x, top - height / 2.),
        );
    }

    for row in 0..board.rows {
        let y = top - row as f32 * draw_configuration.cell_size;
        spawn_line(
            &mut commands,
            color,
            Vec2::new(width, GRID_LINE_WIDTH),
            Vec2::new(left + width / 2., y),
        );
    }
}

fn spawn_line(commands: &mut Commands, color: Color, size: Vec2, center: Vec2) {
    commands
        .spawn_bundle(SpriteBundle {
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(center.extend(GRID_Z)),
            ..default()
        })
        .insert(GridLineComponent);
}

fn spawn_cell(
    commands: &mut Commands,
    cell: &Cell,
    paint: Paint,
    configuration: &GameConfiguration,
    draw_configuration: &DrawConfigurationResource,
) {
    let cell_size = draw_configuration.cell_size;
    let mut sprite = SpriteBundle {
        sprite: Sprite {
            color: color_of(paint, configuration),
            custom_size: Some(Vec2::new(cell_size, cell_size)),
            ..default()
        },
        ..default()
    };
    move_to(&mut sprite.transform, cell, draw_configuration);
    sprite.transform.translation.z = z_of(paint);

    commands.spawn_bundle(sprite).insert(CellComponent);
}

fn move_to(transform: &mut Transform, to: &Cell, draw_configuration: &DrawConfigurationResource) {
    transform.translation.x = to.column as f32 * draw_configuration.cell_size
        + draw_configuration.origin.0
        + draw_configuration.half_cell;
    transform.translation.y = draw_configuration.origin.1
        - to.row as f32 * draw_configuration.cell_size
        - draw_configuration.half_cell;
}

fn z_of(paint: Paint) -> f32 {
    match paint {
        Paint::Food => FOOD_Z,
        Paint::SnakeHead | Paint::SnakeBody => SNAKE_Z,
    }
}

fn color_of(paint: Paint, configuration: &GameConfiguration) -> Color {
    let palette = &configuration.palette;
    match paint {
        Paint::SnakeHead => palette.snake_head,
        Paint::SnakeBody => palette.snake_body,
        Paint::Food => palette.food,
    }
}

pub mod resources {
    use bevy::{math::Vec2, time::Timer};

    use crate::snake::{Anchor, Cell, DrawCommand, LabelRole, Paint};

    #[derive(Clone)]
    pub struct DrawConfigurationResource {
        pub half_cell: f32,
        pub cell_size: f32,
        /// World position of the board's top left corner.
        pub origin: (f32, f32),
        pub size: (f32, f32),
    }

    impl DrawConfigurationResource {
        pub fn label_position(&self, anchor: &Anchor) -> Vec2 {
            match *anchor {
                Anchor::TopLeft { x, y } => Vec2::new(self.origin.0 + x, self.origin.1 - y),
                Anchor::Center { offset_y } => Vec2::new(
                    self.origin.0 + self.size.0 / 2.,
                    self.origin.1 - self.size.1 / 2. - offset_y,
                ),
            }
        }
    }

    pub struct GameTimerResource(pub Timer);

    /// Draw commands for the current state, rebuilt when the flow changes.
    pub struct Frame(pub Vec<DrawCommand>);

    impl Frame {
        pub fn rects(&self) -> impl Iterator<Item = (Cell, Paint)> + '_ {
            self.0.iter().filter_map(|command| match command {
                DrawCommand::Rect { cell, paint } => Some((*cell, *paint)),
                DrawCommand::Text { .. } => None,
            })
        }

        pub fn labels(&self) -> impl Iterator<Item = (LabelRole, &str, &Anchor)> + '_ {
            self.0.iter().filter_map(|command| match command {
                DrawCommand::Text { role, text, anchor } => Some((*role, text.as_str(), anchor)),
                DrawCommand::Rect { .. } => None,
            })
        }
    }
}

pub mod events {
    use crate::snake::RoundEnd;

    pub struct GameTick;

    pub struct RoundEndedEvent {
        pub kind: RoundEnd,
        pub score: u32,
    }
}

pub(crate) mod components {
    use bevy::prelude::Component;

    #[derive(Component)]
    pub struct CellComponent;

    #[derive(Component)]
    pub struct GridLineComponent;
}

#[cfg(test)]
mod tests {
    use bevy::input::keyboard::KeyCode;

    use super::{input_event, resources::DrawConfigurationResource};
    use crate::snake::{Anchor, Direction, InputEvent};

    #[test]
    fn test_key_mapping() {
        assert_eq!(input_event(KeyCode::W), Some(InputEvent::Direction(Direction::Up)));
        assert_eq!(input_event(KeyCode::Left), Some(InputEvent::Direction(Direction::Left)));
        assert_eq!(input_event(KeyCode::Return), Some(InputEvent::Confirm));
        assert_eq!(input_event(KeyCode::Escape), Some(InputEvent::Cancel));
        assert_eq!(input_event(KeyCode::Space), None);
    }

    #[test]
    fn test_label_positions() {
        let draw_configuration = DrawConfigurationResource {
            half_cell: 10.,
            cell_size: 20.,
            origin: (-320., 240.),
            size: (640., 480.),
        };

        let top_left = draw_configuration.label_position(&Anchor::TopLeft { x: 10., y: 8. });
        assert_eq!((top_left.x, top_left.y), (-310., 232.));

        let title = draw_configuration.label_position(&Anchor::Center { offset_y: -40. });
        assert_eq!((title.x, title.y), (0., 40.));
    }
}
