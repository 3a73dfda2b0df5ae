use bevy::prelude::*;
use components::LabelComponent;
use configuration::GameConfiguration;
use resources::LabelFont;
use snake::LabelRole;
use snake_plugin::{
    events::RoundEndedEvent,
    resources::{DrawConfigurationResource, Frame},
    SnakePlugin, LABEL_Z,
};

pub mod configuration;
pub mod snake;
mod snake_plugin;

pub struct MainPlugin {
    pub configuration: GameConfiguration,
}

impl Plugin for MainPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(self.configuration.palette.background))
            .add_startup_system(setup)
            .add_system(draw_labels.after("frame"))
            .add_system(announce_round_end)
            .add_plugin(SnakePlugin {
                configuration: self.configuration.clone(),
            });
    }
}

fn announce_round_end(mut round_ended_event_reader: EventReader<RoundEndedEvent>) {
    for event in round_ended_event_reader.iter() {
        warn!("Round over: {:?} with score {}", event.kind, event.score);
    }
}

fn draw_labels(
    mut commands: Commands,
    font: Res<LabelFont>,
    configuration: Res<GameConfiguration>,
    draw_configuration: Res<DrawConfigurationResource>,
    frame: Res<Frame>,
    label_query: Query<Entity, With<LabelComponent>>,
) {
    if !frame.is_changed() {
        return;
    }

    for entity in label_query.iter() {
        commands.entity(entity).despawn();
    }

    for (role, text, anchor) in frame.labels() {
        let font_size = match role {
            LabelRole::Title => configuration.title_font_size,
            LabelRole::Score | LabelRole::Subtitle | LabelRole::Prompt => configuration.font_size,
        };
        let alignment = match role {
            LabelRole::Score => TextAlignment::TOP_LEFT,
            LabelRole::Title | LabelRole::Subtitle | LabelRole::Prompt => TextAlignment::CENTER,
        };

        let text_style = TextStyle {
            font: font.0.clone(),
            font_size,
            color: configuration.palette.text,
        };
        let position = draw_configuration.label_position(anchor);

        commands
            .spawn_bundle(Text2dBundle {
                text: Text::from_section(text, text_style).with_alignment(alignment),
                transform: Transform::from_translation(position.extend(LABEL_Z)),
                ..default()
            })
            .insert(LabelComponent);
    }
}

fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    configuration: Res<GameConfiguration>,
) {
    commands.spawn_bundle(Camera2dBundle::default());

    let font = asset_server.load(configuration.font_path);
    commands.insert_resource(LabelFont(font));
}

mod components {
    use bevy::prelude::Component;

    #[derive(Component)]
    pub struct LabelComponent;
}

mod resources {
    use bevy::{asset::Handle, text::Font};

    pub struct LabelFont(pub Handle<Font>);
}
