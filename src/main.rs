use bevy::prelude::*;

use grid_snake::{
    configuration::{ConfigurationError, GameConfiguration},
    MainPlugin,
};

fn main() -> Result<(), ConfigurationError> {
    let configuration = GameConfiguration::default();
    configuration.validate()?;

    App::new()
        .insert_resource(WindowDescriptor {
            title: configuration.title.clone(),
            width: configuration.width as f32,
            height: configuration.height as f32,
            resizable: false,
            ..default()
        })
        .add_plugins(DefaultPlugins)
        .add_plugin(MainPlugin { configuration })
        .run();

    Ok(())
}
