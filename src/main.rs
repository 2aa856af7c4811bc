use bevy::{log::{Level, LogPlugin}, prelude::*};
use arena_moba::{game::{ARENA_HEIGHT, ARENA_WIDTH}, ArenaMobaPlugins};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arena MOBA".into(),
                resolution: (ARENA_WIDTH, ARENA_HEIGHT).into(),
                resizable: false,
                ..default()
            }),
            close_when_requested: false,
            ..default()
        }).set(LogPlugin {
            level: Level::INFO,
            filter: "wgpu=error,naga=warn,arena_moba=debug".into(),
            ..default()
        }))
        .insert_resource(ClearColor(Color::rgb(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0)))
        .add_plugins(ArenaMobaPlugins)
        .add_systems(Startup, setup_global_camera)
        .run();
}

fn setup_global_camera(mut commands: Commands) {
    let mut camera_bundle = Camera2dBundle::default();
    camera_bundle.transform.translation.z = 999.0;
    commands.spawn(camera_bundle);
}
