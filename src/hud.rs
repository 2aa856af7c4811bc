// src/hud.rs
use bevy::prelude::*;
use crate::{
    abilities::{AbilityKey, Cooldowns},
    clock::SimClock,
    game::{AppState, ColorSelection, COLOR_OPTIONS},
};

const UI_TEXT_COLOR: Color = Color::rgb(0.9, 0.9, 0.9);
const SWATCH_SIZE: f32 = 60.0;
const SWATCH_BORDER: f32 = 4.0;
const SWATCH_SELECTED_BORDER_COLOR: Color = Color::WHITE;
const SWATCH_IDLE_BORDER_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
const ABILITY_SLOT_SIZE: f32 = 50.0;
const COOLDOWN_OVERLAY_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.6);

#[derive(Component)] struct ColorSelectUI;
#[derive(Component)] struct ColorSwatch(usize);
#[derive(Component)] struct AbilityBarUI;
#[derive(Component)] struct CooldownOverlay(AbilityKey);
#[derive(Component)] struct CooldownText(AbilityKey);
#[derive(Component)] struct GameOverUI;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::ColorSelect), setup_color_select_ui)
            .add_systems(Update, highlight_selected_swatch.run_if(in_state(AppState::ColorSelect)))
            .add_systems(OnExit(AppState::ColorSelect), despawn_ui_by_marker::<ColorSelectUI>)
            .add_systems(OnEnter(AppState::Playing), setup_ability_bar)
            .add_systems(Update, update_ability_bar.run_if(in_state(AppState::Playing).or_else(in_state(AppState::GameOver))))
            .add_systems(OnEnter(AppState::GameOver), setup_game_over_ui)
            .add_systems(OnEnter(AppState::Terminated), (despawn_ui_by_marker::<AbilityBarUI>, despawn_ui_by_marker::<GameOverUI>));
    }
}

fn despawn_ui_by_marker<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() { commands.entity(entity).despawn_recursive(); }
}

fn text_style(font_size: f32, color: Color) -> TextStyle { TextStyle { font_size, color, ..default() } }

fn setup_color_select_ui(mut commands: Commands, selection: Res<ColorSelection>) {
    commands.spawn((
        NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(30.0),
                ..default()
            },
            ..default()
        },
        ColorSelectUI,
    )).with_children(|parent| {
        parent.spawn(TextBundle::from_section("Choose Your Color", text_style(48.0, UI_TEXT_COLOR)).with_text_justify(JustifyText::Center));
        parent.spawn(NodeBundle {
            style: Style { flex_direction: FlexDirection::Row, column_gap: Val::Px(20.0), ..default() },
            ..default()
        }).with_children(|row| {
            for (index, color) in COLOR_OPTIONS.iter().enumerate() {
                let border_color = if index == selection.index { SWATCH_SELECTED_BORDER_COLOR } else { SWATCH_IDLE_BORDER_COLOR };
                row.spawn((
                    NodeBundle {
                        style: Style {
                            width: Val::Px(SWATCH_SIZE),
                            height: Val::Px(SWATCH_SIZE),
                            border: UiRect::all(Val::Px(SWATCH_BORDER)),
                            ..default()
                        },
                        background_color: (*color).into(),
                        border_color: BorderColor(border_color),
                        ..default()
                    },
                    ColorSwatch(index),
                ));
            }
        });
        parent.spawn(TextBundle::from_section("Left / Right to choose, Enter to start", text_style(24.0, Color::rgb(0.7, 0.7, 0.7))));
    });
}

fn highlight_selected_swatch(selection: Res<ColorSelection>, mut swatch_query: Query<(&ColorSwatch, &mut BorderColor)>) {
    if !selection.is_changed() { return; }
    for (swatch, mut border_color) in swatch_query.iter_mut() {
        border_color.0 = if swatch.0 == selection.index { SWATCH_SELECTED_BORDER_COLOR } else { SWATCH_IDLE_BORDER_COLOR };
    }
}

fn setup_ability_bar(mut commands: Commands, existing: Query<(), With<AbilityBarUI>>) {
    if !existing.is_empty() { return; }
    commands.spawn((
        NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                bottom: Val::Px(10.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(10.0),
                ..default()
            },
            z_index: ZIndex::Global(1),
            ..default()
        },
        AbilityBarUI,
    )).with_children(|bar| {
        for key in AbilityKey::ALL {
            let ability = key.descriptor();
            bar.spawn(NodeBundle {
                style: Style {
                    width: Val::Px(ABILITY_SLOT_SIZE),
                    height: Val::Px(ABILITY_SLOT_SIZE),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: ability.color.into(),
                ..default()
            }).with_children(|slot| {
                slot.spawn((
                    NodeBundle {
                        style: Style {
                            position_type: PositionType::Absolute,
                            left: Val::Px(0.0),
                            top: Val::Px(0.0),
                            width: Val::Percent(100.0),
                            height: Val::Percent(0.0),
                            ..default()
                        },
                        background_color: COOLDOWN_OVERLAY_COLOR.into(),
                        ..default()
                    },
                    CooldownOverlay(key),
                ));
                slot.spawn((TextBundle::from_section(ability.name, text_style(24.0, Color::BLACK)), CooldownText(key)));
            });
        }
    });
}

fn update_ability_bar(
    clock: Res<SimClock>,
    cooldowns: Res<Cooldowns>,
    mut overlay_query: Query<(&CooldownOverlay, &mut Style)>,
    mut text_query: Query<(&CooldownText, &mut Text)>,
) {
    let now = clock.now_ms();
    for (overlay, mut style) in overlay_query.iter_mut() {
        let cooldown_ms = overlay.0.descriptor().cooldown_ms.max(1);
        let fraction = cooldowns.remaining_ms(overlay.0, now) as f32 / cooldown_ms as f32;
        style.height = Val::Percent(fraction * 100.0);
    }
    for (label, mut text) in text_query.iter_mut() {
        let Some(section) = text.sections.get_mut(0) else { continue; };
        match cooldowns.display_seconds(label.0, now) {
            Some(seconds) => { section.value = seconds.to_string(); section.style.color = Color::WHITE; }
            None => { section.value = label.0.descriptor().name.to_string(); section.style.color = Color::BLACK; }
        }
    }
}

fn setup_game_over_ui(mut commands: Commands) {
    commands.spawn((
        NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            z_index: ZIndex::Global(10),
            ..default()
        },
        GameOverUI,
    )).with_children(|parent| {
        parent.spawn(TextBundle::from_section("Game Over! Press ESC to Quit.", text_style(48.0, Color::RED)).with_text_justify(JustifyText::Center));
    });
}
