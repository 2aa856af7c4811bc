// src/render.rs
use bevy::{prelude::*, sprite::Anchor};
use bevy_hanabi::prelude::*;
use crate::{
    clock::SimClock,
    combat::EnemyDefeated,
    components::{Body, Health, Tint},
    effects::{AreaBurstMarker, EnemyTelegraph, Projectile, SwordSpin, Transient},
    enemy::Enemy,
    game::ArenaConfig,
    player::Player,
};

const HEALTH_BAR_HEIGHT: f32 = 5.0;
const HEALTH_BAR_GAP: f32 = 8.0;
const HEALTH_BAR_BACK_COLOR: Color = Color::rgb(0.5, 0.0, 0.0);
const HEALTH_BAR_FILL_COLOR: Color = Color::rgb(0.0, 0.9, 0.0);
const TELEGRAPH_COLOR: Color = Color::rgb(1.0, 0.3, 0.3);
const TELEGRAPH_MARGIN: f32 = 10.0;
const DEFEAT_SPARK_SECONDS: f32 = 0.6;

const PLAYER_Z: f32 = 2.0;
const ENEMY_Z: f32 = 1.0;

#[derive(Component)]
pub struct HealthBarFill;

#[derive(Component)]
pub struct DefeatSpark { pub timer: Timer }

#[derive(Resource)]
pub struct DefeatSparkEffect { pub effect: Handle<EffectAsset> }

/// Arena space (origin top-left, y down) to world space (origin centre, y up).
pub fn arena_to_world(arena: &ArenaConfig, point: Vec2) -> Vec2 {
    Vec2::new(point.x - arena.width / 2.0, arena.height / 2.0 - point.y)
}

pub struct ArenaRenderPlugin;

impl Plugin for ArenaRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_defeat_spark_effect)
            .add_systems(Update, (
                attach_actor_visuals,
                sync_actor_visuals,
                draw_transient_effects,
                spawn_defeat_sparks,
                despawn_finished_sparks,
            ).chain());
    }
}

fn setup_defeat_spark_effect(mut commands: Commands, mut effects: ResMut<Assets<EffectAsset>>) {
    let mut color_gradient = Gradient::new();
    color_gradient.add_key(0.0, Vec4::new(1.0, 0.9, 0.6, 1.0));
    color_gradient.add_key(0.5, Vec4::new(0.9, 0.3, 0.2, 1.0));
    color_gradient.add_key(1.0, Vec4::new(0.6, 0.1, 0.1, 0.0));

    let mut size_gradient = Gradient::new();
    size_gradient.add_key(0.0, Vec2::splat(5.0));
    size_gradient.add_key(1.0, Vec2::ZERO);

    let writer = ExprWriter::new();
    let init_pos = SetPositionCircleModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        axis: writer.lit(Vec3::Z).expr(),
        radius: writer.lit(6.0).expr(),
        dimension: ShapeDimension::Volume,
    };
    let init_vel = SetVelocityCircleModifier {
        center: writer.lit(Vec3::ZERO).expr(),
        axis: writer.lit(Vec3::Z).expr(),
        speed: writer.lit(80.0).uniform(writer.lit(160.0)).expr(),
    };
    let init_lifetime = SetAttributeModifier::new(Attribute::LIFETIME, writer.lit(DEFEAT_SPARK_SECONDS * 0.8).expr());

    let effect = EffectAsset::new(vec![64], Spawner::once(24.0.into(), true), writer.finish())
        .with_name("defeat_spark")
        .init(init_pos)
        .init(init_vel)
        .init(init_lifetime)
        .render(ColorOverLifetimeModifier { gradient: color_gradient })
        .render(SizeOverLifetimeModifier { gradient: size_gradient, screen_space_size: false });

    commands.insert_resource(DefeatSparkEffect { effect: effects.add(effect) });
}

fn attach_actor_visuals(
    mut commands: Commands,
    arena: Res<ArenaConfig>,
    new_actors: Query<(Entity, &Body, &Tint, Has<Player>), Added<Body>>,
) {
    for (entity, body, tint, is_player) in new_actors.iter() {
        let z = if is_player { PLAYER_Z } else { ENEMY_Z };
        let bar_y = body.half_extent() + HEALTH_BAR_GAP;
        commands.entity(entity).insert(SpriteBundle {
            sprite: Sprite { color: tint.0, custom_size: Some(Vec2::splat(body.size)), ..default() },
            transform: Transform::from_translation(arena_to_world(&arena, body.center()).extend(z)),
            ..default()
        }).with_children(|parent| {
            parent.spawn(SpriteBundle {
                sprite: Sprite { color: HEALTH_BAR_BACK_COLOR, custom_size: Some(Vec2::new(body.size, HEALTH_BAR_HEIGHT)), ..default() },
                transform: Transform::from_xyz(0.0, bar_y, 0.1),
                ..default()
            });
            parent.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: HEALTH_BAR_FILL_COLOR,
                        custom_size: Some(Vec2::new(body.size, HEALTH_BAR_HEIGHT)),
                        anchor: Anchor::CenterLeft,
                        ..default()
                    },
                    transform: Transform::from_xyz(-body.half_extent(), bar_y, 0.2),
                    ..default()
                },
                HealthBarFill,
            ));
        });
    }
}

fn sync_actor_visuals(
    clock: Res<SimClock>,
    arena: Res<ArenaConfig>,
    mut actor_query: Query<(&Body, &Health, &Tint, &mut Transform, &mut Sprite, &Children), Without<HealthBarFill>>,
    mut fill_query: Query<&mut Transform, With<HealthBarFill>>,
) {
    let now = clock.now_ms();
    for (body, health, tint, mut transform, mut sprite, children) in actor_query.iter_mut() {
        let world = arena_to_world(&arena, body.center());
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        sprite.color = if health.is_flashing(now) { Color::WHITE } else { tint.0 };
        for &child in children.iter() {
            if let Ok(mut fill_transform) = fill_query.get_mut(child) {
                fill_transform.scale.x = health.ratio();
            }
        }
    }
}

fn draw_transient_effects(
    mut gizmos: Gizmos,
    clock: Res<SimClock>,
    arena: Res<ArenaConfig>,
    marker_query: Query<(&AreaBurstMarker, &Transient)>,
    projectile_query: Query<&Projectile>,
    spin_query: Query<(&SwordSpin, &Transient)>,
    telegraph_query: Query<(&EnemyTelegraph, &Transient)>,
    player_query: Query<&Body, With<Player>>,
    enemy_query: Query<&Body, With<Enemy>>,
) {
    let now = clock.now_ms();
    for (marker, lifetime) in marker_query.iter() {
        let color = marker.color.with_a(lifetime.remaining_fraction(now));
        gizmos.circle_2d(arena_to_world(&arena, marker.center), marker.radius, color);
    }
    for projectile in projectile_query.iter() {
        gizmos.circle_2d(arena_to_world(&arena, projectile.pos), projectile.radius, projectile.color);
    }
    if let Ok(player_body) = player_query.get_single() {
        let center = player_body.center();
        for (spin, lifetime) in spin_query.iter() {
            let angle = spin.angle_degrees.to_radians();
            let tip = center + Vec2::new(angle.cos(), angle.sin()) * spin.radius;
            let alpha = lifetime.remaining_fraction(now);
            gizmos.line_2d(arena_to_world(&arena, center), arena_to_world(&arena, tip), Color::WHITE.with_a(alpha));
            gizmos.circle_2d(arena_to_world(&arena, center), spin.radius, Color::WHITE.with_a(alpha * 0.3));
        }
    }
    for (telegraph, lifetime) in telegraph_query.iter() {
        // The enemy may have died since the telegraph was raised.
        let Ok(enemy_body) = enemy_query.get(telegraph.enemy) else { continue; };
        let size = Vec2::splat(enemy_body.size + TELEGRAPH_MARGIN);
        let color = TELEGRAPH_COLOR.with_a(lifetime.remaining_fraction(now));
        gizmos.rect_2d(arena_to_world(&arena, enemy_body.center()), 0.0, size, color);
    }
}

fn spawn_defeat_sparks(
    mut commands: Commands,
    arena: Res<ArenaConfig>,
    spark_effect: Option<Res<DefeatSparkEffect>>,
    mut defeated: EventReader<EnemyDefeated>,
) {
    let Some(spark_effect) = spark_effect else { defeated.clear(); return; };
    for event in defeated.read() {
        commands.spawn((
            ParticleEffectBundle {
                effect: ParticleEffect::new(spark_effect.effect.clone()),
                transform: Transform::from_translation(arena_to_world(&arena, event.center).extend(5.0)),
                ..default()
            },
            DefeatSpark { timer: Timer::from_seconds(DEFEAT_SPARK_SECONDS, TimerMode::Once) },
            Name::new("DefeatSpark"),
        ));
    }
}

fn despawn_finished_sparks(mut commands: Commands, time: Res<Time>, mut spark_query: Query<(Entity, &mut DefeatSpark)>) {
    for (entity, mut spark) in spark_query.iter_mut() {
        spark.timer.tick(time.delta());
        if spark.timer.finished() { commands.entity(entity).despawn_recursive(); }
    }
}
