//! Hoopshot - a 3D basketball shooting game built with Bevy
//!
//! Main entry point: app setup, procedural court scene, and HUD.
//!
//! Controls: WASD/arrows move, Space shoots, Q/E adjust power, R resets,
//! 1-4 select game mode.

use bevy::prelude::*;

use hoopshot::simulation::add_core_systems;
use hoopshot::{
    ActiveMode, Ball, BallMode, BouncePhase, EventBus, EventLogConfig, EventLogger, FloorContact,
    FlightVelocity, GameConfig, GameEvent, GroundVelocity, PhysicsTweaks, PlayerInput, Score,
    ShotPhase, ShotPower, ShotTracker, TrajectoryHistory, capture_input, constants::*,
    court::NetWave, court::RimSide, load_global_tuning_system, log_bus_events,
};

/// Seconds between sampled ball-state Tick events in the evlog
const TICK_SAMPLE_SECS: f32 = 0.1;

/// Transient HUD status line (invalid shots, challenge results)
#[derive(Resource, Default)]
struct StatusMessage {
    text: String,
    timer: f32,
}

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct PowerText;

#[derive(Component)]
struct ModeText;

#[derive(Component)]
struct StatusText;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hoopshot".into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.16)))
    .insert_resource(Time::<Fixed>::from_hz(PHYSICS_TICK_HZ))
    .init_resource::<PlayerInput>()
    .init_resource::<Score>()
    .init_resource::<ShotTracker>()
    .init_resource::<ShotPower>()
    .init_resource::<ActiveMode>()
    .init_resource::<PhysicsTweaks>()
    .init_resource::<StatusMessage>()
    .init_resource::<EventLogger>()
    .insert_resource(EventLogConfig::default())
    .insert_resource(EventBus::new())
    .add_systems(
        Startup,
        (load_global_tuning_system, start_event_log, setup).chain(),
    )
    .add_systems(Update, capture_input)
    .add_systems(
        Update,
        (
            update_score_text,
            update_power_text,
            update_mode_text,
            update_status_message,
            update_status_text,
            sample_tick_events,
            log_bus_events,
        )
            .chain(),
    )
    .add_systems(Update, (spin_frozen_results_camera, close_event_log));

    add_core_systems(&mut app);
    app.run();
}

fn start_event_log(
    config: Res<EventLogConfig>,
    tweaks: Res<PhysicsTweaks>,
    mut logger: ResMut<EventLogger>,
) {
    logger.start_session(&config);
    logger.log_config(GameConfig::from_tweaks(&tweaks));
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera on a raised baseline angle covering the whole court
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 16.0, 22.0).looking_at(Vec3::new(0.0, 3.0, 0.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Court floor
    let court_w = COURT_MAX_X - COURT_MIN_X;
    let court_d = COURT_MAX_Z - COURT_MIN_Z;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(court_w, 0.2, court_d))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.72, 0.52, 0.3),
            ..default()
        })),
        Transform::from_xyz(0.0, FLOOR_Y - 0.1, 0.0),
    ));

    // Center circle and three-point arcs painted as flat rings
    let line_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.9, 0.9),
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Torus::new(1.7, 1.8))),
        MeshMaterial3d(line_material.clone()),
        Transform::from_xyz(0.0, FLOOR_Y + 0.01, 0.0),
    ));
    for rim in RimSide::BOTH {
        let center = rim.center();
        commands.spawn((
            Mesh3d(meshes.add(Torus::new(THREE_POINT_RADIUS - 0.05, THREE_POINT_RADIUS + 0.05))),
            MeshMaterial3d(line_material.clone()),
            Transform::from_xyz(center.x, FLOOR_Y + 0.01, center.z),
        ));
    }

    // The ball: physics components plus its mesh
    commands.spawn((
        Ball,
        BallMode::default(),
        GroundVelocity::default(),
        FlightVelocity::default(),
        BouncePhase::default(),
        TrajectoryHistory::default(),
        FloorContact::default(),
        Mesh3d(meshes.add(Sphere::new(BALL_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.42, 0.13),
            ..default()
        })),
        Transform::from_translation(BALL_SPAWN),
    ));

    let rim_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.3, 0.15),
        ..default()
    });
    let board_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.88, 0.88, 0.92),
        ..default()
    });
    let net_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.95, 0.95, 0.95, 0.6),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let pole_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.3, 0.35),
        ..default()
    });

    for rim in RimSide::BOTH {
        let center = rim.center();
        let toward_wall = center.x.signum();

        // Rim hoop
        commands.spawn((
            Mesh3d(meshes.add(Torus::new(RIM_RADIUS - 0.06, RIM_RADIUS + 0.06))),
            MeshMaterial3d(rim_material.clone()),
            Transform::from_translation(center),
        ));
        // Backboard behind the rim
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(0.15, 2.4, 3.4))),
            MeshMaterial3d(board_material.clone()),
            Transform::from_xyz(
                center.x + toward_wall * (RIM_RADIUS + 0.3),
                center.y + 0.9,
                center.z,
            ),
        ));
        // Support pole
        commands.spawn((
            Mesh3d(meshes.add(Cylinder::new(0.12, center.y + 1.2))),
            MeshMaterial3d(pole_material.clone()),
            Transform::from_xyz(
                center.x + toward_wall * (RIM_RADIUS + 0.5),
                (center.y + 1.2) / 2.0,
                center.z,
            ),
        ));
        // Hanging net: the entity the scoring detector and wave animation use
        commands.spawn((
            Mesh3d(meshes.add(Cylinder::new(RIM_RADIUS * 0.85, 1.0))),
            MeshMaterial3d(net_material.clone()),
            Transform::from_xyz(center.x, center.y - 0.55, center.z),
            rim,
            NetWave::default(),
        ));
    }

    // HUD
    commands.spawn((
        Text::new("HOME 0 - 0 AWAY"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(16.0),
            ..default()
        },
        ScoreText,
    ));
    commands.spawn((
        Text::new("POWER 50%"),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.75, 0.4)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(48.0),
            left: Val::Px(16.0),
            ..default()
        },
        PowerText,
    ));
    commands.spawn((
        Text::new("free-shoot"),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgb(0.7, 0.65, 0.55)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(16.0),
            ..default()
        },
        ModeText,
    ));
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 26.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.85, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            left: Val::Px(16.0),
            ..default()
        },
        StatusText,
    ));
}

fn update_score_text(
    score: Res<Score>,
    tracker: Res<ShotTracker>,
    mut query: Query<&mut Text, With<ScoreText>>,
) {
    for mut text in &mut query {
        text.0 = format!(
            "HOME {} - {} AWAY   |   {}/{} made",
            score.home, score.away, tracker.made, tracker.attempts
        );
    }
}

fn update_power_text(power: Res<ShotPower>, mut query: Query<&mut Text, With<PowerText>>) {
    for mut text in &mut query {
        text.0 = format!("POWER {}%", power.0);
    }
}

fn update_mode_text(active: Res<ActiveMode>, mut query: Query<&mut Text, With<ModeText>>) {
    for mut text in &mut query {
        let mode = active.mode();
        text.0 = match &active.countdown {
            Some(countdown) => format!("{}  {}s", mode.name, countdown.remaining),
            None => {
                let best = active.bests[active.index];
                if best > 0 {
                    format!("{}  best {}", mode.name, best)
                } else {
                    mode.name.to_string()
                }
            }
        };
    }
}

/// Pick up transient messages from the bus before the logger drains it
fn update_status_message(
    time: Res<Time>,
    bus: Res<EventBus>,
    tracker: Res<ShotTracker>,
    active: Res<ActiveMode>,
    mut status: ResMut<StatusMessage>,
) {
    for bus_event in bus.peek() {
        match &bus_event.event {
            GameEvent::InvalidShot { message } => {
                status.text = message.clone();
                status.timer = 2.5;
            }
            GameEvent::ChallengeEnd {
                points,
                made,
                attempts,
                new_best,
                ..
            } => {
                status.text = format!(
                    "TIME! {} pts, {}/{} made{}",
                    points,
                    made,
                    attempts,
                    if *new_best { " - NEW BEST" } else { "" }
                );
                status.timer = RESULTS_DISPLAY_SECS;
            }
            _ => {}
        }
    }

    // Outcome flashes ride the shot phase directly
    if status.timer <= 0.0 && !active.frozen {
        match tracker.phase {
            ShotPhase::Made => {
                status.text = "BUCKET!".to_string();
                status.timer = 0.5;
            }
            ShotPhase::Missed => {
                status.text = "off the mark".to_string();
                status.timer = 0.5;
            }
            _ => {}
        }
    }

    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
        if status.timer <= 0.0 {
            status.text.clear();
        }
    }
}

fn update_status_text(status: Res<StatusMessage>, mut query: Query<&mut Text, With<StatusText>>) {
    for mut text in &mut query {
        text.0 = status.text.clone();
    }
}

/// Emit a sampled ball-state Tick onto the bus for the evlog
fn sample_tick_events(
    time: Res<Time>,
    mut bus: ResMut<EventBus>,
    mut last_sample: Local<f32>,
    mut frame: Local<u64>,
    ball: Query<(&Transform, &FlightVelocity, &GroundVelocity, &BallMode), With<Ball>>,
) {
    *frame += 1;
    if time.elapsed_secs() - *last_sample < TICK_SAMPLE_SECS {
        return;
    }
    *last_sample = time.elapsed_secs();

    let Ok((transform, flight, ground, mode)) = ball.single() else {
        return;
    };
    let airborne = *mode == BallMode::Airborne;
    // Ground velocity is per tick; report everything in units per second
    let velocity = if airborne {
        flight.0
    } else {
        Vec3::new(ground.x, 0.0, ground.z) * PHYSICS_TICK_HZ as f32
    };
    let position = transform.translation;
    bus.emit(GameEvent::Tick {
        frame: *frame,
        ball_pos: (position.x, position.y, position.z),
        ball_vel: (velocity.x, velocity.y, velocity.z),
        airborne,
    });
}

/// Flush the evlog when the app quits
fn close_event_log(mut exits: MessageReader<AppExit>, mut logger: ResMut<EventLogger>) {
    if exits.read().next().is_some() {
        logger.end_session();
    }
}

/// Slow camera drift while challenge results are up, so the freeze reads as
/// intentional
fn spin_frozen_results_camera(
    time: Res<Time>,
    active: Res<ActiveMode>,
    mut camera: Query<&mut Transform, With<Camera3d>>,
) {
    if !active.frozen {
        return;
    }
    for mut transform in &mut camera {
        let angle = 0.05 * time.delta_secs();
        transform.rotate_around(Vec3::new(0.0, 3.0, 0.0), Quat::from_rotation_y(angle));
    }
}
