use bevy::prelude::*;
use clap::Parser;

use gridsnake::config::Config;
use gridsnake::input::{self, Controls};
use gridsnake::render::{self, BoardLayout, GameSession, StepClock};
use gridsnake::scheduler::{Pacing, Scheduler};
use gridsnake::{Playfield, Session};

const DEFAULT_COLS: i32 = 40;
const DEFAULT_ROWS: i32 = 26;
// Smallest grid that fits the centered spawn with room to play.
const MIN_COLS: i32 = 10;
const MIN_ROWS: i32 = 8;
const POINTS_PER_FOOD: u32 = 1;

/// Snake on an open playfield, drawn with Bevy and a procedural bitmap
/// font. Arrows/WASD or a gamepad to steer.
#[derive(Parser, Debug)]
#[command(name = "gridsnake", version)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<String>,
    /// Grid width in cells.
    #[arg(long)]
    cols: Option<i32>,
    /// Grid height in cells.
    #[arg(long)]
    rows: Option<i32>,
    /// Random seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref());

    let cols = args.cols.or(config.cols).unwrap_or(DEFAULT_COLS).max(MIN_COLS);
    let rows = args.rows.or(config.rows).unwrap_or(DEFAULT_ROWS).max(MIN_ROWS);
    let seed = args.seed.or(config.seed);

    let session = Session::new(Playfield::open(cols, rows), POINTS_PER_FOOD, seed);
    let scheduler = Scheduler::new(config.pacing(Pacing::default()));
    log::info!("starting {cols}x{rows} open-field session");

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "gridsnake".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(render::BG))
        .insert_resource(BoardLayout::new(cols, rows))
        .insert_resource(GameSession(session))
        .insert_resource(StepClock(scheduler))
        .add_systems(Startup, render::setup_scene)
        .add_systems(
            Update,
            (
                handle_input,
                advance_simulation.after(handle_input),
                render::draw_frame.after(advance_simulation),
                quit_on_escape,
            ),
        )
        .run();
}

/// Merge keyboard and gamepad state into one per-frame snapshot and feed
/// it to the input mapper.
fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut session: ResMut<GameSession>,
) {
    let mut controls = Controls {
        left: keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD),
        up: keyboard.pressed(KeyCode::ArrowUp) || keyboard.pressed(KeyCode::KeyW),
        down: keyboard.pressed(KeyCode::ArrowDown) || keyboard.pressed(KeyCode::KeyS),
        pause: keyboard.just_pressed(KeyCode::Space),
        confirm: keyboard.just_pressed(KeyCode::Enter),
        ..Default::default()
    };

    for gamepad in &gamepads {
        controls.left |= gamepad.pressed(GamepadButton::DPadLeft);
        controls.right |= gamepad.pressed(GamepadButton::DPadRight);
        controls.up |= gamepad.pressed(GamepadButton::DPadUp);
        controls.down |= gamepad.pressed(GamepadButton::DPadDown);
        controls.pause |= gamepad.just_pressed(GamepadButton::Start);
        controls.confirm |= gamepad.just_pressed(GamepadButton::South);
        controls.stick_x += gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);
        controls.stick_y += gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0);
    }

    input::apply(&controls, &mut session.0);
}

/// Real (unclamped) frame delta into the fixed-timestep scheduler; virtual
/// time would cap long gaps and hide host suspends from the session.
fn advance_simulation(
    time: Res<Time<Real>>,
    mut session: ResMut<GameSession>,
    mut clock: ResMut<StepClock>,
) {
    let dt_ms = time.delta().as_secs_f64() * 1000.0;
    clock.0.advance(&mut session.0, dt_ms);
}

fn quit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}
