//! Bevy presentation for the graphical variant.
//!
//! The scene is laid out on a fixed 854×480 logical canvas (the camera
//! scales it to the window): HUD line on top, bordered playfield box,
//! key-hint footer. Static decor is spawned once; everything that follows
//! the game (snake, food, text, overlays) is rebuilt whenever the
//! session's version counter moves, and left alone otherwise.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use crate::font;
use crate::hud;
use crate::session::{GameState, Session};
use crate::{Cell, Scheduler};

pub const LOGICAL_W: f32 = 854.0;
pub const LOGICAL_H: f32 = 480.0;
const MARGIN: f32 = 20.0;

const SCALE_SMALL: f32 = 2.0;
const SCALE_MED: f32 = 3.0;
const SCALE_CAPTION: f32 = 4.0;
const SCALE_BIG: f32 = 6.0;

pub const BG: Color = Color::srgb(0.031, 0.039, 0.055);
const BORDER: Color = Color::srgb(0.188, 0.212, 0.239);
const SNAKE_HEAD: Color = Color::srgb(0.133, 0.773, 0.369);
const SNAKE_BODY: Color = Color::srgb(0.086, 0.639, 0.290);
const FOOD: Color = Color::srgb(0.937, 0.267, 0.267);
const TXT: Color = Color::srgb(0.922, 0.937, 0.961);
const TXT_DIM: Color = Color::srgb(0.667, 0.698, 0.741);
const OVERLAY_GAME_OVER: Color = Color::srgba(0.784, 0.118, 0.118, 0.627);
const OVERLAY_PAUSE: Color = Color::srgba(0.118, 0.118, 0.118, 0.627);
const GRID_LINE: Color = Color::srgba(1.0, 1.0, 1.0, 0.07);

const Z_DECOR: f32 = 0.5;
const Z_FOOD: f32 = 1.0;
const Z_SNAKE: f32 = 1.5;
const Z_OVERLAY: f32 = 2.0;
const Z_TEXT: f32 = 3.0;

/// The session, owned by the main loop; systems mutate it exclusively.
#[derive(Resource)]
pub struct GameSession(pub Session);

/// Fixed-timestep scheduler driven by real (unclamped) frame deltas.
#[derive(Resource)]
pub struct StepClock(pub Scheduler);

/// Playfield box geometry on the logical canvas.
#[derive(Resource, Clone, Copy, Debug)]
pub struct BoardLayout {
    pub box_x: f32,
    pub box_y: f32,
    pub box_w: f32,
    pub box_h: f32,
    pub cell_w: f32,
    pub cell_h: f32,
}

impl BoardLayout {
    pub fn new(cols: i32, rows: i32) -> Self {
        let box_x = MARGIN;
        let box_y = MARGIN + 20.0;
        let box_w = LOGICAL_W - MARGIN * 2.0;
        let box_h = LOGICAL_H - MARGIN * 2.0 - 40.0;
        Self {
            box_x,
            box_y,
            box_w,
            box_h,
            cell_w: box_w / cols as f32,
            cell_h: box_h / rows as f32,
        }
    }

    /// Logical-canvas rectangle of a grid cell.
    pub fn cell_rect(&self, cell: Cell) -> (f32, f32, f32, f32) {
        (
            self.box_x + cell.x as f32 * self.cell_w,
            self.box_y + cell.y as f32 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }
}

/// Static border and grid lines, spawned once.
#[derive(Component)]
pub struct BoardDecor;

/// Everything rebuilt when the session changes.
#[derive(Component)]
pub struct FrameSprite;

/// Logical canvas (y down, origin top-left) to world transform for a rect.
fn placed(x: f32, y: f32, w: f32, h: f32, z: f32) -> Transform {
    Transform::from_xyz(
        x + w / 2.0 - LOGICAL_W / 2.0,
        LOGICAL_H / 2.0 - (y + h / 2.0),
        z,
    )
}

fn rect(color: Color, w: f32, h: f32) -> Sprite {
    Sprite {
        color,
        custom_size: Some(Vec2::new(w, h)),
        ..default()
    }
}

pub fn setup_scene(mut commands: Commands, layout: Res<BoardLayout>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: LOGICAL_W,
                min_height: LOGICAL_H,
            },
            ..OrthographicProjection::default_2d()
        },
    ));

    let l = *layout;
    let mut edge = |x: f32, y: f32, w: f32, h: f32| {
        commands.spawn((rect(BORDER, w, h), placed(x, y, w, h, Z_DECOR), BoardDecor));
    };
    edge(l.box_x - 2.0, l.box_y - 2.0, l.box_w + 4.0, 2.0);
    edge(l.box_x - 2.0, l.box_y + l.box_h, l.box_w + 4.0, 2.0);
    edge(l.box_x - 2.0, l.box_y - 2.0, 2.0, l.box_h + 4.0);
    edge(l.box_x + l.box_w, l.box_y - 2.0, 2.0, l.box_h + 4.0);

    let cols = (l.box_w / l.cell_w).round() as i32;
    let rows = (l.box_h / l.cell_h).round() as i32;
    for gx in 1..cols {
        let x = l.box_x + gx as f32 * l.cell_w;
        commands.spawn((
            rect(GRID_LINE, 1.0, l.box_h),
            placed(x, l.box_y, 1.0, l.box_h, Z_DECOR),
            BoardDecor,
        ));
    }
    for gy in 1..rows {
        let y = l.box_y + gy as f32 * l.cell_h;
        commands.spawn((
            rect(GRID_LINE, l.box_w, 1.0),
            placed(l.box_x, y, l.box_w, 1.0, Z_DECOR),
            BoardDecor,
        ));
    }
}

/// Spawn `text` with the bitmap font, top-left at (`x`, `y`) on the
/// logical canvas, `scale` pixels per glyph cell. Returns the pen advance.
fn spawn_text(
    commands: &mut Commands,
    x: f32,
    y: f32,
    scale: f32,
    color: Color,
    text: &str,
) -> f32 {
    let mut pen = x;
    for ch in text.chars() {
        for (col, row) in font::glyph(ch).pixels() {
            let px = pen + col as f32 * scale;
            let py = y + row as f32 * scale;
            commands.spawn((
                rect(color, scale, scale),
                placed(px, py, scale, scale, Z_TEXT),
                FrameSprite,
            ));
        }
        pen += font::ADVANCE as f32 * scale;
    }
    pen - x
}

fn spawn_text_centered(
    commands: &mut Commands,
    cx: f32,
    y: f32,
    scale: f32,
    color: Color,
    text: &str,
) {
    let w = font::text_width(text) as f32 * scale;
    spawn_text(commands, cx - w / 2.0, y, scale, color, text);
}

/// Rebuild the dynamic part of the scene when the session has changed.
pub fn draw_frame(
    mut commands: Commands,
    session: Res<GameSession>,
    layout: Res<BoardLayout>,
    stale: Query<Entity, With<FrameSprite>>,
    mut drawn: Local<Option<u64>>,
) {
    let session = &session.0;
    if *drawn == Some(session.version()) {
        return;
    }
    *drawn = Some(session.version());

    for entity in &stale {
        commands.entity(entity).despawn();
    }

    let l = *layout;

    // HUD and footer
    spawn_text(
        &mut commands,
        MARGIN,
        MARGIN - 14.0,
        SCALE_MED,
        TXT,
        &hud::score_line(session.score(), session.high_score()),
    );
    spawn_text(
        &mut commands,
        MARGIN,
        LOGICAL_H - MARGIN + 4.0,
        SCALE_SMALL,
        TXT_DIM,
        hud::footer(session.state()),
    );

    let cell = |commands: &mut Commands, c: Cell, color: Color, z: f32| {
        let (x, y, w, h) = l.cell_rect(c);
        let w = (w - 2.0).max(1.0);
        let h = (h - 2.0).max(1.0);
        commands.spawn((rect(color, w, h), placed(x + 1.0, y + 1.0, w, h, z), FrameSprite));
    };

    if session.field().contains(session.food()) {
        cell(&mut commands, session.food(), FOOD, Z_FOOD);
    }

    for (i, c) in session.snake_cells().enumerate() {
        let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
        cell(&mut commands, c, color, Z_SNAKE);
    }

    // State overlays
    let overlay = match session.state() {
        GameState::Paused => Some(OVERLAY_PAUSE),
        GameState::GameOver => Some(OVERLAY_GAME_OVER),
        _ => None,
    };
    if let Some(color) = overlay {
        commands.spawn((
            rect(color, l.box_w, l.box_h),
            placed(l.box_x, l.box_y, l.box_w, l.box_h, Z_OVERLAY),
            FrameSprite,
        ));
    }

    let cx = l.box_x + l.box_w / 2.0;
    let cy = l.box_y + l.box_h / 2.0;
    if let Some(caption) = hud::caption(session.state()) {
        let scale = match session.state() {
            GameState::Paused | GameState::GameOver => SCALE_BIG,
            _ => SCALE_CAPTION,
        };
        spawn_text_centered(&mut commands, cx, cy - 20.0, scale, TXT, caption);
    }
    if let Some(sub) = hud::sub_caption(session.state()) {
        spawn_text_centered(&mut commands, cx, cy + 24.0, SCALE_MED, TXT_DIM, sub);
    }
}
