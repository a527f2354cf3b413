//! Shape generation for 2D primitives
//!
//! All output is in world coordinates (origin top-left, y down). The pipeline
//! maps it to clip space.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::{GamePhase, GameState, Player, PlayerColor};

/// Segments used for the coin
const CIRCLE_SEGMENTS: usize = 24;
/// Height of the lighter strip on top of platforms
const PLATFORM_LIP: f32 = 3.0;
/// Player outline width
const BORDER: f32 = 2.0;

/// Append an axis-aligned rectangle as two triangles
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let (x2, y2) = (x + w, y + h);
    out.extend_from_slice(&[
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
        Vertex::new(x, y2, color),
    ]);
}

/// Append a rectangle outline drawn inside the given bounds
pub fn rect_outline(
    out: &mut Vec<Vertex>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    width: f32,
    color: [f32; 4],
) {
    rect(out, x, y, w, width, color);
    rect(out, x, y + h - width, w, width, color);
    rect(out, x, y + width, width, h - 2.0 * width, color);
    rect(out, x + w - width, y + width, width, h - 2.0 * width, color);
}

/// Append a filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    for i in 0..CIRCLE_SEGMENTS {
        let a0 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let a1 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let p0 = center + Vec2::from_angle(a0) * radius;
        let p1 = center + Vec2::from_angle(a1) * radius;
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(p0.x, p0.y, color));
        out.push(Vertex::new(p1.x, p1.y, color));
    }
}

/// Append a ring between `inner` and `outer` radii
pub fn ring(out: &mut Vec<Vertex>, center: Vec2, inner: f32, outer: f32, color: [f32; 4]) {
    for i in 0..CIRCLE_SEGMENTS {
        let a0 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let a1 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let (d0, d1) = (Vec2::from_angle(a0), Vec2::from_angle(a1));
        let (i0, i1) = (center + d0 * inner, center + d1 * inner);
        let (o0, o1) = (center + d0 * outer, center + d1 * outer);
        out.extend_from_slice(&[
            Vertex::new(i0.x, i0.y, color),
            Vertex::new(o0.x, o0.y, color),
            Vertex::new(o1.x, o1.y, color),
            Vertex::new(i0.x, i0.y, color),
            Vertex::new(o1.x, o1.y, color),
            Vertex::new(i1.x, i1.y, color),
        ]);
    }
}

fn player_color(color: PlayerColor) -> [f32; 4] {
    match color {
        PlayerColor::Green => colors::PLAYER_GREEN,
        PlayerColor::Red => colors::PLAYER_RED,
    }
}

/// Build the triangles for one frame. Read-only with respect to the state.
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(512);

    // Platforms run to the bottom of the world
    for plat in &state.platforms {
        rect(
            &mut out,
            plat.x,
            plat.y,
            plat.width,
            WORLD_HEIGHT - plat.y,
            colors::PLATFORM,
        );
        rect(
            &mut out,
            plat.x,
            plat.y,
            plat.width,
            PLATFORM_LIP,
            colors::PLATFORM_LIP,
        );
    }

    if !state.goal.collected {
        let goal = &state.goal;
        circle(&mut out, goal.pos, goal.radius, colors::COIN);
        ring(
            &mut out,
            goal.pos,
            goal.radius - 1.0,
            goal.radius + 1.0,
            colors::COIN_RIM,
        );
    }

    let p = &state.player;
    rect(
        &mut out,
        p.pos.x,
        p.pos.y,
        Player::WIDTH,
        Player::HEIGHT,
        player_color(p.color),
    );
    rect_outline(
        &mut out,
        p.pos.x,
        p.pos.y,
        Player::WIDTH,
        Player::HEIGHT,
        BORDER,
        colors::PLAYER_BORDER,
    );

    // Dim the world behind the lost/finished messages
    if state.phase != GamePhase::Playing {
        rect(
            &mut out,
            0.0,
            0.0,
            WORLD_WIDTH,
            WORLD_HEIGHT,
            colors::OVERLAY,
        );
    }

    out
}
