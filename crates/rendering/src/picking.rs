//! Mouse click → simulation request.
//!
//! A left click casts a ray from the camera. The nearest building box hit
//! becomes a [`CollectRequest`]; otherwise the point on the ground plane
//! (y = 0) becomes a [`MoveRequest`]. Whether the agent may act on it is the
//! simulation's call.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::buildings::Building;
use simulation::collection::{CollectRequest, MoveRequest, Player};

use crate::egui_input_guard::egui_wants_pointer;

/// Distance along the ray to where it enters the box, if it does.
pub fn ray_box_entry(origin: Vec3, dir: Vec3, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        t_near = t_near.max(t1.min(t2));
        t_far = t_far.min(t1.max(t2));
    }

    (t_near <= t_far && t_far >= 0.0).then_some(t_near.max(0.0))
}

/// Where the ray meets the ground plane, if it points at it.
pub fn ray_ground_point(origin: Vec3, dir: Vec3) -> Option<Vec3> {
    if dir.y.abs() <= 0.001 {
        return None;
    }
    let t = -origin.y / dir.y;
    (t > 0.0).then(|| origin + dir * t)
}

/// Nearest box along the ray and the point where the ray enters it.
pub fn pick_nearest(
    origin: Vec3,
    dir: Vec3,
    boxes: impl IntoIterator<Item = (Entity, Vec3, Vec3)>,
) -> Option<(Entity, Vec3)> {
    boxes
        .into_iter()
        .filter_map(|(entity, center, half)| {
            ray_box_entry(origin, dir, center, half).map(|t| (entity, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, t)| (entity, origin + dir * t))
}

#[allow(clippy::too_many_arguments)]
pub fn handle_world_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    buildings: Query<(Entity, &Building, &GlobalTransform)>,
    players: Query<Entity, With<Player>>,
    mut contexts: EguiContexts,
    mut collect: EventWriter<CollectRequest>,
    mut moves: EventWriter<MoveRequest>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if egui_wants_pointer(&mut contexts) {
        return;
    }
    let Ok(agent) = players.get_single() else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
        return;
    };
    let dir = *ray.direction;

    let boxes = buildings
        .iter()
        .map(|(entity, building, gt)| (entity, gt.translation(), building.half_extents));
    if let Some((building, click_point)) = pick_nearest(ray.origin, dir, boxes) {
        collect.send(CollectRequest {
            agent,
            building,
            click_point,
        });
        return;
    }

    if let Some(point) = ray_ground_point(ray.origin, dir) {
        moves.send(MoveRequest { agent, point });
    }
}
