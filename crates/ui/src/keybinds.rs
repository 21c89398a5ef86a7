use bevy::prelude::*;
use bevy_egui::EguiContexts;

use rendering::camera::CameraRig;
use rendering::egui_input_guard::egui_wants_keyboard;
use simulation::collection::{CancelCollectionRequest, Player};
use simulation::navigation::ManualMoveInput;

/// Held WASD / arrow keys as a screen-space axis: x right, y down.
pub fn movement_axis(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    dir
}

/// F5 saves, F9 loads, Escape cancels the player's current task, WASD and
/// the arrows walk the player relative to the camera.
/// Skipped when egui wants keyboard input.
pub fn game_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    rig: Option<Res<CameraRig>>,
    mut players: Query<(Entity, &mut ManualMoveInput), With<Player>>,
    mut save_events: EventWriter<save::SaveGameEvent>,
    mut load_events: EventWriter<save::LoadGameEvent>,
    mut cancel_events: EventWriter<CancelCollectionRequest>,
) {
    let typing = egui_wants_keyboard(&mut contexts);

    let direction = if typing {
        Vec3::ZERO
    } else {
        let rig = rig.as_deref().copied().unwrap_or_default();
        rig.ground_direction(movement_axis(&keyboard))
    };
    for (_, mut input) in &mut players {
        input.set_if_neq(ManualMoveInput { direction });
    }

    if typing {
        return;
    }

    if keyboard.just_pressed(KeyCode::F5) {
        save_events.send(save::SaveGameEvent);
    }
    if keyboard.just_pressed(KeyCode::F9) {
        load_events.send(save::LoadGameEvent);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        for (agent, _) in &players {
            cancel_events.send(CancelCollectionRequest { agent });
        }
    }
}
