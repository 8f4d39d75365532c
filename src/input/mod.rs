//! Input module - PlayerInput resource and capture_input system
//!
//! Reduces raw key events to typed actions; nothing downstream ever sees a
//! key code.

use bevy::prelude::*;

/// Buffered input state for the ball controller.
/// Held directions are overwritten every frame; pressed actions accumulate
/// until the consuming system clears them.
#[derive(Resource, Default)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool,
    pub move_back: bool,
    pub shoot_pressed: bool,       // Space - shoot at the nearer rim
    pub power_up_pressed: bool,    // E - raise shot power one step
    pub power_down_pressed: bool,  // Q - lower shot power one step
    pub reset_pressed: bool,       // R - reset ball to spawn
    pub mode_select: Option<usize>, // 1-4 - select game mode
}

/// Runs in Update to capture input state before FixedUpdate consumes it.
pub fn capture_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    input.move_left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    input.move_right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);
    input.move_forward = keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp);
    input.move_back = keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown);

    // Accumulate until consumed so a press between fixed ticks is not lost
    if keyboard.just_pressed(KeyCode::Space) {
        input.shoot_pressed = true;
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        input.power_up_pressed = true;
    }
    if keyboard.just_pressed(KeyCode::KeyQ) {
        input.power_down_pressed = true;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        input.reset_pressed = true;
    }

    for (key, index) in [
        (KeyCode::Digit1, 0),
        (KeyCode::Digit2, 1),
        (KeyCode::Digit3, 2),
        (KeyCode::Digit4, 3),
    ] {
        if keyboard.just_pressed(key) {
            input.mode_select = Some(index);
        }
    }
}

impl PlayerInput {
    /// Drop every pending press (used when the ball freezes between modes)
    pub fn clear_presses(&mut self) {
        self.shoot_pressed = false;
        self.power_up_pressed = false;
        self.power_down_pressed = false;
        self.reset_pressed = false;
        self.mode_select = None;
    }
}
