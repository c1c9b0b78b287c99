use glam::Vec3;

use crate::constants::PLAYER_EYE_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Feet position.
    pub position: Vec3,
    /// Radians, 0 looks along +X, increasing towards +Z.
    pub yaw: f32,
}

impl Camera {
    pub fn new(spawn: (f32, f32, f32)) -> Self {
        Camera {
            position: Vec3::new(spawn.0, spawn.1, spawn.2),
            yaw: 0.0,
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y + PLAYER_EYE_HEIGHT, self.position.z)
    }

    /// Block row the player's feet are in.
    pub fn block_y(&self) -> i32 {
        self.position.y.floor() as i32
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw.rem_euclid(std::f32::consts::TAU);
    }
}
