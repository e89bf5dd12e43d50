// Cubefall
// copyright zipxing@hotmail.com 2022～2025

use crate::event::{Event, KeyCode};
use nalgebra_glm as glm;
use nalgebra_glm::{Mat4, Vec3, Vec4};

pub const CAMERA_FOVY: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Forward,
    Backward,
    Left,
    Right,
}

/// First person camera driven by mouse deltas and WASD.
///
/// Rotation is kept as euler angles in degrees; the look direction is the
/// face vector rotated about x, then y. Strafing uses a fixed right vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub face: Vec4,
    pub rotation: Vec3,
    pub walk_speed: f32,
    pub rot_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: glm::vec3(0.0, 0.0, 3.0),
            front: glm::vec3(0.0, 0.0, -1.0),
            up: glm::vec3(0.0, 1.0, 0.0),
            right: glm::vec3(1.0, 0.0, 0.0),
            face: glm::vec4(0.0, 0.0, -1.0, 0.0),
            rotation: Vec3::zeros(),
            walk_speed: 0.2,
            rot_speed: 0.1,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn view(&self) -> Mat4 {
        glm::look_at(&self.position, &(self.position + self.front), &self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        glm::perspective(aspect, CAMERA_FOVY.to_radians(), CAMERA_NEAR, CAMERA_FAR)
    }

    /// Mouse motion in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.rotation.y -= dx * self.rot_speed;
        self.rotation.x -= dy * self.rot_speed;
        let mut view_rotate = Mat4::identity();
        view_rotate = glm::rotate(&view_rotate, self.rotation.x.to_radians(), &Vec3::x());
        view_rotate = glm::rotate(&view_rotate, self.rotation.y.to_radians(), &Vec3::y());
        self.front = glm::normalize(&(view_rotate * self.face).xyz());
    }

    pub fn walk(&mut self, dir: Walk) {
        let step = self.walk_speed;
        match dir {
            Walk::Forward => self.position += step * self.front,
            Walk::Backward => self.position -= step * self.front,
            Walk::Left => self.position -= step * self.right,
            Walk::Right => self.position += step * self.right,
        }
    }

    /// Mouse motion rotates, WASD or arrow keys walk once per press and
    /// per auto repeat. Returns true if the camera moved.
    pub fn handle_event(&mut self, e: &Event) -> bool {
        match e {
            Event::MouseMotion { dx, dy } => {
                self.rotate(*dx, *dy);
                true
            }
            Event::Key(key) if key.is_down() => match walk_from_key(key.code) {
                Some(dir) => {
                    self.walk(dir);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

pub fn walk_from_key(code: KeyCode) -> Option<Walk> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Walk::Forward),
        KeyCode::Char('s') | KeyCode::Down => Some(Walk::Backward),
        KeyCode::Char('a') | KeyCode::Left => Some(Walk::Left),
        KeyCode::Char('d') | KeyCode::Right => Some(Walk::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_looking_down_negative_z() {
        let cam = Camera::default();
        assert_eq!(cam.front, glm::vec3(0.0, 0.0, -1.0));
        let view = cam.view();
        // a point straight ahead lands on the view axis
        let p = view * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, -3.0);
    }

    #[test]
    fn mouse_right_turns_left_handed_yaw() {
        let mut cam = Camera::default();
        // -900 px * 0.1 = +90 degrees of yaw
        cam.rotate(-900.0, 0.0);
        assert_relative_eq!(cam.rotation.y, 90.0);
        assert_relative_eq!(cam.front, glm::vec3(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn pitch_moves_front_vertically() {
        let mut cam = Camera::default();
        cam.rotate(0.0, -900.0);
        assert_relative_eq!(cam.rotation.x, 90.0);
        assert_relative_eq!(cam.front, glm::vec3(0.0, 1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(glm::length(&cam.front), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn walking_uses_front_and_fixed_right() {
        let mut cam = Camera::default();
        cam.walk(Walk::Forward);
        assert_relative_eq!(cam.position, glm::vec3(0.0, 0.0, 2.8), epsilon = 1e-6);
        cam.walk(Walk::Right);
        assert_relative_eq!(cam.position, glm::vec3(0.2, 0.0, 2.8), epsilon = 1e-6);
        cam.rotate(-900.0, 0.0);
        cam.walk(Walk::Left);
        // strafing ignores the yaw
        assert_relative_eq!(cam.position, glm::vec3(0.0, 0.0, 2.8), epsilon = 1e-6);
        cam.walk(Walk::Backward);
        assert_relative_eq!(cam.position, glm::vec3(0.2, 0.0, 2.8), epsilon = 1e-5);
    }

    #[test]
    fn events_drive_the_camera() {
        use crate::event::{KeyEvent, KeyEventKind};
        let mut cam = Camera::default();
        assert!(cam.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char('w')))));
        assert!(!cam.handle_event(&Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('w'),
            KeyEventKind::Release
        ))));
        assert!(!cam.handle_event(&Event::Key(KeyEvent::new(KeyCode::Tab))));
        assert_relative_eq!(cam.position, glm::vec3(0.0, 0.0, 2.8), epsilon = 1e-6);
        assert!(cam.handle_event(&Event::MouseMotion { dx: -900.0, dy: 0.0 }));
        assert_relative_eq!(cam.rotation.y, 90.0);
        assert!(!cam.handle_event(&Event::Resized { width: 1, height: 1 }));
    }

    #[test]
    fn projection_is_perspective() {
        let p = Camera::default().projection(4.0 / 3.0);
        assert_relative_eq!(p[(3, 2)], -1.0);
        assert_relative_eq!(p[(1, 1)], 1.0 / (22.5f32).to_radians().tan(), epsilon = 1e-5);
    }
}
