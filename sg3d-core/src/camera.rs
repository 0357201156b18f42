/// First-person camera: orientation state, derived basis and view matrix
use crate::math::{cross3, dot3, normalize3, sub3, Mat4};

/// Pitch is clamped this far inside +/- pi/2 to keep the basis away from
/// the poles (gimbal lock).
pub const PITCH_EPSILON: f32 = 1e-3;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - PITCH_EPSILON;

/// Logical movement keys, answered by the host input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Input boundary: "is logical key K currently held", queried once per
/// frame to integrate movement.
pub trait KeyQuery {
    fn is_held(&self, key: Key) -> bool;
}

/// Camera with position and (pitch, yaw) orientation in radians.
///
/// The front/right/up basis vectors and the view matrix are derived state,
/// recomputed synchronously on every mutation; there is no lazy
/// invalidation. Roll is fixed at zero.
pub struct Camera {
    position: [f32; 3],
    pitch: f32,
    yaw: f32,
    front: [f32; 3],
    right: [f32; 3],
    up: [f32; 3],
    view: Mat4,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: [0.0, 0.0, 0.0],
            pitch: 0.0,
            yaw: 0.0,
            front: [0.0, 0.0, 1.0],
            right: [-1.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            view: Mat4::identity(),
            fov_degrees: 75.0,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 1000.0,
        };
        camera.recompute();
        camera
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn set_position(&mut self, position: [f32; 3]) {
        self.position = position;
        self.recompute();
    }

    /// Pitch in radians, always within the clamped range.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_rotation(&mut self, pitch: f32, yaw: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = yaw;
        self.recompute();
    }

    pub fn rotate_by(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.set_rotation(self.pitch + delta_pitch, self.yaw + delta_yaw);
    }

    pub fn front(&self) -> [f32; 3] {
        self.front
    }

    pub fn right(&self) -> [f32; 3] {
        self.right
    }

    pub fn up(&self) -> [f32; 3] {
        self.up
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_degrees, self.aspect, self.near, self.far)
    }

    /// Orient the camera toward a world-space target.
    ///
    /// Yaw and pitch are derived from the direction vector; pitch is
    /// clamped like any direct rotation, roll stays zero.
    pub fn look_at(&mut self, target: [f32; 3]) {
        let direction = sub3(target, self.position);
        let flat_distance = (direction[0] * direction[0] + direction[2] * direction[2]).sqrt();
        let pitch = direction[1].atan2(flat_distance);
        let yaw = direction[0].atan2(direction[2]);
        self.set_rotation(pitch, yaw);
    }

    /// Integrate held movement keys over one frame, moving along the
    /// current basis (world Y for vertical motion).
    pub fn apply_movement(&mut self, keys: &dyn KeyQuery, speed: f32, dt: f32) {
        let step = speed * dt;
        let mut delta = [0.0f32; 3];
        if keys.is_held(Key::Forward) {
            for i in 0..3 {
                delta[i] += self.front[i] * step;
            }
        }
        if keys.is_held(Key::Backward) {
            for i in 0..3 {
                delta[i] -= self.front[i] * step;
            }
        }
        if keys.is_held(Key::Right) {
            for i in 0..3 {
                delta[i] += self.right[i] * step;
            }
        }
        if keys.is_held(Key::Left) {
            for i in 0..3 {
                delta[i] -= self.right[i] * step;
            }
        }
        if keys.is_held(Key::Up) {
            delta[1] += step;
        }
        if keys.is_held(Key::Down) {
            delta[1] -= step;
        }
        if delta != [0.0; 3] {
            self.set_position([
                self.position[0] + delta[0],
                self.position[1] + delta[1],
                self.position[2] + delta[2],
            ]);
        }
    }

    /// Feed pointer movement into yaw/pitch; positive dy looks down.
    pub fn apply_mouse_look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.rotate_by(-dy * sensitivity, dx * sensitivity);
    }

    fn recompute(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        self.front = [cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw];
        let side_yaw = self.yaw - std::f32::consts::FRAC_PI_2;
        self.right = [side_yaw.sin(), 0.0, side_yaw.cos()];
        self.up = cross3(self.right, self.front);

        // Look-at construction straight from the basis, no inverse step.
        let z_axis = normalize3([-self.front[0], -self.front[1], -self.front[2]]);
        let x_axis = normalize3(cross3(self.up, z_axis));
        let y_axis = normalize3(cross3(z_axis, x_axis));

        self.view = Mat4::from_array([
            x_axis[0],
            y_axis[0],
            z_axis[0],
            0.0,
            x_axis[1],
            y_axis[1],
            z_axis[1],
            0.0,
            x_axis[2],
            y_axis[2],
            z_axis[2],
            0.0,
            -dot3(x_axis, self.position),
            -dot3(y_axis, self.position),
            -dot3(z_axis, self.position),
            1.0,
        ]);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
