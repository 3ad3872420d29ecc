use crate::traits::ToVecF32;
use crate::util::UniformContext;
use cgmath::*;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const YAW: f32 = -90.;
pub const PITCH: f32 = 0.;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const FOV: f32 = 45.;

const MAX_PITCH: f32 = 89.;
const MIN_FOV: f32 = 1.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// First person camera driven by Euler angles in degrees.
#[derive(Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,

    yaw: f32,
    pitch: f32,

    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,

    is_forward_pressed: bool,
    is_backward_pressed: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
}

impl Camera {
    pub fn new(position: Point3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vector3::new(0., 0., -1.),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: Vector3::unit_y(),
            yaw: YAW,
            pitch: PITCH,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            fov: FOV,
            aspect,
            near: 0.1,
            far: 100.,
            is_forward_pressed: false,
            is_backward_pressed: false,
            is_left_pressed: false,
            is_right_pressed: false,
        };

        camera.update_vectors();
        camera
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_sec: f32) {
        let velocity = self.movement_speed * delta_sec;

        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        }

        self.update_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.fov = (self.fov - y_offset).clamp(MIN_FOV, FOV);
    }

    /// Returns true when the key is used by the camera.
    pub fn process_input(&mut self, input: &KeyboardInput) -> bool {
        let is_pressed = input.state == ElementState::Pressed;

        match input.virtual_keycode {
            Some(VirtualKeyCode::W) => self.is_forward_pressed = is_pressed,
            Some(VirtualKeyCode::S) => self.is_backward_pressed = is_pressed,
            Some(VirtualKeyCode::A) => self.is_left_pressed = is_pressed,
            Some(VirtualKeyCode::D) => self.is_right_pressed = is_pressed,
            _ => return false,
        }

        true
    }

    /// Applies the held movement keys.
    pub fn update(&mut self, delta_sec: f32) {
        let held = [
            (self.is_forward_pressed, CameraMovement::Forward),
            (self.is_backward_pressed, CameraMovement::Backward),
            (self.is_left_pressed, CameraMovement::Left),
            (self.is_right_pressed, CameraMovement::Right),
        ];

        for (is_pressed, direction) in held {
            if is_pressed {
                self.process_keyboard(direction, delta_sec);
            }
        }
    }

    pub fn resize(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_mat(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn proj_mat(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Deg(self.fov), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.proj_mat() * self.view_mat()
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// View projection, position, right and up, as laid out in `Camera` in the shaders.
    pub fn create_buffer_content(&self) -> Vec<f32> {
        let view_proj = self.view_proj();
        let view_proj_arr: &[f32; 16] = view_proj.as_ref();

        [
            view_proj_arr.to_vec(),
            self.position.to_vec().to_vec_f32(),
            self.right.to_vec_f32(),
            self.up.to_vec_f32(),
        ]
        .concat()
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (Deg(self.yaw), Deg(self.pitch));

        let front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );

        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl ToVecF32 for Vector3<f32> {
    fn to_vec_f32(&self) -> Vec<f32> {
        vec![self.x, self.y, self.z, 0.0]
    }
}

/// Uniform buffer the camera is written to every frame.
pub struct CameraCtx {
    pub uniform: UniformContext,
}

impl CameraCtx {
    /// Floats in [`Camera::create_buffer_content`].
    pub const FLOAT_COUNT: usize = 16 + 4 + 4 + 4;

    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            uniform: UniformContext::new(device, Self::FLOAT_COUNT, "Camera"),
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera) {
        self.uniform.write(queue, &camera.create_buffer_content());
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform.bind_group
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.uniform.bind_group_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn camera() -> Camera {
        Camera::new(Point3::new(0., 0., 3.), 16. / 9.)
    }

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < EPSILON, "{:?} != {:?}", a, b);
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = camera();

        assert_close(camera.front(), Vector3::new(0., 0., -1.));
        assert_close(camera.right(), Vector3::new(1., 0., 0.));
        assert_close(camera.up(), Vector3::new(0., 1., 0.));
    }

    #[test]
    fn forward_moves_along_front() {
        let mut camera = camera();
        camera.process_keyboard(CameraMovement::Forward, 2.);

        assert_close(camera.position.to_vec(), Vector3::new(0., 0., 3. - 2. * SPEED));
    }

    #[test]
    fn strafe_moves_along_right() {
        let mut camera = camera();
        camera.process_keyboard(CameraMovement::Left, 1.);

        assert_close(camera.position.to_vec(), Vector3::new(-SPEED, 0., 3.));
    }

    #[test]
    fn pitch_is_constrained() {
        let mut camera = camera();
        camera.process_mouse_movement(0., 10_000., true);
        assert_eq!(camera.pitch(), MAX_PITCH);

        camera.process_mouse_movement(0., -20_000., true);
        assert_eq!(camera.pitch(), -MAX_PITCH);
    }

    #[test]
    fn mouse_turns_yaw() {
        let mut camera = camera();
        camera.process_mouse_movement(900., 0., true);

        assert!((camera.yaw() - 0.).abs() < EPSILON);
        assert_close(camera.front(), Vector3::new(1., 0., 0.));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = camera();
        camera.process_mouse_scroll(100.);
        assert_eq!(camera.fov(), MIN_FOV);

        camera.process_mouse_scroll(-100.);
        assert_eq!(camera.fov(), FOV);
    }

    #[test]
    fn buffer_content_matches_uniform_size() {
        assert_eq!(camera().create_buffer_content().len(), CameraCtx::FLOAT_COUNT);
    }
}
