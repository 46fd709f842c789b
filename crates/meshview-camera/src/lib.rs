use glam::{Mat4, Vec3};
use wgpu::{Buffer, Queue};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub const MIN_RADIUS: f32 = 4.0;
pub const MAX_RADIUS: f32 = 30.0;
pub const MIN_ELEVATION: f32 = -1.2;
pub const MAX_ELEVATION: f32 = 1.2;

pub fn eye_from_spherical(radius: f32, azimuth: f32, elevation: f32) -> Vec3 {
    let ce = elevation.cos();
    let se = elevation.sin();
    let ca = azimuth.cos();
    let sa = azimuth.sin();
    Vec3::new(radius * ce * sa, radius * se, radius * ce * ca)
}

pub struct OrbitCamera {
    pub radius: f32,
    pub azimuth: f32,
    pub elevation: f32,
}

impl OrbitCamera {
    pub fn new(radius: f32, azimuth: f32, elevation: f32) -> Self {
        Self {
            radius,
            azimuth,
            elevation,
        }
    }

    pub fn eye(&self) -> Vec3 {
        eye_from_spherical(self.radius, self.azimuth, self.elevation)
    }
}

pub struct CameraController {
    orbit_left: bool,
    orbit_right: bool,
    orbit_up: bool,
    orbit_down: bool,
    zoom_in: bool,
    zoom_out: bool,
    rot_speed: f32,
    zoom_speed: f32,
}

impl CameraController {
    pub fn new(rot_speed: f32, zoom_speed: f32) -> Self {
        Self {
            orbit_left: false,
            orbit_right: false,
            orbit_up: false,
            orbit_down: false,
            zoom_in: false,
            zoom_out: false,
            rot_speed,
            zoom_speed,
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    repeat,
                    ..
                },
            ..
        } = event
        {
            if *repeat {
                return;
            }
            self.process_key(*code, *state == ElementState::Pressed);
        }
    }

    pub fn process_key(&mut self, code: KeyCode, pressed: bool) {
        match code {
            KeyCode::ArrowLeft => self.orbit_left = pressed,
            KeyCode::ArrowRight => self.orbit_right = pressed,
            KeyCode::ArrowUp => self.orbit_up = pressed,
            KeyCode::ArrowDown => self.orbit_down = pressed,
            KeyCode::BracketLeft => self.zoom_in = pressed,
            KeyCode::BracketRight => self.zoom_out = pressed,
            _ => {}
        }
    }

    pub fn update(&mut self, cam: &mut OrbitCamera, dt: f32) {
        if self.orbit_left {
            cam.azimuth -= self.rot_speed * dt;
        }
        if self.orbit_right {
            cam.azimuth += self.rot_speed * dt;
        }
        if self.orbit_up {
            cam.elevation += self.rot_speed * dt;
        }
        if self.orbit_down {
            cam.elevation -= self.rot_speed * dt;
        }

        if self.zoom_in {
            cam.radius -= self.zoom_speed * dt;
        }
        if self.zoom_out {
            cam.radius += self.zoom_speed * dt;
        }

        cam.radius = cam.radius.clamp(MIN_RADIUS, MAX_RADIUS);
        cam.elevation = cam.elevation.clamp(MIN_ELEVATION, MAX_ELEVATION);
    }
}

pub fn view_proj_matrix(camera: &OrbitCamera, width: u32, height: u32) -> Mat4 {
    let view = Mat4::look_at_rh(camera.eye(), Vec3::ZERO, Vec3::Y);
    let aspect = (width.max(1) as f32) / (height.max(1) as f32);
    let proj = Mat4::perspective_rh(60.0_f32.to_radians(), aspect, 0.1, 100.0);
    proj * view
}

pub fn update_camera_buffer(
    queue: &Queue,
    camera_buf: &Buffer,
    camera: &OrbitCamera,
    width: u32,
    height: u32,
) {
    let vp = view_proj_matrix(camera, width, height).to_cols_array();
    queue.write_buffer(camera_buf, 0, bytemuck::cast_slice(&[vp]));
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn default_controller() -> CameraController {
        CameraController::new(1.5, 6.0)
    }

    #[test]
    fn idle_update_changes_nothing() {
        let mut cam = OrbitCamera::new(14.0, 0.3, 0.2);
        let mut ctl = default_controller();
        ctl.update(&mut cam, 2.0);
        assert!((cam.radius - 14.0).abs() < EPS);
        assert!((cam.azimuth - 0.3).abs() < EPS);
        assert!((cam.elevation - 0.2).abs() < EPS);
    }

    #[test]
    fn left_held_one_second_rotates_by_rot_speed() {
        let mut cam = OrbitCamera::new(14.0, 0.0, 0.0);
        let mut ctl = default_controller();
        ctl.process_key(KeyCode::ArrowLeft, true);
        ctl.update(&mut cam, 1.0);
        assert!((cam.azimuth - (-1.5)).abs() < EPS);
    }

    #[test]
    fn zoom_in_saturates_at_min_radius() {
        // 14.0 - 6.0 * 10.0 would be -46 unclamped.
        let mut cam = OrbitCamera::new(14.0, 0.0, 0.0);
        let mut ctl = default_controller();
        ctl.process_key(KeyCode::BracketLeft, true);
        ctl.update(&mut cam, 10.0);
        assert!((cam.radius - MIN_RADIUS).abs() < EPS);
    }

    #[test]
    fn bounds_hold_for_any_key_combination() {
        let keys = [
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::BracketLeft,
            KeyCode::BracketRight,
        ];
        for mask in 0..(1u32 << keys.len()) {
            let mut cam = OrbitCamera::new(14.0, 0.0, 0.0);
            let mut ctl = default_controller();
            for (i, code) in keys.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    ctl.process_key(*code, true);
                }
            }
            for dt in [0.0, 0.016, 1.0, 7.5, 100.0] {
                ctl.update(&mut cam, dt);
                assert!(cam.radius >= MIN_RADIUS && cam.radius <= MAX_RADIUS);
                assert!(cam.elevation >= MIN_ELEVATION && cam.elevation <= MAX_ELEVATION);
            }
        }
    }

    #[test]
    fn release_stops_motion() {
        let mut cam = OrbitCamera::new(14.0, 0.0, 0.0);
        let mut ctl = default_controller();
        ctl.process_key(KeyCode::ArrowRight, true);
        ctl.update(&mut cam, 1.0);
        ctl.process_key(KeyCode::ArrowRight, false);
        ctl.update(&mut cam, 1.0);
        assert!((cam.azimuth - 1.5).abs() < EPS);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut cam = OrbitCamera::new(14.0, 0.0, 0.0);
        let mut ctl = default_controller();
        ctl.process_key(KeyCode::KeyW, true);
        ctl.process_key(KeyCode::Space, true);
        ctl.update(&mut cam, 1.0);
        assert!(cam.azimuth.abs() < EPS);
        assert!((cam.radius - 14.0).abs() < EPS);
    }

    #[test]
    fn eye_on_positive_z_at_rest_angles() {
        let eye = eye_from_spherical(14.0, 0.0, 0.0);
        assert!(eye.x.abs() < EPS);
        assert!(eye.y.abs() < EPS);
        assert!((eye.z - 14.0).abs() < EPS);
    }

    #[test]
    fn view_looks_at_origin() {
        let cam = OrbitCamera::new(14.0, 0.7, 0.4);
        let view = Mat4::look_at_rh(cam.eye(), Vec3::ZERO, Vec3::Y);
        // The origin lands on the view-space -Z axis, radius units out.
        let origin_vs = view.transform_point3(Vec3::ZERO);
        assert!(origin_vs.x.abs() < 1e-4);
        assert!(origin_vs.y.abs() < 1e-4);
        assert!((origin_vs.z - (-14.0)).abs() < 1e-4);
    }

    #[test]
    fn azimuth_is_unbounded() {
        let mut cam = OrbitCamera::new(14.0, 0.0, 0.0);
        let mut ctl = default_controller();
        ctl.process_key(KeyCode::ArrowRight, true);
        ctl.update(&mut cam, 100.0);
        assert!((cam.azimuth - 150.0).abs() < 1e-3);
    }
}
