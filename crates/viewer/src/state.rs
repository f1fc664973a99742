//! Viewer state: owned subsystems, scene resources, and the per-frame
//! update/render drive.

use anyhow::Result;
use engine_core::Time;
use glam::Mat4;
use input::InputState;
use renderer::{generate_ring, generate_sphere, Camera, DrawKind, Mesh, Renderer};
use scene::{compose, ring_transform, solar_system, sun_transform, OrbitBody};
use std::sync::Arc;
use winit::window::{CursorGrabMode, Window};

use crate::config::ViewerConfig;

/// Sun render scale. The sun sits at the origin and only spins visually via
/// its lift rotation; it is not an [`OrbitBody`].
const SUN_SCALE: f32 = 0.9;
const SUN_TEXTURE: &str = "assets/sun.jpg";

/// Sphere tessellation shared by the sun and all planets (scaled per body).
const SPHERE_SECTORS: u32 = 48;
const SPHERE_STACKS: u32 = 24;

/// A planet ready to draw: its descriptor plus GPU-side resources.
struct BodySlot {
    body: OrbitBody,
    texture: wgpu::BindGroup,
    /// Ring mesh and texture, present only when the descriptor carries a ring.
    ring: Option<(Mesh, wgpu::BindGroup)>,
}

pub struct ViewerState {
    time: Time,
    pub(crate) input: InputState,
    pub(crate) camera: Camera,
    pub(crate) renderer: Renderer,
    pub running: bool,

    sphere_mesh: Mesh,
    sun_texture: wgpu::BindGroup,
    bodies: Vec<BodySlot>,
}

impl ViewerState {
    pub async fn new(window: Arc<Window>, config: &ViewerConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync).await?;

        let mut camera = Camera::default();
        camera.sensitivity = config.sensitivity;
        camera.move_speed = config.move_speed;
        if config.fov_min < config.fov_max {
            camera.fov_min = config.fov_min;
            camera.fov_max = config.fov_max;
            camera.fov_degrees = camera.fov_degrees.clamp(camera.fov_min, camera.fov_max);
        } else {
            log::warn!(
                "Invalid FOV range {}..{} in config, keeping defaults",
                config.fov_min,
                config.fov_max
            );
        }
        camera.set_aspect(renderer.size.width, renderer.size.height);

        let sphere_data = generate_sphere(1.0, SPHERE_SECTORS, SPHERE_STACKS);
        let sphere_mesh = sphere_data.upload(&renderer.device);

        let sun_texture = renderer.load_texture_bind_group(SUN_TEXTURE);

        let bodies = solar_system()
            .into_iter()
            .map(|body| {
                let texture = renderer.load_texture_bind_group(body.texture);
                let ring = body.ring.map(|ring| {
                    let mesh = generate_ring(ring.inner_radius, ring.outer_radius, 128)
                        .upload(&renderer.device);
                    let texture = renderer.load_texture_bind_group(ring.texture);
                    (mesh, texture)
                });
                BodySlot {
                    body,
                    texture,
                    ring,
                }
            })
            .collect();

        log::info!("Scene ready: sun + 8 planets");

        Ok(Self {
            time: Time::new(),
            input: InputState::new(),
            camera,
            renderer,
            running: true,
            sphere_mesh,
            sun_texture,
            bodies,
        })
    }

    /// Advance one frame: timing, input consumption, camera control.
    pub fn update(&mut self) {
        self.time.update();
        let dt = self.time.delta_seconds();

        if self.input.is_quit_pressed() {
            self.running = false;
            return;
        }

        if self.input.is_capture_toggle_pressed() {
            let capture = !self.input.is_cursor_captured();
            self.set_cursor_captured(capture);
        }

        // Look input only steers the camera while the cursor is captured; the
        // input layer already drops deltas accumulated outside capture.
        let look = self.input.look_delta();
        if look != glam::Vec2::ZERO {
            self.camera.process_mouse(look);
        }

        self.camera.process_movement(self.input.movement_axes(), dt);

        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            self.camera.process_scroll(scroll);
        }

        if self.time.frame_count() % 600 == 0 {
            log::debug!("t={:.1}s fps={:.0}", self.time.elapsed_seconds(), self.time.fps());
        }

        // Clear input for next frame
        self.input.end_frame();
    }

    /// Grab or release the cursor, keeping window and input layer in sync.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        if captured {
            let _ = self
                .renderer
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.renderer.window.set_cursor_grab(CursorGrabMode::Confined));
            self.renderer.window.set_cursor_visible(false);
        } else {
            let _ = self.renderer.window.set_cursor_grab(CursorGrabMode::None);
            self.renderer.window.set_cursor_visible(true);
        }
        self.input.set_cursor_captured(captured);
    }

    /// Draw the scene. Surface loss reconfigures and skips the frame; only
    /// out-of-memory is fatal.
    pub fn render(&mut self) -> Result<()> {
        self.renderer.update_camera(&self.camera);

        let mut frame = match self.renderer.begin_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.renderer.size;
                self.renderer.resize(size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout; skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let t = self.time.elapsed_seconds();

        self.renderer.draw(
            &mut frame,
            DrawKind::Sun,
            &self.sphere_mesh,
            &self.sun_texture,
            sun_transform(SUN_SCALE),
        );

        // Opaque planets first, then the translucent ring, so blending sees
        // finished depth.
        let mut ring_draw = None;
        for slot in &self.bodies {
            let model = compose(&slot.body, Mat4::IDENTITY, t);
            self.renderer.draw(
                &mut frame,
                DrawKind::Body,
                &self.sphere_mesh,
                &slot.texture,
                model,
            );
            if let (Some((mesh, texture)), Some(ring)) = (&slot.ring, &slot.body.ring) {
                ring_draw = Some((mesh, texture, ring_transform(model, ring.scale)));
            }
        }
        if let Some((mesh, texture, model)) = ring_draw {
            self.renderer
                .draw(&mut frame, DrawKind::Ring, mesh, texture, model);
        }

        self.renderer.finish_frame(frame);
        Ok(())
    }
}
