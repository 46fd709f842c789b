use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use winit::{dpi::PhysicalSize, event::WindowEvent, event_loop::EventLoopProxy, window::Window};

use wgpu::{
    Adapter, CommandEncoderDescriptor, Device, ExperimentalFeatures, Features, Instance, Limits,
    MemoryHints, PowerPreference, Queue, RequestAdapterOptions, Surface, SurfaceConfiguration,
    TextureViewDescriptor,
};

pub type RcWindow = std::sync::Arc<Window>;

use meshview_3d::{GpuMesh, Layouts, Material, SceneRenderer, create_bind_group_layouts};
use meshview_camera::{CameraController, OrbitCamera, update_camera_buffer};
use meshview_obj::{load_obj_mesh, load_texture};
use meshview_scene::{GRID_LAYOUT, Scene};

/// Startup knobs for the viewer. Defaults reproduce the stock scene:
/// Suzanne with a UV-map texture, camera starting at radius 14.
pub struct ViewerOptions {
    pub model_path: PathBuf,
    pub texture_path: PathBuf,
    pub flip_v: bool,
    pub flip_y: bool,
    pub start_radius: f32,
    pub rot_speed: f32,
    pub zoom_speed: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("Models/suzanne.obj"),
            texture_path: PathBuf::from("Textures/uvmap.png"),
            flip_v: false,
            flip_y: true,
            start_radius: 14.0,
            rot_speed: 1.5,
            zoom_speed: 6.0,
        }
    }
}

pub async fn create_graphics(
    window: RcWindow,
    options: ViewerOptions,
    proxy: EventLoopProxy<Graphics>,
) {
    let instance = Instance::default();
    let surface = instance
        .create_surface(std::sync::Arc::clone(&window))
        .unwrap();

    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        })
        .await
        .expect("Could not get an adapter (GPU).");

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: Features::empty(),
            required_limits: Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
            memory_hints: MemoryHints::Performance,
            trace: Default::default(),
            experimental_features: ExperimentalFeatures::disabled(),
        })
        .await
        .expect("Failed to get device");

    let size = window.inner_size();
    let width = size.width.max(1);
    let height = size.height.max(1);

    let surface_config = surface
        .get_default_config(&adapter, width, height)
        .expect("Failed to create surface config");
    surface.configure(&device, &surface_config);

    let layouts: Layouts = create_bind_group_layouts(&device);

    // Load failures are not fatal: a missing mesh draws nothing, a
    // missing texture falls back to plain white.
    let mesh = load_mesh_or_none(&device, &options.model_path, options.flip_v);
    let material = load_material_or_fallback(&device, &queue, &layouts, &options);

    let scene = Scene::from_layout(&GRID_LAYOUT);

    let renderer = SceneRenderer::new(
        &device,
        surface_config.format,
        surface_config.width,
        surface_config.height,
        mesh,
        material,
        &scene.instances,
        &layouts,
    );

    let camera = OrbitCamera::new(options.start_radius, 0.0, 0.0);
    let controller = CameraController::new(options.rot_speed, options.zoom_speed);

    update_camera_buffer(
        &queue,
        &renderer.camera_buf,
        &camera,
        surface_config.width,
        surface_config.height,
    );

    let gfx = Graphics {
        window,
        instance,
        surface,
        surface_config,
        adapter,
        device,
        queue,
        renderer,
        camera,
        controller,
        last_frame_time: Instant::now(),
    };

    let _ = proxy.send_event(gfx);
}

fn load_mesh_or_none(device: &Device, path: &Path, flip_v: bool) -> Option<GpuMesh> {
    match load_obj_mesh(device, path, flip_v) {
        Ok(mesh) => Some(mesh),
        Err(err) => {
            log::error!("{err:#}; continuing without a mesh");
            None
        }
    }
}

fn load_material_or_fallback(
    device: &Device,
    queue: &Queue,
    layouts: &Layouts,
    options: &ViewerOptions,
) -> Material {
    match load_texture(
        device,
        queue,
        &layouts.material_bgl,
        &options.texture_path,
        options.flip_y,
    ) {
        Ok(material) => material,
        Err(err) => {
            log::error!("{err:#}; continuing with a white fallback texture");
            Material::fallback_white(device, queue, &layouts.material_bgl)
        }
    }
}

#[allow(dead_code)]
pub struct Graphics {
    pub(crate) window: RcWindow,
    instance: Instance,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    adapter: Adapter,
    device: Device,
    queue: Queue,
    renderer: SceneRenderer,
    camera: OrbitCamera,
    controller: CameraController,
    last_frame_time: Instant,
}

impl Graphics {
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.surface_config.width = new_size.width.max(1);
        self.surface_config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
        self.renderer.resize(
            &self.device,
            self.surface_config.width,
            self.surface_config.height,
        );

        update_camera_buffer(
            &self.queue,
            &self.renderer.camera_buf,
            &self.camera,
            self.surface_config.width,
            self.surface_config.height,
        );
    }

    pub fn draw(&mut self) {
        let now = Instant::now();
        let mut dt = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        if dt > 0.1 {
            dt = 0.1;
        }
        self.controller.update(&mut self.camera, dt);

        update_camera_buffer(
            &self.queue,
            &self.renderer.camera_buf,
            &self.camera,
            self.surface_config.width,
            self.surface_config.height,
        );

        let frame = self
            .surface
            .get_current_texture()
            .expect("Failed to acquire next swap chain texture.");

        let swap_view = frame.texture.create_view(&TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor { label: None });
        self.renderer.render(&mut encoder, &swap_view);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        self.controller.handle_window_event(event);
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn surface_config(&self) -> &SurfaceConfiguration {
        &self.surface_config
    }
}
