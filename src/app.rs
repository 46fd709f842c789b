use crate::config::ViewerConfig;
use meshview_runtime::{Graphics, RcWindow, create_graphics};
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

const FPS: u64 = 120;
const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / FPS);

enum State {
    Ready(Graphics),
    Init(Option<EventLoopProxy<Graphics>>),
}

pub struct App {
    state: State,
    render_target: Instant,
    config: ViewerConfig,
}

impl App {
    pub fn new(event_loop: &EventLoop<Graphics>, config: ViewerConfig) -> Self {
        Self {
            state: State::Init(Some(event_loop.create_proxy())),
            render_target: Instant::now(),
            config,
        }
    }

    fn draw(&mut self) {
        if let State::Ready(gfx) = &mut self.state {
            gfx.draw();
        }
    }

    fn resized(&mut self, size: PhysicalSize<u32>) {
        if let State::Ready(gfx) = &mut self.state {
            gfx.resize(size);
        }
    }
}

impl ApplicationHandler<Graphics> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let State::Init(proxy) = &mut self.state {
            if let Some(proxy) = proxy.take() {
                let win_attr = Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(PhysicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    ));

                let window: RcWindow = std::sync::Arc::new(
                    event_loop
                        .create_window(win_attr)
                        .expect("create window err."),
                );
                pollster::block_on(create_graphics(
                    window,
                    self.config.viewer_options(),
                    proxy,
                ));
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, graphics: Graphics) {
        graphics.request_redraw();
        self.state = State::Ready(graphics);
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, _cause: StartCause) {
        if self.render_target <= Instant::now() {
            self.render_target += FRAME_TIME;
            if let State::Ready(gfx) = &mut self.state {
                gfx.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => self.resized(size),
            WindowEvent::RedrawRequested => {
                self.draw();
                let now = Instant::now();
                if self.render_target <= now {
                    self.render_target = now + FRAME_TIME;
                    if let State::Ready(gfx) = &mut self.state {
                        gfx.request_redraw();
                    }
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            other => {
                if let State::Ready(gfx) = &mut self.state {
                    gfx.handle_window_event(&other);
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.render_target));
    }
}
