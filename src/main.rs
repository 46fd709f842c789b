mod app;
mod config;

use crate::app::App;
use crate::config::ViewerConfig;
use meshview_runtime::Graphics;
use winit::event_loop::EventLoop;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let event_loop = EventLoop::<Graphics>::with_user_event().build().unwrap();

    let config = ViewerConfig::load_or_default("meshview.toml");
    let mut app = App::new(&event_loop, config);
    let _ = event_loop.run_app(&mut app);
}
