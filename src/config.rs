use meshview_runtime::ViewerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Meshview".into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsSection {
    pub model: PathBuf,
    pub texture: PathBuf,
    pub flip_v: bool,
    pub flip_y: bool,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            model: PathBuf::from("Models/suzanne.obj"),
            texture: PathBuf::from("Textures/uvmap.png"),
            flip_v: false,
            flip_y: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub radius: f32,
    pub rot_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            radius: 14.0,
            rot_speed: 1.5,
            zoom_speed: 6.0,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowSection,
    pub assets: AssetsSection,
    pub camera: CameraSection,
}

impl ViewerConfig {
    /// A missing config file is the normal case and yields the built-in
    /// scene; an unreadable or malformed one is reported and ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                log::warn!("could not read {}: {err}", path.display());
                return Self::default();
            }
        };

        match toml::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring malformed {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            model_path: self.assets.model.clone(),
            texture_path: self.assets.texture.clone(),
            flip_v: self.assets.flip_v,
            flip_y: self.assets.flip_y,
            start_radius: self.camera.radius,
            rot_speed: self.camera.rot_speed,
            zoom_speed: self.camera.zoom_speed,
        }
    }
}
