pub mod depth;
pub mod model;
pub mod pipeline;
pub mod render;

pub use depth::create_depth;
pub use model::{GpuMesh, Material, Vertex, create_model_ubo};
pub use pipeline::{Layouts, create_bind_group_layouts, create_pipeline};
pub use render::SceneRenderer;
