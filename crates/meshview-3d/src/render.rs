use crate::depth::create_depth;
use crate::model::{GpuMesh, Material, create_model_ubo};
use crate::pipeline::{Layouts, create_pipeline};
use wgpu::*;

struct InstanceUbo {
    _model_buf: Buffer,
    model_bg: BindGroup,
}

pub struct SceneRenderer {
    pub render_pipeline: RenderPipeline,
    pub depth_view: TextureView,
    pub depth_tex: Texture,
    pub camera_bg: BindGroup,
    pub camera_buf: Buffer,
    pub mesh: Option<GpuMesh>,
    pub material: Material,
    instances: Vec<InstanceUbo>,
}

impl SceneRenderer {
    pub fn new(
        device: &Device,
        surface_format: TextureFormat,
        width: u32,
        height: u32,
        mesh: Option<GpuMesh>,
        material: Material,
        instance_xforms: &[glam::Mat4],
        layouts: &Layouts,
    ) -> Self {
        let (depth_view, depth_tex) = create_depth(device, width, height);

        let (render_pipeline, camera_bg, camera_buf) =
            create_pipeline(device, surface_format, layouts);

        let instances = instance_xforms
            .iter()
            .map(|&xform| {
                let (model_buf, model_bg) = create_model_ubo(device, &layouts.model_bgl, xform);
                InstanceUbo {
                    _model_buf: model_buf,
                    model_bg,
                }
            })
            .collect();

        Self {
            render_pipeline,
            depth_view,
            depth_tex,
            camera_bg,
            camera_buf,
            mesh,
            material,
            instances,
        }
    }

    pub fn resize(&mut self, device: &Device, width: u32, height: u32) {
        let (dv, dt) = create_depth(device, width, height);
        self.depth_view = dv;
        self.depth_tex = dt;
    }

    pub fn render(&self, encoder: &mut CommandEncoder, target_view: &TextureView) {
        let mut r_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: target_view,
                depth_slice: None,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::BLACK),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        // A missing mesh still clears the frame; it just draws nothing.
        let Some(mesh) = &self.mesh else {
            return;
        };

        r_pass.set_pipeline(&self.render_pipeline);
        r_pass.set_bind_group(0, &self.camera_bg, &[]);
        r_pass.set_bind_group(2, &self.material.bind_group, &[]);
        r_pass.set_vertex_buffer(0, mesh.vbuf.slice(..));
        r_pass.set_index_buffer(mesh.ibuf.slice(..), IndexFormat::Uint32);

        for instance in &self.instances {
            r_pass.set_bind_group(1, &instance.model_bg, &[]);
            r_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
