use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::*;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [VertexAttribute; 2] = vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex and index buffers for the single shared mesh, uploaded once.
pub struct GpuMesh {
    pub vbuf: Buffer,
    pub ibuf: Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn new(device: &Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vbuf = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: BufferUsages::VERTEX,
        });

        let ibuf = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(indices),
            usage: BufferUsages::INDEX,
        });

        Self {
            vbuf,
            ibuf,
            index_count: indices.len() as u32,
        }
    }
}

/// The diffuse texture bound at group 2. Single mip level, linear
/// filtering.
pub struct Material {
    pub texture: Texture,
    pub bind_group: BindGroup,
}

impl Material {
    pub fn from_rgba8(
        device: &Device,
        queue: &Queue,
        material_bgl: &BindGroupLayout,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Self {
        let size = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&TextureDescriptor {
            label: Some("material_diffuse"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            pixels,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&TextureViewDescriptor::default());
        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("material_sampler"),
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("material_bg"),
            layout: material_bgl,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::TextureView(&view),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
        }
    }

    /// 1x1 opaque white, substituted when the texture on disk cannot be
    /// decoded so draws still bind a valid group 2.
    pub fn fallback_white(device: &Device, queue: &Queue, material_bgl: &BindGroupLayout) -> Self {
        Self::from_rgba8(device, queue, material_bgl, 1, 1, &[0xff, 0xff, 0xff, 0xff])
    }
}

pub fn create_model_ubo(
    device: &Device,
    model_bgl: &BindGroupLayout,
    xform: glam::Mat4,
) -> (Buffer, BindGroup) {
    let model_buf = device.create_buffer_init(&util::BufferInitDescriptor {
        label: Some("model_ubo"),
        contents: bytemuck::cast_slice(&[xform.to_cols_array()]),
        usage: BufferUsages::UNIFORM,
    });

    let model_bg = device.create_bind_group(&BindGroupDescriptor {
        label: Some("model_bg"),
        layout: model_bgl,
        entries: &[BindGroupEntry {
            binding: 0,
            resource: model_buf.as_entire_binding(),
        }],
    });

    (model_buf, model_bg)
}
