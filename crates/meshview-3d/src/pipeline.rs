use crate::depth::DEPTH_FORMAT;
use crate::model::Vertex;
use wgpu::*;

pub struct Layouts {
    pub camera_bgl: BindGroupLayout,
    pub model_bgl: BindGroupLayout,
    pub material_bgl: BindGroupLayout,
}

pub fn create_bind_group_layouts(device: &Device) -> Layouts {
    let uniform_entry = |binding| BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::VERTEX,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };

    let camera_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("camera_bgl"),
        entries: &[uniform_entry(0)],
    });

    let model_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("model_bgl"),
        entries: &[uniform_entry(0)],
    });

    let material_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("material_bgl"),
        entries: &[
            BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 1,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    Layouts {
        camera_bgl,
        model_bgl,
        material_bgl,
    }
}

pub fn create_pipeline(
    device: &Device,
    surface_format: TextureFormat,
    layouts: &Layouts,
) -> (RenderPipeline, BindGroup, Buffer) {
    let camera_buf = device.create_buffer(&BufferDescriptor {
        label: Some("camera_ubo"),
        size: std::mem::size_of::<[f32; 16]>() as BufferAddress,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let camera_bg = device.create_bind_group(&BindGroupDescriptor {
        label: Some("camera_bg"),
        layout: &layouts.camera_bgl,
        entries: &[BindGroupEntry {
            binding: 0,
            resource: camera_buf.as_entire_binding(),
        }],
    });

    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("scene_pipeline_layout"),
        bind_group_layouts: &[
            &layouts.camera_bgl,
            &layouts.model_bgl,
            &layouts.material_bgl,
        ],
        push_constant_ranges: &[],
    });

    let render_pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(ColorTargetState {
                format: surface_format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            // The source meshes are not guaranteed a consistent winding.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    });

    (render_pipeline, camera_bg, camera_buf)
}
