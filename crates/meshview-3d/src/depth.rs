use wgpu::*;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

pub fn create_depth(device: &Device, width: u32, height: u32) -> (TextureView, Texture) {
    let depth = device.create_texture(&TextureDescriptor {
        label: Some("scene_depth"),
        size: Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    let view = depth.create_view(&TextureViewDescriptor::default());
    (view, depth)
}
