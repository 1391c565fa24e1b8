// GPU texture that mirrors the CPU display canvas

use super::canvas::Canvas;
use glam::UVec2;

/// Display-sized texture re-uploaded from the canvas every frame
pub struct CanvasTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    size: wgpu::Extent3d,
}

impl CanvasTexture {
    /// Create an empty texture of the display's size
    pub fn new(device: &wgpu::Device, display: UVec2, label: Option<&str>) -> Self {
        let size = wgpu::Extent3d {
            width: display.x,
            height: display.y,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest in both directions keeps pixel art crisp when scaled up
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size,
        }
    }

    /// Copy the canvas pixels into the texture. The canvas must match the
    /// texture size; mismatched frames are skipped.
    pub fn upload(&self, queue: &wgpu::Queue, canvas: &Canvas) -> bool {
        let canvas_size = canvas.size();
        if canvas_size.x != self.size.width || canvas_size.y != self.size.height {
            log::warn!(
                "Canvas is {}x{} but texture is {}x{}, skipping upload",
                canvas_size.x,
                canvas_size.y,
                self.size.width,
                self.size.height
            );
            return false;
        }

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.size.width),
                rows_per_image: Some(self.size.height),
            },
            self.size,
        );
        true
    }
}
