//! Per-swapchain proxy resource set
//!
//! Everything the override holds for one managed swapchain: the proxy
//! textures at the originally requested size, their render/shader views, the
//! composition pipeline, and the cached identities of the real back buffers
//! used for render-target substitution.

use crate::device::{
    Device, FilterMode, OwnedTexture, OwnedView, ResourceHandle, ResourceUsage, Swapchain,
    ViewHandle, ViewKind,
};
use crate::engine_bail;
use crate::error::Result;
use crate::proxy::composition::CompositionPipeline;
use crate::proxy::translate::proxy_texture_desc;
use crate::{engine_debug, engine_info};
use std::sync::Arc;

const LOG_SOURCE: &str = "override::resource_set";

/// Proxy resources for one swapchain
///
/// Field order is destruction order: the composition pipeline first, then
/// views, then the textures the views were created on. A failure part-way
/// through `build` drops whatever was already created, in the same order.
pub struct SwapchainResourceSet {
    original_width: u32,
    original_height: u32,
    actual_width: u32,
    actual_height: u32,
    override_active: bool,
    composition: Option<CompositionPipeline>,
    proxy_render_views: Vec<OwnedView>,
    proxy_shader_views: Vec<OwnedView>,
    proxy_textures: Vec<OwnedTexture>,
    actual_back_buffers: Vec<ResourceHandle>,
    device: Arc<dyn Device>,
}

impl SwapchainResourceSet {
    /// Build the full proxy resource set for a swapchain
    ///
    /// # Arguments
    ///
    /// * `device` - Device owning the swapchain
    /// * `swapchain` - The just-initialized swapchain (forced dimensions)
    /// * `original_width` / `original_height` - Dimensions the application
    ///   originally requested
    /// * `filter` - Scaling filter for the composition sampler
    ///
    /// # Errors
    ///
    /// Returns an error on any GPU object creation failure. All objects
    /// created before the failure are destroyed before returning.
    pub fn build(
        device: Arc<dyn Device>,
        swapchain: &dyn Swapchain,
        original_width: u32,
        original_height: u32,
        filter: FilterMode,
    ) -> Result<Self> {
        let back_buffer_count = swapchain.back_buffer_count();
        if back_buffer_count == 0 {
            engine_bail!(LOG_SOURCE, LifecycleMismatch, "swapchain has no back buffers");
        }

        let actual_desc = device.texture_desc(swapchain.back_buffer(0)?)?;
        let proxy_desc = proxy_texture_desc(&actual_desc, original_width, original_height);

        let mut proxy_textures = Vec::with_capacity(back_buffer_count as usize);
        let mut proxy_render_views = Vec::with_capacity(back_buffer_count as usize);
        let mut proxy_shader_views = Vec::with_capacity(back_buffer_count as usize);
        let mut actual_back_buffers = Vec::with_capacity(back_buffer_count as usize);

        for i in 0..back_buffer_count {
            // Game rendering lands here first, so render target is the
            // steady state between presents
            let texture = OwnedTexture::new(
                device.clone(),
                device.create_texture(&proxy_desc, ResourceUsage::RENDER_TARGET)?,
            );
            let render_view = OwnedView::new(
                device.clone(),
                device.create_view(texture.handle(), ViewKind::RenderTarget, proxy_desc.format)?,
            );
            let shader_view = OwnedView::new(
                device.clone(),
                device.create_view(texture.handle(), ViewKind::ShaderResource, proxy_desc.format)?,
            );

            actual_back_buffers.push(swapchain.back_buffer(i)?);
            proxy_textures.push(texture);
            proxy_render_views.push(render_view);
            proxy_shader_views.push(shader_view);
        }

        let composition = CompositionPipeline::new(&device, actual_desc.format, filter)?;

        engine_info!(
            LOG_SOURCE,
            "Created {} proxy textures at {}x{}",
            back_buffer_count,
            original_width,
            original_height
        );

        Ok(Self {
            original_width,
            original_height,
            actual_width: actual_desc.width,
            actual_height: actual_desc.height,
            override_active: true,
            composition: Some(composition),
            proxy_render_views,
            proxy_shader_views,
            proxy_textures,
            actual_back_buffers,
            device,
        })
    }

    /// Degraded entry for a swapchain whose proxy build failed
    ///
    /// Holds no GPU objects; every hot-path handler skips it. The swapchain
    /// keeps presenting at the forced size without composition.
    pub fn inactive(
        device: Arc<dyn Device>,
        original_width: u32,
        original_height: u32,
        actual_width: u32,
        actual_height: u32,
    ) -> Self {
        engine_debug!(
            LOG_SOURCE,
            "Registering inactive override entry ({}x{} -> {}x{})",
            original_width,
            original_height,
            actual_width,
            actual_height
        );
        Self {
            original_width,
            original_height,
            actual_width,
            actual_height,
            override_active: false,
            composition: None,
            proxy_render_views: Vec::new(),
            proxy_shader_views: Vec::new(),
            proxy_textures: Vec::new(),
            actual_back_buffers: Vec::new(),
            device,
        }
    }

    pub fn is_active(&self) -> bool {
        self.override_active
    }

    pub fn original_width(&self) -> u32 {
        self.original_width
    }

    pub fn original_height(&self) -> u32 {
        self.original_height
    }

    pub fn actual_width(&self) -> u32 {
        self.actual_width
    }

    pub fn actual_height(&self) -> u32 {
        self.actual_height
    }

    /// Horizontal original/actual scale factor
    pub fn scale_x(&self) -> f32 {
        self.original_width as f32 / self.actual_width as f32
    }

    /// Vertical original/actual scale factor
    pub fn scale_y(&self) -> f32 {
        self.original_height as f32 / self.actual_height as f32
    }

    pub fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }

    pub fn back_buffer_count(&self) -> usize {
        self.proxy_textures.len()
    }

    /// Index of the back buffer with this resource identity, if it is one of
    /// the cached real back buffers
    pub fn find_proxy_index(&self, resource: ResourceHandle) -> Option<usize> {
        if resource.is_null() {
            return None;
        }
        self.actual_back_buffers.iter().position(|bb| *bb == resource)
    }

    pub fn proxy_texture(&self, index: usize) -> Option<ResourceHandle> {
        self.proxy_textures.get(index).map(|t| t.handle())
    }

    pub fn proxy_render_view(&self, index: usize) -> Option<ViewHandle> {
        self.proxy_render_views.get(index).map(|v| v.handle())
    }

    pub fn proxy_shader_view(&self, index: usize) -> Option<ViewHandle> {
        self.proxy_shader_views.get(index).map(|v| v.handle())
    }

    pub fn composition(&self) -> Option<&CompositionPipeline> {
        self.composition.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "resource_set_tests.rs"]
mod tests;
