/// Swapchain trait and creation description
///
/// The creation description is what on_create_swapchain mutates before the
/// host actually creates the swapchain; the trait is the live object the host
/// adapts for init/present/destroy events.

use crate::device::device::Device;
use crate::device::types::*;
use crate::error::Result;
use bitflags::bitflags;
use std::sync::Arc;

bitflags! {
    /// Swapchain creation flags (DXGI_SWAP_CHAIN_FLAG subset)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SwapchainFlags: u32 {
        /// DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH
        const ALLOW_MODE_SWITCH = 0x2;
    }
}

/// Mutable swapchain creation description
///
/// Mirrors the parts of the host's creation parameters the override is
/// allowed to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapchainDesc {
    /// Back-buffer texture descriptor (dimensions, format, samples, usage)
    pub back_buffer: TextureDesc,
    /// Number of back buffers
    pub back_buffer_count: u32,
    /// Whether the swapchain is created in exclusive fullscreen
    pub fullscreen: bool,
    /// Creation flags
    pub flags: SwapchainFlags,
}

/// Live swapchain abstraction
pub trait Swapchain: Send + Sync {
    /// Native handle value identifying this swapchain across events
    fn native_handle(&self) -> SwapchainHandle;

    /// Window the swapchain presents into, if any
    fn window(&self) -> Option<WindowHandle>;

    /// Device that owns the swapchain
    fn device(&self) -> &Arc<dyn Device>;

    /// Number of back buffers
    fn back_buffer_count(&self) -> u32;

    /// Back-buffer texture at the given index
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn back_buffer(&self, index: u32) -> Result<ResourceHandle>;

    /// Index of the back buffer the next present will show
    fn current_back_buffer_index(&self) -> u32;

    /// Request a native exclusive-fullscreen transition (SetFullscreenState)
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the transition.
    fn set_native_fullscreen(&self, fullscreen: bool) -> Result<()>;
}
