//! Proxy texture descriptor translation
//!
//! Pure function from the actual back buffer's descriptor to the proxy
//! texture's. The proxy inherits format and sample count so the game's
//! rendering is bit-compatible, takes the originally requested dimensions,
//! and declares exactly the usage the override needs: render target for the
//! redirected game rendering, shader resource for the composition sample,
//! copy source for host-side capture paths.

use crate::device::{ResourceUsage, TextureDesc};

/// Compute the descriptor of a proxy back-buffer texture
///
/// # Arguments
///
/// * `actual` - Descriptor of the real (forced-size) back buffer
/// * `original_width` - Width the application originally requested
/// * `original_height` - Height the application originally requested
pub fn proxy_texture_desc(
    actual: &TextureDesc,
    original_width: u32,
    original_height: u32,
) -> TextureDesc {
    TextureDesc {
        width: original_width,
        height: original_height,
        format: actual.format,
        samples: actual.samples,
        usage: ResourceUsage::RENDER_TARGET
            | ResourceUsage::COPY_SOURCE
            | ResourceUsage::SHADER_RESOURCE,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
