//! Core value types shared by the device abstraction
//!
//! Handles are opaque u64 newtypes: the interception layer never dereferences
//! GPU objects, it only correlates and forwards them. A raw value of 0 is the
//! null handle for every kind.

use bitflags::bitflags;

// ===== OPAQUE HANDLES =====

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            /// The null handle (raw value 0)
            pub const NULL: $name = $name(0);

            /// Returns true if this is the null handle
            pub fn is_null(&self) -> bool {
                self.0 == 0
            }
        }
    };
}

define_handle!(
    /// Opaque handle to a GPU resource (texture)
    ResourceHandle
);

define_handle!(
    /// Opaque handle to a resource view (RTV or SRV)
    ViewHandle
);

define_handle!(
    /// Opaque handle to a sampler object
    SamplerHandle
);

define_handle!(
    /// Opaque handle to a pipeline state object
    PipelineHandle
);

define_handle!(
    /// Opaque handle to a pipeline layout / root signature
    PipelineLayoutHandle
);

define_handle!(
    /// Opaque handle identifying a swapchain (native pointer value)
    SwapchainHandle
);

define_handle!(
    /// Opaque handle identifying an OS window (HWND value)
    WindowHandle
);

// ===== TEXTURE TYPES =====

/// Pixel format of a texture
///
/// Only the formats a back buffer can plausibly carry; the override never
/// converts formats, it propagates the back buffer's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    Unknown,
    R8G8B8A8_UNORM,
    R8G8B8A8_UNORM_SRGB,
    B8G8R8A8_UNORM,
    B8G8R8A8_UNORM_SRGB,
    R10G10B10A2_UNORM,
    R16G16B16A16_FLOAT,
}

bitflags! {
    /// Resource usage / state flags
    ///
    /// Used both for creation-time usage declaration and as the states named
    /// in barrier transitions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResourceUsage: u32 {
        const RENDER_TARGET   = 1 << 0;
        const SHADER_RESOURCE = 1 << 1;
        const COPY_SOURCE     = 1 << 2;
        const COPY_DEST       = 1 << 3;
        const DEPTH_STENCIL   = 1 << 4;
        const UNORDERED_ACCESS = 1 << 5;
        const PRESENT         = 1 << 6;
    }
}

/// Descriptor of a 2D texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// MSAA sample count (1 = no multisampling)
    pub samples: u32,
    /// Usage flags the texture is created with
    pub usage: ResourceUsage,
}

// ===== SAMPLER TYPES =====

/// Texture filtering mode for the composition sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest-neighbor (point) sampling
    Point,
    /// Bilinear interpolation
    Linear,
    /// Anisotropic filtering
    Anisotropic,
}

/// Texture address mode outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Clamp,
    Wrap,
    Border,
}

/// Descriptor for creating a sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDesc {
    /// Min/mag/mip filter
    pub filter: FilterMode,
    /// Address mode, applied to u, v and w
    pub address: AddressMode,
}

// ===== VIEW TYPES =====

/// Kind of view onto a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Render-target view
    RenderTarget,
    /// Shader-resource view
    ShaderResource,
}

// ===== PIPELINE TYPES =====

/// Shader stages relevant to the composition pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

/// Descriptor binding type within a pipeline layout parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorType {
    Sampler,
    ShaderResourceView,
}

/// One parameter slot of a pipeline layout (push-descriptor range)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineLayoutParam {
    /// Descriptor type bound at this slot
    pub descriptor_type: DescriptorType,
    /// First shader register covered
    pub binding: u32,
    /// Number of descriptors in the range
    pub count: u32,
    /// Shader stage visibility
    pub visibility: ShaderStage,
}

/// A shader module as an opaque bytecode blob
#[derive(Debug, Clone, Copy)]
pub struct ShaderDesc {
    /// Bytecode (or backend-compiled source) bytes
    pub code: &'static [u8],
    /// Entry point name
    pub entry_point: &'static str,
}

/// Descriptor for creating a graphics pipeline
///
/// Deliberately minimal: the composition pass draws a fullscreen triangle
/// with no vertex input, no depth and no blending.
#[derive(Debug, Clone, Copy)]
pub struct PipelineDesc {
    /// Pipeline layout the pipeline is built against
    pub layout: PipelineLayoutHandle,
    /// Vertex shader
    pub vertex_shader: ShaderDesc,
    /// Pixel shader
    pub pixel_shader: ShaderDesc,
    /// Render-target format
    pub render_target_format: TextureFormat,
}

// ===== BACKEND API =====

/// Graphics API behind a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceApi {
    D3D10,
    D3D11,
    D3D12,
    OpenGl,
    Vulkan,
}

impl DeviceApi {
    /// Returns true for APIs whose swapchains are DXGI-backed
    ///
    /// Native exclusive-fullscreen transitions are only meaningful there.
    pub fn is_dxgi(&self) -> bool {
        matches!(self, DeviceApi::D3D10 | DeviceApi::D3D11 | DeviceApi::D3D12)
    }
}
