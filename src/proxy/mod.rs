/// Proxy module - per-swapchain override resources
///
/// Descriptor translation, the embedded composition shaders, the composition
/// pipeline objects, the per-swapchain resource set, and the concurrent
/// registry tying sets to native swapchain handles.

// Module declarations
pub mod translate;
pub mod shaders;
pub mod composition;
pub mod resource_set;
pub mod registry;

// Re-export the main types
pub use composition::{CompositionPipeline, SAMPLER_PARAM_INDEX, SRV_PARAM_INDEX};
pub use registry::{find_active_for_device, PendingCreationInfo, SwapchainRegistry};
pub use resource_set::SwapchainResourceSet;
pub use translate::proxy_texture_desc;
