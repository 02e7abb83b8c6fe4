/// Device module - the GPU interface boundary of the override core
///
/// Everything the core needs from the host graphics runtime, expressed as
/// traits plus plain value types. The host adapts its real device, command
/// lists and swapchains to these; tests use the mock implementations.

// Module declarations
pub mod types;
pub mod device;
pub mod command_list;
pub mod swapchain;
pub mod owned;

// Re-export everything
pub use types::*;
pub use device::*;
pub use command_list::*;
pub use swapchain::*;
pub use owned::*;

// Mock device for tests (no GPU required)
#[cfg(test)]
pub mod mock_device;
