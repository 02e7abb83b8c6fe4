/*!
# Swapchain Override

Core of a swapchain resolution override layer: transparently forces an
intercepted application's swapchain to a configured resolution, redirects the
application's rendering into proxy surfaces at the size it asked for, and
composites the result back onto the real back buffer with a GPU upscale at
present time. Fullscreen transitions can be forced or blocked along the way.

The host graphics runtime (the thing actually hooking the graphics API) stays
out of scope: it adapts its device, command lists and swapchains to the
traits in [`device`], forwards its callbacks to the [`engine::OverrideEngine`]
handlers, and supplies a [`config::ConfigStore`] for settings.

## Architecture

- **device**: trait seams to the host GPU runtime (Device, CommandList,
  CommandQueue, Swapchain) plus RAII handle wrappers
- **proxy**: per-swapchain proxy textures/views, the composition pipeline,
  and the concurrent swapchain registry
- **engine**: the interception handlers (create/init/bind/present/
  fullscreen/destroy) tying it all together
- **config**: immutable configuration snapshot over the host's key/value
  store
- **window**: borderless fullscreen decision logic for the host's window
  hooks
- **status**: registry snapshots and the plain-text status report
*/

// Internal modules
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod log;
pub mod proxy;
pub mod status;
pub mod window;

// Crate-level re-exports of the main entry points
pub use config::{Config, ConfigStore, FullscreenMode, MemoryConfigStore};
pub use engine::OverrideEngine;
pub use error::{Error, Result};
pub use status::{format_status_report, SwapchainSnapshot};
