//! RAII wrappers for device-created GPU objects
//!
//! Every GPU object the override creates is held in one of these wrappers so
//! that a failure part-way through building a resource set unwinds cleanly:
//! dropping the partially built set destroys exactly the objects that were
//! created, in declaration-reverse order, with no manual cleanup path.

use crate::device::device::Device;
use crate::device::types::*;
use std::sync::Arc;

macro_rules! define_owned {
    ($(#[$meta:meta])* $name:ident, $handle:ty, $destroy:ident) => {
        $(#[$meta])*
        pub struct $name {
            device: Arc<dyn Device>,
            handle: $handle,
        }

        impl $name {
            /// Wrap a freshly created handle
            pub fn new(device: Arc<dyn Device>, handle: $handle) -> Self {
                Self { device, handle }
            }

            /// The wrapped handle
            pub fn handle(&self) -> $handle {
                self.handle
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                if !self.handle.is_null() {
                    self.device.$destroy(self.handle);
                }
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.handle).finish()
            }
        }
    };
}

define_owned!(
    /// Owning wrapper around a texture
    OwnedTexture,
    ResourceHandle,
    destroy_texture
);

define_owned!(
    /// Owning wrapper around a view
    OwnedView,
    ViewHandle,
    destroy_view
);

define_owned!(
    /// Owning wrapper around a sampler
    OwnedSampler,
    SamplerHandle,
    destroy_sampler
);

define_owned!(
    /// Owning wrapper around a pipeline
    OwnedPipeline,
    PipelineHandle,
    destroy_pipeline
);

define_owned!(
    /// Owning wrapper around a pipeline layout
    OwnedPipelineLayout,
    PipelineLayoutHandle,
    destroy_pipeline_layout
);
