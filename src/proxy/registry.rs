//! Concurrent swapchain registry
//!
//! Two independently locked maps:
//! - the registry proper, keyed by native swapchain handle, holding one
//!   resource set per managed swapchain
//! - the pending-creation side table, keyed by window handle, correlating
//!   the creation-time requested dimensions with the init event that follows
//!
//! The pending lock is never taken while the registry lock is held.

use crate::device::{Device, SwapchainHandle, WindowHandle};
use crate::engine_info;
use crate::proxy::resource_set::SwapchainResourceSet;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard};

const LOG_SOURCE: &str = "override::registry";

/// Dimensions stashed between create and init of one swapchain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCreationInfo {
    /// Width the application originally requested
    pub original_width: u32,
    /// Height the application originally requested
    pub original_height: u32,
}

/// Registry of managed swapchains plus the pending-creation side table
#[derive(Default)]
pub struct SwapchainRegistry {
    swapchains: Mutex<FxHashMap<SwapchainHandle, SwapchainResourceSet>>,
    pending: Mutex<FxHashMap<WindowHandle, PendingCreationInfo>>,
}

impl SwapchainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stash the requested dimensions for a window's upcoming init event
    ///
    /// A second creation for the same window before init consumes the first
    /// entry simply overwrites it; only the newest request is meaningful.
    pub fn store_pending(&self, window: WindowHandle, info: PendingCreationInfo) {
        self.pending.lock().unwrap().insert(window, info);
    }

    /// Consume the pending entry for a window, if any (read-once)
    pub fn take_pending(&self, window: WindowHandle) -> Option<PendingCreationInfo> {
        self.pending.lock().unwrap().remove(&window)
    }

    /// Lock the registry map for a lookup-then-use sequence
    ///
    /// The guard keeps the map locked while the caller works with the
    /// resource set it looked up, so the set cannot be destroyed under it.
    pub fn lock(&self) -> MutexGuard<'_, FxHashMap<SwapchainHandle, SwapchainResourceSet>> {
        self.swapchains.lock().unwrap()
    }

    /// Insert or replace the resource set for a swapchain
    pub fn insert(&self, handle: SwapchainHandle, set: SwapchainResourceSet) {
        self.swapchains.lock().unwrap().insert(handle, set);
    }

    /// Remove and drop the resource set for a swapchain
    ///
    /// Returns true if an entry existed.
    pub fn remove(&self, handle: SwapchainHandle) -> bool {
        let removed = self.swapchains.lock().unwrap().remove(&handle).is_some();
        if removed {
            engine_info!(LOG_SOURCE, "Cleaned up swapchain override data");
        }
        removed
    }

    /// Returns true if the swapchain has a registry entry (active or not)
    pub fn contains(&self, handle: SwapchainHandle) -> bool {
        self.swapchains.lock().unwrap().contains_key(&handle)
    }

    /// Number of registered swapchains
    pub fn len(&self) -> usize {
        self.swapchains.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.swapchains.lock().unwrap().is_empty()
    }

    /// Number of pending creation entries
    pub fn pending_len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Drop every resource set and every pending entry
    pub fn clear(&self) {
        self.swapchains.lock().unwrap().clear();
        self.pending.lock().unwrap().clear();
    }
}

/// Find the active resource set for a device within a locked registry map
///
/// Matching is by device identity (same adapter object), the way command
/// list events are correlated: they carry a device, not a swapchain.
pub fn find_active_for_device<'a>(
    map: &'a FxHashMap<SwapchainHandle, SwapchainResourceSet>,
    device: &Arc<dyn Device>,
) -> Option<&'a SwapchainResourceSet> {
    map.values()
        .find(|set| set.is_active() && Arc::ptr_eq(set.device(), device))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
