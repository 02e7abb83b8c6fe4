//! Interception engine - the handlers behind every host callback
//!
//! One `OverrideEngine` per host runtime, explicitly constructed with a
//! configuration snapshot. The host wires its swapchain and command-list
//! events to the `on_*` handlers; everything the engine holds between events
//! lives in the swapchain registry.
//!
//! Nothing here returns an error to the host. Every failure path degrades to
//! "skip the override, keep the application presenting".

use crate::config::Config;
use crate::device::{
    CommandList, CommandQueue, DescriptorUpdate, OwnedView, Rect2D, ResourceUsage, ShaderStage,
    Swapchain, SwapchainDesc, SwapchainFlags, SwapchainHandle, ViewHandle, ViewKind, Viewport,
    WindowHandle,
};
use crate::proxy::{
    find_active_for_device, PendingCreationInfo, SwapchainRegistry, SwapchainResourceSet,
    SAMPLER_PARAM_INDEX, SRV_PARAM_INDEX,
};
use crate::status::SwapchainSnapshot;
use crate::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};

const LOG_SOURCE: &str = "override::engine";

/// Fallback dimensions when the pending correlation is lost on a rebuild
const FALLBACK_WIDTH: u32 = 1920;
const FALLBACK_HEIGHT: u32 = 1080;

/// Rects at or above this fraction of the forced dimensions are treated as
/// full-surface and rescaled
const RESCALE_THRESHOLD: f32 = 0.9;

/// The swapchain resolution override engine
pub struct OverrideEngine {
    config: Config,
    registry: SwapchainRegistry,
}

impl OverrideEngine {
    /// Create an engine from a configuration snapshot
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: SwapchainRegistry::new(),
        }
    }

    /// The configuration snapshot this engine runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== CREATION =====

    /// Intercept swapchain creation
    ///
    /// Mutates the description in place and returns true iff it changed
    /// anything; the host commits to the mutated values.
    pub fn on_create_swapchain(
        &self,
        desc: &mut SwapchainDesc,
        window: Option<WindowHandle>,
    ) -> bool {
        let mut modified = false;

        if self.config.is_override_enabled() {
            let requested_width = desc.back_buffer.width;
            let requested_height = desc.back_buffer.height;

            if requested_width != self.config.force_width
                || requested_height != self.config.force_height
            {
                // Remember the requested size for the init event that follows
                if let Some(window) = window {
                    self.registry.store_pending(
                        window,
                        PendingCreationInfo {
                            original_width: requested_width,
                            original_height: requested_height,
                        },
                    );
                }

                desc.back_buffer.width = self.config.force_width;
                desc.back_buffer.height = self.config.force_height;
                engine_info!(
                    LOG_SOURCE,
                    "Swapchain override: Requested size {}x{} -> Forced size {}x{}",
                    requested_width,
                    requested_height,
                    self.config.force_width,
                    self.config.force_height
                );
                modified = true;
            }
        }

        if self.config.is_exclusive_fullscreen_enabled() {
            // Never force fullscreen in the description itself (the backend
            // rejects it with an unset refresh rate); the transition happens
            // after init. Creation only has to keep mode switching possible.
            if !desc.flags.contains(SwapchainFlags::ALLOW_MODE_SWITCH) {
                engine_info!(
                    LOG_SOURCE,
                    "Enabling mode switching for exclusive fullscreen transition"
                );
                desc.flags |= SwapchainFlags::ALLOW_MODE_SWITCH;
                modified = true;
            }
        } else if self.config.is_borderless_fullscreen_enabled() {
            if desc.fullscreen {
                engine_info!(LOG_SOURCE, "Forcing borderless fullscreen mode (windowed)");
                desc.fullscreen = false;
                modified = true;
            }
            if desc.flags.contains(SwapchainFlags::ALLOW_MODE_SWITCH) {
                desc.flags -= SwapchainFlags::ALLOW_MODE_SWITCH;
                modified = true;
            }
        }

        modified
    }

    // ===== INITIALIZATION =====

    /// Build (or rebuild) the proxy resources for a just-initialized swapchain
    pub fn on_init_swapchain(&self, swapchain: &dyn Swapchain, is_resize: bool) {
        if !self.config.is_override_enabled() {
            return;
        }
        let Some(window) = swapchain.window() else {
            return;
        };

        let handle = swapchain.native_handle();
        let pending = self.registry.take_pending(window);
        let device = swapchain.device().clone();

        {
            let mut map = self.registry.lock();

            let (original_width, original_height) = match pending {
                Some(info) => (info.original_width, info.original_height),
                None if map.contains_key(&handle) => {
                    // Rebuild of a managed swapchain without a fresh create
                    // event; the requested size is lost
                    engine_warn!(
                        LOG_SOURCE,
                        "Could not retrieve original swapchain dimensions, using {}x{} as fallback",
                        FALLBACK_WIDTH,
                        FALLBACK_HEIGHT
                    );
                    (FALLBACK_WIDTH, FALLBACK_HEIGHT)
                }
                // Never modified by on_create: leave it unmanaged
                None => return,
            };

            // Drop the previous generation before building the next one
            map.remove(&handle);

            match SwapchainResourceSet::build(
                device.clone(),
                swapchain,
                original_width,
                original_height,
                self.config.scaling_filter,
            ) {
                Ok(set) => {
                    map.insert(handle, set);
                }
                Err(err) => {
                    engine_error!(LOG_SOURCE, "Failed to create proxy resources: {}", err);
                    map.insert(
                        handle,
                        SwapchainResourceSet::inactive(
                            device.clone(),
                            original_width,
                            original_height,
                            self.config.force_width,
                            self.config.force_height,
                        ),
                    );
                }
            }
        }

        // Transition to exclusive fullscreen once, on initial creation only
        if !is_resize && self.config.is_exclusive_fullscreen_enabled() {
            if device.api().is_dxgi() {
                match swapchain.set_native_fullscreen(true) {
                    Ok(()) => engine_info!(
                        LOG_SOURCE,
                        "Successfully transitioned to exclusive fullscreen mode"
                    ),
                    Err(err) => engine_error!(
                        LOG_SOURCE,
                        "Failed to transition to exclusive fullscreen: {}",
                        err
                    ),
                }
            } else {
                engine_warn!(
                    LOG_SOURCE,
                    "Exclusive fullscreen mode is only supported for D3D10/D3D11/D3D12 APIs"
                );
            }
        }
    }

    // ===== COMMAND-RECORDING INTERCEPTION =====

    /// Substitute render-target views of real back buffers with proxy views
    ///
    /// Matching is by resource identity: a view is redirected iff the
    /// resource behind it is one of the cached back buffers of the active
    /// swapchain on the command list's device.
    pub fn on_bind_render_targets(
        &self,
        cmd: &mut dyn CommandList,
        render_targets: &[ViewHandle],
        depth_stencil: Option<ViewHandle>,
    ) {
        if render_targets.is_empty() || !self.config.is_override_enabled() {
            return;
        }
        let device = cmd.device().clone();

        let map = self.registry.lock();
        let Some(set) = find_active_for_device(&map, &device) else {
            return;
        };

        let mut modified = false;
        let mut substituted = render_targets.to_vec();
        for view in substituted.iter_mut() {
            if view.is_null() {
                continue;
            }
            let resource = device.resource_from_view(*view);
            if let Some(index) = set.find_proxy_index(resource) {
                if let Some(proxy_view) = set.proxy_render_view(index) {
                    *view = proxy_view;
                    modified = true;
                    engine_trace!(
                        LOG_SOURCE,
                        "Redirected back buffer RTV to proxy RTV {}",
                        index
                    );
                }
            }
        }

        if modified {
            cmd.bind_render_targets(&substituted, depth_stencil);
        }
    }

    /// Rescale full-surface viewports from forced to original dimensions
    pub fn on_bind_viewports(&self, cmd: &mut dyn CommandList, first: u32, viewports: &[Viewport]) {
        if viewports.is_empty() || !self.config.is_override_enabled() {
            return;
        }
        let device = cmd.device().clone();

        let map = self.registry.lock();
        let Some(set) = find_active_for_device(&map, &device) else {
            return;
        };

        let scale_x = set.scale_x();
        let scale_y = set.scale_y();
        let threshold_width = set.actual_width() as f32 * RESCALE_THRESHOLD;
        let threshold_height = set.actual_height() as f32 * RESCALE_THRESHOLD;

        let mut modified = false;
        let mut rescaled = viewports.to_vec();
        for viewport in rescaled.iter_mut() {
            // Only rects that cover (nearly) the whole forced surface are
            // the game's full-screen viewports; partial rects are left alone
            if viewport.width >= threshold_width && viewport.height >= threshold_height {
                viewport.x *= scale_x;
                viewport.y *= scale_y;
                viewport.width *= scale_x;
                viewport.height *= scale_y;
                modified = true;
            }
        }

        if modified {
            cmd.bind_viewports(first, &rescaled);
        }
    }

    /// Rescale full-surface scissor rects from forced to original dimensions
    pub fn on_bind_scissor_rects(&self, cmd: &mut dyn CommandList, first: u32, rects: &[Rect2D]) {
        if rects.is_empty() || !self.config.is_override_enabled() {
            return;
        }
        let device = cmd.device().clone();

        let map = self.registry.lock();
        let Some(set) = find_active_for_device(&map, &device) else {
            return;
        };

        let scale_x = set.scale_x();
        let scale_y = set.scale_y();
        let threshold_width = (set.actual_width() as f32 * RESCALE_THRESHOLD) as u32;
        let threshold_height = (set.actual_height() as f32 * RESCALE_THRESHOLD) as u32;

        let mut modified = false;
        let mut rescaled = rects.to_vec();
        for rect in rescaled.iter_mut() {
            if rect.width >= threshold_width && rect.height >= threshold_height {
                // Scale the edges, not the extent, matching how the offsets
                // truncate
                let right = rect.x + rect.width as i32;
                let bottom = rect.y + rect.height as i32;
                let new_x = (rect.x as f32 * scale_x) as i32;
                let new_y = (rect.y as f32 * scale_y) as i32;
                let new_right = (right as f32 * scale_x) as i32;
                let new_bottom = (bottom as f32 * scale_y) as i32;
                rect.x = new_x;
                rect.y = new_y;
                rect.width = (new_right - new_x) as u32;
                rect.height = (new_bottom - new_y) as u32;
                modified = true;
            }
        }

        if modified {
            cmd.bind_scissor_rects(first, &rescaled);
        }
    }

    // ===== PRESENT =====

    /// Record the composition draw before the host presents
    ///
    /// Scales the current proxy back buffer onto the real one through a
    /// transient render-target view, leaving the proxy in render-target
    /// state and the back buffer in present state.
    pub fn on_present(&self, queue: &mut dyn CommandQueue, swapchain: &dyn Swapchain) {
        let handle = swapchain.native_handle();

        let map = self.registry.lock();
        let Some(set) = map.get(&handle) else {
            return;
        };
        if !set.is_active() {
            return;
        }

        let device = swapchain.device().clone();
        let current_index = swapchain.current_back_buffer_index();

        let (Some(proxy_texture), Some(proxy_srv), Some(composition)) = (
            set.proxy_texture(current_index as usize),
            set.proxy_shader_view(current_index as usize),
            set.composition(),
        ) else {
            return;
        };
        let Ok(back_buffer) = swapchain.back_buffer(current_index) else {
            return;
        };

        // Transient RTV on the real back buffer, destroyed when this call
        // returns
        let back_buffer_format = match device.texture_desc(back_buffer) {
            Ok(desc) => desc.format,
            Err(err) => {
                engine_error!(LOG_SOURCE, "Failed to query back buffer for present: {}", err);
                return;
            }
        };
        let target_view = match device.create_view(
            back_buffer,
            ViewKind::RenderTarget,
            back_buffer_format,
        ) {
            Ok(view) => OwnedView::new(device.clone(), view),
            Err(err) => {
                engine_error!(
                    LOG_SOURCE,
                    "Failed to create back buffer RTV for present: {}",
                    err
                );
                return;
            }
        };

        let cmd = queue.immediate_command_list();

        cmd.barrier(
            proxy_texture,
            ResourceUsage::RENDER_TARGET,
            ResourceUsage::SHADER_RESOURCE,
        );
        cmd.barrier(
            back_buffer,
            ResourceUsage::PRESENT,
            ResourceUsage::RENDER_TARGET,
        );

        cmd.bind_pipeline(composition.pipeline());
        cmd.push_descriptors(
            ShaderStage::Pixel,
            composition.layout(),
            SAMPLER_PARAM_INDEX,
            &DescriptorUpdate::Samplers(&[composition.sampler()]),
        );
        cmd.push_descriptors(
            ShaderStage::Pixel,
            composition.layout(),
            SRV_PARAM_INDEX,
            &DescriptorUpdate::ShaderResourceViews(&[proxy_srv]),
        );
        cmd.bind_render_targets(&[target_view.handle()], None);
        cmd.bind_viewports(
            0,
            &[Viewport {
                x: 0.0,
                y: 0.0,
                width: set.actual_width() as f32,
                height: set.actual_height() as f32,
                min_depth: 0.0,
                max_depth: 1.0,
            }],
        );
        cmd.draw(3, 1, 0, 0);

        cmd.barrier(
            proxy_texture,
            ResourceUsage::SHADER_RESOURCE,
            ResourceUsage::RENDER_TARGET,
        );
        cmd.barrier(
            back_buffer,
            ResourceUsage::RENDER_TARGET,
            ResourceUsage::PRESENT,
        );
    }

    // ===== FULLSCREEN TRANSITIONS =====

    /// Intercept a fullscreen state change request; returns true to block it
    pub fn on_set_fullscreen_state(&self, swapchain: SwapchainHandle, fullscreen: bool) -> bool {
        if self.config.is_exclusive_fullscreen_enabled() {
            // Transitions to fullscreen are exactly what we want; windowed
            // would undo the forced mode
            if !fullscreen {
                engine_debug!(
                    LOG_SOURCE,
                    "Blocking windowed transition for swapchain 0x{:X} to maintain exclusive fullscreen mode",
                    swapchain.0
                );
                return true;
            }
            return false;
        }

        if self.config.is_borderless_fullscreen_enabled() {
            if fullscreen {
                engine_debug!(
                    LOG_SOURCE,
                    "Blocking fullscreen transition for swapchain 0x{:X} to maintain borderless fullscreen mode",
                    swapchain.0
                );
                return true;
            }
            return false;
        }

        // Unchanged mode: only the explicit block switch applies
        if self.config.block_fullscreen_changes {
            engine_debug!(
                LOG_SOURCE,
                "Blocked fullscreen state change attempt (requested: {})",
                if fullscreen { "fullscreen" } else { "windowed" }
            );
            return true;
        }

        false
    }

    // ===== DESTRUCTION =====

    /// Drop the resources of a destroyed swapchain
    ///
    /// Resize destruction is a no-op: the init event that follows rebuilds
    /// in place and must still find the old entry for correlation.
    pub fn on_destroy_swapchain(&self, swapchain: SwapchainHandle, is_resize: bool) {
        if is_resize {
            engine_debug!(
                LOG_SOURCE,
                "Preserving override data for swapchain 0x{:X} across resize",
                swapchain.0
            );
            return;
        }
        self.registry.remove(swapchain);
    }

    /// Drop everything (host shutdown)
    pub fn cleanup_all(&self) {
        let count = self.registry.len();
        self.registry.clear();
        if count > 0 {
            engine_info!(LOG_SOURCE, "Cleaned up {} swapchain override entries", count);
        }
    }

    // ===== DIAGNOSTICS =====

    /// Copy the state of every registered swapchain out under the lock
    pub fn snapshot(&self) -> Vec<SwapchainSnapshot> {
        let map = self.registry.lock();
        let mut snapshots: Vec<SwapchainSnapshot> = map
            .iter()
            .map(|(handle, set)| SwapchainSnapshot {
                handle: *handle,
                original_width: set.original_width(),
                original_height: set.original_height(),
                actual_width: set.actual_width(),
                actual_height: set.actual_height(),
                override_active: set.is_active(),
                back_buffer_count: set.back_buffer_count(),
            })
            .collect();
        // Hash map order is not stable; diagnostics want a deterministic one
        snapshots.sort_by_key(|s| s.handle);
        snapshots
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
