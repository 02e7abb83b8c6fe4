/// Mock device for unit tests (no GPU required)
///
/// Implements Device, CommandList, CommandQueue and Swapchain over plain
/// hash maps. Tracks live object counts (leak detection), records command
/// list calls as typed values (barrier/draw ordering assertions), and can
/// inject creation failures after a configurable number of successes.

use crate::device::command_list::{CommandList, CommandQueue, DescriptorUpdate, Rect2D, Viewport};
use crate::device::device::Device;
use crate::device::swapchain::Swapchain;
use crate::device::types::*;
use crate::engine_bail;
use crate::error::Result;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Device
// ============================================================================

#[derive(Default)]
struct MockDeviceState {
    next_raw: u64,
    textures: FxHashMap<ResourceHandle, TextureDesc>,
    external_textures: Vec<ResourceHandle>,
    views: FxHashMap<ViewHandle, (ResourceHandle, ViewKind, TextureFormat)>,
    samplers: FxHashMap<SamplerHandle, SamplerDesc>,
    layouts: FxHashMap<PipelineLayoutHandle, Vec<PipelineLayoutParam>>,
    pipelines: FxHashMap<PipelineHandle, PipelineLayoutHandle>,
    successful_creations: u32,
    fail_after_creations: Option<u32>,
}

impl MockDeviceState {
    fn next_handle(&mut self) -> u64 {
        self.next_raw += 1;
        self.next_raw
    }

    /// Returns Err when the injected failure budget is exhausted
    fn check_creation_budget(&mut self) -> Result<()> {
        if let Some(budget) = self.fail_after_creations {
            if self.successful_creations >= budget {
                engine_bail!(
                    "mock::device",
                    CreationFailed,
                    "injected failure after {} creations",
                    budget
                );
            }
        }
        self.successful_creations += 1;
        Ok(())
    }
}

pub struct MockDevice {
    api: DeviceApi,
    state: Mutex<MockDeviceState>,
}

impl MockDevice {
    pub fn new(api: DeviceApi) -> Self {
        Self {
            api,
            state: Mutex::new(MockDeviceState {
                next_raw: 1000,
                ..Default::default()
            }),
        }
    }

    /// Allow `count` more successful creations, then fail every create_* call
    pub fn fail_after_creations(&self, count: u32) {
        let mut state = self.state.lock().unwrap();
        state.fail_after_creations = Some(state.successful_creations + count);
    }

    /// Register a host-owned texture (a swapchain back buffer)
    ///
    /// Not counted against the creation budget and excluded from the
    /// device-created live count; the override must never destroy these.
    pub fn register_external_texture(&self, desc: TextureDesc) -> ResourceHandle {
        let mut state = self.state.lock().unwrap();
        let handle = ResourceHandle(state.next_handle());
        state.textures.insert(handle, desc);
        state.external_textures.push(handle);
        handle
    }

    /// Number of live device-created textures (external ones excluded)
    pub fn live_textures(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.textures.len() - state.external_textures.len()
    }

    pub fn live_views(&self) -> usize {
        self.state.lock().unwrap().views.len()
    }

    pub fn live_samplers(&self) -> usize {
        self.state.lock().unwrap().samplers.len()
    }

    pub fn live_pipelines(&self) -> usize {
        self.state.lock().unwrap().pipelines.len()
    }

    pub fn live_pipeline_layouts(&self) -> usize {
        self.state.lock().unwrap().layouts.len()
    }

    /// Total live device-created objects of every kind
    pub fn total_live_objects(&self) -> usize {
        self.live_textures()
            + self.live_views()
            + self.live_samplers()
            + self.live_pipelines()
            + self.live_pipeline_layouts()
    }

    /// Returns true if the host-owned texture is still registered
    pub fn is_external_texture(&self, texture: ResourceHandle) -> bool {
        self.state.lock().unwrap().external_textures.contains(&texture)
    }
}

impl Device for MockDevice {
    fn api(&self) -> DeviceApi {
        self.api
    }

    fn create_texture(
        &self,
        desc: &TextureDesc,
        _initial_state: ResourceUsage,
    ) -> Result<ResourceHandle> {
        let mut state = self.state.lock().unwrap();
        state.check_creation_budget()?;
        let handle = ResourceHandle(state.next_handle());
        state.textures.insert(handle, *desc);
        Ok(handle)
    }

    fn destroy_texture(&self, texture: ResourceHandle) {
        let mut state = self.state.lock().unwrap();
        // Destroying a host-owned back buffer is a bug in the caller
        assert!(
            !state.external_textures.contains(&texture),
            "destroy_texture called on an external texture"
        );
        assert!(
            state.textures.remove(&texture).is_some(),
            "destroy_texture called on an unknown handle"
        );
    }

    fn texture_desc(&self, texture: ResourceHandle) -> Result<TextureDesc> {
        let state = self.state.lock().unwrap();
        match state.textures.get(&texture) {
            Some(desc) => Ok(*desc),
            None => engine_bail!(
                "mock::device",
                InvalidResource,
                "texture_desc on unknown handle {:?}",
                texture
            ),
        }
    }

    fn create_view(
        &self,
        texture: ResourceHandle,
        kind: ViewKind,
        format: TextureFormat,
    ) -> Result<ViewHandle> {
        let mut state = self.state.lock().unwrap();
        if !state.textures.contains_key(&texture) {
            engine_bail!(
                "mock::device",
                InvalidResource,
                "create_view on unknown texture {:?}",
                texture
            );
        }
        state.check_creation_budget()?;
        let handle = ViewHandle(state.next_handle());
        state.views.insert(handle, (texture, kind, format));
        Ok(handle)
    }

    fn destroy_view(&self, view: ViewHandle) {
        let mut state = self.state.lock().unwrap();
        assert!(
            state.views.remove(&view).is_some(),
            "destroy_view called on an unknown handle"
        );
    }

    fn resource_from_view(&self, view: ViewHandle) -> ResourceHandle {
        let state = self.state.lock().unwrap();
        state
            .views
            .get(&view)
            .map(|(texture, _, _)| *texture)
            .unwrap_or(ResourceHandle::NULL)
    }

    fn create_sampler(&self, desc: &SamplerDesc) -> Result<SamplerHandle> {
        let mut state = self.state.lock().unwrap();
        state.check_creation_budget()?;
        let handle = SamplerHandle(state.next_handle());
        state.samplers.insert(handle, *desc);
        Ok(handle)
    }

    fn destroy_sampler(&self, sampler: SamplerHandle) {
        let mut state = self.state.lock().unwrap();
        assert!(
            state.samplers.remove(&sampler).is_some(),
            "destroy_sampler called on an unknown handle"
        );
    }

    fn create_pipeline_layout(
        &self,
        params: &[PipelineLayoutParam],
    ) -> Result<PipelineLayoutHandle> {
        let mut state = self.state.lock().unwrap();
        state.check_creation_budget()?;
        let handle = PipelineLayoutHandle(state.next_handle());
        state.layouts.insert(handle, params.to_vec());
        Ok(handle)
    }

    fn destroy_pipeline_layout(&self, layout: PipelineLayoutHandle) {
        let mut state = self.state.lock().unwrap();
        assert!(
            state.layouts.remove(&layout).is_some(),
            "destroy_pipeline_layout called on an unknown handle"
        );
    }

    fn create_pipeline(&self, desc: &PipelineDesc) -> Result<PipelineHandle> {
        let mut state = self.state.lock().unwrap();
        if !state.layouts.contains_key(&desc.layout) {
            engine_bail!(
                "mock::device",
                InvalidResource,
                "create_pipeline on unknown layout {:?}",
                desc.layout
            );
        }
        state.check_creation_budget()?;
        let handle = PipelineHandle(state.next_handle());
        state.pipelines.insert(handle, desc.layout);
        Ok(handle)
    }

    fn destroy_pipeline(&self, pipeline: PipelineHandle) {
        let mut state = self.state.lock().unwrap();
        assert!(
            state.pipelines.remove(&pipeline).is_some(),
            "destroy_pipeline called on an unknown handle"
        );
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Owned snapshot of a pushed descriptor batch
#[derive(Debug, Clone, PartialEq)]
pub enum MockDescriptorUpdate {
    Samplers(Vec<SamplerHandle>),
    ShaderResourceViews(Vec<ViewHandle>),
}

impl From<&DescriptorUpdate<'_>> for MockDescriptorUpdate {
    fn from(update: &DescriptorUpdate<'_>) -> Self {
        match update {
            DescriptorUpdate::Samplers(samplers) => {
                MockDescriptorUpdate::Samplers(samplers.to_vec())
            }
            DescriptorUpdate::ShaderResourceViews(views) => {
                MockDescriptorUpdate::ShaderResourceViews(views.to_vec())
            }
        }
    }
}

/// One recorded command list call
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    Barrier {
        resource: ResourceHandle,
        old_state: ResourceUsage,
        new_state: ResourceUsage,
    },
    BindPipeline(PipelineHandle),
    PushDescriptors {
        stage: ShaderStage,
        layout: PipelineLayoutHandle,
        param_index: u32,
        update: MockDescriptorUpdate,
    },
    BindRenderTargets {
        render_targets: Vec<ViewHandle>,
        depth_stencil: Option<ViewHandle>,
    },
    BindViewports {
        first: u32,
        viewports: Vec<Viewport>,
    },
    BindScissorRects {
        first: u32,
        rects: Vec<Rect2D>,
    },
    Draw {
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    },
}

pub struct MockCommandList {
    device: Arc<dyn Device>,
    pub commands: Vec<MockCommand>,
}

impl MockCommandList {
    pub fn new(device: Arc<dyn Device>) -> Self {
        Self {
            device,
            commands: Vec::new(),
        }
    }
}

impl CommandList for MockCommandList {
    fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }

    fn barrier(
        &mut self,
        resource: ResourceHandle,
        old_state: ResourceUsage,
        new_state: ResourceUsage,
    ) {
        self.commands.push(MockCommand::Barrier {
            resource,
            old_state,
            new_state,
        });
    }

    fn bind_pipeline(&mut self, pipeline: PipelineHandle) {
        self.commands.push(MockCommand::BindPipeline(pipeline));
    }

    fn push_descriptors(
        &mut self,
        stage: ShaderStage,
        layout: PipelineLayoutHandle,
        param_index: u32,
        update: &DescriptorUpdate,
    ) {
        self.commands.push(MockCommand::PushDescriptors {
            stage,
            layout,
            param_index,
            update: update.into(),
        });
    }

    fn bind_render_targets(
        &mut self,
        render_targets: &[ViewHandle],
        depth_stencil: Option<ViewHandle>,
    ) {
        self.commands.push(MockCommand::BindRenderTargets {
            render_targets: render_targets.to_vec(),
            depth_stencil,
        });
    }

    fn bind_viewports(&mut self, first: u32, viewports: &[Viewport]) {
        self.commands.push(MockCommand::BindViewports {
            first,
            viewports: viewports.to_vec(),
        });
    }

    fn bind_scissor_rects(&mut self, first: u32, rects: &[Rect2D]) {
        self.commands.push(MockCommand::BindScissorRects {
            first,
            rects: rects.to_vec(),
        });
    }

    fn draw(
        &mut self,
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    ) {
        self.commands.push(MockCommand::Draw {
            vertex_count,
            instance_count,
            first_vertex,
            first_instance,
        });
    }
}

// ============================================================================
// Mock CommandQueue
// ============================================================================

pub struct MockCommandQueue {
    pub list: MockCommandList,
}

impl MockCommandQueue {
    pub fn new(device: Arc<dyn Device>) -> Self {
        Self {
            list: MockCommandList::new(device),
        }
    }
}

impl CommandQueue for MockCommandQueue {
    fn immediate_command_list(&mut self) -> &mut dyn CommandList {
        &mut self.list
    }
}

// ============================================================================
// Mock Swapchain
// ============================================================================

pub struct MockSwapchain {
    handle: SwapchainHandle,
    window: Option<WindowHandle>,
    device: Arc<dyn Device>,
    back_buffers: Vec<ResourceHandle>,
    current_index: AtomicU32,
    fail_fullscreen: bool,
    pub fullscreen_requests: Mutex<Vec<bool>>,
}

impl MockSwapchain {
    /// Create a swapchain whose back buffers are registered as external
    /// textures on the given mock device
    pub fn new(
        device: Arc<MockDevice>,
        raw_handle: u64,
        window: Option<WindowHandle>,
        desc: TextureDesc,
        back_buffer_count: u32,
    ) -> Self {
        let back_buffers = (0..back_buffer_count)
            .map(|_| device.register_external_texture(desc))
            .collect();
        Self {
            handle: SwapchainHandle(raw_handle),
            window,
            device,
            back_buffers,
            current_index: AtomicU32::new(0),
            fail_fullscreen: false,
            fullscreen_requests: Mutex::new(Vec::new()),
        }
    }

    /// Make set_native_fullscreen fail (still recording the request)
    pub fn fail_fullscreen(mut self) -> Self {
        self.fail_fullscreen = true;
        self
    }

    pub fn set_current_index(&self, index: u32) {
        self.current_index.store(index, Ordering::SeqCst);
    }
}

impl Swapchain for MockSwapchain {
    fn native_handle(&self) -> SwapchainHandle {
        self.handle
    }

    fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }

    fn back_buffer_count(&self) -> u32 {
        self.back_buffers.len() as u32
    }

    fn back_buffer(&self, index: u32) -> Result<ResourceHandle> {
        match self.back_buffers.get(index as usize) {
            Some(handle) => Ok(*handle),
            None => engine_bail!(
                "mock::swapchain",
                InvalidResource,
                "back buffer index {} out of range ({} buffers)",
                index,
                self.back_buffers.len()
            ),
        }
    }

    fn current_back_buffer_index(&self) -> u32 {
        self.current_index.load(Ordering::SeqCst)
    }

    fn set_native_fullscreen(&self, fullscreen: bool) -> Result<()> {
        self.fullscreen_requests.lock().unwrap().push(fullscreen);
        if self.fail_fullscreen {
            engine_bail!(
                "mock::swapchain",
                BackendError,
                "injected SetFullscreenState failure"
            );
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_device_tests.rs"]
mod tests;
