/// CommandList and CommandQueue traits - recorded GPU work
///
/// The override records into command lists the host hands it: the lists bound
/// at render-target/viewport/scissor events, and the immediate list of the
/// presenting queue for the composition draw.

use crate::device::device::Device;
use crate::device::types::*;
use std::sync::Arc;

/// A viewport rectangle in floating-point pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

/// A scissor rectangle in integer pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A batch of descriptors pushed directly into a layout parameter slot
#[derive(Debug, Clone, Copy)]
pub enum DescriptorUpdate<'a> {
    /// Sampler descriptors
    Samplers(&'a [SamplerHandle]),
    /// Shader-resource-view descriptors
    ShaderResourceViews(&'a [ViewHandle]),
}

/// Command list abstraction
///
/// `&mut self` throughout: a command list is single-threaded while recording,
/// the host serializes access before calling in.
pub trait CommandList: Send {
    /// Device that owns this command list
    fn device(&self) -> &Arc<dyn Device>;

    /// Record a resource state transition
    ///
    /// # Arguments
    ///
    /// * `resource` - Transitioned resource
    /// * `old_state` - State the resource is currently in
    /// * `new_state` - State to transition to
    fn barrier(&mut self, resource: ResourceHandle, old_state: ResourceUsage, new_state: ResourceUsage);

    /// Bind a graphics pipeline
    fn bind_pipeline(&mut self, pipeline: PipelineHandle);

    /// Push descriptors into a pipeline layout parameter slot
    ///
    /// # Arguments
    ///
    /// * `stage` - Shader stage visibility of the slot
    /// * `layout` - Pipeline layout the slot belongs to
    /// * `param_index` - Parameter slot index within the layout
    /// * `update` - Descriptors to push
    fn push_descriptors(
        &mut self,
        stage: ShaderStage,
        layout: PipelineLayoutHandle,
        param_index: u32,
        update: &DescriptorUpdate,
    );

    /// Bind render-target views and an optional depth-stencil view
    fn bind_render_targets(&mut self, render_targets: &[ViewHandle], depth_stencil: Option<ViewHandle>);

    /// Bind viewports starting at the given slot
    fn bind_viewports(&mut self, first: u32, viewports: &[Viewport]);

    /// Bind scissor rectangles starting at the given slot
    fn bind_scissor_rects(&mut self, first: u32, rects: &[Rect2D]);

    /// Record a non-indexed draw
    fn draw(&mut self, vertex_count: u32, instance_count: u32, first_vertex: u32, first_instance: u32);
}

/// Command queue abstraction
///
/// Only the immediate command list is needed: the composition draw is
/// recorded right before the present the queue is about to execute.
pub trait CommandQueue: Send {
    /// The queue's immediate command list
    fn immediate_command_list(&mut self) -> &mut dyn CommandList;
}
