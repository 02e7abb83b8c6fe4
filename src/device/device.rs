/// Device trait - the GPU object factory boundary
///
/// This is the seam between the override core and whatever graphics runtime
/// hosts it. The host adapts its own device object to this trait; the core
/// only ever creates, queries and destroys objects through it.

use crate::device::types::*;
use crate::error::Result;

/// GPU device abstraction
///
/// All methods take `&self`: real backends are internally synchronized and
/// the override calls in from whichever thread the host delivers events on.
pub trait Device: Send + Sync {
    /// Backend API of this device
    fn api(&self) -> DeviceApi;

    /// Create a 2D texture in the given initial state
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    /// * `initial_state` - Resource state the texture starts its life in
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the descriptor or is out of
    /// memory.
    fn create_texture(
        &self,
        desc: &TextureDesc,
        initial_state: ResourceUsage,
    ) -> Result<ResourceHandle>;

    /// Destroy a texture previously created with create_texture
    fn destroy_texture(&self, texture: ResourceHandle);

    /// Query the descriptor of any texture, including host-owned back buffers
    ///
    /// # Errors
    ///
    /// Returns an error if the handle does not name a live texture.
    fn texture_desc(&self, texture: ResourceHandle) -> Result<TextureDesc>;

    /// Create a view onto a texture
    ///
    /// # Arguments
    ///
    /// * `texture` - The viewed texture (may be host-owned)
    /// * `kind` - Render-target or shader-resource view
    /// * `format` - View format (normally the texture's own)
    fn create_view(
        &self,
        texture: ResourceHandle,
        kind: ViewKind,
        format: TextureFormat,
    ) -> Result<ViewHandle>;

    /// Destroy a view previously created with create_view
    fn destroy_view(&self, view: ViewHandle);

    /// Resolve a view back to the resource it was created on
    ///
    /// Render-target substitution matches by resource identity, so this must
    /// work for views the host created as well as views the core created.
    /// Returns the null handle for unknown views.
    fn resource_from_view(&self, view: ViewHandle) -> ResourceHandle;

    /// Create a sampler
    fn create_sampler(&self, desc: &SamplerDesc) -> Result<SamplerHandle>;

    /// Destroy a sampler
    fn destroy_sampler(&self, sampler: SamplerHandle);

    /// Create a pipeline layout from push-descriptor parameter slots
    fn create_pipeline_layout(
        &self,
        params: &[PipelineLayoutParam],
    ) -> Result<PipelineLayoutHandle>;

    /// Destroy a pipeline layout
    fn destroy_pipeline_layout(&self, layout: PipelineLayoutHandle);

    /// Create a graphics pipeline
    fn create_pipeline(&self, desc: &PipelineDesc) -> Result<PipelineHandle>;

    /// Destroy a pipeline
    fn destroy_pipeline(&self, pipeline: PipelineHandle);
}
