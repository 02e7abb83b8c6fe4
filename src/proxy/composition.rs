//! Composition pipeline - fullscreen scaled copy from proxy to back buffer
//!
//! One pipeline layout (sampler at parameter 0, SRV at parameter 1), one
//! fullscreen-triangle pipeline targeting the back buffer's format, and one
//! clamped sampler with the configured scaling filter. Built once per
//! swapchain resource set.

use crate::device::{
    AddressMode, DescriptorType, Device, FilterMode, OwnedPipeline, OwnedPipelineLayout,
    OwnedSampler, PipelineDesc, PipelineHandle, PipelineLayoutHandle, PipelineLayoutParam,
    SamplerDesc, SamplerHandle, ShaderDesc, ShaderStage, TextureFormat,
};
use crate::error::Result;
use crate::proxy::shaders;
use std::sync::Arc;

/// Layout parameter slot the sampler is pushed into
pub const SAMPLER_PARAM_INDEX: u32 = 0;

/// Layout parameter slot the shader-resource view is pushed into
pub const SRV_PARAM_INDEX: u32 = 1;

/// GPU objects of the composition pass
///
/// Field order is destruction order: pipeline and sampler before the layout
/// they were built against.
#[derive(Debug)]
pub struct CompositionPipeline {
    pipeline: OwnedPipeline,
    sampler: OwnedSampler,
    layout: OwnedPipelineLayout,
}

impl CompositionPipeline {
    /// Build the composition pipeline for a back buffer format
    ///
    /// # Arguments
    ///
    /// * `device` - Device to create the objects on
    /// * `render_target_format` - Format of the real back buffer
    /// * `filter` - Scaling filter for the sampler
    ///
    /// # Errors
    ///
    /// Returns an error if any object creation fails; objects created before
    /// the failure are destroyed on unwind.
    pub fn new(
        device: &Arc<dyn Device>,
        render_target_format: TextureFormat,
        filter: FilterMode,
    ) -> Result<Self> {
        let layout_params = [
            PipelineLayoutParam {
                descriptor_type: DescriptorType::Sampler,
                binding: 0,
                count: 1,
                visibility: ShaderStage::Pixel,
            },
            PipelineLayoutParam {
                descriptor_type: DescriptorType::ShaderResourceView,
                binding: 0,
                count: 1,
                visibility: ShaderStage::Pixel,
            },
        ];
        let layout = OwnedPipelineLayout::new(
            device.clone(),
            device.create_pipeline_layout(&layout_params)?,
        );

        let pipeline_desc = PipelineDesc {
            layout: layout.handle(),
            vertex_shader: ShaderDesc {
                code: shaders::FULLSCREEN_VS,
                entry_point: shaders::FULLSCREEN_VS_ENTRY,
            },
            pixel_shader: ShaderDesc {
                code: shaders::COPY_PS,
                entry_point: shaders::COPY_PS_ENTRY,
            },
            render_target_format,
        };
        let pipeline = OwnedPipeline::new(device.clone(), device.create_pipeline(&pipeline_desc)?);

        let sampler_desc = SamplerDesc {
            filter,
            address: AddressMode::Clamp,
        };
        let sampler = OwnedSampler::new(device.clone(), device.create_sampler(&sampler_desc)?);

        Ok(Self {
            pipeline,
            sampler,
            layout,
        })
    }

    pub fn pipeline(&self) -> PipelineHandle {
        self.pipeline.handle()
    }

    pub fn layout(&self) -> PipelineLayoutHandle {
        self.layout.handle()
    }

    pub fn sampler(&self) -> SamplerHandle {
        self.sampler.handle()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "composition_tests.rs"]
mod tests;
