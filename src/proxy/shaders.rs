//! Embedded composition shaders
//!
//! The blobs are handed to the backend as opaque bytes; here they are HLSL
//! source that DXGI-family backends compile at pipeline creation. A classic
//! bufferless fullscreen triangle: three vertices generated from
//! SV_VertexID, UVs derived so the triangle covers the whole target.

/// Fullscreen-triangle vertex shader
pub const FULLSCREEN_VS: &[u8] = b"\
struct VsOut
{
    float4 pos : SV_Position;
    float2 uv  : TEXCOORD0;
};

VsOut main(uint id : SV_VertexID)
{
    VsOut output;
    output.uv = float2((id << 1) & 2, id & 2);
    output.pos = float4(output.uv * float2(2.0, -2.0) + float2(-1.0, 1.0), 0.0, 1.0);
    return output;
}
";

/// Entry point of the fullscreen vertex shader
pub const FULLSCREEN_VS_ENTRY: &str = "main";

/// Sampling pixel shader (sampler s0, texture t0)
pub const COPY_PS: &[u8] = b"\
SamplerState source_sampler : register(s0);
Texture2D source_texture : register(t0);

float4 main(float4 pos : SV_Position, float2 uv : TEXCOORD0) : SV_Target
{
    return source_texture.Sample(source_sampler, uv);
}
";

/// Entry point of the sampling pixel shader
pub const COPY_PS_ENTRY: &str = "main";
