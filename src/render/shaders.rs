// src/render/shaders.rs
//
// Centralized shader sources. The shader programs are text artifacts; they are
// baked into the binary with include_str! so the demo has no runtime file
// dependencies.

pub const TRACE_WGSL: &str = include_str!("../shaders/trace.wgsl");

pub const PRESENT_WGSL: &str = include_str!("../shaders/present.wgsl");

#[inline]
pub fn trace_wgsl() -> &'static str {
    TRACE_WGSL
}

#[inline]
pub fn present_wgsl() -> &'static str {
    PRESENT_WGSL
}
