use crate::constants::*;

/// Receives render distance changes. The fog pass recomputes its own
/// parameters from the new value; nothing here renders fog.
pub trait FogListener {
    fn render_distance_changed(&mut self, render_distance_chunks: u32);
}

impl<F: FnMut(u32)> FogListener for F {
    fn render_distance_changed(&mut self, render_distance_chunks: u32) {
        self(render_distance_chunks)
    }
}

/// Horizontal reach of a render distance, in blocks.
pub fn render_distance_blocks(render_distance_chunks: u32) -> f32 {
    (render_distance_chunks.saturating_add(1) as f32) * CHUNK_SIZE as f32
}

/// Linear fog window. A pure function of the render distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogParams {
    pub start: f32,
    pub end: f32,
}

impl FogParams {
    pub fn from_render_distance(render_distance_chunks: u32) -> Self {
        let end = render_distance_blocks(render_distance_chunks);
        Self {
            start: end * FOG_START_FRACTION,
            end,
        }
    }
}

/// Keeps the latest fog window and logs each change.
#[derive(Debug, Default)]
pub struct LoggingFog {
    pub params: Option<FogParams>,
}

impl FogListener for LoggingFog {
    fn render_distance_changed(&mut self, render_distance_chunks: u32) {
        let params = FogParams::from_render_distance(render_distance_chunks);
        tracing::info!(
            "Fog updated for render distance {}: start {:.1}, end {:.1}",
            render_distance_chunks,
            params.start,
            params.end
        );
        self.params = Some(params);
    }
}
