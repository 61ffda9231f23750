use bytemuck::{Pod, Zeroable};

/// Per-instance sprite draw data handed to the rendering collaborator.
/// Plain floats so the shell can blit the whole buffer across an FFI or
/// shared-memory boundary without translation.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in pixel space.
    pub x: f32,
    /// Y position in pixel space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered size in pixels.
    pub scale: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Atlas row.
    pub sprite_row: f32,
    /// UV cell span (1.0 = single cell).
    pub cell_span: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Frame buffer of sprite instances, rebuilt from the scene every frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
