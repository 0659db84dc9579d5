//! GPU-ready instance data for draw commands

use bytemuck::{Pod, Zeroable};

/// One textured-quad instance. Layout is stable so hosts can upload a
/// `&[DrawInstance]` straight into an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Screen-space `[x, y, width, height]`
    pub rect: [f32; 4],   // offset 0
    pub color: [f32; 4],  // offset 16
    pub layer: u32,       // offset 32
    /// Shape selector, see `DrawKind::code`
    pub kind: u32,        // offset 36
    /// Kind-specific value (score, hp, banner id...)
    pub param: u32,       // offset 40
    pub _pad: u32,        // pad to 48 bytes
}

impl DrawInstance {
    pub const fn new(rect: [f32; 4], color: [f32; 4], layer: u32, kind: u32, param: u32) -> Self {
        Self {
            rect,
            color,
            layer,
            kind,
            param,
            _pad: 0,
        }
    }
}

/// Raw bytes for an instance buffer upload
pub fn as_bytes(instances: &[DrawInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.45, 0.7, 0.95, 1.0];
    pub const GROUND: [f32; 4] = [0.35, 0.25, 0.15, 1.0];
    pub const PLATFORM: [f32; 4] = [0.5, 0.4, 0.3, 1.0];
    pub const CHECKPOINT: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
    pub const CHECKPOINT_ACTIVE: [f32; 4] = [0.2, 0.9, 0.3, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const SUSHI: [f32; 4] = [0.95, 0.45, 0.4, 1.0];
    pub const ENEMY: [f32; 4] = [0.6, 0.2, 0.7, 1.0];
    pub const BOSS: [f32; 4] = [0.8, 0.1, 0.1, 1.0];
    pub const BOSS_FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LASER: [f32; 4] = [0.3, 1.0, 1.0, 1.0];
    pub const FIREBALL: [f32; 4] = [1.0, 0.5, 0.1, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.4, 0.9, 1.0];
    pub const HUD: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HUD_DANGER: [f32; 4] = [1.0, 0.3, 0.3, 1.0];
    pub const DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<DrawInstance>(), 48);
        let instances = [DrawInstance::new([1.0, 2.0, 3.0, 4.0], colors::HUD, 6, 2, 9); 3];
        let bytes = as_bytes(&instances);
        assert_eq!(bytes.len(), 144);
        let back: &[DrawInstance] = bytemuck::cast_slice(bytes);
        assert_eq!(back[2], instances[2]);
    }
}
