use rand::{Rng, RngCore};

/// Body fill color, channels in `[0, 1]`. Opaque to the physics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);
    pub const WHITE: RgbColor = RgbColor::new(1.0, 1.0, 1.0);
    pub const RED: RgbColor = RgbColor::new(1.0, 0.0, 0.0);
    pub const GREEN: RgbColor = RgbColor::new(0.0, 1.0, 0.0);
    pub const BLUE: RgbColor = RgbColor::new(0.0, 0.0, 1.0);
    pub const GOLD: RgbColor = RgbColor::new(1.0, 0.84, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    /// Pack as `0xRRGGBBAA` with full alpha (renderer's buffer format).
    pub fn to_rgba_u32(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 24) | (channel(self.g) << 16) | (channel(self.b) << 8) | 0xFF
    }
}
