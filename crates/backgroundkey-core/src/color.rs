/// Packs a tint colour of full white with the given opacity (0..=100) into
/// libobs' 0xAABBGGRR layout.
pub fn white_with_opacity(opacity: i64) -> u32 {
    let opacity = opacity.clamp(0, 100) as u32;
    0x00FF_FFFF | (((opacity * 255) / 100) << 24)
}

/// Unpacks 0xAABBGGRR into an `[r, g, b, a]` float vector in 0..=1.
pub fn rgba_to_vec4(rgba: u32) -> [f32; 4] {
    let r = (rgba & 0xFF) as f32 / 255.0;
    let g = ((rgba >> 8) & 0xFF) as f32 / 255.0;
    let b = ((rgba >> 16) & 0xFF) as f32 / 255.0;
    let a = ((rgba >> 24) & 0xFF) as f32 / 255.0;

    [r, g, b, a]
}
