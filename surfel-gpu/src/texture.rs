//! Soft-edged alpha mask that turns surfel quads into approximate discs.

/// Width and height of the filter texture in texels.
pub const FILTER_TEXTURE_SIZE: u32 = 5;

// Symmetric about both axes; rows 0/4 and 1/3 are shared.
const OUTER_ROW: [u8; 5] = [0, 50, 100, 50, 0];
const INNER_ROW: [u8; 5] = [50, 175, 255, 175, 50];
const CENTER_ROW: [u8; 5] = [100, 255, 255, 255, 100];

/// RGBA8 texels of the 5x5 surfel filter: white everywhere, alpha falling off
/// toward the edges.
pub fn surfel_filter_texture() -> Vec<u8> {
    let size = FILTER_TEXTURE_SIZE as usize;
    let mut texels = Vec::with_capacity(size * size * 4);
    for row in 0..size {
        let alpha = match row {
            0 | 4 => &OUTER_ROW,
            1 | 3 => &INNER_ROW,
            _ => &CENTER_ROW,
        };
        for &a in alpha {
            texels.extend_from_slice(&[255, 255, 255, a]);
        }
    }
    texels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(texels: &[u8], x: usize, y: usize) -> u8 {
        texels[4 * (y * FILTER_TEXTURE_SIZE as usize + x) + 3]
    }

    #[test]
    fn test_size_and_color() {
        let texels = surfel_filter_texture();
        assert_eq!(texels.len(), 5 * 5 * 4);
        assert!(texels.chunks_exact(4).all(|t| t[0..3] == [255, 255, 255]));
    }

    #[test]
    fn test_alpha_falloff() {
        let texels = surfel_filter_texture();
        assert_eq!(alpha(&texels, 2, 2), 255);
        assert_eq!(alpha(&texels, 0, 0), 0);
        assert_eq!(alpha(&texels, 1, 1), 175);
        assert_eq!(alpha(&texels, 0, 2), 100);
    }

    #[test]
    fn test_symmetric() {
        let texels = surfel_filter_texture();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(alpha(&texels, x, y), alpha(&texels, 4 - x, y));
                assert_eq!(alpha(&texels, x, y), alpha(&texels, x, 4 - y));
            }
        }
    }
}
