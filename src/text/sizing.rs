// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Point size search.

/// Largest point size offered by default.
pub const MAX_POINT_SIZE: u32 = 72;

/// Smallest point size the search can return.
pub const MIN_POINT_SIZE: u32 = 2;

/// Extra rows kept free below a block.
pub const LINE_OFFSET: u32 = 2;

/// Finds the largest point size for which a block of `dimensions`
/// (columns, rows) fits strictly inside `resolution` (width, height)
/// pixels, treating one point as one pixel per cell.
///
/// Sizes are tried from `max_point_size` down to [`MIN_POINT_SIZE`];
/// if none fits the minimum is returned.
pub fn max_point_size(resolution: (u32, u32), dimensions: (u32, u32), max_point_size: u32) -> u32 {
    let (cols, rows) = (dimensions.0 as u64, (dimensions.1 + LINE_OFFSET) as u64);
    let (rw, rh) = (resolution.0 as u64, resolution.1 as u64);
    (MIN_POINT_SIZE..=max_point_size.max(MIN_POINT_SIZE))
        .rev()
        .find(|&ps| {
            let ps = ps as u64;
            cols * ps < rw && rows * ps < rh
        })
        .unwrap_or(MIN_POINT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fits(resolution: (u32, u32), dims: (u32, u32), ps: u32) -> bool {
        dims.0 * ps < resolution.0 && (dims.1 + LINE_OFFSET) * ps < resolution.1
    }

    #[test]
    fn test_largest_fitting_size() {
        // 16x16 code page on a 1280x800 screen: 800 / 18 rows -> 44
        let ps = max_point_size((1280, 800), (16, 16), MAX_POINT_SIZE);
        assert_eq!(ps, 44);
        assert!(fits((1280, 800), (16, 16), ps));
        assert!(!fits((1280, 800), (16, 16), ps + 1));
    }

    #[test]
    fn test_strict_inequality() {
        // 10 cols * 10 == 100 is not strictly smaller than 100
        assert_eq!(max_point_size((100, 1000), (10, 1), MAX_POINT_SIZE), 9);
    }

    #[test]
    fn test_capped_by_max() {
        assert_eq!(max_point_size((5000, 5000), (4, 4), MAX_POINT_SIZE), 72);
        assert_eq!(max_point_size((5000, 5000), (4, 4), 20), 20);
    }

    #[test]
    fn test_large_screens_do_not_overflow() {
        // cols * ps passes u32::MAX for ps >= 5
        let cols = u32::MAX / 4;
        assert_eq!(max_point_size((u32::MAX, u32::MAX), (cols, 1), MAX_POINT_SIZE), 4);
    }

    #[test]
    fn test_nothing_fits_returns_minimum() {
        assert_eq!(max_point_size((10, 10), (32, 60), MAX_POINT_SIZE), MIN_POINT_SIZE);
    }

    #[test]
    fn test_property_over_grid() {
        for w in (50..2000).step_by(97) {
            for h in (50..1200).step_by(83) {
                for dims in [(16, 16), (32, 20), (5, 8)] {
                    let ps = max_point_size((w, h), dims, MAX_POINT_SIZE);
                    if ps > MIN_POINT_SIZE {
                        assert!(fits((w, h), dims, ps));
                    }
                    if ps < MAX_POINT_SIZE {
                        assert!(!fits((w, h), dims, ps + 1));
                    }
                }
            }
        }
    }
}
