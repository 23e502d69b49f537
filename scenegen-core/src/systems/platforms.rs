use glam::Vec2;

use crate::level::{PlatformDescriptor, GROUND_HEIGHT};
use crate::params::Density;
use crate::rng::Lcg;

pub const PLATFORM_HEIGHT: i64 = 20;
const MIN_PLATFORM_WIDTH: i64 = 120;
const MAX_PLATFORM_WIDTH: i64 = 240;
const MIN_GAP: i64 = 60;
const MAX_GAP: i64 = 160;
const MAX_STEP: i64 = 110;

const TOP_MARGIN: i64 = 160;
const BOTTOM_MARGIN: i64 = 140;
const RIGHT_MARGIN: i64 = 260;
const LEFT_START: i64 = 120;
const PATH_STAGGER: i64 = 90;
const PLATFORM_SPACING: f32 = 320.0;

const MIN_PATHS: i64 = 2;
const MAX_PATHS: i64 = 4;
const MIN_SCATTER: i64 = 2;
const MAX_SCATTER: i64 = 4;

/// Vertical band platform centers are kept in: clear of the top edge and of
/// the ground strip.
pub fn vertical_band(height: u32) -> (i64, i64) {
    let ground = i64::from(height) - GROUND_HEIGHT as i64;
    let bottom = (ground - BOTTOM_MARGIN).max(TOP_MARGIN);
    (TOP_MARGIN, bottom)
}

/// Lays out 2..=4 walked paths of jumpable platforms plus a few scatter
/// platforms. Reachability is approximated by bounding each step's gap and
/// rise, never simulated.
pub fn run(rng: &mut Lcg, width: u32, height: u32, density: Density) -> Vec<PlatformDescriptor> {
    let width = i64::from(width);
    let (band_top, band_bottom) = vertical_band(height);
    let right_limit = width - RIGHT_MARGIN;

    let path_count = rng.next_int(MIN_PATHS, MAX_PATHS + 1);
    let desired = ((width as f32 / PLATFORM_SPACING * density.multiplier()).floor() as i64)
        .max(path_count);
    let per_path = (desired + path_count - 1) / path_count;

    let mut platforms = Vec::with_capacity((desired + MAX_SCATTER) as usize);
    for path in 0..path_count {
        let mut cursor_x = LEFT_START + path * PATH_STAGGER + rng.next_int(0, PATH_STAGGER);
        let mut cursor_y = rng.next_int(band_top, band_bottom + 1);

        for _ in 0..per_path {
            if cursor_x > right_limit {
                break;
            }
            let w = rng.next_int(MIN_PLATFORM_WIDTH, MAX_PLATFORM_WIDTH + 1);
            platforms.push(platform(cursor_x as f32 + w as f32 * 0.5, cursor_y, w));

            cursor_x += w + rng.next_int(MIN_GAP, MAX_GAP + 1);
            cursor_y += rng.next_int(-MAX_STEP, MAX_STEP + 1);
            cursor_y = cursor_y.clamp(band_top, band_bottom);
        }
    }

    let scatter = rng.next_int(MIN_SCATTER, MAX_SCATTER + 1);
    for _ in 0..scatter {
        let w = rng.next_int(MIN_PLATFORM_WIDTH, MAX_PLATFORM_WIDTH + 1);
        let left = rng.next_int(0, (width - w).max(0) + 1);
        let y = rng.next_int(band_top, band_bottom + 1);
        platforms.push(platform(left as f32 + w as f32 * 0.5, y, w));
    }

    platforms
}

fn platform(center_x: f32, center_y: i64, width: i64) -> PlatformDescriptor {
    PlatformDescriptor {
        center: Vec2::new(center_x, center_y as f32),
        width: width as f32,
        height: PLATFORM_HEIGHT as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::{run, vertical_band, MAX_PATHS, MAX_SCATTER, MIN_SCATTER};
    use crate::params::Density;
    use crate::rng::Lcg;

    #[test]
    fn platforms_stay_inside_scene_and_band() {
        for seed in 0..40 {
            let mut rng = Lcg::new(seed);
            let (width, height) = (2400, 1400);
            let (top, bottom) = vertical_band(height);
            for p in run(&mut rng, width, height, Density::High) {
                let r = p.rect();
                assert!(r.x >= 0.0 && r.right() <= width as f32, "{r:?}");
                assert!(p.center.y >= top as f32 && p.center.y <= bottom as f32);
                assert!(r.y > 0.0 && r.bottom() < height as f32);
            }
        }
    }

    #[test]
    fn density_scales_platform_count() {
        let count = |density| {
            (0..20)
                .map(|seed| run(&mut Lcg::new(seed), 3600, 1200, density).len())
                .sum::<usize>()
        };
        assert!(count(Density::Low) < count(Density::High));
    }

    #[test]
    fn narrow_scene_still_gets_scatter_platforms() {
        let mut rng = Lcg::new(5);
        let platforms = run(&mut rng, 640, 480, Density::Medium);
        assert!(platforms.len() as i64 >= MIN_SCATTER);
        assert!(platforms.len() as i64 <= MAX_PATHS + MAX_SCATTER);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = run(&mut Lcg::new(77), 2000, 1100, Density::Medium);
        let b = run(&mut Lcg::new(77), 2000, 1100, Density::Medium);
        assert_eq!(a, b);
    }
}
