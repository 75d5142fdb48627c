use crate::{
    config::{CloudConfig, MapConfig},
    mesh::primitive::{Frustum, Sphere},
    Decoration, PlanarPosition, Point3,
};
use log::debug;
use rand::Rng;
use std::f64::consts::TAU;

/// Radial segments of the water cylinder
const WATER_SEGMENTS: u32 = 50;

/// Extra radius for the water, so it extends past the outermost tiles
const WATER_PADDING: f64 = 1.0;

/// Each cloud is a row of puffs along x: `(x offset, radius)`
const CLOUD_PUFFS: &[(f64, f64)] = &[(-1.85, 1.2), (0.0, 1.5), (1.85, 0.9)];

/// Max vertical jitter of a single puff within its cloud
const PUFF_JITTER: f64 = 0.3;

/// Build the water cylinder for a map, if enabled. It's centered on the
/// world origin, rests on `y = 0`, and is wide enough to cover every tile.
pub fn water(config: &MapConfig) -> Option<Frustum> {
    if !config.scenery.water {
        return None;
    }
    let radius = config.layout.boundary.resolve(config.radius) + WATER_PADDING;
    let height = config.height.max_height * config.scenery.water_height_fraction;
    Some(Frustum::cylinder(
        PlanarPosition::default(),
        radius,
        height,
        WATER_SEGMENTS,
    ))
}

/// Generate clouds over the map. The count is skewed towards the max by the
/// count exponent.
pub fn clouds<R: Rng + ?Sized>(
    config: &CloudConfig,
    rng: &mut R,
) -> Vec<Decoration> {
    let roll: f64 = rng.gen();
    let count =
        (roll.powf(config.count_exponent) * f64::from(config.max_count)).floor()
            as usize;
    debug!("Generating {} cloud(s)", count);

    (0..count).map(|_| cloud(config, &mut *rng)).collect()
}

fn cloud<R: Rng + ?Sized>(config: &CloudConfig, rng: &mut R) -> Decoration {
    let offsets: Vec<(Point3, f64)> = CLOUD_PUFFS
        .iter()
        .map(|&(x, radius)| {
            (Point3::new(x, rng.gen_range(0.0..PUFF_JITTER), 0.0), radius)
        })
        .collect();

    let position = Point3::new(
        rng.gen_range(config.spread),
        rng.gen_range(config.altitude),
        rng.gen_range(config.spread),
    );
    // The whole cloud turns around the world's vertical axis, so it can end
    // up anywhere on a ring around the map
    let angle = rng.gen_range(0.0..TAU);

    let puffs = offsets
        .into_iter()
        .map(|(offset, radius)| Sphere {
            center: (position + offset).rotate_y(angle),
            radius,
        })
        .collect();
    Decoration::Cloud { puffs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::BoundaryRadius, util::range::NumRange};
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_water() {
        let mut config = MapConfig {
            radius: 5,
            ..Default::default()
        };
        let water = water(&config).unwrap();
        assert_approx_eq!(water.top_radius, 6.0);
        assert_approx_eq!(water.bottom_radius, 6.0);
        assert_approx_eq!(water.height, 2.0);
        assert_approx_eq!(water.center.y, 1.0);
        assert_eq!(water.segments, 50);

        config.layout.boundary = BoundaryRadius::Fixed { radius: 3.0 };
        assert_approx_eq!(super::water(&config).unwrap().top_radius, 4.0);

        config.scenery.water = false;
        assert_eq!(super::water(&config), None);
    }

    #[test]
    fn test_clouds() {
        let config = CloudConfig::default();
        let mut rng = Pcg64::seed_from_u64(8);
        for _ in 0..20 {
            let clouds = clouds(&config, &mut rng);
            assert!(clouds.len() <= 4);
            for cloud in clouds {
                let puffs = match cloud {
                    Decoration::Cloud { puffs } => puffs,
                    other => panic!("Expected cloud, got {:?}", other),
                };
                assert_eq!(puffs.len(), 3);
                for puff in puffs {
                    // Rotation about y doesn't change altitude
                    assert!(puff.center.y >= 7.0 && puff.center.y < 14.3);
                }
            }
        }
    }

    #[test]
    fn test_no_clouds() {
        let config = CloudConfig {
            max_count: 0,
            ..Default::default()
        };
        let mut rng = Pcg64::seed_from_u64(9);
        assert!(clouds(&config, &mut rng).is_empty());
    }

    #[test]
    fn test_cloud_shape() {
        // Pin the cloud to the origin so only the rotation moves puffs around
        let config = CloudConfig {
            max_count: 1,
            count_exponent: 0.0,
            spread: NumRange::new(0.0, 0.0),
            altitude: NumRange::new(10.0, 10.0),
        };
        let mut rng = Pcg64::seed_from_u64(10);
        let clouds = clouds(&config, &mut rng);
        assert_eq!(clouds.len(), 1);
        let puffs = match &clouds[0] {
            Decoration::Cloud { puffs } => puffs,
            other => panic!("Expected cloud, got {:?}", other),
        };
        let radii: Vec<f64> = puffs.iter().map(|puff| puff.radius).collect();
        assert_eq!(radii, vec![1.2, 1.5, 0.9]);
        // The middle puff sits on the axis, the outer ones 1.85 away
        let distance = |puff: &Sphere| puff.center.x.hypot(puff.center.z);
        assert_approx_eq!(distance(&puffs[0]), 1.85);
        assert_approx_eq!(distance(&puffs[1]), 0.0);
        assert_approx_eq!(distance(&puffs[2]), 1.85);
    }
}
