//! Property-based tests for buffer geometry and the index permutations.
//!
//! Uses proptest to verify that plane geometry always bounds the logical
//! window, that border replication is correct and stable for arbitrary
//! content, and that the resampling axis maps are bijective for arbitrary
//! picture/unit extents.

use proptest::prelude::*;
use transcode_picture::{
    AxisMap, ChromaFormat, ComponentId, Pel, PictureBuffer, PictureConfig, ResampleDirection,
};

fn arb_config() -> impl Strategy<Value = PictureConfig> {
    (
        1u32..=96,
        1u32..=96,
        prop_oneof![
            Just(ChromaFormat::Monochrome),
            Just(ChromaFormat::Yuv420),
            Just(ChromaFormat::Yuv422),
            Just(ChromaFormat::Yuv444),
        ],
        prop_oneof![Just(16u32), Just(32), Just(64)],
        any::<bool>(),
    )
        .prop_map(|(w2, h2, chroma_format, ctu, use_margin)| PictureConfig {
            // Even dimensions keep every chroma format valid
            width: w2 * 2,
            height: h2 * 2,
            chroma_format,
            ctu_width: ctu,
            ctu_height: ctu,
            max_depth: 2,
            use_margin,
        })
}

proptest! {
    /// The logical window always fits inside the padded storage.
    #[test]
    fn geometry_bounds_hold(config in arb_config()) {
        let pic = PictureBuffer::new(config).unwrap();
        for idx in 0..pic.num_components() {
            let plane = pic.plane(ComponentId::from_index(idx));
            prop_assert!(plane.stride() >= plane.width());
            prop_assert!(plane.total_height() >= plane.height());
            prop_assert!(
                plane.origin() + (plane.height() - 1) * plane.stride() + plane.width()
                    <= plane.storage().len()
            );
        }
    }

    /// After extension every margin sample equals its nearest edge sample.
    #[test]
    fn border_replication_is_correct(config in arb_config(), seed in any::<u64>()) {
        let mut pic = PictureBuffer::new(config).unwrap();
        let mut state = seed | 1;
        for idx in 0..pic.num_components() {
            let plane = pic.plane_mut(ComponentId::from_index(idx));
            for y in 0..plane.height() {
                for x in 0..plane.width() {
                    // xorshift keeps the fill cheap and deterministic
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    plane.set_sample(x as isize, y as isize, (state & 0x3FF) as Pel);
                }
            }
        }
        pic.extend_border();

        for idx in 0..pic.num_components() {
            let plane = pic.plane(ComponentId::from_index(idx));
            let w = plane.width() as isize;
            let h = plane.height() as isize;
            let mx = plane.margin_x() as isize;
            let my = plane.margin_y() as isize;
            for y in [0, h / 2, h - 1] {
                for k in [1, mx / 2, mx] {
                    prop_assert_eq!(plane.sample(-k, y), plane.sample(0, y));
                    prop_assert_eq!(plane.sample(w - 1 + k, y), plane.sample(w - 1, y));
                }
            }
            for k1 in [1, mx] {
                for k2 in [1, my] {
                    prop_assert_eq!(plane.sample(-k1, -k2), plane.sample(0, 0));
                    prop_assert_eq!(
                        plane.sample(w - 1 + k1, h - 1 + k2),
                        plane.sample(w - 1, h - 1)
                    );
                }
            }
        }
    }

    /// Re-running extension after mark_dirty reproduces identical storage.
    #[test]
    fn border_extension_is_stable(config in arb_config()) {
        let mut pic = PictureBuffer::new(config).unwrap();
        for idx in 0..pic.num_components() {
            let plane = pic.plane_mut(ComponentId::from_index(idx));
            for y in 0..plane.height() {
                for x in 0..plane.width() {
                    plane.set_sample(x as isize, y as isize, ((x * 31 + y * 7) & 0xFF) as Pel);
                }
            }
        }
        pic.extend_border();
        let snapshot: Vec<Vec<Pel>> = (0..pic.num_components())
            .map(|idx| pic.plane(ComponentId::from_index(idx)).storage().to_vec())
            .collect();

        pic.mark_dirty();
        pic.extend_border();
        for (idx, expected) in snapshot.iter().enumerate() {
            let plane = pic.plane(ComponentId::from_index(idx));
            prop_assert_eq!(plane.storage(), expected.as_slice());
        }
    }

    /// The axis map visits every raster coordinate exactly once.
    #[test]
    fn axis_map_is_bijective(extent in 1usize..=512, unit in 1usize..=128) {
        let map = AxisMap::new(extent, unit);
        let mut seen = vec![false; extent];
        for x in 0..extent {
            let raster = map.to_raster(x);
            prop_assert!(raster < extent);
            prop_assert!(!seen[raster], "collision at raster {}", raster);
            seen[raster] = true;
        }
        prop_assert!(seen.iter().all(|&v| v));
    }

    /// Forward and inverse axis maps compose to the identity both ways.
    #[test]
    fn axis_map_round_trips(extent in 1usize..=512, unit in 1usize..=128) {
        let map = AxisMap::new(extent, unit);
        for x in 0..extent {
            prop_assert_eq!(map.to_interleaved(map.to_raster(x)), x);
            prop_assert_eq!(map.to_raster(map.to_interleaved(x)), x);
        }
    }

    /// Buffer-level resampling round-trips for arbitrary geometry.
    #[test]
    fn resample_round_trips(config in arb_config()) {
        let mut pic = PictureBuffer::new(config).unwrap();
        for idx in 0..pic.num_components() {
            let plane = pic.plane_mut(ComponentId::from_index(idx));
            for y in 0..plane.height() {
                for x in 0..plane.width() {
                    plane.set_sample(x as isize, y as isize, ((x * 131 + y * 17) & 0x7FF) as Pel);
                }
            }
        }
        let reference: Vec<Vec<Pel>> = (0..pic.num_components())
            .map(|idx| {
                let plane = pic.plane(ComponentId::from_index(idx));
                (0..plane.height())
                    .flat_map(|y| plane.row(y).to_vec())
                    .collect()
            })
            .collect();

        let ctu = pic.config().ctu_width;
        pic.resample(ctu, ctu, ResampleDirection::Forward).unwrap();
        pic.resample(ctu, ctu, ResampleDirection::Inverse).unwrap();

        for (idx, expected) in reference.iter().enumerate() {
            let plane = pic.plane(ComponentId::from_index(idx));
            let actual: Vec<Pel> = (0..plane.height())
                .flat_map(|y| plane.row(y).to_vec())
                .collect();
            prop_assert_eq!(&actual, expected);
        }
    }
}
