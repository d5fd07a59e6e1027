//! CTU-interleaved grid resampling.
//!
//! Reorders the samples of every plane between natural raster order and a
//! coding-tree-unit-interleaved order in which each CTU holds a regular
//! decimation of the whole picture, a layout that lets parallel workers
//! touch disjoint CTUs while still covering the full frame. The permutation
//! is exactly bijective for any picture/CTU geometry, divisible or not, and
//! runs through a freshly allocated scratch plane that then replaces the
//! original storage.

use crate::error::Result;
use crate::format::ComponentId;
use crate::picture::PictureBuffer;
use crate::plane::alloc_storage;

/// Direction of the resampling permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleDirection {
    /// Raster order to CTU-interleaved order.
    Forward,
    /// CTU-interleaved order back to raster order.
    Inverse,
}

/// Per-axis index permutation between raster and CTU-interleaved order.
///
/// With `C` the unit extent, `W` the axis extent, and `N = ceil(W/C)` units,
/// phase `i` within a unit sources a contiguous run of raster coordinates:
/// phases present in the partial last unit (`i < last`) get runs of `N`, the
/// rest runs of `N - 1`. Every raster coordinate is covered exactly once.
#[derive(Debug, Clone, Copy)]
pub struct AxisMap {
    unit: usize,
    units: usize,
    last: usize,
}

impl AxisMap {
    /// Build the map for an axis of `extent` samples cut into `unit`-sized
    /// coding-tree units.
    pub fn new(extent: usize, unit: usize) -> Self {
        assert!(extent > 0 && unit > 0);
        let units = extent.div_ceil(unit);
        Self {
            unit,
            units,
            last: extent - (units - 1) * unit,
        }
    }

    fn base(&self, phase: usize) -> usize {
        if phase < self.last {
            phase * self.units
        } else {
            self.last * self.units + (phase - self.last) * (self.units - 1)
        }
    }

    /// Map an interleaved coordinate to its raster coordinate.
    pub fn to_raster(&self, interleaved: usize) -> usize {
        let unit_index = interleaved / self.unit;
        let phase = interleaved % self.unit;
        self.base(phase) + unit_index
    }

    /// Map a raster coordinate to its interleaved coordinate.
    pub fn to_interleaved(&self, raster: usize) -> usize {
        let pivot = self.last * self.units;
        let (phase, unit_index) = if raster < pivot {
            (raster / self.units, raster % self.units)
        } else {
            let rest = raster - pivot;
            (self.last + rest / (self.units - 1), rest % (self.units - 1))
        };
        unit_index * self.unit + phase
    }
}

impl PictureBuffer {
    /// Permute every plane between raster and CTU-interleaved sample order.
    ///
    /// `ctu_width` and `ctu_height` are luma-scale; each plane uses its own
    /// channel-scaled unit extents. The permutation rewrites interiors only,
    /// so the margins go stale and the border flag is cleared. Scratch
    /// allocation failure leaves already-permuted planes permuted; callers
    /// treat the error as fatal to the picture.
    ///
    /// # Panics
    ///
    /// Panics if either CTU extent is zero.
    pub fn resample(
        &mut self,
        ctu_width: u32,
        ctu_height: u32,
        direction: ResampleDirection,
    ) -> Result<()> {
        assert!(ctu_width > 0 && ctu_height > 0, "CTU extents must be positive");

        tracing::debug!(
            "resampling {}x{} picture, {:?}, {}x{} units",
            self.config.width,
            self.config.height,
            direction,
            ctu_width,
            ctu_height
        );

        for (idx, plane) in self.planes.iter_mut().enumerate() {
            let component = ComponentId::from_index(idx);
            let unit_w = (ctu_width >> self.config.chroma_format.scale_x(component)).max(1);
            let unit_h = (ctu_height >> self.config.chroma_format.scale_y(component)).max(1);

            let width = plane.width();
            let height = plane.height();
            let stride = plane.stride();
            let origin = plane.origin();

            let x_map = AxisMap::new(width, unit_w as usize);
            let y_map = AxisMap::new(height, unit_h as usize);
            let (col_src, row_src): (Vec<usize>, Vec<usize>) = match direction {
                ResampleDirection::Forward => (
                    (0..width).map(|x| x_map.to_raster(x)).collect(),
                    (0..height).map(|y| y_map.to_raster(y)).collect(),
                ),
                ResampleDirection::Inverse => (
                    (0..width).map(|x| x_map.to_interleaved(x)).collect(),
                    (0..height).map(|y| y_map.to_interleaved(y)).collect(),
                ),
            };

            let mut scratch = alloc_storage(plane.storage().len())?;
            let src = plane.storage();
            for y in 0..height {
                let dst_row = origin + y * stride;
                let src_row = origin + row_src[y] * stride;
                for x in 0..width {
                    scratch[dst_row + x] = src[src_row + col_src[x]];
                }
            }
            plane.replace_storage(scratch);
        }

        self.mark_dirty();
        Ok(())
    }
}
