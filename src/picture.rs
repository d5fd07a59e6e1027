//! Margined multi-plane picture buffer.
//!
//! A [`PictureBuffer`] owns the raw sample storage of one picture across its
//! color components, plus two precomputed addressing tables that give the
//! storage offset of any coding-tree unit or quad-tree sub-unit in O(1).
//! Every operation is synchronous and CPU-bound; concurrency (frame- or
//! tile-level) is the caller's responsibility.

use crate::error::{PictureError, Result};
use crate::format::{ChannelType, ChromaFormat, ComponentId};
use crate::plane::Plane;

/// Fixed margin slack added around the picture regardless of the margin
/// flag: alignment plus headroom for fixed-tap filter overreads.
pub const MARGIN_PAD: u32 = 16;

/// Creation parameters for a picture buffer.
#[derive(Debug, Clone)]
pub struct PictureConfig {
    /// Logical picture width in luma samples.
    pub width: u32,
    /// Logical picture height in luma samples.
    pub height: u32,
    /// Chroma subsampling format.
    pub chroma_format: ChromaFormat,
    /// Coding-tree unit width in luma samples.
    pub ctu_width: u32,
    /// Coding-tree unit height in luma samples.
    pub ctu_height: u32,
    /// Maximum quad-tree partition depth below one CTU.
    pub max_depth: u32,
    /// Reserve a full CTU-sized margin around the picture.
    pub use_margin: bool,
}

impl Default for PictureConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            chroma_format: ChromaFormat::Yuv420,
            ctu_width: 64,
            ctu_height: 64,
            max_depth: 4,
            use_margin: true,
        }
    }
}

/// Margined picture sample storage with CTU addressing tables.
///
/// Geometry, storage, and both tables are fixed at creation; destruction is
/// handled by ownership. The `border_extended` flag gates re-running the
/// border-replication pass; operations that overwrite interior content must
/// clear it via [`mark_dirty`](PictureBuffer::mark_dirty).
#[derive(Debug, Clone)]
pub struct PictureBuffer {
    pub(crate) config: PictureConfig,
    pub(crate) margin_x: usize,
    pub(crate) margin_y: usize,
    pub(crate) border_extended: bool,
    pub(crate) planes: Vec<Plane>,
    /// Per-channel CTU offsets, row-major over the CTU grid.
    ctu_offsets: [Vec<usize>; 2],
    /// Per-channel quad-tree sub-unit offsets within one CTU.
    sub_unit_offsets: [Vec<usize>; 2],
    ctus_wide: usize,
    ctus_high: usize,
}

impl PictureBuffer {
    /// Allocate a picture buffer and precompute its addressing tables.
    ///
    /// All plane storage and both tables are allocated eagerly; allocation
    /// failure yields [`PictureError::Allocation`] with nothing retained.
    ///
    /// # Panics
    ///
    /// Panics on invalid creation parameters: zero width, height, or CTU
    /// extent, or a `max_depth` that subdivides any plane's CTU below one
    /// sample per cell.
    pub fn new(config: PictureConfig) -> Result<Self> {
        assert!(config.width > 0, "picture width must be positive");
        assert!(config.height > 0, "picture height must be positive");
        assert!(config.ctu_width > 0, "CTU width must be positive");
        assert!(config.ctu_height > 0, "CTU height must be positive");

        let (ctu_margin_x, ctu_margin_y) = if config.use_margin {
            (config.ctu_width, config.ctu_height)
        } else {
            (0, 0)
        };
        let margin_x = (ctu_margin_x + MARGIN_PAD) as usize;
        let margin_y = (ctu_margin_y + MARGIN_PAD) as usize;

        let num_components = config.chroma_format.num_components();
        let mut planes = Vec::with_capacity(num_components);
        for idx in 0..num_components {
            let component = ComponentId::from_index(idx);
            let sx = config.chroma_format.scale_x(component);
            let sy = config.chroma_format.scale_y(component);
            planes.push(Plane::new(
                (config.width >> sx) as usize,
                (config.height >> sy) as usize,
                margin_x >> sx,
                margin_y >> sy,
            )?);
        }

        // Same CTU grid for every channel; per-channel pixel extents are
        // scaled by that channel's subsampling.
        let ctus_wide = config.width.div_ceil(config.ctu_width) as usize;
        let ctus_high = config.height.div_ceil(config.ctu_height) as usize;

        let mut ctu_offsets: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
        let mut sub_unit_offsets: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
        for component in [ComponentId::Y, ComponentId::Cb] {
            if component.index() >= num_components {
                break;
            }
            let channel = component.channel_type();
            let sx = config.chroma_format.scale_x(component);
            let sy = config.chroma_format.scale_y(component);
            let ctu_w = (config.ctu_width >> sx) as usize;
            let ctu_h = (config.ctu_height >> sy) as usize;
            assert!(
                ctu_w >> config.max_depth > 0 && ctu_h >> config.max_depth > 0,
                "max_depth {} subdivides the {:?}-channel CTU below one sample",
                config.max_depth,
                channel
            );
            let stride = planes[component.index()].stride();

            let mut ctu = alloc_table(ctus_wide * ctus_high)?;
            for row in 0..ctus_high {
                for col in 0..ctus_wide {
                    ctu.push(stride * row * ctu_h + col * ctu_w);
                }
            }
            ctu_offsets[channel.index()] = ctu;

            let parts = 1usize << config.max_depth;
            let cell_w = ctu_w >> config.max_depth;
            let cell_h = ctu_h >> config.max_depth;
            let mut sub = alloc_table(parts * parts)?;
            for row in 0..parts {
                for col in 0..parts {
                    sub.push(stride * row * cell_h + col * cell_w);
                }
            }
            sub_unit_offsets[channel.index()] = sub;
        }

        tracing::debug!(
            "created {}x{} {} picture buffer, margins {}x{}, {}x{} CTU grid",
            config.width,
            config.height,
            config.chroma_format,
            margin_x,
            margin_y,
            ctus_wide,
            ctus_high
        );

        Ok(Self {
            config,
            margin_x,
            margin_y,
            border_extended: false,
            planes,
            ctu_offsets,
            sub_unit_offsets,
            ctus_wide,
            ctus_high,
        })
    }

    /// Get the logical picture width in luma samples.
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Get the logical picture height in luma samples.
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Get the chroma format.
    pub fn chroma_format(&self) -> ChromaFormat {
        self.config.chroma_format
    }

    /// Get the creation parameters.
    pub fn config(&self) -> &PictureConfig {
        &self.config
    }

    /// Get the number of valid planes.
    pub fn num_components(&self) -> usize {
        self.planes.len()
    }

    /// Get the horizontal margin in luma samples.
    pub fn margin_x(&self) -> usize {
        self.margin_x
    }

    /// Get the vertical margin in luma samples.
    pub fn margin_y(&self) -> usize {
        self.margin_y
    }

    /// Get a component's plane.
    ///
    /// # Panics
    ///
    /// Panics if the component is not valid for this chroma format.
    pub fn plane(&self, component: ComponentId) -> &Plane {
        &self.planes[component.index()]
    }

    /// Get a component's plane mutably.
    ///
    /// Callers that overwrite logical-interior content must follow up with
    /// [`mark_dirty`](PictureBuffer::mark_dirty).
    pub fn plane_mut(&mut self, component: ComponentId) -> &mut Plane {
        &mut self.planes[component.index()]
    }

    /// Get the CTU grid dimensions as (columns, rows).
    pub fn ctu_grid(&self) -> (usize, usize) {
        (self.ctus_wide, self.ctus_high)
    }

    /// Get a channel's CTU offset table, row-major over the CTU grid.
    ///
    /// Offsets are relative to the plane's origin. Empty for the chroma
    /// channel of a monochrome picture.
    pub fn ctu_offsets(&self, channel: ChannelType) -> &[usize] {
        &self.ctu_offsets[channel.index()]
    }

    /// Get a channel's sub-unit offset table.
    ///
    /// `4^max_depth` entries indexed `(row << max_depth) + col` over the
    /// finest partition grid of one CTU.
    pub fn sub_unit_offsets(&self, channel: ChannelType) -> &[usize] {
        &self.sub_unit_offsets[channel.index()]
    }

    /// Check whether the margins currently hold replicated edge samples.
    pub fn is_border_extended(&self) -> bool {
        self.border_extended
    }

    /// Clear the border-extension flag.
    ///
    /// Call after overwriting logical-interior content; the next
    /// [`extend_border`](PictureBuffer::extend_border) then reruns the
    /// replication pass instead of short-circuiting.
    pub fn mark_dirty(&mut self) {
        self.border_extended = false;
    }

    /// Copy the full padded storage of every plane into `dst`.
    ///
    /// The destination's border flag is left to its own history: the copy
    /// moves margin bytes verbatim, so they are exactly as valid as they
    /// were in this buffer.
    ///
    /// # Panics
    ///
    /// Panics if `dst` differs in logical width, height, chroma format, or
    /// padded plane geometry.
    pub fn copy_to(&self, dst: &mut PictureBuffer) {
        assert_eq!(self.config.width, dst.config.width);
        assert_eq!(self.config.height, dst.config.height);
        assert_eq!(self.config.chroma_format, dst.config.chroma_format);

        for (src_plane, dst_plane) in self.planes.iter().zip(dst.planes.iter_mut()) {
            assert_eq!(src_plane.stride(), dst_plane.stride());
            assert_eq!(src_plane.total_height(), dst_plane.total_height());
            dst_plane
                .storage_mut()
                .copy_from_slice(src_plane.storage());
        }
    }

    /// Fill every margin by edge replication.
    ///
    /// Idempotent: a no-op while the border flag is set. The flag is
    /// buffer-wide and set once all planes are extended.
    pub fn extend_border(&mut self) {
        if self.border_extended {
            return;
        }

        for plane in &mut self.planes {
            plane.extend_border();
        }

        self.border_extended = true;
    }
}

/// Allocate an empty offset table with exact capacity.
fn alloc_table(len: usize) -> Result<Vec<usize>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(len)
        .map_err(|_| PictureError::Allocation {
            bytes: len * std::mem::size_of::<usize>(),
        })?;
    Ok(table)
}
