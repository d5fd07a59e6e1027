//! # Transcode Picture
//!
//! Picture-buffer subsystem for block-based video codecs.
//!
//! This crate owns the raw sample storage for one decoded or encoded
//! picture across its color components:
//! - Margined ("padded") plane layout for motion compensation and in-loop
//!   filtering that read slightly outside the picture
//! - Precomputed CTU and quad-tree sub-unit addressing tables for O(1)
//!   coding-unit address computation
//! - Edge-border replication into the margins
//! - A fixed bit-depth-aware color-plane transform
//! - An optional CTU-interleaved resampling permutation
//!
//! Every operation is synchronous and CPU-bound. Instances are exclusively
//! mutated by one thread at a time; read-only sharing of a finished,
//! border-extended picture is safe once the caller establishes the usual
//! happens-before ordering.
//!
//! ## Example
//!
//! ```ignore
//! use transcode_picture::{ChromaFormat, PictureBuffer, PictureConfig};
//!
//! let mut picture = PictureBuffer::new(PictureConfig {
//!     width: 1920,
//!     height: 1080,
//!     chroma_format: ChromaFormat::Yuv420,
//!     ctu_width: 64,
//!     ctu_height: 64,
//!     max_depth: 4,
//!     use_margin: true,
//! })?;
//!
//! // ... reconstruct into the planes ...
//! picture.extend_border();
//! ```

#![allow(clippy::needless_range_loop)]

pub mod convert;
mod dump;
pub mod error;
pub mod format;
pub mod picture;
pub mod plane;
pub mod resample;

pub use convert::{convert_pixel, ConvertParams};
pub use error::{PictureError, Result};
pub use format::{BitDepths, ChannelType, ChromaFormat, ComponentId};
pub use picture::{PictureBuffer, PictureConfig, MARGIN_PAD};
pub use plane::{Pel, Plane};
pub use resample::{AxisMap, ResampleDirection};
