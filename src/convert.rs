//! Bit-depth-aware color-plane transform.
//!
//! Reconciles an internal high-precision plane representation with an
//! external bit depth: each input plane is first left-shifted to the common
//! working depth (the larger of the luma/chroma reconstruction depths), then
//! a fixed 3-to-3 linear matrix produces the output triplet with
//! round-to-nearest shifts, a mid-level DC offset on the chroma outputs, and
//! per-plane clipping. The per-pixel kernel is a pure function over three
//! samples; the buffer-level driver parallelizes over rows.

use crate::format::{BitDepths, ChromaFormat};
use crate::picture::PictureBuffer;
use crate::plane::Pel;
use rayon::prelude::*;

/// Precomputed shifts, rounding terms, and clip bounds for the transform.
#[derive(Debug, Clone, Copy)]
pub struct ConvertParams {
    shift_luma: i32,
    shift_chroma: i32,
    round_luma: i32,
    round_chroma: i32,
    max_luma: i32,
    max_chroma: i32,
    chroma_offset: i32,
}

impl ConvertParams {
    /// Derive transform parameters from the reconstruction bit depths.
    pub fn new(bit_depths: &BitDepths) -> Self {
        let max_depth = i32::from(bit_depths.max());
        let shift_luma = max_depth - i32::from(bit_depths.luma);
        let shift_chroma = max_depth - i32::from(bit_depths.chroma);
        Self {
            shift_luma,
            shift_chroma,
            round_luma: 1 << (1 + shift_luma),
            round_chroma: 1 << (1 + shift_chroma),
            max_luma: (1 << bit_depths.luma) - 1,
            max_chroma: (1 << bit_depths.chroma) - 1,
            chroma_offset: 1 << (bit_depths.chroma - 1),
        }
    }
}

/// Transform one pixel's three input samples into the output triplet.
///
/// `in0` plays the luma role, `in1` and `in2` the two chroma roles. The
/// round constants give round-to-nearest semantics for the right shifts;
/// outputs are clipped to each plane's representable range.
pub fn convert_pixel(params: &ConvertParams, in0: Pel, in1: Pel, in2: Pel) -> [Pel; 3] {
    let g = i32::from(in0) << params.shift_luma;
    let b = i32::from(in1) << params.shift_chroma;
    let r = i32::from(in2) << params.shift_chroma;

    let out0 = ((g << 1) + r + b + params.round_luma) >> (2 + params.shift_luma);
    let out1 = ((g << 1) - r - b + params.round_chroma) >> (2 + params.shift_chroma);
    let out2 = (((r - b) << 1) + params.round_chroma) >> (2 + params.shift_chroma);

    [
        out0.clamp(0, params.max_luma) as Pel,
        (out1 + params.chroma_offset).clamp(0, params.max_chroma) as Pel,
        (out2 + params.chroma_offset).clamp(0, params.max_chroma) as Pel,
    ]
}

impl PictureBuffer {
    /// Apply the fixed color-plane transform from `src` into this buffer.
    ///
    /// Purely per-pixel with no cross-row dependency; rows are processed in
    /// parallel. Clears this buffer's border flag, as the interior is
    /// rewritten and the margins go stale.
    ///
    /// # Panics
    ///
    /// Panics unless `src` and this buffer share identical logical width and
    /// height and both are 4:4:4 (one full-resolution sample per plane per
    /// pixel on each side).
    pub fn convert_from(&mut self, src: &PictureBuffer, bit_depths: &BitDepths) {
        assert_eq!(self.config.width, src.config.width);
        assert_eq!(self.config.height, src.config.height);
        assert_eq!(self.config.chroma_format, ChromaFormat::Yuv444);
        assert_eq!(src.config.chroma_format, ChromaFormat::Yuv444);

        let params = ConvertParams::new(bit_depths);
        let width = self.config.width as usize;
        let height = self.config.height as usize;

        // All planes of a 4:4:4 picture share one geometry per buffer.
        let s_stride = src.planes[0].stride();
        let s_origin = src.planes[0].origin();
        let s_span = s_stride * (height - 1) + width;
        let s0 = &src.planes[0].storage()[s_origin..s_origin + s_span];
        let s1 = &src.planes[1].storage()[s_origin..s_origin + s_span];
        let s2 = &src.planes[2].storage()[s_origin..s_origin + s_span];

        let d_stride = self.planes[0].stride();
        let d_origin = self.planes[0].origin();
        let d_span = d_stride * (height - 1) + width;
        let [p0, p1, p2] = self.planes.as_mut_slice() else {
            unreachable!("4:4:4 picture has three planes");
        };
        let d0 = &mut p0.storage_mut()[d_origin..d_origin + d_span];
        let d1 = &mut p1.storage_mut()[d_origin..d_origin + d_span];
        let d2 = &mut p2.storage_mut()[d_origin..d_origin + d_span];

        d0.par_chunks_mut(d_stride)
            .zip(d1.par_chunks_mut(d_stride))
            .zip(d2.par_chunks_mut(d_stride))
            .zip(
                s0.par_chunks(s_stride)
                    .zip(s1.par_chunks(s_stride))
                    .zip(s2.par_chunks(s_stride)),
            )
            .for_each(|(((r0, r1), r2), ((c0, c1), c2))| {
                for x in 0..width {
                    let [out0, out1, out2] = convert_pixel(&params, c0[x], c1[x], c2[x]);
                    r0[x] = out0;
                    r1[x] = out1;
                    r2[x] = out2;
                }
            });

        self.border_extended = false;
    }
}
