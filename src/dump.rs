//! Raw 8-bit debug dump.
//!
//! Writes the logical picture area as 8-bit samples, planes concatenated in
//! component order, bit-depth-downshifted with round-to-nearest. A developer
//! convenience for eyeballing reconstructions; not a codec output path.

use crate::error::Result;
use crate::format::{BitDepths, ComponentId};
use crate::picture::PictureBuffer;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

impl PictureBuffer {
    /// Write every plane's logical samples to `writer` in raster order.
    ///
    /// Each sample is right-shifted from its channel's reconstruction bit
    /// depth to 8 bits with round-to-nearest and clipped to `[0, 255]`.
    pub fn dump<W: Write>(&self, writer: &mut W, bit_depths: &BitDepths) -> Result<()> {
        let mut row_bytes = Vec::new();
        for (idx, plane) in self.planes.iter().enumerate() {
            let channel = ComponentId::from_index(idx).channel_type();
            let shift = i32::from(bit_depths.recon(channel)) - 8;
            let offset = if shift > 0 { 1 << (shift - 1) } else { 0 };

            for y in 0..plane.height() {
                row_bytes.clear();
                row_bytes.extend(
                    plane
                        .row(y)
                        .iter()
                        .map(|&p| ((i32::from(p) + offset) >> shift).clamp(0, 255) as u8),
                );
                writer.write_all(&row_bytes)?;
            }
        }
        Ok(())
    }

    /// Dump to a file, truncating or appending per `append`.
    pub fn dump_to_file(
        &self,
        path: impl AsRef<Path>,
        bit_depths: &BitDepths,
        append: bool,
    ) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        self.dump(&mut writer, bit_depths)?;
        writer.flush()?;
        Ok(())
    }
}
