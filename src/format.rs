//! Chroma format, component, and bit-depth definitions.

use std::fmt;

/// Chroma subsampling format of a picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChromaFormat {
    /// Luma only, no chroma planes.
    Monochrome,
    /// Chroma subsampled 2:1 both horizontally and vertically.
    Yuv420,
    /// Chroma subsampled 2:1 horizontally only.
    Yuv422,
    /// Full-resolution chroma.
    Yuv444,
}

impl ChromaFormat {
    /// Get the number of valid color components.
    pub fn num_components(&self) -> usize {
        match self {
            Self::Monochrome => 1,
            _ => 3,
        }
    }

    /// Horizontal subsampling shift of a component relative to luma.
    pub fn scale_x(&self, component: ComponentId) -> u32 {
        match (self, component) {
            (_, ComponentId::Y) => 0,
            (Self::Yuv420 | Self::Yuv422, _) => 1,
            _ => 0,
        }
    }

    /// Vertical subsampling shift of a component relative to luma.
    pub fn scale_y(&self, component: ComponentId) -> u32 {
        match (self, component) {
            (_, ComponentId::Y) => 0,
            (Self::Yuv420, _) => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for ChromaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monochrome => write!(f, "yuv400"),
            Self::Yuv420 => write!(f, "yuv420"),
            Self::Yuv422 => write!(f, "yuv422"),
            Self::Yuv444 => write!(f, "yuv444"),
        }
    }
}

/// Color component identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Luma.
    Y,
    /// First chroma component.
    Cb,
    /// Second chroma component.
    Cr,
}

impl ComponentId {
    /// Get the plane index of this component.
    pub fn index(&self) -> usize {
        match self {
            Self::Y => 0,
            Self::Cb => 1,
            Self::Cr => 2,
        }
    }

    /// Get the component for a plane index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not 0, 1, or 2.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Y,
            1 => Self::Cb,
            2 => Self::Cr,
            _ => panic!("invalid component index: {index}"),
        }
    }

    /// Get the channel type this component belongs to.
    ///
    /// Cb and Cr share a channel: they always have identical geometry.
    pub fn channel_type(&self) -> ChannelType {
        match self {
            Self::Y => ChannelType::Luma,
            Self::Cb | Self::Cr => ChannelType::Chroma,
        }
    }
}

/// Channel type: luma, or the chroma group shared by Cb/Cr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// Luma channel.
    Luma,
    /// Chroma channel (Cb and Cr).
    Chroma,
}

impl ChannelType {
    /// Get the table index of this channel.
    pub fn index(&self) -> usize {
        match self {
            Self::Luma => 0,
            Self::Chroma => 1,
        }
    }
}

/// Reconstruction bit depths per channel.
///
/// Supported depths are 8 through 15 bits; samples are stored in a 16-bit
/// signed [`Pel`](crate::plane::Pel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitDepths {
    /// Luma reconstruction bit depth.
    pub luma: u8,
    /// Chroma reconstruction bit depth.
    pub chroma: u8,
}

impl BitDepths {
    /// Create bit depths for luma and chroma.
    pub fn new(luma: u8, chroma: u8) -> Self {
        assert!((8..=15).contains(&luma), "unsupported luma bit depth: {luma}");
        assert!(
            (8..=15).contains(&chroma),
            "unsupported chroma bit depth: {chroma}"
        );
        Self { luma, chroma }
    }

    /// Get the reconstruction bit depth of a channel.
    pub fn recon(&self, channel: ChannelType) -> u8 {
        match channel {
            ChannelType::Luma => self.luma,
            ChannelType::Chroma => self.chroma,
        }
    }

    /// Get the common working bit depth (the larger of the two).
    pub fn max(&self) -> u8 {
        self.luma.max(self.chroma)
    }
}

impl Default for BitDepths {
    fn default() -> Self {
        Self { luma: 8, chroma: 8 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_components() {
        assert_eq!(ChromaFormat::Monochrome.num_components(), 1);
        assert_eq!(ChromaFormat::Yuv420.num_components(), 3);
        assert_eq!(ChromaFormat::Yuv444.num_components(), 3);
    }

    #[test]
    fn test_subsampling_scales() {
        let cb = ComponentId::Cb;
        assert_eq!(ChromaFormat::Yuv420.scale_x(cb), 1);
        assert_eq!(ChromaFormat::Yuv420.scale_y(cb), 1);
        assert_eq!(ChromaFormat::Yuv422.scale_x(cb), 1);
        assert_eq!(ChromaFormat::Yuv422.scale_y(cb), 0);
        assert_eq!(ChromaFormat::Yuv444.scale_x(cb), 0);
        assert_eq!(ChromaFormat::Yuv444.scale_y(cb), 0);

        // Luma is never subsampled
        assert_eq!(ChromaFormat::Yuv420.scale_x(ComponentId::Y), 0);
        assert_eq!(ChromaFormat::Yuv420.scale_y(ComponentId::Y), 0);
    }

    #[test]
    fn test_component_round_trip() {
        for idx in 0..3 {
            assert_eq!(ComponentId::from_index(idx).index(), idx);
        }
    }

    #[test]
    fn test_channel_types() {
        assert_eq!(ComponentId::Y.channel_type(), ChannelType::Luma);
        assert_eq!(ComponentId::Cb.channel_type(), ChannelType::Chroma);
        assert_eq!(ComponentId::Cr.channel_type(), ChannelType::Chroma);
    }

    #[test]
    fn test_bit_depths() {
        let bd = BitDepths::new(10, 8);
        assert_eq!(bd.recon(ChannelType::Luma), 10);
        assert_eq!(bd.recon(ChannelType::Chroma), 8);
        assert_eq!(bd.max(), 10);
    }

    #[test]
    #[should_panic(expected = "unsupported luma bit depth")]
    fn test_bit_depths_reject_out_of_range() {
        let _ = BitDepths::new(16, 8);
    }
}
