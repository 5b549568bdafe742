//! Hand colors and their on-wire channel layout.
//!
//! Configuration always gives colors RGB-first; the ring's wiring decides
//! the byte order and whether a white channel exists. The white channel of a
//! 4-channel ring is always sent explicitly, zero when the configuration
//! does not set it.

use rgb::RGB8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub enum ColorOrder {
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "GRB")]
    Grb,
    #[serde(rename = "RGBW")]
    Rgbw,
    #[serde(rename = "GRBW")]
    Grbw,
}

impl ColorOrder {
    pub fn channel_count(self) -> usize {
        match self {
            ColorOrder::Rgb | ColorOrder::Grb => 3,
            ColorOrder::Rgbw | ColorOrder::Grbw => 4,
        }
    }

    /// Arrange a hand color into this order's wire bytes.
    pub fn arrange(self, color: HandColor) -> Channels {
        let HandColor { rgb, white } = color;
        let white = white.unwrap_or(0);
        match self {
            ColorOrder::Rgb => Channels::new(&[rgb.r, rgb.g, rgb.b]),
            ColorOrder::Grb => Channels::new(&[rgb.g, rgb.r, rgb.b]),
            ColorOrder::Rgbw => Channels::new(&[rgb.r, rgb.g, rgb.b, white]),
            ColorOrder::Grbw => Channels::new(&[rgb.g, rgb.r, rgb.b, white]),
        }
    }
}

/// A hand color as configured: an RGB value plus an optional white channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandColor {
    pub rgb: RGB8,
    pub white: Option<u8>,
}

impl HandColor {
    /// Accepts the raw `[r, g, b]` / `[r, g, b, w]` array from the
    /// configuration file. Other lengths are rejected by config validation
    /// before this is called.
    pub fn from_components(components: &[u8]) -> Option<Self> {
        match *components {
            [r, g, b] => Some(Self {
                rgb: RGB8::new(r, g, b),
                white: None,
            }),
            [r, g, b, w] => Some(Self {
                rgb: RGB8::new(r, g, b),
                white: Some(w),
            }),
            _ => None,
        }
    }

    pub fn channel_count(&self) -> usize {
        if self.white.is_some() { 4 } else { 3 }
    }
}

/// Wire bytes for a single pixel. The length is fixed by the ring's
/// [`ColorOrder`] when the value is built and never re-checked downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channels {
    bytes: [u8; 4],
    len: u8,
}

impl Channels {
    fn new(bytes: &[u8]) -> Self {
        let mut buf = [0u8; 4];
        buf[..bytes.len()].copy_from_slice(bytes);
        Self {
            bytes: buf,
            len: bytes.len() as u8,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    pub fn channel_count(&self) -> usize {
        usize::from(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::ColorOrder;
    use super::HandColor;

    #[test]
    fn grb_rings_swap_the_first_two_bytes() {
        let color = HandColor::from_components(&[76, 0, 153]).unwrap();
        assert_eq!(ColorOrder::Grb.arrange(color).as_slice(), &[0, 76, 153]);
        assert_eq!(ColorOrder::Rgb.arrange(color).as_slice(), &[76, 0, 153]);
    }

    #[test]
    fn four_channel_rings_always_send_a_white_byte() {
        let color = HandColor::from_components(&[0, 127, 255]).unwrap();
        let channels = ColorOrder::Grbw.arrange(color);
        assert_eq!(channels.channel_count(), 4);
        assert_eq!(channels.as_slice(), &[127, 0, 255, 0]);
    }

    #[test]
    fn configured_white_channel_is_carried_through() {
        let color = HandColor::from_components(&[10, 20, 30, 40]).unwrap();
        assert_eq!(
            ColorOrder::Rgbw.arrange(color).as_slice(),
            &[10, 20, 30, 40],
        );
    }

    #[test]
    fn component_arrays_must_have_three_or_four_entries() {
        assert!(HandColor::from_components(&[1, 2]).is_none());
        assert!(HandColor::from_components(&[1, 2, 3, 4, 5]).is_none());
    }
}
