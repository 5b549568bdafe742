//! LED ring output over DDP/UDP.
//!
//! The ring controller receives one datagram per frame, pixel bytes in the
//! ring's wire channel order. Brightness is applied when the frame is sent,
//! so the buffer keeps the configured colors untouched.

use crate::color::Channels;
use crate::config::RingConfig;
use crate::geometry::RingLayout;
use crate::hardware::HardwareError;

pub struct DdpRing {
    connection: ddp_rs::connection::DDPConnection,
    frame: FrameBuffer,
    brightness: f32,
}

impl DdpRing {
    pub fn connect(config: &RingConfig, layout: &RingLayout) -> Result<Self, HardwareError> {
        let socket = std::net::UdpSocket::bind(format!("0.0.0.0:{}", config.bind_port))
            .map_err(HardwareError::UdpBind)?;

        let connection = ddp_rs::connection::DDPConnection::try_new(
            format!("{}:{}", config.host, config.port),
            ddp_rs::protocol::PixelConfig::default(),
            ddp_rs::protocol::ID::Default,
            socket,
        )?;

        Ok(Self {
            connection,
            frame: FrameBuffer::new(
                layout.pixel_count(),
                config.color_order.channel_count(),
            ),
            brightness: config.brightness,
        })
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Paints one pixel in the frame buffer. Nothing reaches the ring until
    /// [`DdpRing::show`].
    pub fn set_pixel(&mut self, index: u8, color: &Channels) {
        self.frame.set_pixel(index, color);
    }

    pub fn show(&mut self) -> Result<(), HardwareError> {
        self.connection
            .write(&self.frame.scaled(self.brightness))
            .map(drop)
            .map_err(HardwareError::Ddp)
    }
}

struct FrameBuffer {
    bytes: Vec<u8>,
    channels: usize,
}

impl FrameBuffer {
    fn new(pixel_count: u8, channels: usize) -> Self {
        Self {
            bytes: vec![0; usize::from(pixel_count) * channels],
            channels,
        }
    }

    fn clear(&mut self) {
        self.bytes.fill(0);
    }

    fn set_pixel(&mut self, index: u8, color: &Channels) {
        // Both lengths were fixed by the topology at load time.
        assert_eq!(color.channel_count(), self.channels, "channel count mismatch");
        let offset = usize::from(index) * self.channels;
        self.bytes[offset..offset + self.channels].copy_from_slice(color.as_slice());
    }

    fn scaled(&self, brightness: f32) -> Vec<u8> {
        self.bytes
            .iter()
            .map(|&byte| (f32::from(byte) * brightness).round() as u8)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::FrameBuffer;
    use crate::color::ColorOrder;
    use crate::color::HandColor;

    fn channels(order: ColorOrder, components: &[u8]) -> crate::color::Channels {
        order.arrange(HandColor::from_components(components).unwrap())
    }

    #[test]
    fn pixels_land_at_their_channel_offset() {
        let mut frame = FrameBuffer::new(4, 3);
        frame.set_pixel(2, &channels(ColorOrder::Rgb, &[1, 2, 3]));
        assert_eq!(frame.bytes, vec![0, 0, 0, 0, 0, 0, 1, 2, 3, 0, 0, 0]);
    }

    #[test]
    fn clear_drops_previous_hands() {
        let mut frame = FrameBuffer::new(2, 4);
        frame.set_pixel(0, &channels(ColorOrder::Grbw, &[9, 9, 9]));
        frame.clear();
        assert_eq!(frame.bytes, vec![0; 8]);
    }

    #[test]
    fn brightness_scales_the_outgoing_frame_only() {
        let mut frame = FrameBuffer::new(1, 3);
        frame.set_pixel(0, &channels(ColorOrder::Rgb, &[200, 100, 0]));
        assert_eq!(frame.scaled(0.5), vec![100, 50, 0]);
        // The buffer itself keeps full-scale values.
        assert_eq!(frame.bytes, vec![200, 100, 0]);
        assert_eq!(frame.scaled(1.0), vec![200, 100, 0]);
        assert_eq!(frame.scaled(0.0), vec![0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "channel count mismatch")]
    fn wrong_channel_count_is_a_bug() {
        let mut frame = FrameBuffer::new(1, 4);
        frame.set_pixel(0, &channels(ColorOrder::Rgb, &[1, 2, 3]));
    }
}
