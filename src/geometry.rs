//! Maps wall-clock time onto ring pixel positions.
//!
//! 60 minutes have to land on 16 or 24 physical LEDs, so consecutive minutes
//! legitimately share a pixel. The mapping is table-driven rather than
//! computed: the tables also absorb rings that are wired in the reverse
//! rotational direction.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub enum Direction {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingSize {
    Ring16,
    Ring24,
}

impl RingSize {
    /// Supported ring sizes are a closed set. Anything else must fail
    /// configuration validation, not degrade into a default.
    pub fn from_pixels(pixels: u16) -> Option<Self> {
        match pixels {
            16 => Some(RingSize::Ring16),
            24 => Some(RingSize::Ring24),
            _ => None,
        }
    }

    pub fn pixel_count(self) -> u8 {
        match self {
            RingSize::Ring16 => 16,
            RingSize::Ring24 => 24,
        }
    }
}

// Minute-of-hour to pixel index, one entry per minute 0-59.
const MIN_TO_PIXEL_24_CW: [u8; 60] = [
    0, 0, 1, 1, 2, 2, 2, 3, 3, 4, 4, 4, 5, 5, 6, 6, 6, 7, 7, 8, 8, 8, 9, 9, 10, 10, 10, 11, 11,
    12, 12, 12, 13, 13, 14, 14, 14, 15, 15, 16, 16, 16, 17, 17, 18, 18, 18, 19, 19, 20, 20, 20,
    21, 21, 22, 22, 22, 23, 23, 0,
];

const MIN_TO_PIXEL_24_CCW: [u8; 60] = [
    0, 0, 23, 23, 22, 22, 22, 21, 21, 20, 20, 20, 19, 19, 18, 18, 18, 17, 17, 16, 16, 16, 15, 15,
    14, 14, 14, 13, 13, 12, 12, 12, 11, 11, 10, 10, 10, 9, 9, 8, 8, 8, 7, 7, 6, 6, 6, 5, 5, 4, 4,
    4, 3, 3, 2, 2, 2, 1, 1, 0,
];

const MIN_TO_PIXEL_16_CW: [u8; 60] = [
    0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 7, 8, 8,
    8, 9, 9, 9, 9, 10, 10, 10, 10, 11, 11, 11, 11, 12, 12, 12, 13, 13, 13, 13, 14, 14, 14, 14,
    15, 15, 15, 15, 0,
];

const MIN_TO_PIXEL_16_CCW: [u8; 60] = [
    0, 0, 15, 15, 15, 15, 14, 14, 14, 14, 13, 13, 13, 13, 12, 12, 12, 11, 11, 11, 11, 10, 10, 10,
    10, 9, 9, 9, 9, 8, 8, 8, 7, 7, 7, 7, 6, 6, 6, 6, 5, 5, 5, 5, 4, 4, 4, 3, 3, 3, 3, 2, 2, 2, 2,
    1, 1, 1, 1, 0,
];

// Hour marks on the 16-pixel ring, one entry per normalized hour 0-12.
// 16 does not divide evenly by 12, hence a table instead of arithmetic.
const HOUR_TO_PIXEL_16_CW: [u8; 13] = [0, 1, 3, 4, 5, 7, 8, 9, 11, 12, 13, 15, 0];
const HOUR_TO_PIXEL_16_CCW: [u8; 13] = [0, 15, 13, 12, 11, 9, 8, 7, 5, 4, 3, 1, 0];

#[derive(Debug, Clone, Copy)]
enum HourMarks {
    // 24 pixels / 12 hours: every hour sits two pixels apart, in either
    // wiring direction.
    DoubleSpaced,
    Table(&'static [u8; 13]),
}

/// Lookup tables for one `(RingSize, Direction)` pair, selected once at
/// configuration time so call sites never branch on the wiring again.
#[derive(Debug, Clone, Copy)]
pub struct RingLayout {
    size: RingSize,
    minutes: &'static [u8; 60],
    hours: HourMarks,
}

impl RingLayout {
    pub fn new(size: RingSize, direction: Direction) -> Self {
        let (minutes, hours) = match (size, direction) {
            (RingSize::Ring24, Direction::Clockwise) => {
                (&MIN_TO_PIXEL_24_CW, HourMarks::DoubleSpaced)
            }
            (RingSize::Ring24, Direction::CounterClockwise) => {
                (&MIN_TO_PIXEL_24_CCW, HourMarks::DoubleSpaced)
            }
            (RingSize::Ring16, Direction::Clockwise) => {
                (&MIN_TO_PIXEL_16_CW, HourMarks::Table(&HOUR_TO_PIXEL_16_CW))
            }
            (RingSize::Ring16, Direction::CounterClockwise) => {
                (&MIN_TO_PIXEL_16_CCW, HourMarks::Table(&HOUR_TO_PIXEL_16_CCW))
            }
        };

        Self {
            size,
            minutes,
            hours,
        }
    }

    pub fn pixel_count(&self) -> u8 {
        self.size.pixel_count()
    }

    /// Pixel index for the minute hand. `minute` must be in 0..60; anything
    /// else is a caller bug, not a runtime condition.
    pub fn minute_pixel(&self, minute: u8) -> u8 {
        assert!(minute < 60, "minute out of range: {minute}");
        self.minutes[usize::from(minute)]
    }

    /// Pixel index for the hour hand, from a 24-hour clock value. Hour 0 and
    /// hour 12 land on the same pixel.
    pub fn hour_pixel(&self, hour: u8) -> u8 {
        assert!(hour < 24, "hour out of range: {hour}");
        let hour = normalize_hour(hour);
        match self.hours {
            HourMarks::DoubleSpaced => (hour * 2) % 24,
            HourMarks::Table(table) => table[usize::from(hour)],
        }
    }
}

/// Fold a 24-hour value onto the 12-hour clock face. Also used as the cuckoo
/// repetition count, so it is total over 0..24.
pub fn normalize_hour(hour: u8) -> u8 {
    if hour > 12 {
        hour - 12
    } else {
        hour
    }
}
