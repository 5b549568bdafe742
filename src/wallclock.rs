//! One wall-clock sample per invocation.

/// The time this invocation renders. Immutable for the whole run: the hands
/// and the cuckoo trigger both come from the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSample {
    pub hour: u8,
    pub minute: u8,
}

/// Exported before the first local-time read; libc resolves the zone.
pub fn set_timezone(timezone: &str) {
    std::env::set_var("TZ", timezone);
}

pub fn sample() -> Result<TimeSample, time::error::IndeterminateOffset> {
    let now = time::OffsetDateTime::now_local()?;
    Ok(TimeSample {
        hour: now.hour(),
        minute: now.minute(),
    })
}
