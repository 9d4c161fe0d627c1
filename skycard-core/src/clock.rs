use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use std::{fmt::Display, time::Duration};
use tokio::{sync::watch, task::JoinHandle};

/// 12-hour clock with zero-padded hour, e.g. "06:05 AM".
const CLOCK_FORMAT: &str = "%I:%M %p";

/// Render an instant as a 12-hour clock string in `tz`.
pub fn format_clock<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format(CLOCK_FORMAT).to_string()
}

/// "Weekday, hh:mm AM" at a location `offset_secs` east of UTC.
///
/// Offsets chrono rejects (beyond ±24h) fall back to UTC.
pub fn weekday_clock_label(now: DateTime<Utc>, offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(offset_secs).unwrap_or_else(|| {
        tracing::warn!(offset_secs, "timezone offset out of range, using UTC");
        Utc.fix()
    });
    now.with_timezone(&offset)
        .format("%A, %I:%M %p")
        .to_string()
}

/// Periodically recomputes the clock label for one snapshot.
///
/// The background task is aborted when the ticker is dropped.
#[derive(Debug)]
pub struct ClockTicker {
    label: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl ClockTicker {
    /// Must be called from within a tokio runtime.
    pub fn spawn(offset_secs: i32, period: Duration) -> Self {
        let (tx, rx) = watch::channel(weekday_clock_label(Utc::now(), offset_secs));

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // Consume initial tick

            loop {
                interval.tick().await;
                if tx.send(weekday_clock_label(Utc::now(), offset_secs)).is_err() {
                    break;
                }
            }
        });

        Self { label: rx, task }
    }

    /// Latest computed label.
    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    /// Waits for the next refresh and returns the new label.
    ///
    /// Returns `None` once the background task is gone.
    pub async fn next_label(&mut self) -> Option<String> {
        self.label.changed().await.ok()?;
        Some(self.label.borrow_and_update().clone())
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
