//! Window foreground polling.

use std::fmt;
use std::time::{Duration, Instant};

use modesense_core::constants::DEFAULT_FOREGROUND_POLL_INTERVAL;
use modesense_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::tracker::InputModeTracker;

/// Something that knows whether the application window is in the foreground.
pub trait ForegroundSource {
    fn is_foreground(&self) -> bool;
}

impl<F: Fn() -> bool> ForegroundSource for F {
    fn is_foreground(&self) -> bool {
        self()
    }
}

/// Foreground state fed from window focus events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusFlag {
    focused: bool,
}

impl Default for FocusFlag {
    fn default() -> Self {
        Self { focused: true }
    }
}

impl FocusFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a focus change.
    pub fn set(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl ForegroundSource for FocusFlag {
    fn is_foreground(&self) -> bool {
        self.focused
    }
}

/// Foreground monitor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForegroundConfig {
    /// Minimum time between two foreground checks.
    pub poll_interval: Duration,
}

impl Default for ForegroundConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_FOREGROUND_POLL_INTERVAL,
        }
    }
}

impl ForegroundConfig {
    /// Set the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Suspends input mode detection while the window is in the background.
///
/// The host calls [`ForegroundMonitor::poll`] every frame; the source is only
/// consulted once per poll interval.
pub struct ForegroundMonitor {
    interval: Duration,
    last_poll: Option<Instant>,
    is_foreground: bool,
    listeners: Vec<Box<dyn FnMut(bool)>>,
}

impl ForegroundMonitor {
    /// Create a monitor. The window is assumed to start in the foreground.
    pub fn new(config: ForegroundConfig) -> Result<Self> {
        if config.poll_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "foreground poll interval must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            interval: config.poll_interval,
            last_poll: None,
            is_foreground: true,
            listeners: Vec::new(),
        })
    }

    /// Returns `true` if the window was in the foreground at the last check.
    #[must_use]
    pub const fn is_foreground(&self) -> bool {
        self.is_foreground
    }

    /// Register a listener for foreground changes.
    pub fn on_foreground_changed(&mut self, listener: impl FnMut(bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Check the source if the poll interval has elapsed.
    ///
    /// On a change the tracker's ignore flag is updated and listeners are
    /// notified. Returns the new foreground state when it changed.
    pub fn poll(
        &mut self,
        now: Instant,
        source: &impl ForegroundSource,
        tracker: &mut InputModeTracker,
    ) -> Option<bool> {
        if let Some(last) = self.last_poll {
            if now.saturating_duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_poll = Some(now);

        let foreground = source.is_foreground();
        if foreground == self.is_foreground {
            return None;
        }

        self.is_foreground = foreground;
        tracker.set_ignore_events(!foreground);
        info!(foreground, "window foreground changed");
        for listener in &mut self.listeners {
            listener(foreground);
        }
        Some(foreground)
    }
}

impl Default for ForegroundMonitor {
    fn default() -> Self {
        Self {
            interval: DEFAULT_FOREGROUND_POLL_INTERVAL,
            last_poll: None,
            is_foreground: true,
            listeners: Vec::new(),
        }
    }
}

impl fmt::Debug for ForegroundMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForegroundMonitor")
            .field("interval", &self.interval)
            .field("last_poll", &self.last_poll)
            .field("is_foreground", &self.is_foreground)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use modesense_core::InputMode;

    use super::*;
    use crate::key::{GamepadKey, Key};

    #[test]
    fn background_suspends_detection() {
        let mut monitor = ForegroundMonitor::default();
        let mut tracker = InputModeTracker::default();
        let mut focus = FocusFlag::new();
        let start = Instant::now();

        assert_eq!(monitor.poll(start, &focus, &mut tracker), None);

        focus.set(false);
        let later = start + Duration::from_secs(1);
        assert_eq!(monitor.poll(later, &focus, &mut tracker), Some(false));
        assert!(tracker.is_ignoring_events());
        assert!(!monitor.is_foreground());

        tracker.handle_key_down(0, Key::Gamepad(GamepadKey::Start));
        assert_eq!(tracker.last_mode(0), InputMode::Mouse);

        focus.set(true);
        let later = later + Duration::from_secs(1);
        assert_eq!(monitor.poll(later, &focus, &mut tracker), Some(true));
        assert!(!tracker.is_ignoring_events());
    }

    #[test]
    fn polls_at_most_once_per_interval() {
        let mut monitor =
            ForegroundMonitor::new(ForegroundConfig::default().with_poll_interval(Duration::from_secs(1)))
                .unwrap();
        let mut tracker = InputModeTracker::default();
        let start = Instant::now();

        assert_eq!(monitor.poll(start, &|| true, &mut tracker), None);
        assert_eq!(
            monitor.poll(start + Duration::from_millis(200), &|| false, &mut tracker),
            None
        );
        assert!(monitor.is_foreground());
        assert_eq!(
            monitor.poll(start + Duration::from_millis(1000), &|| false, &mut tracker),
            Some(false)
        );
    }

    #[test]
    fn listeners_see_each_change() {
        let mut monitor = ForegroundMonitor::default();
        let mut tracker = InputModeTracker::default();
        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        monitor.on_foreground_changed(move |_| counter.set(counter.get() + 1));

        let mut now = Instant::now();
        for foreground in [false, false, true, true, false] {
            monitor.poll(now, &move || foreground, &mut tracker);
            now += Duration::from_secs(1);
        }
        assert_eq!(changes.get(), 3);
    }

    #[test]
    fn zero_interval_rejected() {
        let config = ForegroundConfig::default().with_poll_interval(Duration::ZERO);
        assert!(ForegroundMonitor::new(config).is_err());
    }
}
