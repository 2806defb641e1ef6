use std::time::Duration;

/// Timing constants used by the view tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// How long a press must be held before the long-click callback fires.
    pub long_press_timeout: Duration,

    /// Default duration for the convenience animation builders.
    pub animation_duration: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            long_press_timeout: Duration::from_millis(500),
            animation_duration: Duration::from_millis(300),
        }
    }
}
