//! Tunables for the month timeline and year picker.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeline settings. Pixel values are in the renderer's coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Months materialized on each side of the anchor
    pub half_width: u32,
    /// Extra months of the previous window kept after a scroll-driven shift
    pub retain_buffer: u32,
    /// Distance from the top/bottom edge that triggers an extension
    pub edge_threshold_px: f64,
    /// Months the anchor moves per edge crossing
    pub extend_step: u32,
    /// Offset of the marker line below the viewport top
    pub marker_offset_px: f64,
    /// Jumps further than this many calendar years rebuild the window
    pub jump_rebuild_years: u32,
    pub settle: SettleDelays,
    pub years: YearListConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            half_width: 24,
            retain_buffer: 6,
            edge_threshold_px: 1000.0,
            extend_step: 20,
            marker_offset_px: 120.0,
            jump_rebuild_years: 1,
            settle: SettleDelays::default(),
            years: YearListConfig::default(),
        }
    }
}

/// Delays after a programmatic scroll before scroll-driven updates resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleDelays {
    /// Time for the window to regenerate after a rebuild
    pub regenerate_ms: u64,
    /// Smooth scroll-into-view animation
    pub scroll_ms: u64,
    pub month_step_ms: u64,
    pub year_step_ms: u64,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            regenerate_ms: 300,
            scroll_ms: 1000,
            month_step_ms: 200,
            year_step_ms: 300,
        }
    }
}

impl SettleDelays {
    pub fn rebuild_jump(&self) -> Duration {
        Duration::from_millis(self.regenerate_ms + self.scroll_ms)
    }

    pub fn scroll(&self) -> Duration {
        Duration::from_millis(self.scroll_ms)
    }

    pub fn month_step(&self) -> Duration {
        Duration::from_millis(self.month_step_ms)
    }

    pub fn year_step(&self) -> Duration {
        Duration::from_millis(self.year_step_ms)
    }
}

/// Year picker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearListConfig {
    /// Years listed on each side of the center when the picker opens
    pub initial_span: i32,
    /// Years added per edge crossing
    pub batch: i32,
    pub row_height_px: f64,
    pub edge_threshold_px: f64,
}

impl Default for YearListConfig {
    fn default() -> Self {
        Self {
            initial_span: 500,
            batch: 100,
            row_height_px: 40.0,
            edge_threshold_px: 200.0,
        }
    }
}
