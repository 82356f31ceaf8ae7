use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::model::Commit;

// Virtual plot geometry. Scale ranges derive only from these constants;
// scale domains derive only from the commit set being visualized.
pub const PLOT_WIDTH: f64 = 1000.0;
pub const PLOT_HEIGHT: f64 = 600.0;
pub const MARGIN_TOP: f64 = 10.0;
pub const MARGIN_RIGHT: f64 = 10.0;
pub const MARGIN_BOTTOM: f64 = 30.0;
pub const MARGIN_LEFT: f64 = 20.0;

#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

pub const USABLE: PlotArea = PlotArea {
    left: MARGIN_LEFT,
    right: PLOT_WIDTH - MARGIN_RIGHT,
    top: MARGIN_TOP,
    bottom: PLOT_HEIGHT - MARGIN_BOTTOM,
};

/// Monotone mapping from the commit time domain onto the plot's horizontal
/// span, with an inverse for turning slider/brush positions back into
/// timestamps.
#[derive(Debug, Clone)]
pub struct TimeScale {
    t0: DateTime<FixedOffset>,
    t1: DateTime<FixedOffset>,
    x0: f64,
    x1: f64,
}

impl TimeScale {
    pub fn new(t0: DateTime<FixedOffset>, t1: DateTime<FixedOffset>) -> TimeScale {
        TimeScale {
            t0,
            t1,
            x0: USABLE.left,
            x1: USABLE.right,
        }
    }

    pub fn from_commits(commits: &[Commit]) -> TimeScale {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
        let t0 = commits.iter().map(|c| c.datetime).min().unwrap_or(epoch);
        let t1 = commits.iter().map(|c| c.datetime).max().unwrap_or(epoch);
        TimeScale::new(t0, t1)
    }

    pub fn domain(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (self.t0, self.t1)
    }

    /// Narrow or widen the domain to the given instants, keeping the range.
    /// No-op when the iterator is empty. Callers must re-render afterwards.
    pub fn redomain<I>(&mut self, times: I)
    where
        I: IntoIterator<Item = DateTime<FixedOffset>>,
    {
        let mut bounds: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> = None;
        for t in times {
            bounds = Some(match bounds {
                None => (t, t),
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
            });
        }
        if let Some((t0, t1)) = bounds {
            self.t0 = t0;
            self.t1 = t1;
        }
    }

    pub fn map(&self, t: DateTime<FixedOffset>) -> f64 {
        let span = (self.t1 - self.t0).num_seconds();
        if span <= 0 {
            // Degenerate single-instant domain plots at the midpoint.
            return (self.x0 + self.x1) / 2.0;
        }
        let frac = (t - self.t0).num_seconds() as f64 / span as f64;
        self.x0 + frac * (self.x1 - self.x0)
    }

    pub fn invert(&self, x: f64) -> DateTime<FixedOffset> {
        let span = (self.t1 - self.t0).num_seconds();
        if span <= 0 || self.x1 <= self.x0 {
            return self.t0;
        }
        let frac = ((x - self.x0) / (self.x1 - self.x0)).clamp(0.0, 1.0);
        self.t0 + Duration::seconds((frac * span as f64).round() as i64)
    }

    /// Inverse-map a normalized 0-100 slider position into the time domain.
    /// 100 lands exactly on the domain maximum.
    pub fn at_percent(&self, percent: u8) -> DateTime<FixedOffset> {
        let span = (self.t1 - self.t0).num_seconds();
        if span <= 0 {
            return self.t0;
        }
        let frac = f64::from(percent.min(100)) / 100.0;
        self.t0 + Duration::seconds((frac * span as f64).round() as i64)
    }
}

/// Fixed-domain [0, 24] hour-of-day scale, inverted so hour 0 sits at the
/// bottom of the plot.
#[derive(Debug, Clone)]
pub struct HourScale {
    y_top: f64,
    y_bottom: f64,
}

impl HourScale {
    pub fn new() -> HourScale {
        HourScale {
            y_top: USABLE.top,
            y_bottom: USABLE.bottom,
        }
    }

    pub fn map(&self, hour_frac: f64) -> f64 {
        self.y_bottom + (hour_frac / 24.0) * (self.y_top - self.y_bottom)
    }

    pub fn invert(&self, y: f64) -> f64 {
        (((y - self.y_bottom) / (self.y_top - self.y_bottom)) * 24.0).clamp(0.0, 24.0)
    }
}

impl Default for HourScale {
    fn default() -> Self {
        Self::new()
    }
}

/// The two scales the plot and the filter engine share. Built once per
/// dataset load; the x domain may be narrowed when the visible span changes.
#[derive(Debug, Clone)]
pub struct ScaleSet {
    pub x: TimeScale,
    pub y: HourScale,
}

impl ScaleSet {
    pub fn from_commits(commits: &[Commit]) -> ScaleSet {
        ScaleSet {
            x: TimeScale::from_commits(commits),
            y: HourScale::new(),
        }
    }
}
