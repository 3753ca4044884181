//! Value axis tick scale
//!
//! Frame times are charted with a two-segment tick scale: fine steps for low
//! frame times, then coarse steps up to the highest observed value. Nothing is
//! ticked in the gap between the two segments.

/// Upper bound on the ticks of one segment; longer segments are cut short
const MAX_SEGMENT_TICKS: usize = 1000;

/// Two-segment tick scale for the value (frame time) axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickScale {
    /// Step between ticks of the fine segment
    pub fine_step: f64,
    /// Exclusive upper bound of the fine segment, which starts at 0
    pub fine_end: f64,
    /// First tick of the coarse segment
    pub coarse_start: f64,
    /// Step between ticks of the coarse segment
    pub coarse_step: f64,
}

impl Default for TickScale {
    fn default() -> Self {
        Self {
            fine_step: 20.0,
            fine_end: 150.0,
            coarse_start: 200.0,
            coarse_step: 50.0,
        }
    }
}

impl TickScale {
    /// Computes tick positions for a chart whose tallest bar is `highest_max`
    ///
    /// The fine segment is `0, fine_step, ..` below `fine_end`. The coarse segment
    /// is `coarse_start, coarse_start + coarse_step, ..` below `highest_max + 1`,
    /// so a maximum of 260 yields `.., 200, 250`.
    pub fn ticks(&self, highest_max: f64) -> Vec<f64> {
        let mut ticks = arange(0.0, self.fine_end, self.fine_step);
        ticks.extend(arange(
            self.coarse_start,
            highest_max + 1.0,
            self.coarse_step,
        ));
        ticks
    }
}

/// Evenly spaced values in `[start, stop)`
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !step.is_finite() || !stop.is_finite() || step <= 0.0 || stop <= start {
        return Vec::new();
    }

    let count = ((stop - start) / step)
        .ceil()
        .min(MAX_SEGMENT_TICKS as f64) as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}
