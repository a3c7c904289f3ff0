//! Frame pacing: map a display series onto a fixed frame budget.
//!
//! Growth frames sample the series every `step` points and show the history
//! up to that point. Freeze frames follow and show the whole series. When the
//! series is short relative to the chart budget there are fewer growth frames
//! than the budget; nothing is invented to pad them.

use super::error::CompounderError;
use super::interpolator::DisplayPoint;

/// Animation timing for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub chart_duration: f64,
    pub ending_duration: f64,
    pub frame_rate: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            chart_duration: 20.0,
            ending_duration: 3.0,
            frame_rate: 30,
        }
    }
}

impl Timing {
    pub fn chart_frames(&self) -> usize {
        (self.chart_duration * self.frame_rate as f64).floor() as usize
    }

    pub fn end_frames(&self) -> usize {
        (self.ending_duration * self.frame_rate as f64).floor() as usize
    }

    /// Frame budget: chart frames plus freeze frames.
    pub fn budget(&self) -> usize {
        self.chart_frames() + self.end_frames()
    }

    fn validate(&self) -> Result<(), CompounderError> {
        if self.frame_rate == 0 {
            return Err(CompounderError::invalid_input("frame rate must be positive"));
        }
        if !self.chart_duration.is_finite() || self.chart_duration < 0.0 {
            return Err(CompounderError::invalid_input(format!(
                "chart duration must be non-negative (got {})",
                self.chart_duration
            )));
        }
        if !self.ending_duration.is_finite() || self.ending_duration < 0.0 {
            return Err(CompounderError::invalid_input(format!(
                "ending duration must be non-negative (got {})",
                self.ending_duration
            )));
        }
        Ok(())
    }
}

/// One frame: the last series index it plots, and whether it is a freeze frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub index: usize,
    pub is_final: bool,
}

/// Sampling step for `points` series points over `chart_frames` frames.
pub fn step_for(points: usize, chart_frames: usize) -> usize {
    if chart_frames == 0 {
        return points.max(1);
    }
    (points / chart_frames).max(1)
}

/// Produce the ordered frame descriptors for a series of `points` points.
pub fn pace(points: usize, timing: &Timing) -> Result<Vec<FrameDescriptor>, CompounderError> {
    if points == 0 {
        return Err(CompounderError::invalid_input("display series is empty"));
    }
    timing.validate()?;

    let chart_frames = timing.chart_frames();
    let end_frames = timing.end_frames();

    let growth: Vec<FrameDescriptor> = if chart_frames == 0 {
        Vec::new()
    } else {
        (0..points)
            .step_by(step_for(points, chart_frames))
            .map(|index| FrameDescriptor {
                index,
                is_final: false,
            })
            .collect()
    };

    let freeze = std::iter::repeat_n(
        FrameDescriptor {
            index: points - 1,
            is_final: true,
        },
        end_frames,
    );

    Ok(growth.into_iter().chain(freeze).collect())
}

/// Values shown for the current instant of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentValues<'a> {
    pub label: &'a str,
    pub price: f64,
    pub portfolio_value: f64,
    pub total_contributed: f64,
    pub total_dividends_received: f64,
    pub shares_held: u64,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView<'a> {
    pub points: &'a [DisplayPoint],
    pub current: CurrentValues<'a>,
    pub is_final: bool,
}

/// A display series together with its paced frames.
#[derive(Debug, Clone)]
pub struct FramePlan {
    series: Vec<DisplayPoint>,
    frames: Vec<FrameDescriptor>,
}

impl FramePlan {
    #[tracing::instrument(skip(series), fields(points = series.len()))]
    pub fn build(series: Vec<DisplayPoint>, timing: &Timing) -> Result<Self, CompounderError> {
        let frames = pace(series.len(), timing)?;

        tracing::debug!(
            frames = frames.len(),
            freeze = frames.iter().filter(|f| f.is_final).count(),
            "frames paced"
        );

        Ok(FramePlan { series, frames })
    }

    pub fn series(&self) -> &[DisplayPoint] {
        &self.series
    }

    pub fn frames(&self) -> &[FrameDescriptor] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn growth_frame_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_final).count()
    }

    pub fn freeze_frame_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_final).count()
    }

    /// Resolve a descriptor into its plotted points and current values.
    ///
    /// Shares and dividends come from the monthly state the current point was
    /// joined to, whether or not that point sits on a boundary.
    pub fn view(&self, frame: FrameDescriptor) -> Option<FrameView<'_>> {
        let end = if frame.is_final {
            self.series.len()
        } else {
            frame.index + 1
        };
        let points = self.series.get(..end)?;
        let point = points.last()?;

        Some(FrameView {
            points,
            current: CurrentValues {
                label: &point.display_label,
                price: point.price,
                portfolio_value: point.portfolio_value,
                total_contributed: point.total_contributed,
                total_dividends_received: point.month_dividends_received,
                shares_held: point.month_shares_held,
            },
            is_final: frame.is_final,
        })
    }

    pub fn views(&self) -> impl Iterator<Item = FrameView<'_>> + '_ {
        self.frames.iter().filter_map(|&f| self.view(f))
    }
}
