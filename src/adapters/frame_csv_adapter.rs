//! CSV frame manifest adapter.
//!
//! Writes one row per paced frame so an external renderer can draw and
//! encode the animation without re-running the simulation.

use crate::domain::error::CompounderError;
use crate::domain::pacer::FramePlan;
use crate::ports::frame_port::FramePort;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: usize,
    series_index: usize,
    is_final: bool,
    label: &'a str,
    price: f64,
    portfolio_value: f64,
    total_contributed: f64,
    total_dividends: f64,
    shares_held: u64,
}

pub struct CsvFrameAdapter;

impl CsvFrameAdapter {
    /// Serialize the manifest into any writer.
    pub fn write_to<W: Write>(plan: &FramePlan, writer: W) -> Result<(), CompounderError> {
        let mut wtr = csv::Writer::from_writer(writer);

        for (frame, (descriptor, view)) in plan.frames().iter().zip(plan.views()).enumerate() {
            let current = &view.current;
            wtr.serialize(FrameRecord {
                frame,
                series_index: descriptor.index,
                is_final: view.is_final,
                label: current.label,
                price: current.price,
                portfolio_value: current.portfolio_value,
                total_contributed: current.total_contributed,
                total_dividends: current.total_dividends_received,
                shares_held: current.shares_held,
            })
            .map_err(|e| CompounderError::Io(std::io::Error::other(e)))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl FramePort for CsvFrameAdapter {
    fn write(&self, plan: &FramePlan, output_path: &Path) -> Result<(), CompounderError> {
        let file = std::fs::File::create(output_path)?;
        Self::write_to(plan, std::io::BufWriter::new(file))
    }
}
