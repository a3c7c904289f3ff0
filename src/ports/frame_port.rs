//! Frame output port: hands paced frames to a renderer.

use crate::domain::error::CompounderError;
use crate::domain::pacer::FramePlan;
use std::path::Path;

pub trait FramePort {
    fn write(&self, plan: &FramePlan, output_path: &Path) -> Result<(), CompounderError>;
}
