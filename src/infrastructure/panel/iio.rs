//! Light sensor adapter reading a raw ADC value from sysfs

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::ports::{LightSensor, PanelError};
use crate::domain::control::LightReading;

/// Reads an IIO channel such as `in_voltage0_raw`
pub struct IioLightSensor {
    path: PathBuf,
}

impl IioLightSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(raw: &str) -> Result<LightReading, PanelError> {
        raw.trim()
            .parse::<u16>()
            .map(LightReading)
            .map_err(|e| PanelError::SensorRead(format!("invalid reading {:?}: {}", raw.trim(), e)))
    }
}

impl LightSensor for IioLightSensor {
    fn read(&mut self) -> Result<LightReading, PanelError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| PanelError::SensorRead(format!("{}: {}", self.path.display(), e)))?;
        Self::parse(&raw)
    }
}
