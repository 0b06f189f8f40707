//! Emulated storage device latency tiers.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::WelpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// Consumer grade SSD
    Ssd,
    /// Commodity spinning disk
    Disk,
    /// Cloud storage service
    Cloud,
}

impl DeviceType {
    /// Order-of-magnitude access latency of the device class.
    pub fn latency(&self) -> Duration {
        match self {
            DeviceType::Ssd => Duration::from_micros(100),
            DeviceType::Disk => Duration::from_micros(1_000),
            DeviceType::Cloud => Duration::from_micros(10_000),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Ssd => "ssd",
            DeviceType::Disk => "disk",
            DeviceType::Cloud => "cloud",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = WelpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssd" => Ok(DeviceType::Ssd),
            "disk" => Ok(DeviceType::Disk),
            "cloud" => Ok(DeviceType::Cloud),
            _ => Err(WelpError::InvalidConfiguration(format!(
                "invalid device type: {}",
                s
            ))),
        }
    }
}
