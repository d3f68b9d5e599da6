//! Session state and device configuration.

use sndlink_mem::STAGING_CAPACITY;

/// Protocol session state. Exactly one value is live at any time; only the
/// dispatcher transitions it. There is no terminal state - the machine runs
/// for the process lifetime and cycles back to [`Idle`](SessionState::Idle)
/// after every completed or abandoned transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for a command line.
    #[default]
    Idle,
    /// Block frames are streaming into volatile SDRAM staging.
    StreamSdram,
    /// Block frames are streaming toward the QSPI flash.
    StreamQspi,
}

/// Static device parameters, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Capacity of the staging region in bytes.
    pub staging_capacity: usize,
    /// Base address of the committed region inside the flash medium.
    pub flash_base: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            staging_capacity: STAGING_CAPACITY,
            flash_base: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
    }

    #[test]
    fn test_default_config() {
        let config = DeviceConfig::default();
        assert_eq!(config.staging_capacity, STAGING_CAPACITY);
        assert_eq!(config.flash_base, 0);
    }
}
