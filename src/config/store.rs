//! In-memory configuration store.
//!
//! Stands in for NVS on the host. Can be armed to fail writes so the
//! console's error paths are reachable without hardware.

use super::{ConfigImage, ConfigRecord, ConfigStore, StoreError};

/// RAM-backed [`ConfigStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    image: Option<ConfigImage>,
    fail_next: Option<StoreError>,
    writes: u32,
}

impl MemoryStore {
    /// Empty store (nothing ever written)
    pub const fn new() -> Self {
        Self {
            image: None,
            fail_next: None,
            writes: 0,
        }
    }

    /// Store pre-loaded with `config`
    pub fn with_config(config: &ConfigRecord) -> Self {
        Self {
            image: Some(config.to_image()),
            ..Self::new()
        }
    }

    /// Make the next write fail with `error`
    pub fn fail_next_write(&mut self, error: StoreError) {
        self.fail_next = Some(error);
    }

    /// Raw stored image, if any
    pub fn image(&self) -> Option<&ConfigImage> {
        self.image.as_ref()
    }

    /// Number of successful writes
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ConfigStore for MemoryStore {
    fn read_config(&mut self) -> Result<Option<ConfigRecord>, StoreError> {
        Ok(self.image.as_ref().and_then(|i| ConfigRecord::from_image(i)))
    }

    fn write_config(&mut self, config: &ConfigRecord) -> Result<(), StoreError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        self.image = Some(config.to_image());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let mut store = MemoryStore::new();
        let cfg = ConfigRecord {
            gps_baud_rate: 115200,
            ..ConfigRecord::factory()
        };
        assert_eq!(store.write_config(&cfg), Ok(()));
        assert_eq!(store.read_config(), Ok(Some(cfg)));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_armed_failure_is_one_shot() {
        let mut store = MemoryStore::new();
        store.fail_next_write(StoreError::Timeout);

        let cfg = ConfigRecord::factory();
        assert_eq!(store.write_config(&cfg), Err(StoreError::Timeout));
        assert!(store.image().is_none());
        assert_eq!(store.write_config(&cfg), Ok(()));
    }
}
