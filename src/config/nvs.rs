//! NVS persistence for the configuration record with schema versioning.
//!
//! The whole record is stored as one blob (see [`ConfigRecord::to_image`]).
//!
//! # Version History
//!
//! - **v1** (current): gps_baud_rate, ip_addr, ip_gateway, ip_netmask
//!
//! There is no migration path: an image stamped with any other version is
//! discarded in favour of factory defaults, and the operator re-enters the
//! settings from the console.

use super::{ConfigRecord, ConfigStore, StoreError, CFG_VERSION};
use core::cmp::Ordering;

#[cfg(target_os = "espidf")]
use super::CONFIG_IMAGE_SIZE;
#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{self as esp_idf_sys, esp_err_t, EspError};

/// NVS namespace for the console configuration
pub const NVS_NAMESPACE: &str = "laureline";

/// NVS key holding the configuration image
pub const CONFIG_KEY: &str = "cfg";

/// What happened while loading the configuration at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet, using factory defaults
    FreshInstall,
    /// Stored image matches the current schema
    UpToDate,
    /// Stored image has another schema version, using factory defaults
    Reset { stored_version: u8 },
    /// Storage could not be read, using factory defaults
    Unreadable(StoreError),
}

/// Load the configuration record from `store`.
///
/// Always yields a usable record; the outcome says where it came from.
pub fn load_config<S: ConfigStore + ?Sized>(store: &mut S) -> (ConfigRecord, LoadOutcome) {
    let stored = match store.read_config() {
        Ok(Some(record)) => record,
        Ok(None) => return (ConfigRecord::factory(), LoadOutcome::FreshInstall),
        Err(e) => return (ConfigRecord::factory(), LoadOutcome::Unreadable(e)),
    };

    match stored.version.cmp(&CFG_VERSION) {
        Ordering::Equal => (stored, LoadOutcome::UpToDate),
        Ordering::Less if stored.version == 0 => {
            // Blank image (erased flash or `defaults` on a pre-v1 build)
            (ConfigRecord::factory(), LoadOutcome::FreshInstall)
        }
        _ => (
            ConfigRecord::factory(),
            LoadOutcome::Reset { stored_version: stored.version },
        ),
    }
}

/// Configuration store backed by the default NVS partition.
#[cfg(target_os = "espidf")]
pub struct NvsConfigStore {
    storage: EspNvs<NvsDefault>,
}

#[cfg(target_os = "espidf")]
impl NvsConfigStore {
    /// Open the configuration namespace read/write.
    pub fn new(partition: EspDefaultNvsPartition) -> Result<Self, EspError> {
        let storage = EspNvs::new(partition, NVS_NAMESPACE, true)?;
        Ok(Self { storage })
    }
}

#[cfg(target_os = "espidf")]
impl ConfigStore for NvsConfigStore {
    fn read_config(&mut self) -> Result<Option<ConfigRecord>, StoreError> {
        let mut buf = [0u8; CONFIG_IMAGE_SIZE];
        let image = self
            .storage
            .get_raw(CONFIG_KEY, &mut buf)
            .map_err(store_error)?;

        Ok(image.and_then(ConfigRecord::from_image))
    }

    fn write_config(&mut self, config: &ConfigRecord) -> Result<(), StoreError> {
        self.storage
            .set_raw(CONFIG_KEY, &config.to_image())
            .map(|_| ())
            .map_err(store_error)
    }
}

/// Map an ESP-IDF error onto the console's persistence error classes.
#[cfg(target_os = "espidf")]
fn store_error(e: EspError) -> StoreError {
    let code = e.code();
    let is = |c: u32| code == c as esp_err_t;

    if is(esp_idf_sys::ESP_ERR_TIMEOUT) {
        StoreError::Timeout
    } else if is(esp_idf_sys::ESP_ERR_NVS_NOT_INITIALIZED)
        || is(esp_idf_sys::ESP_ERR_NVS_PART_NOT_FOUND)
    {
        StoreError::NotAcknowledged
    } else if is(esp_idf_sys::ESP_ERR_FLASH_OP_FAIL)
        || is(esp_idf_sys::ESP_ERR_NVS_INVALID_STATE)
    {
        StoreError::Fault
    } else {
        StoreError::Failed
    }
}
