//! Module: config
//!
//! Purpose: The device configuration record and its persistence seam.
//!
//! Architecture:
//! - `ConfigRecord`: the single live copy, owned by the console
//! - `ConfigStore`: whatever durable storage sits behind it (NVS on the
//!   device, RAM on the host)
//! - Fixed-size byte image is the unit of persistence
//!
//! The console never knows how the image is stored, only whether the
//! write succeeded.

pub mod nvs;
pub mod store;

pub use nvs::{load_config, LoadOutcome};
pub use store::MemoryStore;

#[cfg(target_os = "espidf")]
pub use nvs::NvsConfigStore;

/// Current configuration schema version
pub const CFG_VERSION: u8 = 1;

/// Size of the persisted configuration image in bytes
pub const CONFIG_IMAGE_SIZE: usize = 20;

/// Persisted configuration image
pub type ConfigImage = [u8; CONFIG_IMAGE_SIZE];

/// Live configuration record.
///
/// `Default` is the all-zero image, i.e. what `defaults` wipes the record
/// to before stamping the schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigRecord {
    /// Schema version of the stored image
    pub version: u8,
    /// Baud rate of the GPS receiver UART
    pub gps_baud_rate: u32,
    /// Static IPv4 address, first octet at index 0
    pub ip_addr: [u8; 4],
    /// Default gateway
    pub ip_gateway: [u8; 4],
    /// Subnet mask
    pub ip_netmask: [u8; 4],
}

impl ConfigRecord {
    /// Factory defaults: everything zeroed except the schema version.
    pub const fn factory() -> Self {
        Self {
            version: CFG_VERSION,
            gps_baud_rate: 0,
            ip_addr: [0; 4],
            ip_gateway: [0; 4],
            ip_netmask: [0; 4],
        }
    }

    /// Wipe the whole record and re-stamp the current schema version.
    pub fn reset_to_factory(&mut self) {
        *self = Self::default();
        self.version = CFG_VERSION;
    }

    /// Serialize to the persisted image.
    ///
    /// Layout: `[version, pad x3, gps_baud_rate (LE), ip_addr, ip_gateway, ip_netmask]`
    pub fn to_image(&self) -> ConfigImage {
        let mut image = [0u8; CONFIG_IMAGE_SIZE];
        image[0] = self.version;
        image[4..8].copy_from_slice(&self.gps_baud_rate.to_le_bytes());
        image[8..12].copy_from_slice(&self.ip_addr);
        image[12..16].copy_from_slice(&self.ip_gateway);
        image[16..20].copy_from_slice(&self.ip_netmask);
        image
    }

    /// Deserialize from a persisted image.
    ///
    /// Returns `None` if the image is shorter than [`CONFIG_IMAGE_SIZE`].
    /// The version byte is returned as stored; checking it is up to the caller.
    pub fn from_image(image: &[u8]) -> Option<Self> {
        if image.len() < CONFIG_IMAGE_SIZE {
            return None;
        }

        let mut baud = [0u8; 4];
        baud.copy_from_slice(&image[4..8]);

        let mut record = Self {
            version: image[0],
            gps_baud_rate: u32::from_le_bytes(baud),
            ..Self::default()
        };
        record.ip_addr.copy_from_slice(&image[8..12]);
        record.ip_gateway.copy_from_slice(&image[12..16]);
        record.ip_netmask.copy_from_slice(&image[16..20]);
        Some(record)
    }
}

/// Persistence failures, as reported by the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Storage did not complete in time
    Timeout,
    /// Storage device did not answer (faulty or missing)
    NotAcknowledged,
    /// Storage device reported a fault
    Fault,
    /// Any other failure
    Failed,
}

/// Durable storage for the configuration record.
pub trait ConfigStore {
    /// Read the stored record.
    ///
    /// `Ok(None)` means nothing has ever been written.
    fn read_config(&mut self) -> Result<Option<ConfigRecord>, StoreError>;

    /// Write the record atomically.
    fn write_config(&mut self, config: &ConfigRecord) -> Result<(), StoreError>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &mut T {
    fn read_config(&mut self) -> Result<Option<ConfigRecord>, StoreError> {
        (**self).read_config()
    }

    fn write_config(&mut self, config: &ConfigRecord) -> Result<(), StoreError> {
        (**self).write_config(config)
    }
}
