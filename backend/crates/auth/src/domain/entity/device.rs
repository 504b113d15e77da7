//! Device Entity
//!
//! A client a user logs in from. Identity is the full descriptor tuple,
//! so the same browser after a version bump counts as a new device.

use chrono::{DateTime, Utc};
use kernel::id::{DeviceId, UserId};
use platform::client::DeviceDescriptor;

#[derive(Debug, Clone)]
pub struct Device {
    pub device_id: DeviceId,
    pub user_id: UserId,
    pub descriptor: DeviceDescriptor,
    pub created_at: DateTime<Utc>,
}

impl Device {
    pub fn new(user_id: UserId, descriptor: DeviceDescriptor) -> Self {
        Self {
            device_id: DeviceId::new(),
            user_id,
            descriptor,
            created_at: Utc::now(),
        }
    }

    /// Same owner and identical descriptor
    pub fn matches(&self, user_id: &UserId, descriptor: &DeviceDescriptor) -> bool {
        self.user_id == *user_id && self.descriptor == *descriptor
    }
}
