//! Devices module - push-token registration.

mod devices_model;
mod devices_repository;
mod devices_traits;

pub use devices_model::{device_meta, DeviceRegistration};
pub use devices_repository::DeviceTokenRepository;
pub use devices_traits::{DeviceRemoteTrait, DeviceTokenRepositoryTrait};
