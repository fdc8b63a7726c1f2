//! Joystick subsystem
//!
//! - [`types`] - identifiers, directions and the host event enum
//! - [`backend`] - the host input library boundary
//! - [`gilrs_backend`] - host implementation on top of gilrs
//! - [`manager`] - the device table and input focus
//!
//! # Focus
//!
//! Exactly one joystick is "current" at a time. A newly added joystick
//! always becomes current. A button press from any other joystick claims
//! focus and is consumed by the switch. Axis motion never changes focus.

pub mod backend;
pub mod error;
pub mod gilrs_backend;
pub mod manager;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::JoystickBackend;
pub use error::{BackendError, JoystickError};
pub use gilrs_backend::GilrsBackend;
pub use manager::{JoystickManager, Slot};
pub use types::{ButtonDirection, DeviceIndex, HostEvent, InstanceId, BUTTON_HANDLED, JOY_MAX};
