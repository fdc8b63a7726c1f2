//! Host input library boundary
//!
//! The manager never talks to a platform API directly. Everything it needs
//! from the host (subsystem lifetime, opening devices by index, instance ids
//! and the event queue) goes through [`JoystickBackend`].

use super::error::BackendError;
use super::types::{DeviceIndex, HostEvent, InstanceId};

pub trait JoystickBackend {
    /// Owned handle to an open device. Dropped back into [`close`](Self::close).
    type Handle;

    /// Bring up the joystick subsystem.
    fn init_subsystem(&mut self) -> Result<(), BackendError>;

    /// Tear down the joystick subsystem. Safe to call when it never came up.
    fn quit_subsystem(&mut self);

    /// Start delivering hotplug, button and axis notifications.
    fn enable_events(&mut self);

    fn open(&mut self, device: DeviceIndex) -> Result<Self::Handle, BackendError>;

    fn instance_id(&self, handle: &Self::Handle) -> InstanceId;

    fn close(&mut self, handle: Self::Handle);

    /// Next pending notification, in arrival order.
    fn next_event(&mut self) -> Option<HostEvent>;
}
