use super::types::DeviceIndex;

/// Errors reported by a host input library
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Subsystem error: {0}")]
    Subsystem(String),

    #[error("Joystick subsystem is not initialized")]
    NotInitialized,

    #[error("No joystick connected at device {0}")]
    NotConnected(DeviceIndex),

    #[error("Joystick at device {0} is already open")]
    AlreadyOpen(DeviceIndex),
}

/// Joystick manager errors
///
/// None of these are fatal. Callers log them and keep pumping events.
#[derive(Debug, thiserror::Error)]
pub enum JoystickError {
    #[error("Failure to initialize joystick ({0})")]
    SubsystemUnavailable(#[source] BackendError),

    #[error("Failed to open joystick (device {device}): {source}")]
    OpenFailed {
        device: DeviceIndex,
        #[source]
        source: BackendError,
    },

    #[error("Joystick {device} not opened, {capacity} open joysticks reached")]
    CapacityExceeded { device: DeviceIndex, capacity: usize },
}
