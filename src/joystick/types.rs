use std::fmt;

/// Maximum number of simultaneously open joysticks.
pub const JOY_MAX: usize = 16;

/// Result code returned for a button press that was consumed to move focus.
pub const BUTTON_HANDLED: i32 = 1;

/// Identifier the host assigns to an opened joystick.
///
/// Stable until the device is closed; all matching after the open uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub usize);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host enumeration index reported with a hotplug add.
///
/// Only meaningful at the moment the device is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIndex(pub usize);

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonDirection {
    Pressed,
    Released,
}

impl ButtonDirection {
    pub fn is_pressed(self) -> bool {
        matches!(self, ButtonDirection::Pressed)
    }
}

impl From<bool> for ButtonDirection {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonDirection::Pressed
        } else {
            ButtonDirection::Released
        }
    }
}

/// Notification delivered by the host input library.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Added {
        device: DeviceIndex,
    },
    Removed {
        instance: InstanceId,
    },
    Button {
        instance: InstanceId,
        button: u32,
        direction: ButtonDirection,
    },
    Axis {
        instance: InstanceId,
        axis: u32,
        value: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_bool() {
        assert_eq!(ButtonDirection::from(true), ButtonDirection::Pressed);
        assert_eq!(ButtonDirection::from(false), ButtonDirection::Released);
        assert!(ButtonDirection::Pressed.is_pressed());
        assert!(!ButtonDirection::Released.is_pressed());
    }

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(InstanceId(7).to_string(), "7");
        assert_eq!(DeviceIndex(3).to_string(), "3");
    }
}
