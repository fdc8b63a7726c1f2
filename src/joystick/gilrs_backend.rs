use std::collections::{HashSet, VecDeque};

use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

use super::backend::JoystickBackend;
use super::error::BackendError;
use super::types::{ButtonDirection, DeviceIndex, HostEvent, InstanceId};

/// Host input library backed by gilrs
///
/// The gilrs context is the "subsystem": it exists between
/// [`init_subsystem`](JoystickBackend::init_subsystem) and
/// [`quit_subsystem`](JoystickBackend::quit_subsystem). Gamepad ids double as
/// device index and instance id, so an open handle is just the [`GamepadId`].
#[derive(Default)]
pub struct GilrsBackend {
    gilrs: Option<Gilrs>,
    events_enabled: bool,
    // Synthetic events queued ahead of the gilrs queue
    pending: VecDeque<HostEvent>,
    open: HashSet<GamepadId>,
}

impl GilrsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.gilrs.is_some()
    }
}

impl JoystickBackend for GilrsBackend {
    type Handle = GamepadId;

    fn init_subsystem(&mut self) -> Result<(), BackendError> {
        info!("Initializing gilrs controller interface");
        match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                self.gilrs = Some(g);
                Ok(())
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                Err(BackendError::Subsystem(e.to_string()))
            }
        }
    }

    fn quit_subsystem(&mut self) {
        if self.gilrs.take().is_some() {
            info!("gilrs controller interface shut down");
        }
        self.events_enabled = false;
        self.pending.clear();
        self.open.clear();
    }

    fn enable_events(&mut self) {
        self.events_enabled = true;

        // gilrs only reports hotplug for devices that appear later, so
        // gamepads present at startup are announced here.
        if let Some(gilrs) = self.gilrs.as_ref() {
            for (id, gamepad) in gilrs.gamepads() {
                debug!("Announcing connected gamepad {} ({})", id, gamepad.name());
                self.pending.push_back(HostEvent::Added {
                    device: DeviceIndex(usize::from(id)),
                });
            }
        }
    }

    fn open(&mut self, device: DeviceIndex) -> Result<GamepadId, BackendError> {
        let gilrs = self.gilrs.as_ref().ok_or(BackendError::NotInitialized)?;

        let (id, gamepad) = gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == device.0)
            .ok_or(BackendError::NotConnected(device))?;
        debug!("Opening gamepad {} ({})", id, gamepad.name());

        if !self.open.insert(id) {
            return Err(BackendError::AlreadyOpen(device));
        }
        Ok(id)
    }

    fn instance_id(&self, handle: &GamepadId) -> InstanceId {
        InstanceId(usize::from(*handle))
    }

    fn close(&mut self, handle: GamepadId) {
        if !self.open.remove(&handle) {
            warn!("Closing gamepad {} that was not open", handle);
        }
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        if !self.events_enabled {
            return None;
        }
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let gilrs = self.gilrs.as_mut()?;
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            if let Some(host_event) = convert_gilrs_event(id, event) {
                return Some(host_event);
            }
        }
        None
    }
}

fn convert_gilrs_event(id: GamepadId, event: EventType) -> Option<HostEvent> {
    let instance = InstanceId(usize::from(id));

    match event {
        EventType::Connected => Some(HostEvent::Added {
            device: DeviceIndex(usize::from(id)),
        }),
        EventType::Disconnected => Some(HostEvent::Removed { instance }),
        EventType::ButtonPressed(button, _) => {
            map_button(button).map(|button| HostEvent::Button {
                instance,
                button,
                direction: ButtonDirection::Pressed,
            })
        }
        EventType::ButtonReleased(button, _) => {
            map_button(button).map(|button| HostEvent::Button {
                instance,
                button,
                direction: ButtonDirection::Released,
            })
        }
        EventType::AxisChanged(axis, value, _) => {
            convert_axis(axis, value).map(|(axis, value)| HostEvent::Axis {
                instance,
                axis,
                value,
            })
        }
        // Analog triggers arrive as button values, not as LeftZ/RightZ.
        EventType::ButtonChanged(button, value, _) => {
            map_trigger(button).map(|axis| HostEvent::Axis {
                instance,
                axis,
                value,
            })
        }
        _ => {
            debug!("Unhandled event type: {:?}", event);
            None
        }
    }
}

/// gilrs button to index, in SDL game controller order.
pub fn map_button(button: Button) -> Option<u32> {
    match button {
        Button::South => Some(0),
        Button::East => Some(1),
        Button::West => Some(2),
        Button::North => Some(3),
        Button::Select => Some(4),
        Button::Mode => Some(5),
        Button::Start => Some(6),
        Button::LeftThumb => Some(7),
        Button::RightThumb => Some(8),
        Button::LeftTrigger => Some(9),
        Button::RightTrigger => Some(10),
        Button::DPadUp => Some(11),
        Button::DPadDown => Some(12),
        Button::DPadLeft => Some(13),
        Button::DPadRight => Some(14),
        _ => None,
    }
}

/// Axis index and value as the state layer expects them.
///
/// gilrs sticks report Y positive-up; SDL reports positive-down, so the Y
/// axes are negated. Nothing else is touched.
pub fn convert_axis(axis: Axis, value: f32) -> Option<(u32, f32)> {
    let index = map_axis(axis)?;
    match axis {
        Axis::LeftStickY | Axis::RightStickY => Some((index, -value)),
        _ => Some((index, value)),
    }
}

/// Analog trigger button to its trigger axis index.
pub fn map_trigger(button: Button) -> Option<u32> {
    match button {
        Button::LeftTrigger2 => Some(4),
        Button::RightTrigger2 => Some(5),
        _ => None,
    }
}

/// gilrs axis to index, in SDL game controller order.
pub fn map_axis(axis: Axis) -> Option<u32> {
    match axis {
        Axis::LeftStickX => Some(0),
        Axis::LeftStickY => Some(1),
        Axis::RightStickX => Some(2),
        Axis::RightStickY => Some(3),
        Axis::LeftZ => Some(4),
        Axis::RightZ => Some(5),
        _ => None,
    }
}
