//! Joystick Manager - device table and input focus
//!
//! Keeps a fixed table of [`JOY_MAX`] open devices, reacts to hotplug
//! notifications from the host and decides which joystick is allowed to
//! drive the [`GameState`].
//!
//! # Focus rules
//!
//! ```text
//! none  ──add(D) / button(D)──►  D
//! A     ──add(B) / button(B)──►  B
//! A     ──button(A) / axis(*)──► A   (button forwarded, axis forwarded if from A)
//! ```
//!
//! Removing a device does not touch the current device. An event that
//! still carries the removed id is matched by value and forwarded.

use tracing::{debug, info, warn};

use super::backend::JoystickBackend;
use super::error::JoystickError;
use super::types::{ButtonDirection, DeviceIndex, HostEvent, InstanceId, BUTTON_HANDLED, JOY_MAX};
use crate::state::GameState;

/// One entry of the device table.
#[derive(Debug)]
pub enum Slot<H> {
    Empty,
    Occupied { handle: H, id: InstanceId },
}

impl<H> Slot<H> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn id(&self) -> Option<InstanceId> {
        match self {
            Slot::Empty => None,
            Slot::Occupied { id, .. } => Some(*id),
        }
    }
}

pub struct JoystickManager<B: JoystickBackend, S: GameState> {
    backend: B,
    state: S,
    slots: [Slot<B::Handle>; JOY_MAX],
    current: Option<InstanceId>,
    ready: bool,
}

impl<B: JoystickBackend, S: GameState> JoystickManager<B, S> {
    pub fn new(backend: B, state: S) -> Self {
        Self {
            backend,
            state,
            slots: std::array::from_fn(|_| Slot::Empty),
            current: None,
            ready: false,
        }
    }

    /// Bring up the host joystick subsystem and enable its notifications.
    ///
    /// On failure nothing else is set up. The manager stays usable but no
    /// hotplug events will ever arrive.
    pub fn init(&mut self) -> Result<(), JoystickError> {
        self.backend
            .init_subsystem()
            .map_err(JoystickError::SubsystemUnavailable)?;

        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.backend.enable_events();
        self.ready = true;

        info!("Joystick subsystem initialized ({} slots)", JOY_MAX);
        Ok(())
    }

    /// Close every open joystick, then tear down the host subsystem.
    pub fn shutdown(&mut self) {
        for i in 0..JOY_MAX {
            if let Some(id) = self.slots[i].id() {
                self.remove(id);
            }
        }

        self.backend.quit_subsystem();
        self.ready = false;
        info!("Joystick subsystem shut down");
    }

    /// Open the device at `device` and make it current.
    pub fn add(&mut self, device: DeviceIndex) -> Result<InstanceId, JoystickError> {
        info!("Joystick added (device {})", device);

        let handle = match self.backend.open(device) {
            Ok(handle) => handle,
            Err(source) => {
                let err = JoystickError::OpenFailed { device, source };
                warn!("{}", err);
                return Err(err);
            }
        };
        let id = self.backend.instance_id(&handle);

        let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_empty()) else {
            self.backend.close(handle);
            let err = JoystickError::CapacityExceeded {
                device,
                capacity: JOY_MAX,
            };
            warn!("{}", err);
            return Err(err);
        };

        *slot = Slot::Occupied { handle, id };
        info!("Joystick opened (instance {})", id);

        self.current = Some(id);
        info!("Joystick {} made current via device addition", id);

        Ok(id)
    }

    /// Close every slot holding `instance`. Returns how many were closed.
    pub fn remove(&mut self, instance: InstanceId) -> usize {
        info!("Joystick removed (instance {})", instance);

        let mut closed = 0;
        for slot in self.slots.iter_mut() {
            if slot.id() != Some(instance) {
                continue;
            }
            if let Slot::Occupied { handle, .. } = std::mem::replace(slot, Slot::Empty) {
                self.backend.close(handle);
                closed += 1;
                info!("Joystick closed (instance {})", instance);
            }
        }
        closed
    }

    /// Forward a button from the current joystick, or move focus to `instance`.
    ///
    /// The press that moves focus is consumed and answered with
    /// [`BUTTON_HANDLED`].
    pub fn button(&mut self, instance: InstanceId, button: u32, direction: ButtonDirection) -> i32 {
        if self.current == Some(instance) {
            return self.state.button(button, direction);
        }

        self.current = Some(instance);
        info!("Joystick {} made current via button press", instance);
        BUTTON_HANDLED
    }

    /// Forward an axis value if it comes from the current joystick.
    pub fn axis(&mut self, instance: InstanceId, axis: u32, value: f32) {
        if self.current == Some(instance) {
            self.state.stick(axis, value);
        }
    }

    /// Route one host notification. Returns the result code for buttons.
    pub fn dispatch(&mut self, event: HostEvent) -> Option<i32> {
        debug!("Dispatching {:?}", event);
        match event {
            HostEvent::Added { device } => {
                // Failures are already logged by add
                let _ = self.add(device);
                None
            }
            HostEvent::Removed { instance } => {
                self.remove(instance);
                None
            }
            HostEvent::Button {
                instance,
                button,
                direction,
            } => Some(self.button(instance, button, direction)),
            HostEvent::Axis {
                instance,
                axis,
                value,
            } => {
                self.axis(instance, axis, value);
                None
            }
        }
    }

    /// Drain the host queue. Returns the number of events handled.
    pub fn pump_events(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.backend.next_event() {
            self.dispatch(event);
            count += 1;
        }
        count
    }

    pub fn current(&self) -> Option<InstanceId> {
        self.current
    }

    pub fn slots(&self) -> &[Slot<B::Handle>] {
        &self.slots
    }

    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}
