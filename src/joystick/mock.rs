//! Recording doubles for the host library and the game state.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use super::backend::JoystickBackend;
use super::error::BackendError;
use super::types::{ButtonDirection, DeviceIndex, HostEvent, InstanceId};
use crate::state::GameState;

/// Observable host state, shared with the test through an `Rc`.
#[derive(Debug, Default)]
pub struct MockHost {
    pub fail_init: bool,
    pub initialized: bool,
    pub events_enabled: bool,
    pub quit_calls: usize,
    /// Devices whose open fails
    pub broken: HashSet<usize>,
    /// Explicit device -> instance assignments; otherwise 100 + device
    pub instances: HashMap<usize, usize>,
    pub live: Vec<InstanceId>,
    pub opened: Vec<InstanceId>,
    pub closed: Vec<InstanceId>,
    pub queue: VecDeque<HostEvent>,
}

#[derive(Debug)]
pub struct MockHandle(InstanceId);

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    pub host: Rc<RefCell<MockHost>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&self, device: usize, instance: usize) {
        self.host.borrow_mut().instances.insert(device, instance);
    }

    pub fn push(&self, event: HostEvent) {
        self.host.borrow_mut().queue.push_back(event);
    }
}

impl JoystickBackend for MockBackend {
    type Handle = MockHandle;

    fn init_subsystem(&mut self) -> Result<(), BackendError> {
        let mut host = self.host.borrow_mut();
        if host.fail_init {
            return Err(BackendError::Subsystem("no joystick driver".into()));
        }
        host.initialized = true;
        Ok(())
    }

    fn quit_subsystem(&mut self) {
        let mut host = self.host.borrow_mut();
        host.initialized = false;
        host.events_enabled = false;
        host.quit_calls += 1;
    }

    fn enable_events(&mut self) {
        self.host.borrow_mut().events_enabled = true;
    }

    fn open(&mut self, device: DeviceIndex) -> Result<MockHandle, BackendError> {
        let mut host = self.host.borrow_mut();
        if !host.initialized {
            return Err(BackendError::NotInitialized);
        }
        if host.broken.contains(&device.0) {
            return Err(BackendError::NotConnected(device));
        }
        let id = InstanceId(host.instances.get(&device.0).copied().unwrap_or(100 + device.0));
        host.live.push(id);
        host.opened.push(id);
        Ok(MockHandle(id))
    }

    fn instance_id(&self, handle: &MockHandle) -> InstanceId {
        handle.0
    }

    fn close(&mut self, handle: MockHandle) {
        let mut host = self.host.borrow_mut();
        if let Some(pos) = host.live.iter().position(|id| *id == handle.0) {
            host.live.remove(pos);
        }
        host.closed.push(handle.0);
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        let mut host = self.host.borrow_mut();
        if !host.events_enabled {
            return None;
        }
        host.queue.pop_front()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Button(u32, ButtonDirection),
    Stick(u32, f32),
}

/// Game state that records every call and answers buttons with `code`.
#[derive(Debug, Clone)]
pub struct RecordingState {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub code: i32,
}

impl RecordingState {
    pub fn new(code: i32) -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            code,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl GameState for RecordingState {
    fn button(&mut self, button: u32, direction: ButtonDirection) -> i32 {
        self.calls.borrow_mut().push(Call::Button(button, direction));
        self.code
    }

    fn stick(&mut self, axis: u32, value: f32) {
        self.calls.borrow_mut().push(Call::Stick(axis, value));
    }
}
