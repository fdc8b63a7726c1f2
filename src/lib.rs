//! joyfocus - joystick hotplug handling and input focus for a game state layer
//!
//! Opens and closes joysticks as the host input library reports them,
//! keeps track of which joystick currently drives gameplay and forwards
//! that joystick's buttons and axes to a [`state::GameState`].
//!
//! ```text
//! gilrs ──► JoystickBackend ──HostEvent──► JoystickManager ──► GameState
//!                                  ▲
//!                          EventPump (tick / run)
//! ```

pub mod config;
pub mod joystick;
pub mod pump;
pub mod state;
