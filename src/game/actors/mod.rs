// Level actors: floor switches and floaters

pub mod door_motion;
pub mod floater;
pub mod floor_switch;

pub use door_motion::DoorMotion;
pub use floater::{Floater, FloaterConfig};
pub use floor_switch::{FloorSwitch, FloorSwitchConfig, SwitchEvent, SwitchPhase};

use crate::engine::timer::TimerManager;
use crate::game::ActorId;

/// What a pending timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerTag {
    CloseDoor,
}

/// Timers are owned by an actor and tagged with their purpose
pub type TimerKey = (ActorId, TimerTag);

pub type GameTimers = TimerManager<TimerKey>;
