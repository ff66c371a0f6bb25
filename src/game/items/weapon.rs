// Weapon - an item the character can pick up and hold

use glam::Vec3;
use log::info;

use crate::engine::physics::{ColliderHandle, RigidBodyHandle};
use crate::game::characters::PlayerCharacter;
use crate::game::ActorId;

use super::Equippable;

/// Socket weapons attach to on the character
pub const RIGHT_HAND_SOCKET: &str = "RightHandSocket";

/// Offset of the right hand socket from the character's origin
pub const RIGHT_HAND_OFFSET: Vec3 = Vec3::new(30.0, 40.0, 20.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeaponState {
    /// Lying in the world, waiting to be picked up
    #[default]
    Pickup,
    Equipped,
}

#[derive(Debug)]
pub struct Weapon {
    pub id: ActorId,
    pub name: String,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    state: WeaponState,
    /// Character holding the weapon and the socket it hangs from
    attached_to: Option<(ActorId, &'static str)>,
}

impl Weapon {
    pub fn new(id: ActorId, name: &str, body_handle: RigidBodyHandle, collider_handle: ColliderHandle) -> Self {
        Self {
            id,
            name: name.to_string(),
            body_handle,
            collider_handle,
            state: WeaponState::Pickup,
            attached_to: None,
        }
    }

    pub fn state(&self) -> WeaponState {
        self.state
    }

    pub fn attached_to(&self) -> Option<(ActorId, &'static str)> {
        self.attached_to
    }

    /// Character walked into the weapon
    pub fn on_overlap_begin(&self, character: &mut PlayerCharacter) {
        if self.state == WeaponState::Pickup {
            character.set_active_overlapping_item(Some(self.id));
        }
    }

    /// Character walked away from the weapon
    pub fn on_overlap_end(&self, character: &mut PlayerCharacter) {
        if character.active_overlapping_item() == Some(self.id) {
            character.set_active_overlapping_item(None);
        }
    }
}

impl Equippable for Weapon {
    fn equip(&mut self, character: &mut PlayerCharacter) -> Option<ActorId> {
        self.state = WeaponState::Equipped;
        self.attached_to = Some((character.id, RIGHT_HAND_SOCKET));
        info!(
            "{} equipped by character {} ({})",
            self.name, character.id, RIGHT_HAND_SOCKET
        );

        let replaced = character.set_equipped_weapon(self.id);
        character.set_active_overlapping_item(None);
        replaced
    }

    fn is_equipped(&self) -> bool {
        self.state == WeaponState::Equipped
    }
}
