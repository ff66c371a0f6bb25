// Pickup - coins collected by walking into them

use glam::Vec3;
use log::debug;

use crate::engine::physics::{ColliderHandle, RigidBodyHandle};
use crate::game::characters::PlayerCharacter;
use crate::game::ActorId;

#[derive(Debug)]
pub struct Pickup {
    pub id: ActorId,
    pub coin_count: u32,
    pub location: Vec3,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

impl Pickup {
    /// Hand the coins to the character. The pickup is spent afterwards and
    /// the caller destroys it.
    pub fn on_overlap_begin(&self, character: &mut PlayerCharacter) {
        character.increment_coins(self.coin_count);
        character.add_pickup_location(self.location);
        debug!(
            "Character {} picked up {} coins (pickup {})",
            character.id, self.coin_count, self.id
        );
    }
}
