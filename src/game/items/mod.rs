// Items: weapons and coin pickups
//
// Items are overlap-driven. The world routes sensor events to the item
// under the collider; interact presses resolve the overlapping item through
// `ItemRegistry::equippable_mut`.

pub mod pickup;
pub mod weapon;

pub use pickup::Pickup;
pub use weapon::{Weapon, WeaponState, RIGHT_HAND_OFFSET, RIGHT_HAND_SOCKET};

use glam::Vec3;
use log::debug;

use crate::engine::physics::{body::presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::game::characters::PlayerCharacter;
use crate::game::ActorId;

/// Radius of the overlap sphere around every item
pub const ITEM_OVERLAP_RADIUS: f32 = 64.0;

/// Something a character can equip
pub trait Equippable {
    /// Attach to `character`. Returns the item it replaces, which the caller
    /// destroys.
    fn equip(&mut self, character: &mut PlayerCharacter) -> Option<ActorId>;

    fn is_equipped(&self) -> bool;
}

#[derive(Debug)]
pub enum Item {
    Weapon(Weapon),
    Pickup(Pickup),
}

impl Item {
    pub fn id(&self) -> ActorId {
        match self {
            Item::Weapon(weapon) => weapon.id,
            Item::Pickup(pickup) => pickup.id,
        }
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        match self {
            Item::Weapon(weapon) => weapon.body_handle,
            Item::Pickup(pickup) => pickup.body_handle,
        }
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        match self {
            Item::Weapon(weapon) => weapon.collider_handle,
            Item::Pickup(pickup) => pickup.collider_handle,
        }
    }

    /// The equip capability, for items that have it
    pub fn as_equippable_mut(&mut self) -> Option<&mut dyn Equippable> {
        match self {
            Item::Weapon(weapon) => Some(weapon),
            Item::Pickup(_) => None,
        }
    }
}

/// Owns every item in the level
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn_body(physics: &mut PhysicsWorld, id: ActorId, at: Vec3) -> (RigidBodyHandle, ColliderHandle) {
        let body_handle = physics.add_rigid_body(presets::kinematic_body(at));
        let collider_handle = physics.add_collider(presets::item_collider(ITEM_OVERLAP_RADIUS), body_handle);
        physics.set_entity_mapping(collider_handle, u64::from(id));
        (body_handle, collider_handle)
    }

    pub fn spawn_weapon(&mut self, physics: &mut PhysicsWorld, id: ActorId, name: &str, at: Vec3) {
        let (body_handle, collider_handle) = Self::spawn_body(physics, id, at);
        self.items
            .push(Item::Weapon(Weapon::new(id, name, body_handle, collider_handle)));
    }

    pub fn spawn_pickup(&mut self, physics: &mut PhysicsWorld, id: ActorId, coin_count: u32, at: Vec3) {
        let (body_handle, collider_handle) = Self::spawn_body(physics, id, at);
        self.items.push(Item::Pickup(Pickup {
            id,
            coin_count,
            location: at,
            body_handle,
            collider_handle,
        }));
    }

    pub fn get(&self, id: ActorId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    /// Resolve `id` to something equippable
    pub fn equippable_mut(&mut self, id: ActorId) -> Option<&mut dyn Equippable> {
        self.get_mut(id).and_then(Item::as_equippable_mut)
    }

    /// Equip item `id` on `character`. Stops the item's overlap reporting and
    /// destroys the weapon it replaces. Returns false if `id` can't be
    /// equipped or already is.
    pub fn equip(&mut self, physics: &mut PhysicsWorld, id: ActorId, character: &mut PlayerCharacter) -> bool {
        let Some(equippable) = self.equippable_mut(id) else {
            debug!("Item {} is not equippable", id);
            return false;
        };
        if equippable.is_equipped() {
            debug!("Item {} is already equipped", id);
            return false;
        }
        let replaced = equippable.equip(character);

        if let Some(item) = self.get(id) {
            physics.set_collider_enabled(item.collider_handle(), false);
        }
        if let Some(previous) = replaced {
            self.destroy(physics, previous);
        }
        true
    }

    /// Keep equipped weapons in `character`'s hand
    pub fn follow_owner(&self, physics: &mut PhysicsWorld, character: ActorId, location: Vec3) {
        for item in &self.items {
            if let Item::Weapon(weapon) = item {
                if weapon.attached_to().map(|(owner, _)| owner) == Some(character) {
                    physics.set_position(weapon.body_handle, location + RIGHT_HAND_OFFSET);
                }
            }
        }
    }

    /// Remove an item and its physics body
    pub fn destroy(&mut self, physics: &mut PhysicsWorld, id: ActorId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let item = self.items.remove(index);
        physics.remove_rigid_body(item.body_handle());
        debug!("Destroyed item {}", id);
        Some(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::CharacterStats;

    fn setup() -> (PhysicsWorld, ItemRegistry, PlayerCharacter) {
        let mut physics = PhysicsWorld::new();
        let character =
            PlayerCharacter::new(1, CharacterStats::default(), &mut physics, Vec3::new(0.0, 0.0, 200.0))
                .unwrap();
        (physics, ItemRegistry::new(), character)
    }

    #[test]
    fn test_pickup_is_not_equippable() {
        let (mut physics, mut items, _character) = setup();
        items.spawn_pickup(&mut physics, 10, 5, Vec3::new(100.0, 0.0, 0.0));
        assert!(items.equippable_mut(10).is_none());
        assert!(items.equippable_mut(99).is_none());
    }

    #[test]
    fn test_weapon_overlap_sets_and_clears_overlapping_item() {
        let (mut physics, mut items, mut character) = setup();
        items.spawn_weapon(&mut physics, 20, "Sword", Vec3::ZERO);

        let Some(Item::Weapon(weapon)) = items.get(20) else {
            panic!("weapon not spawned");
        };
        weapon.on_overlap_begin(&mut character);
        assert_eq!(character.active_overlapping_item(), Some(20));
        weapon.on_overlap_end(&mut character);
        assert_eq!(character.active_overlapping_item(), None);
    }

    #[test]
    fn test_equip_attaches_to_right_hand() {
        let (mut physics, mut items, mut character) = setup();
        items.spawn_weapon(&mut physics, 20, "Sword", Vec3::ZERO);
        character.set_active_overlapping_item(Some(20));

        assert!(items.equip(&mut physics, 20, &mut character));
        assert_eq!(character.equipped_weapon(), Some(20));
        assert_eq!(character.active_overlapping_item(), None);

        let Some(Item::Weapon(weapon)) = items.get(20) else {
            panic!("weapon missing");
        };
        assert_eq!(weapon.state(), WeaponState::Equipped);
        assert_eq!(weapon.attached_to(), Some((1, RIGHT_HAND_SOCKET)));
    }

    #[test]
    fn test_equipping_second_weapon_destroys_first() {
        let (mut physics, mut items, mut character) = setup();
        items.spawn_weapon(&mut physics, 20, "Sword", Vec3::ZERO);
        items.spawn_weapon(&mut physics, 21, "Axe", Vec3::new(200.0, 0.0, 0.0));

        items.equip(&mut physics, 20, &mut character);
        items.equip(&mut physics, 21, &mut character);

        assert!(!items.contains(20));
        assert!(items.contains(21));
        assert_eq!(character.equipped_weapon(), Some(21));
    }

    #[test]
    fn test_equipping_twice_is_refused() {
        let (mut physics, mut items, mut character) = setup();
        items.spawn_weapon(&mut physics, 20, "Sword", Vec3::ZERO);

        assert!(items.equip(&mut physics, 20, &mut character));
        assert!(!items.equip(&mut physics, 20, &mut character));
        assert!(items.contains(20));
        assert_eq!(character.equipped_weapon(), Some(20));
    }

    #[test]
    fn test_equipped_weapon_follows_owner() {
        let (mut physics, mut items, mut character) = setup();
        items.spawn_weapon(&mut physics, 20, "Sword", Vec3::ZERO);
        items.equip(&mut physics, 20, &mut character);

        items.follow_owner(&mut physics, 1, Vec3::new(500.0, 0.0, 100.0));
        physics.step();

        let body = items.get(20).map(Item::body_handle).unwrap();
        let location = physics.translation(body).unwrap();
        assert!((location.x - (500.0 + RIGHT_HAND_OFFSET.x)).abs() < 1e-3);
    }

    #[test]
    fn test_pickup_gives_coins_and_location() {
        let (mut physics, mut items, mut character) = setup();
        items.spawn_pickup(&mut physics, 10, 3, Vec3::new(100.0, 0.0, 0.0));

        if let Some(Item::Pickup(pickup)) = items.get(10) {
            pickup.on_overlap_begin(&mut character);
        }
        items.destroy(&mut physics, 10);

        assert_eq!(character.coins(), 3);
        assert_eq!(character.pickup_locations(), &[Vec3::new(100.0, 0.0, 0.0)]);
        assert!(items.is_empty());
    }
}
