use rapier3d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player-controlled characters
    Character = 0b0000_0010,

    /// Static level geometry (floors, walls, doors)
    WorldStatic = 0b0000_0100,

    /// Moving props (floaters, physics-driven platforms)
    Prop = 0b0000_1000,

    /// Overlap volumes (floor switch triggers)
    Trigger = 0b0001_0000,

    /// Items that can be picked up or equipped
    Item = 0b0010_0000,

    /// Moving scenery that is only shown (switch plates)
    Presentation = 0b0100_0000,
}

impl CollisionGroups {
    /// Convert to rapier's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Characters stand on the world, push props and set off triggers
            // and items, but ignore each other
            CollisionGroups::Character => Group::from_bits_truncate(
                CollisionGroups::WorldStatic as u32
                    | CollisionGroups::Prop as u32
                    | CollisionGroups::Trigger as u32
                    | CollisionGroups::Item as u32,
            ),

            CollisionGroups::WorldStatic => Group::from_bits_truncate(
                CollisionGroups::Character as u32 | CollisionGroups::Prop as u32,
            ),

            CollisionGroups::Prop => Group::from_bits_truncate(
                CollisionGroups::Character as u32
                    | CollisionGroups::WorldStatic as u32
                    | CollisionGroups::Prop as u32
                    | CollisionGroups::Trigger as u32,
            ),

            // Any actor that walks (or falls) onto a switch counts
            CollisionGroups::Trigger => Group::from_bits_truncate(
                CollisionGroups::Character as u32 | CollisionGroups::Prop as u32,
            ),

            CollisionGroups::Item => Group::from_bits_truncate(CollisionGroups::Character as u32),

            CollisionGroups::Presentation => Group::NONE,

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Overlap/contact event reported by the physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching (or a collider entered a sensor)
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },

    /// Two colliders stopped touching (or a collider left a sensor)
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },
}

impl CollisionEvent {
    /// The two colliders involved
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
                ..
            }
            | CollisionEvent::Stopped {
                collider1,
                collider2,
                ..
            } => (collider1, collider2),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, CollisionEvent::Started { .. })
    }

    /// Whether one of the colliders is a sensor (an overlap, not a contact)
    pub fn is_sensor(&self) -> bool {
        match *self {
            CollisionEvent::Started { sensor, .. } | CollisionEvent::Stopped { sensor, .. } => sensor,
        }
    }
}

/// Queue for storing collision events during a physics step
///
/// rapier's `EventHandler` takes `&self`, hence the interior mutability.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier3d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier3d::prelude::CollisionEvent::Started(h1, h2, flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
            rapier3d::prelude::CollisionEvent::Stopped(h1, h2, flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_groups_bits() {
        let groups = [
            CollisionGroups::Default,
            CollisionGroups::Character,
            CollisionGroups::WorldStatic,
            CollisionGroups::Prop,
            CollisionGroups::Trigger,
            CollisionGroups::Item,
            CollisionGroups::Presentation,
        ];

        for (i, group1) in groups.iter().enumerate() {
            for (j, group2) in groups.iter().enumerate() {
                if i != j {
                    assert_ne!(
                        *group1 as u32, *group2 as u32,
                        "Groups must have unique bits"
                    );
                }
            }
        }
    }

    #[test]
    fn test_character_ignores_character() {
        let groups = CollisionGroups::Character.to_interaction_groups();
        assert!(!groups.filter.contains(groups.memberships));
    }

    #[test]
    fn test_trigger_sees_character() {
        let trigger = CollisionGroups::Trigger.to_interaction_groups();
        let character = CollisionGroups::Character.to_interaction_groups();
        assert!(trigger.filter.contains(character.memberships));
        assert!(character.filter.contains(trigger.memberships));
    }

    #[test]
    fn test_items_only_see_characters() {
        let item = CollisionGroups::Item.to_interaction_groups();
        let prop = Group::from_bits_truncate(CollisionGroups::Prop as u32);
        assert!(!item.filter.contains(prop));
    }
}
