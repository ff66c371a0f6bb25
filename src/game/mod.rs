// Gameplay: the character, level actors, items and the world that ticks them

pub mod actors;
pub mod characters;
pub mod error;
pub mod items;
pub mod world;

/// Identifies an actor in the world. Also stored as the physics entity id of
/// the actor's colliders.
pub type ActorId = u32;

pub use world::GameWorld;
