use glam::Vec3;
use rapier3d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};
use super::{from_physics, to_physics, GRAVITY_Z, LENGTH_UNIT};

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Query pipeline for ray casts (ground checks)
    query_pipeline: QueryPipeline,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    collision_event_queue: CollisionEventQueue,
    /// Game-side owner of each collider, used to turn overlap events into
    /// actor callbacks
    collider_to_entity: HashMap<ColliderHandle, u64>,
}

impl PhysicsWorld {
    /// Create a new physics world with default (Z-down, cm/s²) gravity
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, 0.0, GRAVITY_Z])
    }

    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;
        integration_parameters.length_unit = LENGTH_UNIT;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            collider_to_entity: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.rigid_body_set.get(handle) {
            for collider in body.colliders() {
                self.collider_to_entity.remove(collider);
            }
        }
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Associate a game entity id with a collider
    pub fn set_entity_mapping(&mut self, collider: ColliderHandle, entity_id: u64) {
        self.collider_to_entity.insert(collider, entity_id);
    }

    /// Get the entity id associated with a collider
    pub fn get_entity_id(&self, collider: ColliderHandle) -> Option<u64> {
        self.collider_to_entity.get(&collider).copied()
    }

    /// Current translation of a body
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.get_rigid_body(handle)
            .map(|body| from_physics(body.translation()))
    }

    /// Current linear velocity of a body
    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.get_rigid_body(handle).map(|body| from_physics(body.linvel()))
    }

    /// Place a body at `position`.
    ///
    /// Kinematic bodies are moved through their next kinematic position so
    /// that contacts see the motion; every other body is teleported.
    pub fn set_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return;
        };
        if body.is_kinematic() {
            body.set_next_kinematic_translation(to_physics(position));
        } else {
            body.set_translation(to_physics(position), true);
        }
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y, ray_origin.z], ray_dir);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Switch a collider's collision and overlap reporting on or off
    pub fn set_collider_enabled(&mut self, handle: ColliderHandle, enabled: bool) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_enabled(enabled);
        }
    }

    /// Whether anything overlaps `collider` after the last step. Only
    /// meaningful for sensors.
    pub fn has_intersections(&self, collider: ColliderHandle) -> bool {
        self.narrow_phase
            .intersection_pairs_with(collider)
            .any(|(_, _, intersecting)| intersecting)
    }

    /// Get all collision events from the last step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    pub fn length_unit(&self) -> Real {
        self.integration_parameters.length_unit
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;

    #[test]
    fn test_default_gravity_points_down_z() {
        let world = PhysicsWorld::new();
        assert_eq!(world.gravity().z, GRAVITY_Z);
        assert_eq!(world.gravity().x, 0.0);
    }

    #[test]
    fn test_tolerances_scaled_to_centimetres() {
        let world = PhysicsWorld::new();
        assert_eq!(world.length_unit(), LENGTH_UNIT);
    }

    #[test]
    fn test_sensor_intersections_follow_bodies() {
        let mut world = PhysicsWorld::new();
        let trigger_body = world.add_rigid_body(presets::static_body(Vec3::ZERO));
        let trigger = world.add_collider(presets::trigger_collider(Vec3::splat(60.0)), trigger_body);

        let body = world.add_rigid_body(presets::character_body(Vec3::new(0.0, 0.0, 100.0)));
        world.add_collider(presets::character_collider(48.0, 105.0), body);
        world.step();
        assert!(world.has_intersections(trigger));

        world.remove_rigid_body(body);
        world.step();
        assert!(!world.has_intersections(trigger));
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::character_body(Vec3::new(0.0, 0.0, 500.0)));
        world.add_collider(presets::character_collider(48.0, 105.0), body);

        for _ in 0..30 {
            world.step();
        }

        let z = world.translation(body).map(|p| p.z).unwrap_or(500.0);
        assert!(z < 500.0, "body should fall, z = {z}");
    }

    #[test]
    fn test_kinematic_set_position() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::kinematic_body(Vec3::ZERO));

        world.set_position(body, Vec3::new(0.0, 0.0, 25.0));
        world.step();

        let z = world.translation(body).map(|p| p.z).unwrap_or_default();
        assert!((z - 25.0).abs() < 1e-3);
    }

    #[test]
    fn test_entity_mapping_removed_with_body() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::static_body(Vec3::ZERO));
        let collider = world.add_collider(presets::static_box_collider(Vec3::splat(10.0)), body);
        world.set_entity_mapping(collider, 42);
        assert_eq!(world.get_entity_id(collider), Some(42));

        world.remove_rigid_body(body);
        assert_eq!(world.get_entity_id(collider), None);
    }

    #[test]
    fn test_raycast_hits_ground() {
        let mut world = PhysicsWorld::new();
        let ground = world.add_rigid_body(presets::static_body(Vec3::ZERO));
        world.add_collider(
            presets::static_box_collider(Vec3::new(500.0, 500.0, 10.0)),
            ground,
        );
        // Query pipeline is refreshed by the step
        world.step();

        let hit = world.raycast(
            vector![0.0, 0.0, 50.0],
            vector![0.0, 0.0, -1.0],
            100.0,
            true,
            QueryFilter::default(),
        );
        let toi = hit.map(|(_, toi)| toi).unwrap_or(f32::MAX);
        assert!((toi - 40.0).abs() < 1e-3);
    }
}
