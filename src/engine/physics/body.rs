use super::collision::CollisionGroups;
use rapier3d::prelude::*;

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType, gravity_scale: Real, can_sleep: bool) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale,
            can_sleep,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic, 1.0, true)
    }

    /// Create a new kinematic position-based body (moved by setting its
    /// next position, not affected by forces)
    pub fn new_kinematic_position_based() -> Self {
        Self::with_type(RigidBodyType::KinematicPositionBased, 0.0, false)
    }

    /// Create a new fixed (static) body
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed, 0.0, false)
    }

    pub fn position(mut self, x: Real, y: Real, z: Real) -> Self {
        self.position = Isometry::translation(x, y, z);
        self
    }

    pub fn linvel(mut self, x: Real, y: Real, z: Real) -> Self {
        self.linvel = vector![x, y, z];
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (characters stay upright)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    pub fn build(self) -> RigidBody {
        let mut body = RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build();

        if self.body_type == RigidBodyType::Dynamic {
            body.set_linear_damping(0.5);
            body.set_angular_damping(1.0);
        }

        body
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder3D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Real,
    active_events: ActiveEvents,
}

impl ColliderBuilder3D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Box collider from half extents
    pub fn box_shape(half_x: Real, half_y: Real, half_z: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_x, half_y, half_z))
    }

    pub fn sphere(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Upright capsule; `half_height` is the half length of the whole
    /// capsule including the caps
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        let segment_half = (half_height - radius).max(0.0);
        Self::with_shape(SharedShape::capsule_z(segment_half, radius))
    }

    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (reports overlaps but doesn't block)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(self.active_events)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;
    use glam::Vec3;

    /// Player character body (dynamic, rotation locked, never sleeps)
    pub fn character_body(at: Vec3) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(at.x, at.y, at.z)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Player character capsule
    pub fn character_collider(radius: Real, half_height: Real) -> Collider {
        ColliderBuilder3D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Character)
            .friction(0.0)
            .restitution(0.0)
            .build()
    }

    /// Static level geometry
    pub fn static_body(at: Vec3) -> RigidBody {
        BodyBuilder::new_fixed().position(at.x, at.y, at.z).build()
    }

    /// Level geometry moved by gameplay code (doors, switch plates)
    pub fn kinematic_body(at: Vec3) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(at.x, at.y, at.z)
            .build()
    }

    pub fn static_box_collider(half_extents: Vec3) -> Collider {
        ColliderBuilder3D::box_shape(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(CollisionGroups::WorldStatic)
            .friction(0.7)
            .build()
    }

    /// Box that moves with gameplay but never touches anything
    pub fn presentation_box_collider(half_extents: Vec3) -> Collider {
        ColliderBuilder3D::box_shape(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(CollisionGroups::Presentation)
            .build()
    }

    /// Floating platform body. Kinematic unless physics should own its
    /// motion from spawn.
    pub fn floater_body(at: Vec3, simulate_physics: bool) -> RigidBody {
        let builder = if simulate_physics {
            BodyBuilder::new_dynamic()
        } else {
            BodyBuilder::new_kinematic_position_based()
        };
        builder.position(at.x, at.y, at.z).build()
    }

    pub fn floater_collider(half_extents: Vec3) -> Collider {
        ColliderBuilder3D::box_shape(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(CollisionGroups::Prop)
            .friction(0.5)
            .density(1.0)
            .build()
    }

    /// Overlap volume for floor switches
    pub fn trigger_collider(half_extents: Vec3) -> Collider {
        ColliderBuilder3D::box_shape(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(CollisionGroups::Trigger)
            .sensor(true)
            .build()
    }

    /// Overlap sphere around pickups and weapons
    pub fn item_collider(radius: Real) -> Collider {
        ColliderBuilder3D::sphere(radius)
            .collision_groups(CollisionGroups::Item)
            .sensor(true)
            .build()
    }
}
