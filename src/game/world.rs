// Game world - owns every actor and runs the per-frame update pass

use glam::Vec3;
use log::{debug, info};

use crate::engine::debug_draw::DebugDraw;
use crate::engine::physics::{body::presets, PhysicsWorld};
use crate::game::actors::{Floater, FloaterConfig, FloorSwitch, FloorSwitchConfig, GameTimers, SwitchEvent};
use crate::game::characters::{
    AnimationDriver, CharacterEvent, CharacterStats, ControlInput, PawnView, PlayerCharacter,
};
use crate::game::error::ConfigError;
use crate::game::items::{Item, ItemRegistry};
use crate::game::ActorId;

/// Single-threaded simulation of one level
pub struct GameWorld {
    physics: PhysicsWorld,
    timers: GameTimers,
    debug_draw: DebugDraw,

    character: PlayerCharacter,
    animation: AnimationDriver,
    switches: Vec<FloorSwitch>,
    floaters: Vec<Floater>,
    items: ItemRegistry,

    next_id: ActorId,
    /// Seconds simulated so far
    elapsed: f32,

    // Raised during the last update, for the host to present
    switch_events: Vec<(ActorId, SwitchEvent)>,
    character_events: Vec<CharacterEvent>,
}

impl GameWorld {
    /// Empty world with the player character at `spawn`
    pub fn new(stats: CharacterStats, spawn: Vec3) -> Result<Self, ConfigError> {
        let mut physics = PhysicsWorld::new();
        let character_id = 1;
        let character = PlayerCharacter::new(character_id, stats, &mut physics, spawn)?;

        let mut animation = AnimationDriver::new(character.stats.running_speed, character.stats.sprinting_speed);
        animation.initialize(Some(character_id));

        Ok(Self {
            physics,
            timers: GameTimers::new(),
            debug_draw: DebugDraw::new(),
            character,
            animation,
            switches: Vec::new(),
            floaters: Vec::new(),
            items: ItemRegistry::new(),
            next_id: character_id + 1,
            elapsed: 0.0,
            switch_events: Vec::new(),
            character_events: Vec::new(),
        })
    }

    /// Small level with one of everything
    pub fn demo_level() -> Result<Self, ConfigError> {
        let mut world = Self::new(CharacterStats::default(), Vec3::new(0.0, 0.0, 120.0))?;

        world.add_ground(Vec3::new(0.0, 0.0, -10.0), Vec3::new(3000.0, 3000.0, 10.0));

        world.spawn_floor_switch(FloorSwitchConfig {
            location: Vec3::new(600.0, 0.0, 32.0),
            ..FloorSwitchConfig::default()
        })?;

        world.spawn_floater(FloaterConfig {
            placed_location: Vec3::new(-400.0, 300.0, 150.0),
            amplitude: 20.0,
            period: 2.0,
            ..FloaterConfig::default()
        })?;
        world.spawn_floater(FloaterConfig {
            placed_location: Vec3::new(-400.0, -300.0, 300.0),
            initial_force: Vec3::new(0.0, 0.0, 3.0e9),
            initial_torque: Vec3::new(0.0, 0.0, 1.0e9),
            ..FloaterConfig::default()
        })?;

        world.spawn_weapon("Sword", Vec3::new(300.0, 300.0, 60.0));
        world.spawn_weapon("Axe", Vec3::new(300.0, -300.0, 60.0));

        world.spawn_pickup(1, Vec3::new(-200.0, 0.0, 60.0));
        world.spawn_pickup(5, Vec3::new(-300.0, 200.0, 60.0));
        world.spawn_pickup(10, Vec3::new(-300.0, -200.0, 60.0));

        info!(
            "Demo level ready: {} switch(es), {} floater(s), {} item(s)",
            world.switches.len(),
            world.floaters.len(),
            world.items.len()
        );
        Ok(world)
    }

    fn allocate_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Static floor block
    pub fn add_ground(&mut self, center: Vec3, half_extents: Vec3) {
        let body = self.physics.add_rigid_body(presets::static_body(center));
        self.physics
            .add_collider(presets::static_box_collider(half_extents), body);
    }

    pub fn spawn_floor_switch(&mut self, config: FloorSwitchConfig) -> Result<ActorId, ConfigError> {
        let id = self.allocate_id();
        let switch = FloorSwitch::new(id, config, &mut self.physics)?;
        self.switches.push(switch);
        Ok(id)
    }

    pub fn spawn_floater(&mut self, config: FloaterConfig) -> Result<ActorId, ConfigError> {
        let id = self.allocate_id();
        let floater = Floater::new(id, config, &mut self.physics)?;
        self.floaters.push(floater);
        Ok(id)
    }

    pub fn spawn_weapon(&mut self, name: &str, at: Vec3) -> ActorId {
        let id = self.allocate_id();
        self.items.spawn_weapon(&mut self.physics, id, name, at);
        id
    }

    pub fn spawn_pickup(&mut self, coin_count: u32, at: Vec3) -> ActorId {
        let id = self.allocate_id();
        self.items.spawn_pickup(&mut self.physics, id, coin_count, at);
        id
    }

    /// Run one fixed simulation step
    pub fn fixed_update(&mut self, input: &ControlInput, dt: f32) {
        if (self.physics.timestep() - dt).abs() > f32::EPSILON {
            self.physics.set_timestep(dt);
        }
        self.switch_events.clear();
        self.character_events.clear();

        // Player
        if let Some(item) = self.character.apply_input(input, dt) {
            self.items.equip(&mut self.physics, item, &mut self.character);
        }
        self.character.tick(dt);
        self.character.update_movement(&mut self.physics, dt);

        // Kinematic actors
        for floater in &mut self.floaters {
            floater.tick(&mut self.physics, dt);
        }
        for switch in &mut self.switches {
            switch.animate(&mut self.physics, dt);
        }
        if let Some(location) = self.character.location(&self.physics) {
            self.items
                .follow_owner(&mut self.physics, self.character.id, location);
        }

        self.physics.step();
        for floater in &mut self.floaters {
            floater.after_physics_step(&mut self.physics);
        }

        self.dispatch_overlaps();

        for (actor, tag) in self.timers.tick(dt) {
            match self.switches.iter_mut().find(|s| s.id == actor) {
                Some(switch) => switch.on_timer(tag),
                None => debug!("Timer {:?} fired for missing actor {}", tag, actor),
            }
        }

        self.collect_events();

        let view = self.pawn_view();
        self.animation.update_animation_properties(view.as_ref());

        self.debug_draw.tick(dt);
        self.elapsed += dt;
    }

    /// Route sensor overlaps to the actors that own the colliders. Switches
    /// read their trigger's overlaps directly.
    fn dispatch_overlaps(&mut self) {
        for switch in &mut self.switches {
            switch.update_overlaps(&self.physics, &mut self.timers);
        }

        let mut spent_pickups = Vec::new();

        for event in self.physics.get_collision_events() {
            if !event.is_sensor() {
                continue;
            }
            let (collider1, collider2) = event.colliders();
            let ids = (
                self.physics.get_entity_id(collider1).and_then(|id| ActorId::try_from(id).ok()),
                self.physics.get_entity_id(collider2).and_then(|id| ActorId::try_from(id).ok()),
            );
            let (Some(a), Some(b)) = ids else {
                continue;
            };

            for (actor, other) in [(a, b), (b, a)] {
                if self.route_overlap(actor, other, event.is_started()) {
                    spent_pickups.push(actor);
                }
            }
        }

        for pickup in spent_pickups {
            self.items.destroy(&mut self.physics, pickup);
        }
    }

    /// Deliver one item overlap to `actor`. Returns true if `actor` is a
    /// pickup that has been collected.
    fn route_overlap(&mut self, actor: ActorId, other: ActorId, started: bool) -> bool {
        // Items only react to the player
        if other != self.character.id {
            return false;
        }
        match self.items.get(actor) {
            Some(Item::Weapon(weapon)) => {
                if started {
                    weapon.on_overlap_begin(&mut self.character);
                } else {
                    weapon.on_overlap_end(&mut self.character);
                }
                false
            }
            Some(Item::Pickup(pickup)) if started => {
                pickup.on_overlap_begin(&mut self.character);
                true
            }
            _ => false,
        }
    }

    fn collect_events(&mut self) {
        for switch in &mut self.switches {
            for event in switch.drain_events() {
                debug!("Floor switch {}: {:?}", switch.id, event);
                switch.present(event);
                self.switch_events.push((switch.id, event));
            }
        }

        for event in self.character.drain_events() {
            if let CharacterEvent::StaminaStatusChanged { from, to } = event {
                debug!("Stamina status {:?} -> {:?}", from, to);
            }
            self.character_events.push(event);
        }
    }

    fn pawn_view(&self) -> Option<PawnView> {
        let velocity = self.character.velocity(&self.physics)?;
        Some(PawnView {
            id: self.character.id,
            velocity,
            is_falling: self.character.movement.is_falling(),
        })
    }

    /// Mark the places coins were collected for a while
    pub fn show_pickup_locations(&mut self) {
        self.character.show_pickup_locations(&mut self.debug_draw);
    }

    pub fn character(&self) -> &PlayerCharacter {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut PlayerCharacter {
        &mut self.character
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    pub fn floor_switch(&self, id: ActorId) -> Option<&FloorSwitch> {
        self.switches.iter().find(|s| s.id == id)
    }

    pub fn floater(&self, id: ActorId) -> Option<&Floater> {
        self.floaters.iter().find(|f| f.id == id)
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn debug_draw(&self) -> &DebugDraw {
        &self.debug_draw
    }

    pub fn timers(&self) -> &GameTimers {
        &self.timers
    }

    /// Switch signals raised by the last update
    pub fn switch_events(&self) -> &[(ActorId, SwitchEvent)] {
        &self.switch_events
    }

    /// Character events raised by the last update
    pub fn character_events(&self) -> &[CharacterEvent] {
        &self.character_events
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
