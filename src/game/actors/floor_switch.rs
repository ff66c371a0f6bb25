// Floor switch - pressure plate that opens a door for a while

use glam::Vec3;
use log::{debug, info};

use crate::engine::physics::{body::presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::game::error::{self, ConfigError};
use crate::game::ActorId;

use super::door_motion::DoorMotion;
use super::{GameTimers, TimerTag};

/// Editor-style properties of a floor switch
#[derive(Debug, Clone, PartialEq)]
pub struct FloorSwitchConfig {
    /// Centre of the trigger volume
    pub location: Vec3,
    /// Seconds the door stays open after the plate is pressed
    pub switch_time: f32,
    pub trigger_half_extents: Vec3,
    /// Plate position relative to `location`
    pub switch_offset: Vec3,
    pub switch_half_extents: Vec3,
    /// Door position relative to `location`
    pub door_offset: Vec3,
    pub door_half_extents: Vec3,
    /// How far the door rises when opened
    pub door_raise_height: f32,
    /// How far the plate sinks when pressed
    pub switch_press_depth: f32,
    /// Speed of the door and plate animations (cm/s)
    pub motion_speed: f32,
}

impl Default for FloorSwitchConfig {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            switch_time: 2.0,
            trigger_half_extents: Vec3::new(62.0, 62.0, 32.0),
            switch_offset: Vec3::new(0.0, 0.0, -27.0),
            switch_half_extents: Vec3::new(50.0, 50.0, 5.0),
            door_offset: Vec3::new(300.0, 0.0, 150.0),
            door_half_extents: Vec3::new(20.0, 150.0, 150.0),
            door_raise_height: 350.0,
            switch_press_depth: 10.0,
            motion_speed: 400.0,
        }
    }
}

impl FloorSwitchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::positive("switch_time", self.switch_time)?;
        for (field, extents) in [
            ("trigger_half_extents", self.trigger_half_extents),
            ("switch_half_extents", self.switch_half_extents),
            ("door_half_extents", self.door_half_extents),
        ] {
            error::positive(field, extents.min_element())?;
        }
        error::non_negative("door_raise_height", self.door_raise_height)?;
        error::non_negative("switch_press_depth", self.switch_press_depth)?;
        error::positive("motion_speed", self.motion_speed)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwitchPhase {
    #[default]
    Idle,
    /// Door open, close timer running
    Active,
}

/// Signals for whatever presents the door and plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchEvent {
    RaiseDoor,
    LowerDoor,
    RaiseFloorSwitch,
    LowerFloorSwitch,
}

#[derive(Debug)]
pub struct FloorSwitch {
    pub id: ActorId,
    pub config: FloorSwitchConfig,

    pub trigger_body: RigidBodyHandle,
    pub trigger_collider: ColliderHandle,
    pub door_body: RigidBodyHandle,
    pub switch_body: RigidBodyHandle,

    initial_door_location: Vec3,
    initial_switch_location: Vec3,

    phase: SwitchPhase,
    /// Something is standing in the trigger volume
    occupied: bool,

    door_motion: DoorMotion,
    switch_motion: DoorMotion,
    events: Vec<SwitchEvent>,
}

impl FloorSwitch {
    pub fn new(
        id: ActorId,
        config: FloorSwitchConfig,
        physics: &mut PhysicsWorld,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let trigger_body = physics.add_rigid_body(presets::static_body(config.location));
        let trigger_collider = physics.add_collider(
            presets::trigger_collider(config.trigger_half_extents),
            trigger_body,
        );
        physics.set_entity_mapping(trigger_collider, u64::from(id));

        let initial_switch_location = config.location + config.switch_offset;
        let switch_body = physics.add_rigid_body(presets::kinematic_body(initial_switch_location));
        physics.add_collider(
            presets::presentation_box_collider(config.switch_half_extents),
            switch_body,
        );

        let initial_door_location = config.location + config.door_offset;
        let door_body = physics.add_rigid_body(presets::kinematic_body(initial_door_location));
        physics.add_collider(presets::static_box_collider(config.door_half_extents), door_body);

        Ok(Self {
            id,
            trigger_body,
            trigger_collider,
            door_body,
            switch_body,
            initial_door_location,
            initial_switch_location,
            phase: SwitchPhase::Idle,
            occupied: false,
            door_motion: DoorMotion::new(config.motion_speed),
            switch_motion: DoorMotion::new(config.motion_speed),
            events: Vec::new(),
            config,
        })
    }

    /// Something entered the trigger. Opens the door and starts the close
    /// timer unless the switch is already active.
    pub fn on_overlap_begin(&mut self, timers: &mut GameTimers) {
        self.occupied = true;

        if self.phase == SwitchPhase::Active {
            debug!("Floor switch {} already active", self.id);
            return;
        }

        self.phase = SwitchPhase::Active;
        self.raise_door();
        self.lower_floor_switch();
        timers.set_timer((self.id, TimerTag::CloseDoor), self.config.switch_time);
        info!(
            "Floor switch {} pressed, door closes in {}s",
            self.id, self.config.switch_time
        );
    }

    /// Something left the trigger. The close timer keeps running.
    pub fn on_overlap_end(&mut self) {
        self.occupied = false;
    }

    /// Compare the trigger's overlaps after a physics step with the last
    /// known state and report the change, if any
    pub fn update_overlaps(&mut self, physics: &PhysicsWorld, timers: &mut GameTimers) {
        let overlapping = physics.has_intersections(self.trigger_collider);
        match (self.occupied, overlapping) {
            (false, true) => self.on_overlap_begin(timers),
            (true, false) => self.on_overlap_end(),
            _ => {}
        }
    }

    /// Close timer expired
    pub fn close_door(&mut self) {
        if self.phase != SwitchPhase::Active {
            return;
        }
        self.phase = SwitchPhase::Idle;
        self.lower_door();
        self.raise_floor_switch();
        info!("Floor switch {} released", self.id);
    }

    pub fn on_timer(&mut self, tag: TimerTag) {
        match tag {
            TimerTag::CloseDoor => self.close_door(),
        }
    }

    fn raise_door(&mut self) {
        self.events.push(SwitchEvent::RaiseDoor);
    }

    fn lower_door(&mut self) {
        self.events.push(SwitchEvent::LowerDoor);
    }

    fn raise_floor_switch(&mut self) {
        self.events.push(SwitchEvent::RaiseFloorSwitch);
    }

    fn lower_floor_switch(&mut self) {
        self.events.push(SwitchEvent::LowerFloorSwitch);
    }

    /// Place the door `z` above its initial location
    pub fn update_door_location(&self, physics: &mut PhysicsWorld, z: f32) {
        physics.set_position(self.door_body, self.initial_door_location + Vec3::Z * z);
    }

    /// Place the plate `z` above its initial location
    pub fn update_floor_switch_location(&self, physics: &mut PhysicsWorld, z: f32) {
        physics.set_position(self.switch_body, self.initial_switch_location + Vec3::Z * z);
    }

    /// Aim the door/plate animations at the position an event calls for
    pub fn present(&mut self, event: SwitchEvent) {
        match event {
            SwitchEvent::RaiseDoor => self.door_motion.set_target(self.config.door_raise_height),
            SwitchEvent::LowerDoor => self.door_motion.set_target(0.0),
            SwitchEvent::RaiseFloorSwitch => self.switch_motion.set_target(0.0),
            SwitchEvent::LowerFloorSwitch => self
                .switch_motion
                .set_target(-self.config.switch_press_depth),
        }
    }

    /// Step the door/plate animations
    pub fn animate(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        if let Some(z) = self.door_motion.step(dt) {
            self.update_door_location(physics, z);
        }
        if let Some(z) = self.switch_motion.step(dt) {
            self.update_floor_switch_location(physics, z);
        }
    }

    /// Take the signals raised since the last call
    pub fn drain_events(&mut self) -> Vec<SwitchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> SwitchPhase {
        self.phase
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn door_offset(&self) -> f32 {
        self.door_motion.offset()
    }

    pub fn switch_offset(&self) -> f32 {
        self.switch_motion.offset()
    }

    pub fn initial_door_location(&self) -> Vec3 {
        self.initial_door_location
    }

    pub fn initial_switch_location(&self) -> Vec3 {
        self.initial_switch_location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spawn() -> (PhysicsWorld, GameTimers, FloorSwitch) {
        let mut physics = PhysicsWorld::new();
        let switch = FloorSwitch::new(5, FloorSwitchConfig::default(), &mut physics).unwrap();
        (physics, GameTimers::new(), switch)
    }

    #[test]
    fn test_enter_raises_door_and_starts_timer() {
        let (_physics, mut timers, mut switch) = spawn();
        switch.on_overlap_begin(&mut timers);

        assert_eq!(switch.phase(), SwitchPhase::Active);
        assert!(switch.is_occupied());
        assert_eq!(
            switch.drain_events(),
            vec![SwitchEvent::RaiseDoor, SwitchEvent::LowerFloorSwitch]
        );
        assert_eq!(timers.remaining((5, TimerTag::CloseDoor)), Some(2.0));
    }

    #[test]
    fn test_one_raise_and_one_lower_per_activation() {
        let (_physics, mut timers, mut switch) = spawn();
        switch.on_overlap_begin(&mut timers);
        switch.on_overlap_begin(&mut timers);
        timers.tick(1.0);
        switch.on_overlap_begin(&mut timers);

        // Re-entry did not restart the timer
        assert_relative_eq!(timers.remaining((5, TimerTag::CloseDoor)).unwrap(), 1.0);

        for (_, tag) in timers.tick(1.0) {
            switch.on_timer(tag);
        }
        let events = switch.drain_events();
        let raises = events.iter().filter(|e| **e == SwitchEvent::RaiseDoor).count();
        let lowers = events.iter().filter(|e| **e == SwitchEvent::LowerDoor).count();
        assert_eq!((raises, lowers), (1, 1));
        assert_eq!(switch.phase(), SwitchPhase::Idle);
    }

    #[test]
    fn test_exit_does_not_cancel_timer() {
        let (_physics, mut timers, mut switch) = spawn();
        switch.on_overlap_begin(&mut timers);
        switch.on_overlap_end();

        assert!(!switch.is_occupied());
        assert!(timers.is_timer_active((5, TimerTag::CloseDoor)));
        assert_eq!(switch.phase(), SwitchPhase::Active);
    }

    #[test]
    fn test_overlaps_follow_trigger_contents() {
        let (mut physics, mut timers, mut switch) = spawn();
        let body = physics.add_rigid_body(presets::character_body(Vec3::new(0.0, 0.0, 100.0)));
        physics.add_collider(presets::character_collider(48.0, 105.0), body);

        physics.step();
        switch.update_overlaps(&physics, &mut timers);
        assert!(switch.is_occupied());
        assert_eq!(switch.phase(), SwitchPhase::Active);

        // Still inside: no new activation
        physics.step();
        switch.update_overlaps(&physics, &mut timers);
        assert_eq!(switch.drain_events().len(), 2);

        physics.remove_rigid_body(body);
        physics.step();
        switch.update_overlaps(&physics, &mut timers);
        assert!(!switch.is_occupied());
        assert!(timers.is_timer_active((5, TimerTag::CloseDoor)));
    }

    #[test]
    fn test_close_while_idle_is_ignored() {
        let (_physics, _timers, mut switch) = spawn();
        switch.close_door();
        assert!(switch.drain_events().is_empty());
    }

    #[test]
    fn test_can_reactivate_after_close() {
        let (_physics, mut timers, mut switch) = spawn();
        switch.on_overlap_begin(&mut timers);
        switch.close_door();
        switch.drain_events();

        switch.on_overlap_begin(&mut timers);
        assert_eq!(switch.phase(), SwitchPhase::Active);
        assert_eq!(switch.drain_events().len(), 2);
    }

    #[test]
    fn test_update_door_location_offsets_vertically() {
        let (mut physics, _timers, switch) = spawn();
        switch.update_door_location(&mut physics, 120.0);
        physics.step();

        let door = physics.translation(switch.door_body).unwrap();
        let expected = switch.initial_door_location() + Vec3::Z * 120.0;
        assert_relative_eq!(door.z, expected.z, epsilon = 1e-3);
        assert_relative_eq!(door.x, expected.x, epsilon = 1e-3);
    }

    #[test]
    fn test_presentation_animates_door() {
        let (mut physics, mut timers, mut switch) = spawn();
        switch.on_overlap_begin(&mut timers);
        for event in switch.drain_events() {
            switch.present(event);
        }
        switch.animate(&mut physics, 0.5);

        assert_relative_eq!(switch.door_offset(), 200.0);
        assert_relative_eq!(switch.switch_offset(), -10.0);
    }

    #[test]
    fn test_zero_switch_time_rejected() {
        let mut physics = PhysicsWorld::new();
        let config = FloorSwitchConfig {
            switch_time: 0.0,
            ..FloorSwitchConfig::default()
        };
        assert!(matches!(
            FloorSwitch::new(1, config, &mut physics),
            Err(ConfigError::NotPositive {
                field: "switch_time",
                ..
            })
        ));
    }
}
