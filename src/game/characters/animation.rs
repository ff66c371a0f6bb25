// Animation driver - turns pawn motion into blend parameters

use glam::Vec3;
use log::debug;

use crate::core::math::lateral;
use crate::game::ActorId;

/// Snapshot of the pawn the driver reads each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PawnView {
    pub id: ActorId,
    pub velocity: Vec3,
    pub is_falling: bool,
}

/// Which locomotion animation dominates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocomotionPose {
    #[default]
    Idle,
    Run,
    Sprint,
    InAir,
}

impl LocomotionPose {
    pub fn animation_name(&self) -> &'static str {
        match self {
            LocomotionPose::Idle => "idle",
            LocomotionPose::Run => "run",
            LocomotionPose::Sprint => "sprint",
            LocomotionPose::InAir => "in_air",
        }
    }
}

/// Weights of the 1D idle/run/sprint blend space. Always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionBlend {
    pub idle: f32,
    pub run: f32,
    pub sprint: f32,
}

impl Default for LocomotionBlend {
    fn default() -> Self {
        Self {
            idle: 1.0,
            run: 0.0,
            sprint: 0.0,
        }
    }
}

impl LocomotionBlend {
    /// Sample the blend space at `speed`. Idle sits at 0, run at
    /// `running_speed` and sprint at `sprinting_speed`.
    pub fn sample(speed: f32, running_speed: f32, sprinting_speed: f32) -> Self {
        if speed <= 0.0 || running_speed <= 0.0 {
            return Self::default();
        }
        if speed <= running_speed {
            let t = speed / running_speed;
            return Self {
                idle: 1.0 - t,
                run: t,
                sprint: 0.0,
            };
        }

        let span = sprinting_speed - running_speed;
        let t = if span > 0.0 {
            ((speed - running_speed) / span).min(1.0)
        } else {
            1.0
        };
        Self {
            idle: 0.0,
            run: 1.0 - t,
            sprint: t,
        }
    }

    /// The dominant grounded pose
    pub fn dominant(&self) -> LocomotionPose {
        if self.sprint > self.run && self.sprint > self.idle {
            LocomotionPose::Sprint
        } else if self.run > self.idle {
            LocomotionPose::Run
        } else {
            LocomotionPose::Idle
        }
    }
}

/// Per-frame animation parameters for one pawn
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    pawn: Option<ActorId>,
    /// Lateral (XY) speed of the pawn
    pub movement_speed: f32,
    pub is_in_air: bool,
    pub blend: LocomotionBlend,
    pub pose: LocomotionPose,
    running_speed: f32,
    sprinting_speed: f32,
}

impl AnimationDriver {
    pub fn new(running_speed: f32, sprinting_speed: f32) -> Self {
        Self {
            pawn: None,
            movement_speed: 0.0,
            is_in_air: false,
            blend: LocomotionBlend::default(),
            pose: LocomotionPose::Idle,
            running_speed,
            sprinting_speed,
        }
    }

    /// Bind to the owning pawn if not bound yet
    pub fn initialize(&mut self, owner: Option<ActorId>) {
        if self.pawn.is_none() {
            self.pawn = owner;
        }
    }

    pub fn pawn(&self) -> Option<ActorId> {
        self.pawn
    }

    /// Refresh the parameters from the owner's current motion. Does nothing
    /// while no pawn is bound or the view belongs to another pawn.
    pub fn update_animation_properties(&mut self, owner: Option<&PawnView>) {
        if self.pawn.is_none() {
            self.initialize(owner.map(|view| view.id));
        }
        let Some(pawn) = self.pawn else {
            return;
        };
        let Some(view) = owner.filter(|view| view.id == pawn) else {
            debug!("Animation driver: pawn {} not available this frame", pawn);
            return;
        };

        self.movement_speed = lateral(view.velocity).length();
        self.is_in_air = view.is_falling;
        self.blend = LocomotionBlend::sample(self.movement_speed, self.running_speed, self.sprinting_speed);
        self.pose = if self.is_in_air {
            LocomotionPose::InAir
        } else {
            self.blend.dominant()
        };
    }
}
