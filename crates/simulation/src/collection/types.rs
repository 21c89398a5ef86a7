use bevy::prelude::*;

/// Tunables for how the player approaches, faces and collects from buildings.
#[derive(Resource, Debug, Clone)]
pub struct CollectorConfig {
    /// Extra stand-off from the building collider when picking the approach point.
    pub approach_distance: f32,
    /// Multiplier on elapsed time while turning to face the building.
    pub rotation_speed: f32,
    /// Seconds spent in the pickup interaction.
    pub pickup_duration_secs: f32,
    /// Nominal length of the turn-to-face animation, in seconds.
    pub facing_duration_secs: f32,
    /// Stopping distance used when walking to a building.
    pub collect_stopping_distance: f32,
    /// Stopping distance used for plain ground moves.
    pub move_stopping_distance: f32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            approach_distance: 1.2,
            rotation_speed: 8.0,
            pickup_duration_secs: 1.0,
            facing_duration_secs: 0.25,
            collect_stopping_distance: 0.05,
            move_stopping_distance: 0.2,
        }
    }
}

/// Arrival threshold never drops below this, whatever the stopping distance.
pub const MIN_ARRIVAL_DISTANCE: f32 = 0.05;

/// Look directions shorter than this (squared) skip the facing step.
pub const MIN_FACING_SQ: f32 = 0.001;

/// Non-terminal step of an in-flight collection task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectionPhase {
    PathingToTarget,
    TurningToFace { from: Quat, to: Quat, progress: f32 },
    Collecting { elapsed_ticks: u32 },
}

/// One attempt to walk to a building and empty it.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionTask {
    pub target: Entity,
    pub destination: Vec3,
    pub phase: CollectionPhase,
}

/// Coarse view of where an agent is in the collection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    Idle,
    PathingToTarget,
    TurningToFace,
    Collecting,
}

/// Per-agent collection state. An agent runs at most one task at a time.
#[derive(Component, Debug, Clone, Default)]
pub struct Collector {
    pub(crate) task: Option<CollectionTask>,
    pub(crate) current_target: Option<Entity>,
    pub(crate) busy: bool,
}

impl Collector {
    pub fn task(&self) -> Option<&CollectionTask> {
        self.task.as_ref()
    }

    pub fn current_target(&self) -> Option<Entity> {
        self.current_target
    }

    /// True while the pickup interaction is running. Move and collect
    /// requests are ignored in that window.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn state(&self) -> CollectionState {
        match self.task.as_ref().map(|t| t.phase) {
            None => CollectionState::Idle,
            Some(CollectionPhase::PathingToTarget) => CollectionState::PathingToTarget,
            Some(CollectionPhase::TurningToFace { .. }) => CollectionState::TurningToFace,
            Some(CollectionPhase::Collecting { .. }) => CollectionState::Collecting,
        }
    }

    /// Drops any task and clears the target and busy flag. Returns the
    /// target of the dropped task, if there was one.
    pub(crate) fn cancel(&mut self) -> Option<Entity> {
        self.current_target = None;
        self.busy = false;
        self.task.take().map(|t| t.target)
    }
}

/// Fire-once animation inputs for an agent.
#[derive(Component, Debug, Clone, Default)]
pub struct AgentAnimation {
    pub moving: bool,
    /// Incremented every time the pickup animation is triggered.
    pub pickup_triggers: u32,
}

/// Marker for the player-controlled agent.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

// =============================================================================
// Events
// =============================================================================

/// Walk to `building` and collect from it. `click_point` picks the side of the
/// building to approach.
#[derive(Event, Debug, Clone)]
pub struct CollectRequest {
    pub agent: Entity,
    pub building: Entity,
    pub click_point: Vec3,
}

/// Walk to a point on the ground, abandoning any collection in progress.
#[derive(Event, Debug, Clone)]
pub struct MoveRequest {
    pub agent: Entity,
    pub point: Vec3,
}

/// Abandon the agent's collection task. Honoured even mid-pickup.
#[derive(Event, Debug, Clone)]
pub struct CancelCollectionRequest {
    pub agent: Entity,
}

/// Sent the tick the pickup animation starts.
#[derive(Event, Debug, Clone)]
pub struct PickupTriggered {
    pub agent: Entity,
    pub building: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Explicit cancel request.
    Requested,
    /// Replaced by a request for another building or a ground move.
    Superseded,
    /// The building no longer exists.
    TargetLost,
    /// Navigation reported the destination unreachable.
    PathInvalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    Completed { amount: u32 },
    Cancelled(CancelReason),
}

/// Reports how each collection task ended.
#[derive(Event, Debug, Clone)]
pub struct CollectionFinished {
    pub agent: Entity,
    pub building: Entity,
    pub outcome: CollectionOutcome,
}
