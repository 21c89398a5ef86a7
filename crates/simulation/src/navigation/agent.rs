use bevy::prelude::*;

/// Result of the most recent path request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStatus {
    /// No path has been requested, or it was reset.
    #[default]
    None,
    Valid,
    /// The destination could not be reached.
    Invalid,
}

/// Ground navigation state for a moving agent.
///
/// `set_destination` only queues a request; the path is planned on the next
/// fixed tick, and `path_pending` is true until then.
#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    /// Units per second.
    pub speed: f32,
    /// The agent stops once `remaining_distance` is at or below this.
    pub stopping_distance: f32,
    destination: Option<Vec3>,
    path_pending: bool,
    waypoints: Vec<Vec3>,
    remaining_distance: f32,
    path_status: PathStatus,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            speed: 3.5,
            stopping_distance: 0.0,
            destination: None,
            path_pending: false,
            waypoints: Vec::new(),
            remaining_distance: 0.0,
            path_status: PathStatus::None,
        }
    }
}

impl NavAgent {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.path_pending = true;
        self.path_status = PathStatus::None;
    }

    /// Drops the current path and any pending request; the agent stops.
    pub fn reset_path(&mut self) {
        self.destination = None;
        self.path_pending = false;
        self.waypoints.clear();
        self.remaining_distance = 0.0;
        self.path_status = PathStatus::None;
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn path_pending(&self) -> bool {
        self.path_pending
    }

    /// Distance left along the current path, measured in the XZ plane.
    pub fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    pub fn path_status(&self) -> PathStatus {
        self.path_status
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn has_path(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// Installs the result of path planning for a request made from `from`.
    pub(crate) fn apply_plan(&mut self, from: Vec3, plan: Option<Vec<Vec3>>) {
        self.path_pending = false;
        match plan {
            Some(waypoints) => {
                self.waypoints = waypoints;
                self.path_status = PathStatus::Valid;
                self.remaining_distance = path_length(from, &self.waypoints);
            }
            None => {
                self.waypoints.clear();
                self.path_status = PathStatus::Invalid;
                self.remaining_distance = 0.0;
            }
        }
    }

    /// Moves `position` along the path by at most `step`, never entering the
    /// stopping radius, and refreshes `remaining_distance`.
    pub(crate) fn advance(&mut self, position: &mut Vec3, step: f32) {
        if self.path_pending || self.waypoints.is_empty() {
            return;
        }

        let mut budget = step.min(self.remaining_distance - self.stopping_distance);
        while budget > 0.0 && !self.waypoints.is_empty() {
            let target = Vec3::new(self.waypoints[0].x, position.y, self.waypoints[0].z);
            let to_target = target - *position;
            let dist = to_target.length();
            if dist <= budget {
                *position = target;
                budget -= dist;
                self.waypoints.remove(0);
            } else {
                *position += to_target / dist * budget;
                budget = 0.0;
            }
        }

        self.remaining_distance = path_length(*position, &self.waypoints);
        if self.remaining_distance - self.stopping_distance < ARRIVAL_EPSILON {
            self.remaining_distance = self.remaining_distance.min(self.stopping_distance);
        }
    }
}

/// Held direct-movement input for an agent, written by the input layer each
/// frame. `direction` is in world space; only its XZ part is used and it is
/// normalized before use, so any non-zero length moves at full speed.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualMoveInput {
    pub direction: Vec3,
}

impl ManualMoveInput {
    /// Unit XZ direction, or `None` inside the dead zone.
    pub fn planar_direction(&self) -> Option<Vec3> {
        let flat = Vec3::new(self.direction.x, 0.0, self.direction.z);
        (flat.length() > MANUAL_MOVE_DEAD_ZONE).then(|| flat.normalize())
    }
}

/// Axis input at or below this magnitude is ignored.
const MANUAL_MOVE_DEAD_ZONE: f32 = 0.01;

/// Distances this close to the stopping radius count as arrived.
const ARRIVAL_EPSILON: f32 = 1e-3;

/// Length of the polyline `from → waypoints…`, ignoring height.
pub fn path_length(from: Vec3, waypoints: &[Vec3]) -> f32 {
    let mut prev = from.xz();
    let mut total = 0.0;
    for wp in waypoints {
        let p = wp.xz();
        total += prev.distance(p);
        prev = p;
    }
    total
}
