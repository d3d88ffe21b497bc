use crate::{ExecutorError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use time::OffsetDateTime;
use uuid::Uuid;

/// A validated 2D navigation goal: planar position plus heading about the
/// vertical axis, in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationGoal {
    pub x: f64,
    pub y: f64,
    /// Radians, normalized to (-pi, pi].
    pub heading: f64,
}

impl NavigationGoal {
    /// Build a goal from raw coordinates. All components must be finite;
    /// the heading is normalized to (-pi, pi].
    pub fn new(x: f64, y: f64, heading: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ExecutorError::InvalidGoal("position must be finite"));
        }
        if !heading.is_finite() {
            return Err(ExecutorError::InvalidGoal("heading must be finite"));
        }
        Ok(Self {
            x,
            y,
            heading: normalize_heading(heading),
        })
    }
}

/// Wrap an angle into (-pi, pi].
pub fn normalize_heading(heading: f64) -> f64 {
    let wrapped = heading.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Unit quaternion. Only yaw rotations are produced by this crate; the full
/// representation is kept so poses stay compatible with a 3D stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    /// Roll-pitch-yaw to quaternion with roll = pitch = 0.
    pub fn from_yaw(yaw: f64) -> Self {
        let half = yaw / 2.0;
        Self {
            x: 0.0,
            y: 0.0,
            z: half.sin(),
            w: half.cos(),
        }
    }

    /// Recover the yaw angle, in (-pi, pi].
    pub fn yaw(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        normalize_heading(siny_cosp.atan2(cosy_cosp))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// An oriented pose in map coordinates, as consumed by the motion executor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3,
    pub orientation: Quaternion,
}

impl Pose {
    /// Place a goal on the ground plane (z = 0) with its heading as a yaw
    /// rotation. Deterministic; the goal was validated at construction.
    pub fn from_goal(goal: &NavigationGoal) -> Self {
        Self {
            position: Point3 {
                x: goal.x,
                y: goal.y,
                z: 0.0,
            },
            orientation: Quaternion::from_yaw(goal.heading),
        }
    }

    /// The origin pose with the given heading, used as the believed start
    /// pose when a session activates.
    pub fn origin_with_heading(heading: f64) -> Self {
        Self {
            position: Point3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            orientation: Quaternion::from_yaw(normalize_heading(heading)),
        }
    }

    pub fn yaw(&self) -> f64 {
        self.orientation.yaw()
    }
}

/// Opaque reference to one submitted navigation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(Uuid);

impl TaskHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Succeeded | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }
}

/// Progress record reported by the executor while a task runs. Opaque to the
/// dispatch loop; it is surfaced to the operator, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub distance_remaining: Option<f64>,
    pub ts: Option<OffsetDateTime>,
}
