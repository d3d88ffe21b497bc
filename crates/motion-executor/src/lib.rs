//! motion-executor: goal poses and the navigation stack contract
//!
//! This crate defines the data model for 2D navigation goals, the
//! [`MotionExecutor`] trait through which an external motion-planning stack
//! is driven, and the [`ExecutorSession`] lifecycle around one connection to
//! that stack.

mod error;
pub use error::{ExecutorError, Result};

mod types;
pub use types::{
    normalize_heading, Feedback, NavigationGoal, Point3, Pose, Quaternion, TaskHandle, TaskStatus,
};

mod traits;
pub use traits::MotionExecutor;

mod session;
pub use session::{ExecutorSession, SessionConfig, SessionState};

#[cfg(feature = "mock")]
pub mod mock;
