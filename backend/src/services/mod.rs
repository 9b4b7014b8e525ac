//! Business logic services
//!
//! Services coordinate between repositories, the pure calorie engine and
//! external systems.

pub mod coach;
pub mod dashboard;
pub mod insights;
pub mod user;

pub use coach::{CoachError, CoachService};
pub use dashboard::DashboardService;
pub use insights::InsightsService;
pub use user::UserService;
