//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod goal;
pub mod ledger;
pub mod user;

pub use goal::{GoalRecord, GoalRepository, NewGoal};
pub use ledger::{EnergyLedgerRepository, NewActivityLog, NewMealLog};
pub use user::{NewUser, UserRecord, UserRepository};
