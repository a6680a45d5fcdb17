//! Apex Physics - Rapier 2D integration
//!
//! Provides the simulation half of the race core:
//! - `PhysicsWorld` — wraps the Rapier pipeline, body/collider sets, and
//!   collision/contact-force event channels
//! - `Car` — the player car: exclusive body ownership, control inputs, and
//!   the running/broken/finished lifecycle

pub mod car;
pub mod world;

pub use car::{Car, CarConfig, CarState};
pub use world::{PhysicsWorld, SolverConfig};
