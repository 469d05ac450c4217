//! # Placement State
//!
//! The pick → confirm → place cycle that decides which UI panel is visible and
//! when a model gets anchored.
//!
//! ```text
//!            Pick(x)                Confirm
//!   Idle ───────────────▶ Selecting(x) ─────────▶ Idle + confirmed = x
//!    ▲                        │
//!    └──────── Cancel ────────┘
//! ```
//!
//! [`PlacementState`] is the plain state machine. [`PlacementStore`] wraps it
//! with a revision counter and a subscription list so views and the scene host
//! can react to changes without polling every field.

pub mod state;
pub mod store;

pub use state::{Phase, PlacementAction, PlacementError, PlacementState};
pub use store::{PlacementStore, SubscriptionId};
