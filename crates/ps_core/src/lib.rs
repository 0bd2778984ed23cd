//! Deterministic 2D soccer match simulation engine.
//!
//! The engine owns all match state and advances it through explicit frame
//! steps: physics at frame rate, on-ball decisions on a coarser cadence, a
//! 1 Hz countdown on top. The same seed, rosters and duration always yield
//! the same match, event for event.
//!
//! ```no_run
//! use ps_core::engine::MatchEngine;
//! # fn rosters() -> (ps_core::models::Team, ps_core::models::Team) { unimplemented!() }
//!
//! let (home, away) = rosters();
//! let mut engine = MatchEngine::start(home, away, 300, 42).unwrap();
//! engine.on_event(Box::new(|event| println!("{}", event.description)));
//! engine.simulate();
//! println!("{:?}", engine.score());
//! ```

pub mod engine;
pub mod error;
pub mod models;

pub use engine::config::EngineConfig;
pub use engine::events::MatchEvent;
pub use engine::match_state::{MatchState, Score};
pub use engine::{MatchEngine, MatchPlan};
pub use error::{EngineError, Result};
pub use models::{Player, PlayerRole, Team, TeamSide};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
