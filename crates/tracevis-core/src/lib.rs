//! Tracevis Core
//!
//! Records algorithm execution as a trace of immutable events and replays it
//! into visualization-ready snapshots.
//!
//! # Architecture
//!
//! - **Events**: closed set of atomic facts an algorithm can emit
//! - **Snapshots**: everything a renderer draws for one step
//! - **Player**: folds a trace over snapshot #0, with forward, backward and
//!   seek navigation backed by a checkpoint arena
//! - **Codec**: JSON form of traces
//!
//! Algorithms only produce events and renderers only read snapshots. The
//! player never calls out to either.
//!
//! # Usage
//!
//! ```
//! use tracevis_core::{Event, Player};
//!
//! let mut player = Player::new(vec![2, 1]);
//! player.load(vec![Event::compare(0, 1), Event::swap(0, 1)]);
//!
//! let end = player.seek_end().unwrap();
//! assert_eq!(end.values(), &[1, 2]);
//! ```

mod codec;
mod config;
mod error;
mod events;
mod player;
mod snapshot;

pub use codec::{decode_trace, encode_trace};
pub use config::PlayerConfig;
pub use error::{Error, Result};
pub use events::{Event, Location};
pub use player::{apply_event, Player, PlayerStatus, StepOutcome};
pub use snapshot::{Condition, Snapshot};
