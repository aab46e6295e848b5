//! Game core: session state machine, pair sampling, and outcome resolution
//!
//! # Components
//! - `assets.rs`: pool tags, asset keys, and image path resolution
//! - `sampler.rs`: non-repeating real/fake pair sampling
//! - `session.rs`: Session state machine and round controller
//! - `outcome.rs`: final outcome classification and message pools

pub mod assets;
pub mod outcome;
pub mod sampler;
pub mod session;

pub use assets::{AssetCatalog, AssetKey, PoolTag};
pub use outcome::{MessagePools, OutcomeClass, OutcomeResolver};
pub use session::{Choice, GameConfig, PendingTransition, Phase, Session};

// Only used internally or through Session's return values
#[allow(unused_imports)]
pub use outcome::FinalOutcome;
#[allow(unused_imports)]
pub use sampler::PairSampler;
#[allow(unused_imports)]
pub use session::{Feedback, TransitionKind};
