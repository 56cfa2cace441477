/*!
 * Chain Walker
 * Walks one seed's sequence against the shared memo table
 */

mod length;
mod seed_marker;
pub mod traits;
pub mod types;

pub use length::LengthWalker;
pub use seed_marker::SeedMarkerWalker;
pub use traits::ChainWalker;
pub use types::{WalkOutcome, WalkResult};
