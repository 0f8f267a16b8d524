//! Tree assembly: bounded level-by-level fan-out, the by-id PDF index built in
//! the same pass, load status, and view generations for stale-result discard.

pub mod assembler;
pub mod fan_out;
pub mod generation;
pub mod index;
pub mod status;

pub use assembler::{MaterializedTree, TreeAssembler};
pub use generation::{ViewTicket, ViewTracker};
pub use index::TreeIndex;
pub use status::{TreeLoadError, TreeStatus};
