//! Recording data model.
//!
//! - [`Recording`]: the persisted record
//! - [`RecordingPatch`]: a partial update applied by `RecordingStore::update`

mod patch;
mod recording;
mod thumbnail;

pub use patch::RecordingPatch;
pub use recording::Recording;
