pub mod live_poller;
pub mod metadata_loader;
pub mod playback;
pub mod stream_state;

pub use live_poller::{LivePoller, PollOutcome};
pub use metadata_loader::load_stream_metadata;
pub use playback::PlaybackController;
pub use stream_state::{StreamSnapshot, StreamState, StreamStateManager};
