pub mod ledger;
pub mod media;
pub mod oplog;
pub mod playback;
pub mod session;

pub use ledger::{TallyLedger, Transition};
pub use media::{MediaSource, PlaybackListener, SimulatedMedia, Subscription};
pub use playback::{PlaybackMonitor, PlaybackSnapshot};
pub use session::{Session, SessionCommand};
