//! Roll call engine: page scraping, messaging, storage and the poll loop.
mod decode;
mod engine;
mod messenger;
mod page;
mod persist;
mod platform;
mod poll;
mod protocol;
mod roster_store;
mod scrape;
mod storage;
mod types;

pub use decode::{decode_page, DecodeError, DecodedPage};
pub use engine::{EngineHandle, EngineSettings};
pub use messenger::{PageAgentMessenger, TabMessenger};
pub use page::{FileSnapshotSource, PageAgent, SnapshotSource, StaticSnapshot};
pub use persist::{ensure_storage_dir, AtomicFileWriter, PersistError};
pub use platform::{LocalPlatform, Platform};
pub use poll::{run_ticker, DEFAULT_POLL_INTERVAL};
pub use protocol::{PageRequest, PageResponse, WireParticipant, CHECK_PARTICIPANTS};
pub use roster_store::{RosterStore, ROSTER_KEY};
pub use scrape::{
    DomScraper, PageSnapshot, ParticipantScraper, ScrapeSettings, DEFAULT_EXCLUDED_LABELS,
};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use types::{EngineEvent, MessagingError, PlatformError, ScrapeError, StorageError};
