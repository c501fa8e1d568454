// Services module for host access and session logic
pub mod session;
pub mod settings_file;
pub mod version_host;

pub use session::{ApplyControl, SegmentControl, Session, SessionState, SessionView};
pub use settings_file::SettingsFile;
pub use version_host::{MemoryHost, VersionSink, VersionSource};
