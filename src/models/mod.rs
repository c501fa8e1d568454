// Models module for data structures
pub mod parsed_version;
pub mod segment_ref;
pub mod settings_format;
pub mod stepper;

pub use parsed_version::{is_dirty, ParseError, ParsedVersion, Segment, VERSION_PATTERN};
pub use segment_ref::{segment_name, SegmentRef, SegmentRefError, SEGMENT_NAMES};
pub use settings_format::SettingsFormat;
pub use stepper::{StepError, StepperState};
