pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpSource, LocalFileSink, LocalSource};
pub use app::{BuildOutcome, SiteBuild, SiteBuilder};
pub use config::SiteConfig;
pub use crate::core::{CvDocument, CvValidator, DurationFormatter, Theme};
pub use render::{AllowListSanitizer, CvRenderer, PageOptions, Sanitizer};
pub use utils::error::{CvError, CvValidationError, PhoneFormatError, Result};
