pub mod site;

pub use site::{BuildOutcome, SiteBuild, SiteBuilder};
