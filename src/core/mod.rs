pub mod duration;
pub mod phone;
pub mod theme;
pub mod validator;

pub use crate::domain::model::CvDocument;
pub use crate::domain::ports::DocumentSource;
pub use crate::utils::error::Result;
pub use duration::{DurationFormatter, SpanEnd, YearMonth};
pub use theme::Theme;
pub use validator::CvValidator;
