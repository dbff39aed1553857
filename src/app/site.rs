use crate::core::validator::CvValidator;
use crate::domain::model::CvDocument;
use crate::domain::ports::{DocumentSource, PageSink};
use crate::render::{CvRenderer, DEFAULT_MAINTENANCE_MESSAGE};
use crate::utils::error::Result;

pub const CV_DOCUMENT: &str = "cv";
pub const TEMPLATE_DOCUMENT: &str = "cv.template";

/// Which document ended up on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Rendered { document: &'static str },
    Maintenance,
}

#[derive(Debug, Clone)]
pub struct SiteBuild {
    pub html: String,
    pub outcome: BuildOutcome,
}

/// Loads, validates and renders the CV page.
///
/// `cv` is tried first, then `cv.template`; when neither loads and validates
/// the maintenance page is rendered instead of partial content.
pub struct SiteBuilder<D: DocumentSource> {
    source: D,
    renderer: CvRenderer,
    validator: CvValidator,
    maintenance_message: String,
}

impl<D: DocumentSource> SiteBuilder<D> {
    pub fn new(source: D, renderer: CvRenderer, validator: CvValidator) -> Self {
        Self {
            source,
            renderer,
            validator,
            maintenance_message: DEFAULT_MAINTENANCE_MESSAGE.to_string(),
        }
    }

    pub fn with_maintenance_message(mut self, message: impl Into<String>) -> Self {
        self.maintenance_message = message.into();
        self
    }

    /// Fetches and validates one named document.
    pub async fn load_document(&self, name: &str) -> Result<CvDocument> {
        let value = self.source.fetch(name).await?;
        CvDocument::from_value(value, &self.validator)
    }

    /// The first usable document, `cv` before `cv.template`.
    pub async fn load(&self) -> Option<(&'static str, CvDocument)> {
        match self.load_document(CV_DOCUMENT).await {
            Ok(cv) => return Some((CV_DOCUMENT, cv)),
            Err(e) => {
                tracing::warn!("No usable cv found ({}), falling back to template...", e);
            }
        }

        match self.load_document(TEMPLATE_DOCUMENT).await {
            Ok(template) => Some((TEMPLATE_DOCUMENT, template)),
            Err(e) => {
                tracing::error!("Failed to load template as well: {}", e);
                None
            }
        }
    }

    pub async fn build(&self) -> SiteBuild {
        tracing::info!("Loading CV data from: {}", self.source.describe());

        if let Some((document, cv)) = self.load().await {
            match self.renderer.render(&cv) {
                Ok(html) => {
                    tracing::info!(document, "Rendered CV page");
                    return SiteBuild {
                        html,
                        outcome: BuildOutcome::Rendered { document },
                    };
                }
                Err(e) => tracing::error!("Failed to render {}: {}", document, e),
            }
        }

        tracing::warn!("Rendering maintenance page");
        SiteBuild {
            html: self.renderer.render_maintenance(&self.maintenance_message),
            outcome: BuildOutcome::Maintenance,
        }
    }

    /// Builds the page and hands it to `sink`; returns where it was written.
    pub async fn build_to(&self, sink: &dyn PageSink) -> Result<(SiteBuild, String)> {
        let build = self.build().await;
        let location = sink.write_page(&build.html)?;
        tracing::info!("Output saved to: {}", location);
        Ok((build, location))
    }

    /// Validates `cv` without any fallback.
    pub async fn check(&self) -> Result<CvDocument> {
        self.load_document(CV_DOCUMENT).await
    }
}
