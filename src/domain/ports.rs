use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Where named JSON documents (`cv`, `cv.template`) are loaded from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Loads `{name}.json` and parses it; the result is not validated yet.
    async fn fetch(&self, name: &str) -> Result<Value>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Receives the rendered page.
pub trait PageSink: Send + Sync {
    fn write_page(&self, html: &str) -> Result<String>;
}

#[async_trait]
impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    async fn fetch(&self, name: &str) -> Result<Value> {
        (**self).fetch(name).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
