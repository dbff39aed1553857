use crate::adapters::parse_document;
use crate::domain::ports::{DocumentSource, PageSink};
use crate::utils::error::{CvError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads `{base_path}/{name}.json` from disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    base_path: PathBuf,
}

impl LocalSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", name))
    }
}

#[async_trait]
impl DocumentSource for LocalSource {
    async fn fetch(&self, name: &str) -> Result<Value> {
        let path = self.document_path(name);
        tracing::debug!("Reading document from: {}", path.display());
        let data = fs::read(&path).map_err(|e| CvError::DocumentLoad {
            name: name.to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;
        parse_document(name, &data)
    }

    fn describe(&self) -> String {
        self.base_path.display().to_string()
    }
}

/// Writes the page to a single file, creating parent directories.
#[derive(Debug, Clone)]
pub struct LocalFileSink {
    output_path: PathBuf,
}

impl LocalFileSink {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }
}

impl PageSink for LocalFileSink {
    fn write_page(&self, html: &str) -> Result<String> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.output_path, html)?;
        Ok(self.output_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_reads_named_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cv.json"), r#"{"name": "Jane"}"#).unwrap();

        let source = LocalSource::new(dir.path());
        let value = source.fetch("cv").await.unwrap();
        assert_eq!(value["name"], "Jane");
    }

    #[tokio::test]
    async fn test_fetch_missing_or_empty_document_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cv.template.json"), "null").unwrap();

        let source = LocalSource::new(dir.path());
        assert!(matches!(
            source.fetch("cv").await,
            Err(CvError::DocumentLoad { .. })
        ));
        match source.fetch("cv.template").await {
            Err(CvError::DocumentLoad { name, message }) => {
                assert_eq!(name, "cv.template");
                assert_eq!(message, "Empty JSON data");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_sink_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("dist/site/index.html");

        let sink = LocalFileSink::new(&target);
        let written = sink.write_page("<!DOCTYPE html>").unwrap();

        assert_eq!(written, target.display().to_string());
        assert_eq!(fs::read_to_string(target).unwrap(), "<!DOCTYPE html>");
    }
}
