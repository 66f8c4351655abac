//! YAML deck manifests.
//!
//! A manifest lists the assets to generate and the pages to build, in order:
//!
//! ```yaml
//! title: Quarterly review
//! author: Platform team
//! layout: 16x9
//! output: review.pptx
//! assets:
//!   - output_path: slides/cover.png
//!     width: 1000
//!     height: 562.5
//!     kind: gradient
//!     stops:
//!       - { offset: 0.0, color: "#667eea" }
//!       - { offset: 1.0, color: "#764ba2" }
//! pages:
//!   - template: slides/cover.html
//!   - template: slides/numbers.html
//!     payload:
//!       type: table
//!       column_ratios: [0.5, 0.5]
//!       rows:
//!         - [Metric, Value]
//!         - [Uptime, "99.9%"]
//! ```
//!
//! Relative paths are resolved against the manifest's directory by
//! [`DeckSpec::load`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assets::AssetSpec;
use crate::compose::{OverflowPolicy, Payload};
use crate::ooxml::pptx::SlideLayout;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    Yaml(String),

    /// Parsed but unusable (no pages, bad table, bad asset)
    #[error("invalid manifest: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ManifestError>;

/// One page: a template and what to inject into its first placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub template: PathBuf,
    #[serde(default, skip_serializing_if = "Payload::is_none")]
    pub payload: Payload,
}

impl PageSpec {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            payload: Payload::None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }
}

/// A complete deck description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Defaults to now when building
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub layout: SlideLayout,
    #[serde(default)]
    pub overflow: OverflowPolicy,
    pub output: PathBuf,
    /// Generated before any page is rendered
    #[serde(default)]
    pub assets: Vec<AssetSpec>,
    pub pages: Vec<PageSpec>,
}

impl DeckSpec {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            title: None,
            author: None,
            created: None,
            layout: SlideLayout::default(),
            overflow: OverflowPolicy::default(),
            output: output.into(),
            assets: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Parse a manifest. Paths are kept as written.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let spec: DeckSpec =
            serde_saphyr::from_str(source).map_err(|e| ManifestError::Yaml(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read and parse a manifest file, resolving relative paths against its
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut spec = Self::from_yaml(&source)?;
        if let Some(base) = path.parent() {
            spec.resolve_paths(base);
        }
        log::debug!(
            "loaded manifest {} ({} pages, {} assets)",
            path.display(),
            spec.pages.len(),
            spec.assets.len()
        );
        Ok(spec)
    }

    /// Prefix every relative path with `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.output);
        for asset in &mut self.assets {
            resolve(&mut asset.output_path);
        }
        for page in &mut self.pages {
            resolve(&mut page.template);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(ManifestError::Invalid("deck has no pages".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ManifestError::Invalid("output path is empty".to_string()));
        }
        for (i, asset) in self.assets.iter().enumerate() {
            asset.validate().map_err(|e| {
                ManifestError::Invalid(format!("asset {} ({}): {}", i + 1, asset.output_path.display(), e))
            })?;
        }
        for (i, page) in self.pages.iter().enumerate() {
            page.payload
                .validate()
                .map_err(|e| ManifestError::Invalid(format!("page {}: {}", i + 1, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r##"
title: Review
author: Team
layout: 4x3
overflow: reject
output: out/review.pptx
assets:
  - output_path: img/bg.png
    width: 200
    height: 100
    kind: gradient
    stops:
      - { offset: 0.0, color: "#667eea" }
      - { offset: 1.0, color: "#764ba2" }
pages:
  - template: cover.html
  - template: table.html
    payload:
      type: table
      column_ratios: [0.35, 0.4, 0.25]
      rows:
        - [a, b, c]
        - [d, { text: e, bold: true }, f]
  - template: steps.html
    payload:
      type: steps
      steps:
        - { text: Plan, color: "#667eea" }
        - { text: "↓", color: "#f093fb", is_separator: true }
        - { text: Ship, color: "#00d4aa" }
"##;

    #[test]
    fn test_parse_manifest() {
        let spec = DeckSpec::from_yaml(MANIFEST).unwrap();
        assert_eq!(spec.title.as_deref(), Some("Review"));
        assert_eq!(spec.layout, SlideLayout::Standard4x3);
        assert_eq!(spec.overflow, OverflowPolicy::Reject);
        assert_eq!(spec.assets.len(), 1);
        assert_eq!(spec.pages.len(), 3);
        assert!(spec.pages[0].payload.is_none());
        assert!(matches!(spec.pages[1].payload, Payload::Table(_)));
        match &spec.pages[2].payload {
            Payload::Steps(steps) => {
                assert_eq!(steps.steps.len(), 3);
                assert!(steps.steps[1].is_separator);
            },
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let spec = DeckSpec::from_yaml("output: a.pptx\npages:\n  - template: a.html\n").unwrap();
        assert_eq!(spec.layout, SlideLayout::Widescreen16x9);
        assert_eq!(spec.overflow, OverflowPolicy::Warn);
        assert!(spec.assets.is_empty());
        assert!(spec.created.is_none());
    }

    #[test]
    fn test_rejects_empty_and_bad_tables() {
        assert!(matches!(
            DeckSpec::from_yaml("output: a.pptx\npages: []\n"),
            Err(ManifestError::Invalid(_))
        ));

        let ragged = "output: a.pptx\npages:\n  - template: a.html\n    payload:\n      type: table\n      column_ratios: [0.5, 0.5]\n      rows:\n        - [a, b]\n        - [c]\n";
        let err = DeckSpec::from_yaml(ragged).unwrap_err();
        assert!(err.to_string().contains("page 1"));

        let named = "output: a.pptx\npages:\n  - template: a.html\n    payload:\n      type: steps\n      steps:\n        - { text: Plan, color: red }\n";
        let err = DeckSpec::from_yaml(named).unwrap_err();
        assert!(err.to_string().contains("page 1"));
        assert!(err.to_string().contains("\"red\""));

        assert!(matches!(
            DeckSpec::from_yaml("pages: [oops"),
            Err(ManifestError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.yaml");
        std::fs::write(&path, MANIFEST).unwrap();

        let spec = DeckSpec::load(&path).unwrap();
        assert_eq!(spec.output, dir.path().join("out/review.pptx"));
        assert_eq!(spec.assets[0].output_path, dir.path().join("img/bg.png"));
        assert_eq!(spec.pages[2].template, dir.path().join("steps.html"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DeckSpec::load(dir.path().join("nope.yaml")),
            Err(ManifestError::Io { .. })
        ));
    }
}
