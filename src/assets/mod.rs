//! Asset generation: flowchart and gradient bitmaps.
//!
//! Each [`AssetSpec`] describes one PNG file. Its SVG markup is built
//! deterministically from its fields and rasterized with resvg, so the same
//! spec always yields byte-identical output. Templates reference the files by
//! path; nothing checks that a referenced asset was generated.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidesmith::assets::{self, AssetSpec};
//!
//! let specs = AssetSpec::builtin("slides");
//! let generated = assets::generate_all(&specs)?;
//! assert_eq!(generated.len(), 3);
//! # Ok::<(), slidesmith::assets::AssetError>(())
//! ```

pub mod error;
pub mod flowchart;
pub mod gradient;
pub mod raster;
pub mod svg;

pub use error::{AssetError, Result};
pub use flowchart::{FlowchartLayout, FlowchartSpec};
pub use gradient::{GradientDirection, GradientSpec, GradientStop};
pub use raster::Rasterizer;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What an asset draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssetKind {
    Flowchart(FlowchartSpec),
    Gradient(GradientSpec),
}

/// One PNG file to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSpec {
    pub output_path: PathBuf,
    /// Canvas width in SVG pixels
    pub width: f64,
    /// Canvas height in SVG pixels
    pub height: f64,
    #[serde(flatten)]
    pub kind: AssetKind,
}

impl AssetSpec {
    /// Flowchart asset sized by its layout.
    pub fn flowchart(output_path: impl Into<PathBuf>, spec: FlowchartSpec) -> Self {
        Self {
            output_path: output_path.into(),
            width: spec.layout.width,
            height: spec.layout.height,
            kind: AssetKind::Flowchart(spec),
        }
    }

    pub fn gradient(output_path: impl Into<PathBuf>, width: f64, height: f64, spec: GradientSpec) -> Self {
        Self {
            output_path: output_path.into(),
            width,
            height,
            kind: AssetKind::Gradient(spec),
        }
    }

    /// Cover and sidebar gradients plus the process flowchart, written into `dir`.
    pub fn builtin(dir: impl AsRef<Path>) -> Vec<AssetSpec> {
        let dir = dir.as_ref();
        vec![
            Self::gradient(dir.join("gradient-cover.png"), 1000.0, 562.5, GradientSpec::cover()),
            Self::gradient(dir.join("gradient-sidebar.png"), 200.0, 562.5, GradientSpec::sidebar()),
            Self::flowchart(dir.join("flowchart.png"), FlowchartSpec::default_process()),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        Rasterizer::pixmap_size(self.width, self.height)?;
        match &self.kind {
            AssetKind::Gradient(gradient) => gradient.validate(),
            AssetKind::Flowchart(_) => Ok(()),
        }
    }

    /// SVG markup for this asset.
    pub fn svg(&self) -> String {
        match &self.kind {
            AssetKind::Flowchart(flowchart) => flowchart.svg(self.width, self.height),
            AssetKind::Gradient(gradient) => gradient.svg(self.width, self.height),
        }
    }
}

/// A PNG written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
}

impl Rasterizer {
    /// Build, rasterize and write one asset, creating its directory if needed.
    pub fn generate(&self, spec: &AssetSpec) -> Result<GeneratedAsset> {
        spec.validate()?;
        let svg = spec.svg();
        log::debug!(
            "rasterizing {} ({} bytes of SVG)",
            spec.output_path.display(),
            svg.len()
        );
        let png = self.render_png(&svg, spec.width, spec.height)?;

        if let Some(parent) = spec.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| AssetError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&spec.output_path, &png).map_err(|source| AssetError::Io {
            path: spec.output_path.clone(),
            source,
        })?;

        let (width, height) = Rasterizer::pixmap_size(spec.width, spec.height)?;
        log::info!(
            "generated {} ({}x{}, {} bytes)",
            spec.output_path.display(),
            width,
            height,
            png.len()
        );
        Ok(GeneratedAsset {
            path: spec.output_path.clone(),
            width,
            height,
            byte_len: png.len(),
        })
    }

    /// Generate a batch in parallel. Results keep the input order; any
    /// failure fails the whole batch.
    pub fn generate_all(&self, specs: &[AssetSpec]) -> Result<Vec<GeneratedAsset>> {
        specs.par_iter().map(|spec| self.generate(spec)).collect()
    }
}

/// Generate one asset with the shared rasterizer.
pub fn generate(spec: &AssetSpec) -> Result<GeneratedAsset> {
    Rasterizer::shared().generate(spec)
}

/// Generate a batch of assets in parallel with the shared rasterizer.
pub fn generate_all(specs: &[AssetSpec]) -> Result<Vec<GeneratedAsset>> {
    Rasterizer::shared().generate_all(specs)
}
