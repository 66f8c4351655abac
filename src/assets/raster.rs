//! SVG rasterization via resvg.

use once_cell::sync::Lazy;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::sync::Arc;

use super::error::{AssetError, Result};

static SHARED: Lazy<Rasterizer> = Lazy::new(Rasterizer::with_system_fonts);

/// Renders SVG markup to PNG bytes.
///
/// The font database is loaded once and shared by every render; building it
/// scans the system font directories.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl Rasterizer {
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("loaded {} font faces", db.len());
        Self { fontdb: Arc::new(db) }
    }

    /// Rasterizer with an explicit font database.
    pub fn with_fonts(db: fontdb::Database) -> Self {
        Self { fontdb: Arc::new(db) }
    }

    /// Process-wide instance used by [`generate`](super::generate).
    pub fn shared() -> &'static Rasterizer {
        &SHARED
    }

    /// Pixel size of the canvas: the declared size rounded up.
    pub fn pixmap_size(width: f64, height: f64) -> Result<(u32, u32)> {
        let valid = |v: f64| v.is_finite() && v > 0.0 && v <= u32::MAX as f64;
        if !valid(width) || !valid(height) {
            return Err(AssetError::InvalidSpec(format!(
                "canvas size {}x{} is not positive",
                width, height
            )));
        }
        Ok((width.ceil() as u32, height.ceil() as u32))
    }

    /// Render `svg` onto a `width` x `height` canvas and encode it as PNG.
    pub fn render_png(&self, svg: &str, width: f64, height: f64) -> Result<Vec<u8>> {
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        opt.font_family = "Arial".to_string();

        let tree = usvg::Tree::from_str(svg, &opt)?;

        let (px_width, px_height) = Self::pixmap_size(width, height)?;
        let mut pixmap = Pixmap::new(px_width, px_height).ok_or(AssetError::PixmapAllocation {
            width: px_width,
            height: px_height,
        })?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| AssetError::Encode(e.to_string()))
    }
}
