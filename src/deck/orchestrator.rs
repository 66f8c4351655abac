//! Page sequencing and output.

use chrono::Utc;
use std::fmt;
use std::path::{Path, PathBuf};

use super::manifest::DeckSpec;
use crate::assets::{AssetSpec, GeneratedAsset, Rasterizer};
use crate::common::error::{Error, Result};
use crate::compose::{Composer, CompositionReport, Payload};
use crate::ooxml::pptx::MutablePresentation;
use crate::render::{MarkupRenderer, RenderedPage, TemplateRenderer};

/// Where a [`DeckBuilder`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    AssetsReady,
    /// Page `n` (zero-based) rendered, not yet composed
    Rendered(usize),
    /// Page `n` composed
    Composed(usize),
    Finalized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Init => write!(f, "init"),
            Phase::AssetsReady => write!(f, "assets ready"),
            Phase::Rendered(i) => write!(f, "page {} rendered", i + 1),
            Phase::Composed(i) => write!(f, "page {} composed", i + 1),
            Phase::Finalized => write!(f, "finalized"),
        }
    }
}

/// Drives one presentation through `Init -> AssetsReady -> (Render ->
/// [Compose]) x N -> Finalize`, rejecting out-of-order calls.
pub struct DeckBuilder<'r> {
    pres: MutablePresentation,
    renderer: &'r dyn TemplateRenderer,
    composer: Composer,
    phase: Phase,
    current: Option<RenderedPage>,
}

impl<'r> DeckBuilder<'r> {
    pub fn new(pres: MutablePresentation, renderer: &'r dyn TemplateRenderer, composer: Composer) -> Self {
        Self {
            pres,
            renderer,
            composer,
            phase: Phase::Init,
            current: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn presentation(&self) -> &MutablePresentation {
        &self.pres
    }

    fn invalid(&self, action: &str) -> Error {
        Error::InvalidState(format!("cannot {} in phase '{}'", action, self.phase))
    }

    /// Mark assets as flushed to disk. Must precede the first page.
    pub fn assets_ready(&mut self) -> Result<()> {
        if self.phase != Phase::Init {
            return Err(self.invalid("mark assets ready"));
        }
        self.phase = Phase::AssetsReady;
        Ok(())
    }

    /// Render the next page from `template`.
    pub fn render_page(&mut self, template: &Path) -> Result<&RenderedPage> {
        if matches!(self.phase, Phase::Init | Phase::Finalized) {
            return Err(self.invalid("render a page"));
        }
        let before = self.pres.slide_count();
        let page = self.renderer.render(template, &mut self.pres)?;
        if self.pres.slide_count() != before + 1 || page.slide_index != before {
            return Err(Error::InvalidState(format!(
                "renderer for {} must append exactly one slide",
                template.display()
            )));
        }
        self.phase = Phase::Rendered(page.slide_index);
        Ok(self.current.insert(page))
    }

    /// Compose `payload` onto the page just rendered. At most once per page.
    pub fn compose_page(&mut self, payload: &Payload) -> Result<CompositionReport> {
        let Phase::Rendered(index) = self.phase else {
            return Err(self.invalid("compose"));
        };
        let page = self.current.take().ok_or_else(|| self.invalid("compose"))?;
        let report = self.composer.compose(&mut self.pres, &page, payload)?;
        self.phase = Phase::Composed(index);
        Ok(report)
    }

    /// Serialize the presentation and write it to `output`.
    ///
    /// The bytes go to a sibling temporary file that is renamed into place,
    /// so `output` either holds the whole deck or is left untouched.
    pub async fn finalize(&mut self, output: &Path) -> Result<u64> {
        if !matches!(self.phase, Phase::Rendered(_) | Phase::Composed(_)) {
            return Err(self.invalid("finalize"));
        }
        let bytes = self.pres.to_bytes()?;
        write_atomically(output, &bytes).await?;
        self.phase = Phase::Finalized;
        Ok(bytes.len() as u64)
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck.pptx".to_string());
    output.with_file_name(format!(".{}.partial", name))
}

async fn write_atomically(output: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let partial = partial_path(output);
    let written = async {
        tokio::fs::write(&partial, bytes).await?;
        tokio::fs::rename(&partial, output).await
    }
    .await;
    if let Err(err) = written {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(err.into());
    }
    Ok(())
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: PathBuf,
    pub slides: usize,
    pub bytes: u64,
    pub assets: Vec<GeneratedAsset>,
    /// One entry per page, in page order
    pub pages: Vec<CompositionReport>,
}

/// Builds decks from [`DeckSpec`]s.
///
/// # Example
///
/// ```rust,no_run
/// use slidesmith::deck::{Deck, DeckSpec};
///
/// # async fn run() -> slidesmith::Result<()> {
/// let spec = DeckSpec::load("deck.yaml")?;
/// let report = Deck::new().build(&spec).await?;
/// println!("{} slides written to {}", report.slides, report.output.display());
/// # Ok(())
/// # }
/// ```
pub struct Deck {
    renderer: Box<dyn TemplateRenderer>,
    rasterizer: Rasterizer,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// XHTML renderer and the shared rasterizer.
    pub fn new() -> Self {
        Self {
            renderer: Box::new(MarkupRenderer::new()),
            rasterizer: Rasterizer::shared().clone(),
        }
    }

    pub fn with_renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_rasterizer(mut self, rasterizer: Rasterizer) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    /// Generate assets on the blocking pool. Every file is on disk when this
    /// returns.
    pub async fn generate_assets(&self, specs: &[AssetSpec]) -> Result<Vec<GeneratedAsset>> {
        if specs.is_empty() {
            return Ok(Vec::new());
        }
        let rasterizer = self.rasterizer.clone();
        let specs = specs.to_vec();
        let generated = tokio::task::spawn_blocking(move || rasterizer.generate_all(&specs)).await??;
        Ok(generated)
    }

    /// Generate assets, render and compose every page in order, then write
    /// the output. Any failure aborts the build before the output exists.
    pub async fn build(&self, spec: &DeckSpec) -> Result<BuildReport> {
        spec.validate()?;
        log::info!(
            "building {} ({} pages, {} assets)",
            spec.output.display(),
            spec.pages.len(),
            spec.assets.len()
        );

        let mut pres = MutablePresentation::with_layout(spec.layout);
        if let Some(title) = &spec.title {
            pres.set_title(title);
        }
        if let Some(author) = &spec.author {
            pres.set_author(author);
        }
        pres.set_created(spec.created.unwrap_or_else(Utc::now));

        let mut builder = DeckBuilder::new(pres, self.renderer.as_ref(), Composer::new(spec.overflow));
        let assets = self.generate_assets(&spec.assets).await?;
        builder.assets_ready()?;

        let mut pages = Vec::with_capacity(spec.pages.len());
        for (index, page) in spec.pages.iter().enumerate() {
            log::debug!("page {}: {}", index + 1, page.template.display());
            builder.render_page(&page.template)?;
            pages.push(builder.compose_page(&page.payload)?);
            tokio::task::yield_now().await;
        }

        let bytes = builder.finalize(&spec.output).await?;
        let slides = builder.presentation().slide_count();
        log::info!(
            "wrote {} ({} slides, {} bytes)",
            spec.output.display(),
            slides,
            bytes
        );
        Ok(BuildReport {
            output: spec.output.clone(),
            slides,
            bytes,
            assets,
            pages,
        })
    }
}
