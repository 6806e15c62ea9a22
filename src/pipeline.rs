//! The render pipeline: resolve, compose, publish.
//!
//! One pass per parameter change. Background and icon resolution run
//! concurrently; the compositor waits for both to settle, paints a private
//! surface, and the pass then offers it to the shared preview. The preview
//! accepts a surface only when no later-started pass has already published,
//! so stale in-flight passes can finish harmlessly and readers always see a
//! fully painted, most-recent card.

use crate::export::{export, suggested_filename, CardExport, ExportFormat};
use crate::rendering::{compose, ResolvedAssets, Surface};
use crate::resolver::{ImageResolver, ResolverConfig};
use crate::{Error, RenderParams, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct PreviewSlot {
    generation: u64,
    surface: Option<Surface>,
}

/// Shared handle to the most recently published surface.
///
/// Cloning the handle shares the slot. Readers never observe a partially
/// painted surface: passes paint privately and swap in a finished surface
/// under the lock.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    slot: Arc<Mutex<PreviewSlot>>,
}

impl Preview {
    /// Install `surface` as the visible card if `generation` is not older
    /// than the currently published pass. Returns whether it was accepted.
    fn publish(&self, generation: u64, surface: Surface) -> bool {
        if let Ok(mut slot) = self.slot.lock() {
            if generation >= slot.generation {
                slot.generation = generation;
                slot.surface = Some(surface);
                return true;
            }
        }
        false
    }

    /// The most recently published surface, if any pass has completed.
    pub fn current(&self) -> Option<Surface> {
        self.slot.lock().ok().and_then(|slot| slot.surface.clone())
    }
}

/// Drives resolve-then-compose passes and owns the shared preview.
#[derive(Debug)]
pub struct RenderPipeline {
    resolver: ImageResolver,
    preview: Preview,
    next_generation: AtomicU64,
}

impl RenderPipeline {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        Ok(Self::with_resolver(ImageResolver::new(config)?))
    }

    pub fn with_resolver(resolver: ImageResolver) -> Self {
        Self {
            resolver,
            preview: Preview::default(),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Handle to the shared preview, for display-side readers.
    pub fn preview(&self) -> Preview {
        self.preview.clone()
    }

    /// Run one full pipeline pass for `params`.
    ///
    /// Resolution failures are isolated per layer and never abort the pass;
    /// only invalid parameters error out. The returned surface is this
    /// pass's own; the shared preview gets it too unless a later-started
    /// pass already published (last-write-wins).
    pub async fn render(&self, params: &RenderParams) -> Result<Surface> {
        params.validate()?;
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("render pass {} ({}x{})", generation, params.canvas.width, params.canvas.height);

        let icon_source = params.icon.enabled.then(|| &params.icon.source);
        let (background, icon) = futures::join!(
            self.resolver.resolve_layer("background", &params.background),
            async {
                match icon_source {
                    Some(source) => self.resolver.resolve_layer("icon", source).await,
                    None => None,
                }
            }
        );

        let assets = ResolvedAssets { background, icon };
        let surface = compose(params, &assets);

        if !self.preview.publish(generation, surface.clone()) {
            log::debug!("render pass {} superseded before publish", generation);
        }
        Ok(surface)
    }

    /// Encode the currently published surface.
    ///
    /// Errors with [`Error::Export`] when no pass has completed yet; the
    /// caller should render and retry.
    pub fn export_current(&self, format: ExportFormat, title: &str) -> Result<CardExport> {
        let surface = self
            .preview
            .current()
            .ok_or_else(|| Error::Export("no rendered surface; render a card first".to_string()))?;
        Ok(CardExport {
            filename: suggested_filename(title, format),
            bytes: export(&surface, format)?,
        })
    }
}
