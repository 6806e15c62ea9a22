//! Batch front-end for the card renderer.
//!
//! Plays the role of the parameter-editing UI: builds a `RenderParams`
//! from flags (or a JSON params file), runs one pipeline pass, and writes
//! the exported bytes to disk.

use anyhow::{bail, Context};
use cardforge::{
    catalog, resolver, CanvasSize, ExportFormat, IconPosition, ImageSource, PackageManager,
    RenderParams, RenderPipeline,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cardforge", version, about = "Render social cards for open source packages")]
struct Cli {
    /// Package name drawn as the title
    #[arg(long)]
    title: Option<String>,

    /// Short description drawn under the title
    #[arg(long)]
    subtitle: Option<String>,

    /// Package manager for the install command (npm, yarn, pnpm, composer, pip, gem, ...)
    #[arg(long)]
    manager: Option<String>,

    /// Canvas width in pixels [200..2000]
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels [200..2000]
    #[arg(long)]
    height: Option<u32>,

    /// Title font size in pixels [40..200]
    #[arg(long)]
    font_size: Option<u32>,

    /// Background image: a predefined pattern name, an URL, or a local file
    #[arg(long)]
    background: Option<String>,

    /// Background image opacity [0..1]
    #[arg(long)]
    background_opacity: Option<f32>,

    /// Icon image: a predefined icon name, an URL, or a local file
    #[arg(long)]
    icon: Option<String>,

    /// Hide the icon layer
    #[arg(long)]
    no_icon: bool,

    /// Icon size in pixels [50..200]
    #[arg(long)]
    icon_size: Option<u32>,

    /// Icon position (top-center, top-left, top-right, bottom-center,
    /// bottom-left, bottom-right, center)
    #[arg(long)]
    icon_position: Option<String>,

    /// Text color (hex or rgba())
    #[arg(long)]
    text_color: Option<String>,

    /// Canvas background color
    #[arg(long)]
    background_color: Option<String>,

    /// Install-bar fill color
    #[arg(long)]
    bar_color: Option<String>,

    /// Export format: png or jpeg
    #[arg(long)]
    format: Option<String>,

    /// Load a full RenderParams JSON file; flags override its fields
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output file; defaults to the suggested filename in the current dir
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Turn a CLI image argument into a source descriptor: a catalog name wins,
/// then an absolute URL, then a local file read into a data URI.
fn image_source(
    arg: &str,
    entries: &[catalog::CatalogEntry],
) -> anyhow::Result<ImageSource> {
    if let Some(entry) = catalog::find(entries, arg) {
        return Ok(ImageSource::predefined(entry.url));
    }
    if arg.starts_with("http://") || arg.starts_with("https://") || arg.starts_with("data:") {
        return Ok(ImageSource::url(arg));
    }
    let uri = resolver::read_upload(arg)?;
    Ok(ImageSource::upload(uri))
}

fn parse_position(s: &str) -> anyhow::Result<IconPosition> {
    Ok(match s {
        "top-center" => IconPosition::TopCenter,
        "top-left" => IconPosition::TopLeft,
        "top-right" => IconPosition::TopRight,
        "bottom-center" => IconPosition::BottomCenter,
        "bottom-left" => IconPosition::BottomLeft,
        "bottom-right" => IconPosition::BottomRight,
        "center" => IconPosition::Center,
        other => bail!("unknown icon position {:?}", other),
    })
}

fn build_params(cli: &Cli) -> anyhow::Result<RenderParams> {
    let mut params = match &cli.params {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading params file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing params file {}", path.display()))?
        }
        None => RenderParams::default(),
    };

    if let Some(title) = &cli.title {
        params.title = title.clone();
    }
    if let Some(subtitle) = &cli.subtitle {
        params.subtitle = subtitle.clone();
    }
    if let Some(manager) = &cli.manager {
        params.manager = PackageManager::from_id(manager);
    }
    if let Some(width) = cli.width {
        params.canvas = CanvasSize {
            width,
            ..params.canvas
        };
    }
    if let Some(height) = cli.height {
        params.canvas = CanvasSize {
            height,
            ..params.canvas
        };
    }
    if let Some(size) = cli.font_size {
        params.font_size_px = size;
    }
    if let Some(bg) = &cli.background {
        params.background = image_source(bg, catalog::BACKGROUNDS)?;
    }
    if let Some(opacity) = cli.background_opacity {
        params.background_opacity = opacity;
    }
    if cli.no_icon {
        params.icon.enabled = false;
    }
    if let Some(icon) = &cli.icon {
        params.icon.source = image_source(icon, catalog::ICONS)?;
    }
    if let Some(size) = cli.icon_size {
        params.icon.size_px = size;
    }
    if let Some(pos) = &cli.icon_position {
        params.icon.position = parse_position(pos)?;
    }
    if let Some(color) = &cli.text_color {
        params.colors.text = color.parse()?;
    }
    if let Some(color) = &cli.background_color {
        params.colors.background = color.parse()?;
    }
    if let Some(color) = &cli.bar_color {
        params.colors.install_bar = color.parse()?;
    }
    if let Some(format) = &cli.format {
        params.format = format.parse::<ExportFormat>()?;
    }

    Ok(params)
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = build_params(&cli)?;
    let pipeline = RenderPipeline::new(Default::default())?;
    pipeline.render(&params).await?;

    let export = pipeline.export_current(params.format, &params.title)?;
    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&export.filename));
    std::fs::write(&path, &export.bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {} ({} bytes)", path.display(), export.bytes.len());
    Ok(())
}
