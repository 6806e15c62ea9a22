//! Asynchronous image source resolution.
//!
//! A source descriptor names where a layer's bytes come from: a predefined
//! catalog entry, a remote URL, or an uploaded file already materialized as
//! a `data:` URI. The resolver turns a descriptor into a decoded raster, or
//! into "no image" when the descriptor is empty, and isolates per-layer
//! failures so a dead URL never takes the rest of the card with it.

use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Which kind of address a descriptor's value holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// An entry from the built-in catalogs (value is its URL)
    Predefined,
    /// A user-supplied remote URL
    Url,
    /// A locally materialized `data:` URI from the upload collaborator
    Upload,
}

/// A `{kind, value}` pair identifying where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub kind: SourceKind,
    pub value: String,
}

impl ImageSource {
    pub fn predefined(value: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Predefined,
            value: value.into(),
        }
    }

    pub fn url(value: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Url,
            value: value.into(),
        }
    }

    pub fn upload(value: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Upload,
            value: value.into(),
        }
    }

    /// An empty value resolves to "no image", which is not a failure.
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Configuration for the resolver's HTTP client.
///
/// The defaults keep fetches bounded: no policy mandates a timeout, but an
/// unbounded network wait would stall the whole render pass.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// User agent string sent with asset requests
    pub user_agent: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("cardforge/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: 30000,
        }
    }
}

/// Resolves source descriptors to decoded rasters.
///
/// Stateless beyond the shared HTTP client; concurrent resolutions are
/// independent and may run in parallel.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    client: reqwest::Client,
}

impl ImageResolver {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| Error::Load(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Resolve a descriptor to a decoded raster.
    ///
    /// Returns `Ok(None)` for an empty descriptor ("no image", distinct
    /// from failure). `data:` URIs are decoded locally regardless of kind;
    /// anything else is fetched over HTTP with the configured timeout.
    pub async fn resolve(&self, source: &ImageSource) -> Result<Option<DynamicImage>> {
        if source.is_empty() {
            return Ok(None);
        }
        let value = source.value.trim();

        if value.starts_with("data:") {
            return decode_data_uri(value).map(Some);
        }

        let parsed = url::Url::parse(value)
            .map_err(|e| Error::Load(format!("Invalid image URL {:?}: {}", value, e)))?;
        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| Error::Load(format!("Failed to fetch {}: {}", value, e)))?;
        if !resp.status().is_success() {
            return Err(Error::Load(format!(
                "Failed to fetch {}: HTTP {}",
                value,
                resp.status()
            )));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Load(format!("Failed to read body of {}: {}", value, e)))?;
        decode_bytes(&bytes, value).map(Some)
    }

    /// Resolve one layer with failure isolation: errors are logged with the
    /// layer name and descriptor, then degraded to "no image" so the rest
    /// of the render proceeds.
    pub async fn resolve_layer(&self, layer: &str, source: &ImageSource) -> Option<DynamicImage> {
        match self.resolve(source).await {
            Ok(img) => img,
            Err(e) => {
                log::warn!(
                    "{} image skipped ({:?} source {:?}): {}",
                    layer,
                    source.kind,
                    truncate(&source.value, 120),
                    e
                );
                None
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn decode_bytes(bytes: &[u8], origin: &str) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| Error::Load(format!("Failed to decode {}: {}", origin, e)))
}

fn decode_data_uri(uri: &str) -> Result<DynamicImage> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| Error::Load("Malformed data URI: missing payload".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(Error::Load(format!(
            "Unsupported data URI encoding: {:?}",
            header
        )));
    }
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| Error::Load(format!("Invalid base64 in data URI: {}", e)))?;
    decode_bytes(&bytes, "data URI")
}

/// File-upload collaborator: read a local file into a `data:` URI that an
/// `upload`-kind descriptor can carry.
pub fn read_upload(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| Error::Read(format!("{}: {}", path.display(), e)))?;
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    };
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn resolver() -> ImageResolver {
        ImageResolver::new(ResolverConfig::default()).expect("client")
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([1, 2, 3, 255]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageOutputFormat::Png)
            .expect("encode");
        buf.into_inner()
    }

    #[tokio::test]
    async fn empty_descriptor_resolves_to_no_image() {
        let r = resolver();
        let resolved = r.resolve(&ImageSource::url("")).await.unwrap();
        assert!(resolved.is_none());
        let resolved = r.resolve(&ImageSource::upload("   ")).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn data_uri_round_trips() {
        let uri = format!("data:image/png;base64,{}", BASE64.encode(tiny_png()));
        let r = resolver();
        let img = r
            .resolve(&ImageSource::upload(uri))
            .await
            .unwrap()
            .expect("decoded image");
        assert_eq!((img.width(), img.height()), (2, 2));
    }

    #[tokio::test]
    async fn corrupt_data_uri_is_a_load_error() {
        let r = resolver();
        let err = r
            .resolve(&ImageSource::upload("data:image/png;base64,!!!"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }

    #[tokio::test]
    async fn invalid_url_is_a_load_error() {
        let r = resolver();
        let err = r
            .resolve(&ImageSource::url("not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }

    #[tokio::test]
    async fn resolve_layer_degrades_failures_to_none() {
        let r = resolver();
        let resolved = r
            .resolve_layer("background", &ImageSource::url("data:image/png;base64,%%"))
            .await;
        assert!(resolved.is_none());
    }

    #[test]
    fn read_upload_missing_file_is_a_read_error() {
        let err = read_upload("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }

    #[test]
    fn read_upload_produces_a_decodable_data_uri() {
        let dir = std::env::temp_dir().join("cardforge-upload-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let uri = read_upload(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        decode_data_uri(&uri).expect("decodes back");
    }
}
