//! Re-render race: the preview must reflect the most recently started pass.

use cardforge::{ImageSource, RenderParams, RenderPipeline, Surface};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Response, Server};

/// Serve a PNG after a fixed delay, so an in-flight pass can be overtaken.
fn start_slow_png_server(delay: Duration) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            std::thread::sleep(delay);
            let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
                4,
                4,
                image::Rgba([200, 40, 40, 255]),
            ));
            let mut buf = Cursor::new(Vec::new());
            img.write_to(&mut buf, image::ImageOutputFormat::Png).unwrap();
            let _ = request.respond(Response::from_data(buf.into_inner()));
        }
    });
    format!("http://{}", addr)
}

fn digest(surface: &Surface) -> String {
    hex::encode(Sha256::digest(surface.pixels().as_raw()))
}

#[tokio::test(flavor = "multi_thread")]
async fn later_started_pass_wins_the_preview() {
    let base = start_slow_png_server(Duration::from_millis(800));

    let mut slow_params = RenderParams::default();
    slow_params.title = "first-package".to_string();
    slow_params.background = ImageSource::url(format!("{}/bg.png", base));
    slow_params.icon.source.value.clear();

    let mut fast_params = RenderParams::default();
    fast_params.title = "second-package".to_string();
    fast_params.background.value.clear();
    fast_params.icon.source.value.clear();

    let pipeline = Arc::new(RenderPipeline::new(Default::default()).unwrap());

    // Pass A starts first and stalls on its background fetch
    let slow = {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move { pipeline.render(&slow_params).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Pass B starts later and completes immediately
    let fast_surface = pipeline.render(&fast_params).await.unwrap();
    let slow_surface = slow.await.unwrap().unwrap();

    // Both passes completed, but only the later-started one is visible —
    // never a mix of the two parameter sets
    let published = pipeline.preview().current().expect("published surface");
    assert_eq!(digest(&published), digest(&fast_surface));
    assert_ne!(digest(&published), digest(&slow_surface));
}

#[tokio::test(flavor = "multi_thread")]
async fn sequential_passes_publish_in_order() {
    let mut first = RenderParams::default();
    first.title = "one".to_string();
    first.background.value.clear();
    first.icon.source.value.clear();

    let mut second = first.clone();
    second.title = "two".to_string();

    let pipeline = RenderPipeline::new(Default::default()).unwrap();
    pipeline.render(&first).await.unwrap();
    let latest = pipeline.render(&second).await.unwrap();

    let published = pipeline.preview().current().unwrap();
    assert_eq!(digest(&published), digest(&latest));
}
