//! Headless morph run
//!
//! Steps a scene at 60 Hz with no window: scattered for two seconds, then
//! formed into the tree for four. Photos are read from a directory given as
//! the first argument (default `.`); missing files end on the placeholder.
//!
//! ```text
//! RUST_LOG=debug cargo run --example headless_morph -- ./assets
//! ```

use anyhow::Result;
use arbor_engine::{
    attach_photo_drawable, create_scene, load_config, log_scene_context, scene_stats, tick,
    DrawableId, FileFetcher, FrameContext, ImageFetcher, ParticleKind, PhotoId, RenderSink,
    SceneConfig, SceneInputs, TargetMode,
};
use futures::executor::LocalPool;
use glam::Vec3;
use image::DynamicImage;
use std::sync::Arc;
use std::time::Duration;

const FRAME_TIME: f32 = 1.0 / 60.0;

/// Sink that only counts and logs what it receives
#[derive(Default)]
struct LoggingSink {
    transforms: usize,
    images: usize,
    placeholders: usize,
}

impl RenderSink for LoggingSink {
    fn set_world_transform(&mut self, _drawable: DrawableId, _position: Vec3, _rotation_y: f32) {
        self.transforms += 1;
    }

    fn set_particle_positions(&mut self, _kind: ParticleKind, _positions: &[Vec3], _offset: Vec3) {}

    fn bind_image(&mut self, drawable: DrawableId, image: &DynamicImage) {
        self.images += 1;
        log::info!(
            "[Demo] drawable {} bound {}x{} image",
            drawable.0,
            image.width(),
            image.height()
        );
    }

    fn bind_placeholder(&mut self, drawable: DrawableId, _color: [f32; 4]) {
        self.placeholders += 1;
        log::info!("[Demo] drawable {} bound placeholder", drawable.0);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let root = args.next().unwrap_or_else(|| ".".to_string());
    let config = match args.next() {
        Some(path) => load_config(path)?,
        None => SceneConfig::default(),
    };

    let mut scene = create_scene(config)?;
    let ids: Vec<PhotoId> = scene.field.photos.iter().map(|p| p.id.clone()).collect();
    for (i, id) in ids.iter().enumerate() {
        attach_photo_drawable(&mut scene, id, DrawableId(i as u64))?;
    }

    let fetcher: Arc<dyn ImageFetcher> = Arc::new(FileFetcher::new(root)?);
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let mut sink = LoggingSink::default();
    let mut inputs = SceneInputs::default();

    for frame in 0..360 {
        if frame == 120 {
            inputs.target_mode = TargetMode::Formed;
            log::info!("[Demo] forming tree");
        }

        let mut context = FrameContext {
            sink: &mut sink,
            projector: None,
            fetcher: &fetcher,
            spawner: &spawner,
        };
        tick(&mut scene, &inputs, FRAME_TIME, &mut context);
        pool.run_until_stalled();
        // pace like a real frame loop so pool reads land mid-run
        std::thread::sleep(Duration::from_secs_f32(FRAME_TIME));

        if frame % 60 == 0 {
            log_scene_context(&scene);
        }
    }

    let stats = scene_stats(&scene);
    println!(
        "frames={} progress={:.3} local={} fallback={} failed={}",
        stats.frame_number, stats.progress, stats.local, stats.fallback, stats.failed
    );
    println!(
        "transforms={} images={} placeholders={}",
        sink.transforms, sink.images, sink.placeholders
    );
    Ok(())
}
