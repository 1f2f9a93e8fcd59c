//! Imagery Operations
//!
//! Reveal gating, fetch scheduling and completion bookkeeping. Fetch tasks
//! run on whatever executor the host hands in and never touch scene state:
//! they send a `FetchEvent` and the tick applies it to the one photo it
//! names. If the scene is gone by then the send fails and the result is
//! dropped.

use super::fetcher::ImageFetcher;
use super::imagery_data::{
    FetchError, FetchEvent, ImageSource, ImageryConfig, ImageryData, ImageryStats,
    RevealGateData, Surface, TextureState,
};
use crate::error::ArborResult;
use crate::field::PhotoElementData;
use crate::render::{drawable_for, DrawableRegistry, RenderSink};
use futures::task::{Spawn, SpawnExt};
use image::DynamicImage;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// CREATION
// ============================================================================

pub fn create_imagery(config: &ImageryConfig, photo_count: usize) -> ImageryData {
    let (sender, receiver) = flume::unbounded();

    ImageryData {
        config: config.clone(),
        gate: create_reveal_gate(photo_count, Duration::from_millis(config.reveal_interval_ms)),
        sender,
        receiver,
        surfaces: HashMap::new(),
        bound: HashMap::new(),
        stats: ImageryStats::default(),
    }
}

pub fn create_reveal_gate(limit: usize, interval: Duration) -> RevealGateData {
    RevealGateData {
        counter: Arc::new(AtomicUsize::new(0)),
        limit,
        interval,
        elapsed: Duration::ZERO,
    }
}

// ============================================================================
// REVEAL GATING
// ============================================================================

/// Feed simulated time; the counter becomes `min(limit, elapsed / interval)`
pub fn advance_reveal(gate: &mut RevealGateData, delta: Duration) -> usize {
    gate.elapsed += delta;

    let interval = gate.interval.as_nanos();
    let due = if interval == 0 {
        gate.limit
    } else {
        (gate.elapsed.as_nanos() / interval).min(gate.limit as u128) as usize
    };

    gate.counter.fetch_max(due, Ordering::Relaxed);
    revealed_count(gate)
}

pub fn revealed_count(gate: &RevealGateData) -> usize {
    gate.counter.load(Ordering::Relaxed).min(gate.limit)
}

/// Counter handle for `run_reveal_timer`
pub fn reveal_handle(gate: &RevealGateData) -> Arc<AtomicUsize> {
    Arc::clone(&gate.counter)
}

/// Wall-clock reveal: one more photo every `interval` until `limit`
pub async fn run_reveal_timer(counter: Arc<AtomicUsize>, limit: usize, interval: Duration) {
    while counter.load(Ordering::Relaxed) < limit {
        futures_timer::Delay::new(interval).await;
        counter.fetch_add(1, Ordering::Relaxed);
    }
    log::debug!("[Imagery] reveal timer finished at {}", limit);
}

/// Mark newly revealed photos and start their fetches
///
/// Returns the number of fetches started this call.
pub fn sync_reveal(
    imagery: &mut ImageryData,
    photos: &mut [PhotoElementData],
    fetcher: &Arc<dyn ImageFetcher>,
    spawner: &dyn Spawn,
) -> usize {
    let revealed = revealed_count(&imagery.gate);
    let mut started = 0;

    for photo in photos.iter_mut().take(revealed) {
        photo.reveal_eligible = true;
        if photo.texture_state != TextureState::Pending {
            continue;
        }

        photo.texture_state = TextureState::Loading;
        let fallback = fallback_locator(&photo.id.0, &imagery.config);

        match spawn_fetch(
            spawner,
            Arc::clone(fetcher),
            photo.index,
            photo.image_ref.clone(),
            fallback,
            imagery.sender.clone(),
        ) {
            Ok(()) => {
                imagery.stats.requested += 1;
                started += 1;
            }
            Err(error) => {
                // No executor means no fetch; degrade straight to the placeholder
                log::warn!("[Imagery] {}: {}", photo.id, error);
                photo.texture_state = TextureState::Fallback;
                imagery
                    .surfaces
                    .insert(photo.index, Surface::Placeholder);
                imagery.stats.failed += 1;
            }
        }
    }

    if started > 0 {
        log::debug!(
            "[Imagery] revealed {}/{} | started {} fetches",
            revealed,
            imagery.gate.limit,
            started
        );
    }
    started
}

fn spawn_fetch(
    spawner: &dyn Spawn,
    fetcher: Arc<dyn ImageFetcher>,
    index: usize,
    primary: String,
    fallback: String,
    sender: flume::Sender<FetchEvent>,
) -> ArborResult<()> {
    spawner.spawn(acquire_image(fetcher, index, primary, fallback, sender))?;
    Ok(())
}

// ============================================================================
// FETCHING
// ============================================================================

/// Primary fetch, then at most one fallback fetch
pub async fn acquire_image(
    fetcher: Arc<dyn ImageFetcher>,
    index: usize,
    primary: String,
    fallback: String,
    sender: flume::Sender<FetchEvent>,
) {
    let error = match fetch_and_decode(fetcher.as_ref(), &primary).await {
        Ok(image) => {
            let _ = sender.send(FetchEvent::Loaded {
                index,
                source: ImageSource::Primary,
                image,
            });
            return;
        }
        Err(error) => error,
    };

    log::warn!("[Imagery] photo {} primary failed: {}", index, error);
    if sender.send(FetchEvent::PrimaryFailed { index }).is_err() {
        // scene torn down
        return;
    }

    let event = match fetch_and_decode(fetcher.as_ref(), &fallback).await {
        Ok(image) => FetchEvent::Loaded {
            index,
            source: ImageSource::Fallback,
            image,
        },
        Err(error) => {
            log::warn!("[Imagery] photo {} fallback failed: {}", index, error);
            FetchEvent::FallbackFailed { index }
        }
    };
    let _ = sender.send(event);
}

async fn fetch_and_decode(
    fetcher: &dyn ImageFetcher,
    locator: &str,
) -> Result<DynamicImage, FetchError> {
    let bytes = fetcher.fetch(locator).await?;
    decode_image(locator, &bytes)
}

pub fn decode_image(locator: &str, bytes: &[u8]) -> Result<DynamicImage, FetchError> {
    image::load_from_memory(bytes).map_err(|error| FetchError::Decode {
        locator: locator.to_string(),
        reason: error.to_string(),
    })
}

// ============================================================================
// FALLBACK LOCATORS
// ============================================================================

/// Last run of ASCII digits in an id, e.g. `photo-7` -> 7
pub fn extract_seed(id: &str) -> Option<u64> {
    let bytes = id.as_bytes();
    let end = bytes.iter().rposition(u8::is_ascii_digit)? + 1;
    // UTF-8 continuation bytes are never ASCII digits, so both ends are char boundaries
    let start = bytes[..end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |position| position + 1);
    id[start..end].parse().ok()
}

/// Embedded seed plus the configured offset; ids without digits use the default seed
pub fn fallback_seed(id: &str, config: &ImageryConfig) -> u64 {
    extract_seed(id)
        .unwrap_or(config.default_fallback_seed)
        .saturating_add(config.fallback_seed_offset)
}

pub fn fallback_locator(id: &str, config: &ImageryConfig) -> String {
    config
        .fallback_url_template
        .replace("{seed}", &fallback_seed(id, config).to_string())
}

// ============================================================================
// COMPLETION
// ============================================================================

/// Apply every finished fetch to its photo; returns how many events were handled
///
/// A failed primary leaves the photo `Loading`; it only becomes `Fallback`
/// once the fallback request itself completes.
pub fn drain_completions(imagery: &mut ImageryData, photos: &mut [PhotoElementData]) -> usize {
    let mut handled = 0;

    for event in imagery.receiver.try_iter() {
        handled += 1;
        match event {
            FetchEvent::Loaded {
                index,
                source,
                image,
            } => {
                let Some(photo) = photos.get_mut(index) else {
                    continue;
                };
                match source {
                    ImageSource::Primary => {
                        photo.texture_state = TextureState::Local;
                        imagery.stats.local += 1;
                    }
                    ImageSource::Fallback => {
                        photo.texture_state = TextureState::Fallback;
                        imagery.stats.fallback += 1;
                    }
                }
                imagery.surfaces.insert(index, Surface::Image(image));
            }
            FetchEvent::PrimaryFailed { .. } => {
                imagery.stats.primary_failures += 1;
            }
            FetchEvent::FallbackFailed { index } => {
                let Some(photo) = photos.get_mut(index) else {
                    continue;
                };
                photo.texture_state = TextureState::Fallback;
                imagery.surfaces.insert(index, Surface::Placeholder);
                imagery.stats.failed += 1;
            }
        }
    }

    handled
}

/// Bind resolved surfaces to drawables that have not received them yet
///
/// Surfaces stay resolved after binding: a photo whose drawable is detached
/// and later replaced gets its image again. Returns how many binds were issued.
pub fn flush_bindings(
    imagery: &mut ImageryData,
    registry: &DrawableRegistry,
    sink: &mut dyn RenderSink,
) -> usize {
    let placeholder = imagery.config.placeholder_color;
    let mut flushed = 0;

    for (&index, surface) in &imagery.surfaces {
        let Some(drawable) = drawable_for(registry, index) else {
            imagery.bound.remove(&index);
            continue;
        };
        if imagery.bound.get(&index) == Some(&drawable) {
            continue;
        }

        match surface {
            Surface::Image(image) => sink.bind_image(drawable, image),
            Surface::Placeholder => sink.bind_placeholder(drawable, placeholder),
        }
        imagery.bound.insert(index, drawable);
        flushed += 1;
    }

    flushed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{generate_field, FieldConfig, ParticleKind};
    use crate::render::{attach_drawable, create_registry, DrawableId};
    use futures::executor::LocalPool;
    use futures::future::BoxFuture;
    use glam::Vec3;
    use std::io::Cursor;
    use std::sync::Mutex;

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::new(2, 2));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .expect("encode png");
        bytes
    }

    /// Serves fixed bytes per locator and records every request
    struct MapFetcher {
        files: HashMap<String, Vec<u8>>,
        requests: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        fn new(files: &[(&str, Vec<u8>)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl ImageFetcher for MapFetcher {
        fn fetch(&self, locator: &str) -> BoxFuture<'static, Result<Vec<u8>, FetchError>> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(locator.to_string());
            }
            let result = self
                .files
                .get(locator)
                .cloned()
                .ok_or_else(|| FetchError::NotFound {
                    locator: locator.to_string(),
                });
            Box::pin(async move { result })
        }
    }

    #[derive(Default)]
    struct BindingSink {
        images: Vec<DrawableId>,
        placeholders: Vec<DrawableId>,
    }

    impl RenderSink for BindingSink {
        fn set_world_transform(&mut self, _drawable: DrawableId, _position: Vec3, _rotation_y: f32) {}

        fn set_particle_positions(&mut self, _kind: ParticleKind, _positions: &[Vec3], _offset: Vec3) {}

        fn bind_image(&mut self, drawable: DrawableId, _image: &DynamicImage) {
            self.images.push(drawable);
        }

        fn bind_placeholder(&mut self, drawable: DrawableId, _color: [f32; 4]) {
            self.placeholders.push(drawable);
        }
    }

    fn photos(count: usize) -> Vec<PhotoElementData> {
        generate_field(&FieldConfig {
            foliage_count: 0,
            light_count: 0,
            photo_count: count,
            ..Default::default()
        })
        .photos
    }

    fn config() -> ImageryConfig {
        ImageryConfig {
            fallback_url_template: "fallback/{seed}.png".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_extraction() {
        assert_eq!(extract_seed("photo-7"), Some(7));
        assert_eq!(extract_seed("photo-12-v3"), Some(3));
        assert_eq!(extract_seed("42"), Some(42));
        assert_eq!(extract_seed("photo"), None);
        assert_eq!(extract_seed(""), None);
        assert_eq!(extract_seed("фото-5"), Some(5));
        assert_eq!(extract_seed("photo-99999999999999999999999"), None);
    }

    #[test]
    fn test_fallback_seed_offsets_embedded_number() {
        let config = ImageryConfig::default();
        assert_eq!(fallback_seed("photo-7", &config), 107);
        assert_eq!(fallback_seed("untagged", &config), 100);
        assert_eq!(
            fallback_locator("photo-7", &config),
            "https://picsum.photos/seed/107/400/500"
        );
    }

    #[test]
    fn test_reveal_count_follows_elapsed_time() {
        let mut gate = create_reveal_gate(31, Duration::from_millis(100));
        assert_eq!(revealed_count(&gate), 0);

        for step in 1..=50u64 {
            advance_reveal(&mut gate, Duration::from_millis(30));
            let expected = ((step * 30) / 100).min(31) as usize;
            assert_eq!(revealed_count(&gate), expected);
        }

        advance_reveal(&mut gate, Duration::from_secs(60));
        assert_eq!(revealed_count(&gate), 31);
    }

    #[test]
    fn test_reveal_timer_counts_to_limit() {
        let counter = Arc::new(AtomicUsize::new(0));
        futures::executor::block_on(run_reveal_timer(
            Arc::clone(&counter),
            3,
            Duration::from_millis(1),
        ));
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_primary_success_goes_local() {
        let mut photos = photos(2);
        let mut imagery = create_imagery(&config(), photos.len());
        let mut registry = create_registry(&photos);
        attach_drawable(&mut registry, &photos[0].id, DrawableId(5)).expect("attach");

        let fetcher: Arc<dyn ImageFetcher> =
            Arc::new(MapFetcher::new(&[("photos/0.jpg", png_bytes())]));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        advance_reveal(&mut imagery.gate, Duration::from_millis(100));
        assert_eq!(sync_reveal(&mut imagery, &mut photos, &fetcher, &spawner), 1);
        assert_eq!(photos[0].texture_state, TextureState::Loading);
        assert!(photos[0].reveal_eligible);
        assert!(!photos[1].reveal_eligible);

        pool.run_until_stalled();
        drain_completions(&mut imagery, &mut photos);
        assert_eq!(photos[0].texture_state, TextureState::Local);

        let mut sink = BindingSink::default();
        assert_eq!(flush_bindings(&mut imagery, &registry, &mut sink), 1);
        assert_eq!(sink.images, vec![DrawableId(5)]);
        assert_eq!(imagery.stats.local, 1);
    }

    #[test]
    fn test_primary_failure_uses_fallback_seed() {
        let mut photos = photos(8);
        let mut imagery = create_imagery(&config(), photos.len());
        let fetcher = Arc::new(MapFetcher::new(&[("fallback/107.png", png_bytes())]));
        let dyn_fetcher: Arc<dyn ImageFetcher> = fetcher.clone();
        let mut pool = LocalPool::new();

        advance_reveal(&mut imagery.gate, Duration::from_millis(800));
        sync_reveal(&mut imagery, &mut photos, &dyn_fetcher, &pool.spawner());
        pool.run_until_stalled();
        drain_completions(&mut imagery, &mut photos);

        assert_eq!(photos[7].texture_state, TextureState::Fallback);
        assert_eq!(imagery.stats.fallback, 1);
        assert_eq!(imagery.stats.primary_failures, 8);
        assert!(matches!(
            imagery.surfaces.get(&7),
            Some(Surface::Image(_))
        ));

        let requests = fetcher.requests.lock().expect("requests");
        assert!(requests.contains(&"photos/7.jpg".to_string()));
        assert!(requests.contains(&"fallback/107.png".to_string()));
        // exactly one attempt per locator, no retries
        assert_eq!(requests.len(), 16);
    }

    #[test]
    fn test_double_failure_binds_placeholder_once_attached() {
        let mut photos = photos(1);
        let mut imagery = create_imagery(&config(), photos.len());
        let mut registry = create_registry(&photos);
        let fetcher: Arc<dyn ImageFetcher> = Arc::new(MapFetcher::new(&[]));
        let mut pool = LocalPool::new();

        advance_reveal(&mut imagery.gate, Duration::from_millis(100));
        sync_reveal(&mut imagery, &mut photos, &fetcher, &pool.spawner());
        pool.run_until_stalled();
        drain_completions(&mut imagery, &mut photos);

        assert_eq!(photos[0].texture_state, TextureState::Fallback);
        assert_eq!(imagery.stats.failed, 1);

        let mut sink = BindingSink::default();
        assert_eq!(flush_bindings(&mut imagery, &registry, &mut sink), 0);

        attach_drawable(&mut registry, &photos[0].id, DrawableId(9)).expect("attach");
        assert_eq!(flush_bindings(&mut imagery, &registry, &mut sink), 1);
        assert_eq!(sink.placeholders, vec![DrawableId(9)]);
        assert!(sink.images.is_empty());
    }

    /// Primary always fails; the fallback request never completes
    struct StalledFallbackFetcher;

    impl ImageFetcher for StalledFallbackFetcher {
        fn fetch(&self, locator: &str) -> BoxFuture<'static, Result<Vec<u8>, FetchError>> {
            if locator.starts_with("fallback/") {
                return Box::pin(futures::future::pending());
            }
            let locator = locator.to_string();
            Box::pin(async move { Err(FetchError::NotFound { locator }) })
        }
    }

    #[test]
    fn test_state_stays_loading_while_fallback_in_flight() {
        let mut photos = photos(1);
        let mut imagery = create_imagery(&config(), photos.len());
        let fetcher: Arc<dyn ImageFetcher> = Arc::new(StalledFallbackFetcher);
        let mut pool = LocalPool::new();

        advance_reveal(&mut imagery.gate, Duration::from_millis(100));
        sync_reveal(&mut imagery, &mut photos, &fetcher, &pool.spawner());

        for _ in 0..30 {
            pool.run_until_stalled();
            drain_completions(&mut imagery, &mut photos);
        }

        assert_eq!(photos[0].texture_state, TextureState::Loading);
        assert_eq!(imagery.stats.primary_failures, 1);
        assert!(imagery.surfaces.is_empty());
    }

    #[test]
    fn test_replacement_drawable_gets_surface_again() {
        let mut photos = photos(1);
        let mut imagery = create_imagery(&config(), photos.len());
        let mut registry = create_registry(&photos);
        attach_drawable(&mut registry, &photos[0].id, DrawableId(1)).expect("attach");

        let fetcher: Arc<dyn ImageFetcher> =
            Arc::new(MapFetcher::new(&[("photos/0.jpg", png_bytes())]));
        let mut pool = LocalPool::new();
        let mut sink = BindingSink::default();

        advance_reveal(&mut imagery.gate, Duration::from_millis(100));
        sync_reveal(&mut imagery, &mut photos, &fetcher, &pool.spawner());
        pool.run_until_stalled();
        drain_completions(&mut imagery, &mut photos);
        assert_eq!(flush_bindings(&mut imagery, &registry, &mut sink), 1);

        // already bound: later frames do not rebind
        assert_eq!(flush_bindings(&mut imagery, &registry, &mut sink), 0);

        crate::render::detach_drawable(&mut registry, &photos[0].id).expect("detach");
        assert_eq!(flush_bindings(&mut imagery, &registry, &mut sink), 0);
        attach_drawable(&mut registry, &photos[0].id, DrawableId(2)).expect("attach");
        for _ in 0..30 {
            flush_bindings(&mut imagery, &registry, &mut sink);
        }

        assert_eq!(sink.images, vec![DrawableId(1), DrawableId(2)]);
        assert_eq!(photos[0].texture_state, TextureState::Local);
    }

    #[test]
    fn test_same_drawable_reattached_is_rebound() {
        let mut photos = photos(1);
        let mut imagery = create_imagery(&config(), photos.len());
        let mut registry = create_registry(&photos);
        attach_drawable(&mut registry, &photos[0].id, DrawableId(4)).expect("attach");
        imagery.surfaces.insert(0, Surface::Placeholder);

        let mut sink = BindingSink::default();
        flush_bindings(&mut imagery, &registry, &mut sink);
        crate::render::detach_drawable(&mut registry, &photos[0].id).expect("detach");
        flush_bindings(&mut imagery, &registry, &mut sink);
        attach_drawable(&mut registry, &photos[0].id, DrawableId(4)).expect("attach");
        flush_bindings(&mut imagery, &registry, &mut sink);

        assert_eq!(sink.placeholders, vec![DrawableId(4), DrawableId(4)]);
    }

    #[test]
    fn test_revealed_photo_is_fetched_once() {
        let mut photos = photos(3);
        let mut imagery = create_imagery(&config(), photos.len());
        let fetcher: Arc<dyn ImageFetcher> = Arc::new(MapFetcher::new(&[]));
        let pool = LocalPool::new();

        advance_reveal(&mut imagery.gate, Duration::from_millis(300));
        assert_eq!(sync_reveal(&mut imagery, &mut photos, &fetcher, &pool.spawner()), 3);
        assert_eq!(sync_reveal(&mut imagery, &mut photos, &fetcher, &pool.spawner()), 0);
        assert_eq!(imagery.stats.requested, 3);
    }

    #[test]
    fn test_late_completion_after_teardown_is_ignored() {
        let photos = photos(1);
        let imagery = create_imagery(&config(), photos.len());
        let sender = imagery.sender.clone();
        drop(imagery);

        let fetcher: Arc<dyn ImageFetcher> =
            Arc::new(MapFetcher::new(&[("photos/0.jpg", png_bytes())]));
        futures::executor::block_on(acquire_image(
            fetcher,
            0,
            "photos/0.jpg".to_string(),
            "fallback/100.png".to_string(),
            sender,
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_image("x.jpg", b"not an image");
        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }
}
