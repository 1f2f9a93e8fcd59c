//! Scene Operations - the per-frame entry point
//!
//! One `tick` runs, in order: fetch completions, reveal gating, host inputs,
//! transition update, morph pass, pan update, publishing, surface binding and
//! finally click handling against the transforms just written. Nothing in
//! here blocks; fetches run on the host's executor.

use super::scene_data::{FrameContext, FrameReport, SceneInputs, SceneState, SceneStats};
use crate::camera::{init_camera_from_config, log_camera_context, update_aspect_ratio};
use crate::config::SceneConfig;
use crate::error::ArborResult;
use crate::field::{generate_field, PhotoElementData, PhotoId};
use crate::imagery::{
    advance_reveal, create_imagery, drain_completions, flush_bindings, reveal_handle,
    revealed_count, run_reveal_timer, sync_reveal, RevealDriver, TextureState,
};
use crate::morph::{create_morph_buffers, publish_frame, run_morph_pass};
use crate::pan::{create_pan, pan_translation, set_pan_target, update_pan};
use crate::render::{
    attach_drawable, attached_count, create_registry, detach_drawable, photo_index, DrawableId,
    ScreenProjector,
};
use crate::selection::{
    clear_selection, consume_click, create_selection, handle_click, selected_id,
};
use crate::transition::{
    create_transition, current_ease, set_target_mode, update_transition, TargetMode,
};
use std::future::Future;
use std::time::Duration;

// ============================================================================
// CREATION
// ============================================================================

/// Validate the config and build the whole scene
pub fn create_scene(config: SceneConfig) -> ArborResult<SceneState> {
    config.validate()?;

    let field = generate_field(&config.field);
    let buffers = create_morph_buffers(&field);
    let registry = create_registry(&field.photos);
    let imagery = create_imagery(&config.imagery, field.photos.len());

    log::info!(
        "[Scene] Created with {} photos, {} ambient particles",
        field.photos.len(),
        field.foliage.chaos_positions.len() + field.lights.chaos_positions.len()
    );

    Ok(SceneState {
        transition: create_transition(&config.motion),
        selection: create_selection(),
        pan: create_pan(config.motion.pan_smoothing),
        camera: init_camera_from_config(&config.camera),
        field,
        buffers,
        imagery,
        registry,
        config,
        clock: 0.0,
        frame_number: 0,
    })
}

// ============================================================================
// FRAME
// ============================================================================

/// Advance the scene by `delta_time` seconds
pub fn tick(
    scene: &mut SceneState,
    inputs: &SceneInputs,
    delta_time: f32,
    frame: &mut FrameContext<'_>,
) -> FrameReport {
    let dt = if delta_time.is_finite() && delta_time > 0.0 {
        delta_time
    } else {
        0.0
    };
    scene.clock += f64::from(dt);
    scene.frame_number += 1;

    let mut report = FrameReport {
        completions: drain_completions(&mut scene.imagery, &mut scene.field.photos),
        ..Default::default()
    };

    if scene.imagery.config.reveal_driver == RevealDriver::Tick {
        let delta = Duration::try_from_secs_f32(dt).unwrap_or(Duration::ZERO);
        advance_reveal(&mut scene.imagery.gate, delta);
    }
    report.fetches_started = sync_reveal(
        &mut scene.imagery,
        &mut scene.field.photos,
        frame.fetcher,
        frame.spawner,
    );

    set_target_mode(&mut scene.transition, inputs.target_mode);
    set_pan_target(&mut scene.pan, inputs.pan_target);

    update_transition(
        &mut scene.transition,
        dt,
        inputs.rotation_speed,
        inputs.rotation_boost,
    );
    run_morph_pass(
        &mut scene.field,
        &mut scene.buffers,
        current_ease(&scene.transition),
        scene.transition.rotation_accumulator,
    );
    update_pan(&mut scene.pan);

    let offset = pan_translation(&scene.pan);
    report.transforms_published = publish_frame(
        &scene.field,
        &scene.buffers,
        &scene.registry,
        &mut *frame.sink,
        offset,
    );
    report.bindings_flushed = flush_bindings(&mut scene.imagery, &scene.registry, &mut *frame.sink);

    // A click is consumed in either mode so it cannot fire later
    if consume_click(&mut scene.selection, inputs.click_counter)
        && scene.transition.target_mode == TargetMode::Chaos
    {
        let camera = scene.camera;
        let projector: &dyn ScreenProjector = match frame.projector {
            Some(projector) => projector,
            None => &camera,
        };
        report.selection = Some(handle_click(
            &mut scene.selection,
            &scene.config.selection,
            &scene.field.photos,
            &scene.registry,
            projector,
            inputs.pointer,
            offset,
            scene.clock,
        ));
    }

    report
}

/// Future that drives the reveal counter on wall-clock time
///
/// Only meaningful with `RevealDriver::Timer`; spawn it on the host executor.
pub fn reveal_timer_task(scene: &SceneState) -> impl Future<Output = ()> + Send + 'static {
    run_reveal_timer(
        reveal_handle(&scene.imagery.gate),
        scene.imagery.gate.limit,
        scene.imagery.gate.interval,
    )
}

// ============================================================================
// HOST ACCESS
// ============================================================================

pub fn attach_photo_drawable(
    scene: &mut SceneState,
    id: &PhotoId,
    drawable: DrawableId,
) -> ArborResult<()> {
    attach_drawable(&mut scene.registry, id, drawable)?;
    Ok(())
}

pub fn detach_photo_drawable(
    scene: &mut SceneState,
    id: &PhotoId,
) -> ArborResult<Option<DrawableId>> {
    detach_drawable(&mut scene.registry, id)
}

pub fn photo<'a>(scene: &'a SceneState, id: &PhotoId) -> ArborResult<&'a PhotoElementData> {
    let index = photo_index(&scene.registry, id)?;
    Ok(&scene.field.photos[index])
}

pub fn selected_photo(scene: &SceneState) -> Option<&PhotoId> {
    selected_id(&scene.selection)
}

/// Host closed the detail view
pub fn close_selection(scene: &mut SceneState) {
    clear_selection(&mut scene.selection);
}

pub fn resize_viewport(scene: &mut SceneState, width: u32, height: u32) {
    scene.camera = update_aspect_ratio(&scene.camera, width, height);
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

pub fn scene_stats(scene: &SceneState) -> SceneStats {
    let photos = &scene.field.photos;
    let count_state =
        |state: TextureState| photos.iter().filter(|p| p.texture_state == state).count();

    SceneStats {
        frame_number: scene.frame_number,
        clock: scene.clock,
        target_mode: scene.transition.target_mode,
        progress: scene.transition.progress,
        ease: current_ease(&scene.transition),
        rotation_accumulator: scene.transition.rotation_accumulator,
        revealed: revealed_count(&scene.imagery.gate),
        loading: count_state(TextureState::Loading),
        local: count_state(TextureState::Local),
        fallback: count_state(TextureState::Fallback),
        failed: scene.imagery.stats.failed,
        attached: attached_count(&scene.registry),
        selected: selected_photo(scene).cloned(),
    }
}

pub fn log_scene_context(scene: &SceneState) {
    let stats = scene_stats(scene);

    log::debug!(
        "[Scene] Frame {} | t={:.2}s | {:?} progress={:.3} ease={:.3} rotation={:.2}",
        stats.frame_number,
        stats.clock,
        stats.target_mode,
        stats.progress,
        stats.ease,
        stats.rotation_accumulator
    );
    log::debug!(
        "[Scene] Revealed {}/{} | loading={} local={} fallback={} failed={} | attached={} | selected={:?}",
        stats.revealed,
        scene.field.photos.len(),
        stats.loading,
        stats.local,
        stats.fallback,
        stats.failed,
        stats.attached,
        stats.selected
    );
    log_camera_context(&scene.camera);
}
