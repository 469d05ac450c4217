//! End to end: scan a model directory, pick, confirm, and anchor

use std::path::Path;
use std::sync::Arc;

use cgmath::{InnerSpace, Vector3};
use futures::executor::LocalPool;
use placer::config::SessionCapabilities;
use placer::gfx::picking::Ray;
use placer::placement::{Phase, PlacementAction, PlacementStore};
use placer::registry::{ModelRegistry, ObjLoader, ScanOptions};
use placer::session::{DropReason, PlacementOutcome, SceneHost, SimulatedSession};

/// Half-unit cube centered on the origin
const CUBE_OBJ: &str = "\
o cube
v -0.25 -0.25 -0.25
v 0.25 -0.25 -0.25
v 0.25 0.25 -0.25
v -0.25 0.25 -0.25
v -0.25 -0.25 0.25
v 0.25 -0.25 0.25
v 0.25 0.25 0.25
v -0.25 0.25 0.25
f 1 2 3 4
f 5 8 7 6
f 1 5 6 2
f 2 6 7 3
f 3 7 8 4
f 5 1 4 8
";

fn write_asset(dir: &Path, name: &str) {
    std::fs::write(dir.join(format!("{}.obj", name)), CUBE_OBJ).unwrap();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 40, 40, 255]))
        .save(dir.join(format!("{}.png", name)))
        .unwrap();
}

/// Registry over `names`; loads only run once the pool is driven
fn registry(dir: &Path, names: &[&str], pool: &LocalPool) -> ModelRegistry {
    for name in names {
        write_asset(dir, name);
    }
    ModelRegistry::build(
        &ScanOptions::new(dir),
        Arc::new(ObjLoader::new()),
        &pool.spawner(),
    )
    .unwrap()
}

fn loaded_registry(dir: &Path, names: &[&str]) -> ModelRegistry {
    let mut pool = LocalPool::new();
    let mut registry = registry(dir, names, &pool);
    pool.run_until_stalled();
    registry.poll_completions();
    registry
}

fn host() -> SceneHost<SimulatedSession> {
    SceneHost::new(SimulatedSession::new(), &SessionCapabilities::default())
}

fn pick_and_confirm(store: &mut PlacementStore, registry: &ModelRegistry, name: &str) {
    let entry = registry.find(name).unwrap().id();
    store.dispatch(PlacementAction::Pick(entry)).unwrap();
    store.dispatch(PlacementAction::Confirm).unwrap();
}

#[test]
fn test_car_lands_on_the_floor_under_the_reticle() {
    let dir = tempfile::tempdir().unwrap();
    let registry = loaded_registry(dir.path(), &["car"]);
    assert_eq!(registry.len(), 1);
    assert!(registry.find("car").unwrap().is_ready());

    let mut store = PlacementStore::new();
    let mut host = host();
    host.session_mut()
        .update_focus(&Ray::new(Vector3::new(1.0, 2.0, 1.0), -Vector3::unit_y()));

    let car = registry.find("car").unwrap().id();
    store.dispatch(PlacementAction::Pick(car)).unwrap();
    assert!(store.state().placement_mode_active());
    store.dispatch(PlacementAction::Confirm).unwrap();

    let outcome = host.observe(&mut store, &registry);
    assert!(matches!(outcome, PlacementOutcome::Placed { entry, .. } if entry == car));
    assert_eq!(store.state().phase(), Phase::Idle);
    assert_eq!(store.state().confirmed(), None);

    let instances = host.session().instances();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].renderable.name, "car");
    // Cube bottom rests on y = 0
    let position = instances[0].transform.w.truncate();
    assert!((position - Vector3::new(1.0, 0.25, 1.0)).magnitude() < 1e-5);
}

#[test]
fn test_second_confirm_before_tick_wins() {
    let dir = tempfile::tempdir().unwrap();
    let registry = loaded_registry(dir.path(), &["car", "rover"]);
    let mut store = PlacementStore::new();
    let mut host = host();

    pick_and_confirm(&mut store, &registry, "car");
    pick_and_confirm(&mut store, &registry, "rover");

    let outcome = host.observe(&mut store, &registry);
    let rover = registry.find("rover").unwrap().id();
    assert!(matches!(outcome, PlacementOutcome::Placed { entry, .. } if entry == rover));

    let instances = host.session().instances();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].renderable.name, "rover");
}

#[test]
fn test_confirmation_is_delivered_once() {
    let dir = tempfile::tempdir().unwrap();
    let registry = loaded_registry(dir.path(), &["car"]);
    let mut store = PlacementStore::new();
    let mut host = host();

    pick_and_confirm(&mut store, &registry, "car");
    host.observe(&mut store, &registry);

    assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);
    assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);
    assert_eq!(host.placed_count(), 1);
    assert_eq!(host.session().instances().len(), 1);
}

#[test]
fn test_confirm_while_loading_is_dropped_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let mut pool = LocalPool::new();
    let mut registry = registry(dir.path(), &["car"], &pool);
    let mut store = PlacementStore::new();
    let mut host = host();

    pick_and_confirm(&mut store, &registry, "car");
    let outcome = host.observe(&mut store, &registry);
    assert!(matches!(
        outcome,
        PlacementOutcome::Dropped {
            reason: DropReason::AssetNotReady,
            ..
        }
    ));

    pool.run_until_stalled();
    registry.poll_completions();
    assert!(registry.find("car").unwrap().is_ready());

    assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);
    assert!(host.session().instances().is_empty());

    // A fresh confirm works once the model is in
    pick_and_confirm(&mut store, &registry, "car");
    assert!(matches!(
        host.observe(&mut store, &registry),
        PlacementOutcome::Placed { .. }
    ));
}

#[test]
fn test_cancel_places_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let registry = loaded_registry(dir.path(), &["car"]);
    let mut store = PlacementStore::new();
    let mut host = host();

    let car = registry.find("car").unwrap().id();
    store.dispatch(PlacementAction::Pick(car)).unwrap();
    assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);
    store.dispatch(PlacementAction::Cancel).unwrap();
    assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);

    assert!(!store.state().placement_mode_active());
    assert!(host.session().instances().is_empty());
}
