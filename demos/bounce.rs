//! Headless bounce demo: a few nested shapes animated on a background thread,
//! each frame rendered into a recording surface.
//!
//! Run with `RUST_LOG=debug cargo run --example bounce --features tracing`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use shapenest::animation::lock_scene;
use shapenest::{Animator, Color, RecordingSurface, Scene, SceneConfig, SharedScene, ShapeKind};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(100);

    let config = SceneConfig::new()
        .with_tick_period(Duration::from_millis(10))
        .with_seed(2024);
    let scene: SharedScene = Arc::new(Mutex::new(Scene::new(config)));

    {
        let mut scene = lock_scene(&scene);
        scene.click(40, 40)?;
        scene.set_current_shape_kind(ShapeKind::Oval);
        scene.set_current_color(Color::BLUE)?;
        scene.click(300, 200)?;
        scene.set_current_shape_kind(ShapeKind::Nested);
        scene.set_current_width(240)?;
        scene.set_current_height(160)?;
        scene.set_current_color(Color::GREEN)?;
        scene.click(200, 60)?;
    }

    let last_frame = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&last_frame);
    let (done_tx, done_rx) = std::sync::mpsc::channel();
    let animator = Animator::spawn(Arc::clone(&scene), move |scene| {
        let mut surface = RecordingSurface::new();
        scene.render(&mut surface);
        *sink.lock().unwrap_or_else(|e| e.into_inner()) = surface.log();
        if scene.ticks() >= frames {
            let _ = done_tx.send(());
        }
    });

    let _ = done_rx.recv();
    let ticks = animator
        .join()
        .map_err(|_| miette::miette!("animation thread panicked"))?;

    tracing::info!(ticks, "animation finished");
    println!("{}", last_frame.lock().unwrap_or_else(|e| e.into_inner()));
    Ok(())
}
