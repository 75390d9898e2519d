use anyhow::{Context, Result};
use log::info;
use starwalk::engine::game_loop::{Clock, FixedStepScheduler, MonotonicClock, SchedulerConfig};
use starwalk::engine::input::{action::global_bindings, Action, KeyBindings};
use starwalk::engine::renderer::Renderer;
use starwalk::game::{GameConfig, Scene};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = GameConfig::default();
    info!("Starting {}...", config.title);

    // Assets load before the loop starts
    let mut scene = Scene::load(config.clone()).context("Failed to load player sprites")?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let (window_width, window_height) = config.window_size();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(window_width, window_height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer =
        pollster::block_on(Renderer::new(window.clone(), config.width, config.height))?;

    let global = KeyBindings::from_bindings(global_bindings());
    let clock = MonotonicClock::new();
    let mut scheduler = FixedStepScheduler::new(SchedulerConfig::default());
    scheduler.start(clock.now_ms());

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    scheduler.stop();
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::Focused(false) => {
                    scene.input_mut().reset();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let Some(key) = scene.input_mut().process_keyboard_event(&event) else {
                        return;
                    };
                    match global.action_for(&key) {
                        Some(Action::Pause) => scheduler.toggle_pause(),
                        Some(Action::Quit) => {
                            info!("Quit requested, shutting down...");
                            scheduler.stop();
                            elwt.exit();
                        }
                        _ => {}
                    }
                }
                WindowEvent::RedrawRequested => {
                    let report = scheduler.frame_with(&clock, &mut scene);
                    if report.rendered {
                        if let Err(err) = renderer.present(scene.canvas()) {
                            log::error!("Failed to present frame: {err:#}");
                            scheduler.stop();
                            elwt.exit();
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Schedule the next frame while running
                if scheduler.is_running() {
                    window.request_redraw();
                }
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
