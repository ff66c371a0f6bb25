use anyhow::Result;
use log::{info, warn};
use winit::{
    event::{DeviceEvent, Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager};
use game::characters::{CharacterEvent, ControlInput};
use game::GameWorld;

/// Frames between window title refreshes
const TITLE_REFRESH_FRAMES: u64 = 15;

fn status_title(world: &GameWorld, fps: f32, paused: bool) -> String {
    let character = world.character();
    format!(
        "Gauntlet | HP {:.0}/{:.0} | Stamina {:.0}{} ({:?}) | {:?} | Coins {} | {:.0} fps{}",
        character.health(),
        character.stats.max_health,
        character.stamina(),
        if character.stamina_status().is_low() { " LOW" } else { "" },
        character.stamina_status(),
        character.movement_status(),
        character.coins(),
        fps,
        if paused { " | PAUSED" } else { "" }
    )
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Gauntlet...");

    let mut world = GameWorld::demo_level()?;
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Gauntlet")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => input.process_mouse_button(button, state),
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset(),
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                ..
            } => input.process_mouse_motion(dx, dy),
            Event::AboutToWait => {
                if input.take_just_pressed(Action::Pause) {
                    game_loop.toggle_pause();
                }
                let steps = game_loop.begin_frame();
                for _ in 0..steps {
                    if input.take_just_pressed(Action::ShowPickupLocations) {
                        world.show_pickup_locations();
                    }
                    let control = ControlInput::from_input(&input);
                    world.fixed_update(&control, game_loop.fixed_timestep());
                    input.update();

                    if world.character_events().contains(&CharacterEvent::Died) {
                        warn!("Player died");
                    }
                }
                if game_loop.is_paused() {
                    // Presses while paused are dropped; held state carries over
                    input.update();
                }

                if game_loop.frame_count() % TITLE_REFRESH_FRAMES == 0 {
                    window.set_title(&status_title(&world, game_loop.fps(), game_loop.is_paused()));
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
