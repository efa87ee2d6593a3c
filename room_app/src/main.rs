//! Lit room demo
//!
//! Opens a window and renders the room: stone walls, a lit crate and an
//! environment-mapped torus. WASD/QE move, hold the right mouse button to
//! look around, Escape quits.
//!
//! Usage: `room_demo [config.toml|config.ron]`

use std::path::PathBuf;
use std::process::ExitCode;

use room_engine::assets::AssetPaths;
use room_engine::config::{Config, RoomConfig};
use room_engine::foundation::logging;
use room_engine::foundation::time::{FrameStats, Timer};
use room_engine::render::window::{GlWindow, WindowBackend};
use room_engine::scene::{Scene, SceneError, SceneResult};

/// Window plus scene, declared so the scene drops first
pub struct RoomApp {
    scene: Scene,
    window: GlWindow,
    timer: Timer,
    stats: FrameStats,
}

impl RoomApp {
    /// Open the window and load the scene
    pub fn new(config: &RoomConfig) -> SceneResult<Self> {
        let window = GlWindow::new(&config.window)?;
        let scene = Scene::init(config, &AssetPaths::default(), &window)?;

        Ok(Self {
            scene,
            window,
            timer: Timer::new(),
            stats: FrameStats::default(),
        })
    }

    /// Run until the window is closed
    pub fn run(&mut self) -> SceneResult<()> {
        log::info!("Entering main loop");

        while !self.window.should_close() {
            self.window.poll_events();
            for event in self.window.drain_events() {
                self.scene.handle_event(&event, &mut self.window);
            }

            let delta_time = self.timer.tick(self.window.elapsed_time());
            self.scene.update(&self.window, delta_time);
            self.scene.render()?;
            self.window.swap_buffers();

            if let Some(fps) = self.stats.record(delta_time) {
                log::debug!("{fps:.1} fps ({:.2} ms/frame)", 1000.0 / fps);
            }
        }

        log::info!("Main loop finished after {} frames", self.timer.frame_count());
        Ok(())
    }
}

fn load_config() -> Result<RoomConfig, SceneError> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => RoomConfig::load_from_file(&path)?,
        None => RoomConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let config = load_config();
    let level = config.as_ref().map_or("info", |config| config.log_level.as_str());
    logging::init(level);

    let result = config.and_then(|config| {
        log::info!("Starting room demo");
        RoomApp::new(&config)?.run()
    });

    match result {
        Ok(()) => {
            log::info!("Room demo finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
