//! Silhouette Breaker entry point
//!
//! Native headless runner: loads a stage, builds a session for a given
//! display size and lets an autopilot play it frame by frame.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use silhouette_breaker::platform::{ImageMask, MaskSampler};
    use silhouette_breaker::sim::{GameState, Scene};
    use silhouette_breaker::{DisplayArea, Renderer, Session, Settings, Stage};

    #[derive(Parser, Debug)]
    #[command(name = "silhouette-breaker")]
    #[command(about = "Play a silhouette-breaker stage headless with an autopilot")]
    struct Cli {
        /// Directory holding the stage images
        #[arg(long, default_value = "assets")]
        assets: PathBuf,
        /// Settings JSON (missing file = defaults)
        #[arg(long, default_value = "settings.json")]
        settings: PathBuf,
        /// Stage override ("default" or "2021")
        #[arg(long)]
        stage: Option<Stage>,
        /// Display width in pixels
        #[arg(long, default_value_t = 480)]
        width: u32,
        /// Display height in pixels
        #[arg(long, default_value_t = 640)]
        height: u32,
        /// Simulated display refresh rate
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Stop after this many frames even if the game is still running
        #[arg(long, default_value_t = 36_000)]
        max_frames: u32,
        /// Write the final state as JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    }

    /// Logs the HUD line whenever it changes
    #[derive(Default)]
    struct HudLogger {
        frames: u64,
        last_hud: String,
    }

    impl Renderer for HudLogger {
        fn render(&mut self, state: &GameState) {
            self.frames += 1;
            let hud = state.hud_line();
            if hud != self.last_hud {
                log::debug!("frame {:>6} [{:?}] {}", self.frames, state.scene, hud);
                self.last_hud = hud;
            }
        }
    }

    /// Ball-tracking input: click to launch, then steer the paddle under the
    /// ball with a slow drifting offset so rallies don't loop forever.
    fn autopilot(session: &mut Session) {
        let state = &session.state;
        match state.scene {
            Scene::Start => {
                session.input.cursor_x = state.field.width / 2.0;
                session.input.click();
            }
            Scene::Game => {
                let t = state.time_ticks as f32 * 0.01;
                let offset = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * state.paddle.width;
                session.input.cursor_x = state.ball.pos.x + offset;
            }
            Scene::Clear | Scene::Gameover => {}
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let mut settings = Settings::load(&cli.settings)?;
        if let Some(stage) = cli.stage {
            settings.stage = stage;
        }
        if cli.fps <= 0.0 {
            bail!("--fps must be positive, got {}", cli.fps);
        }

        let assets = settings.stage.assets(&cli.assets);
        let mask = ImageMask::open(&assets.mask);
        let base_size = match image::image_dimensions(&assets.base) {
            Ok(size) => size,
            Err(e) => {
                log::warn!("Base image {} unreadable ({}), using mask size", assets.base.display(), e);
                mask.natural_size()
                    .with_context(|| format!("no readable base or mask image under {}", cli.assets.display()))?
            }
        };

        let display = DisplayArea::new(cli.width, cli.height);
        let mut session = Session::start(Some(display), base_size, &mask, &settings, 0.0)
            .context("failed to start session")?;

        let frame_ms = 1000.0 / cli.fps;
        let mut hud = HudLogger::default();
        let mut frame = 0;
        while frame < cli.max_frames && !session.is_over() {
            frame += 1;
            autopilot(&mut session);
            session.frame(frame as f64 * frame_ms, &mut hud);
        }

        log::info!(
            "Finished after {} frames / {} ticks: {:?}, {}",
            frame,
            session.state.time_ticks,
            session.state.scene,
            session.state.hud_line()
        );

        let json = serde_json::to_string_pretty(&session.state)?;
        match cli.output {
            Some(path) => std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => println!("{json}"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host page; there is no wasm entry point here
}
