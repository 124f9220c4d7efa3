//! AR Pong entry point
//!
//! The browser build is driven from the page through `ar_pong::web`. The
//! native binary plays a headless match with an autopilot standing in for
//! the player and logs what happens.
//!
//! Usage: `ar-pong [seed] [settings.json] [easy|normal|hard]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ar_pong::sim::{GameEvent, MatchPhase};
    use ar_pong::{Driver, InputEvent, Settings, SimError};
    use glam::Vec2;

    /// Safety cap so a stalemate rally cannot spin forever
    const MAX_FRAMES: u64 = 200_000;
    /// How hard the autopilot chases the ball
    const AUTOPILOT_RATE: f32 = 0.06;

    fn load_settings() -> Result<Settings, SimError> {
        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse::<u64>().ok());

        let json = args.next().and_then(|path| match std::fs::read_to_string(&path) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Could not read {path}: {e}, using defaults");
                None
            }
        });
        let difficulty = args.next();

        let mut settings = Settings::load(json.as_deref(), difficulty.as_deref())?;
        if let Some(seed) = seed {
            settings.seed = seed;
        }
        Ok(settings)
    }

    pub fn run() -> Result<(), SimError> {
        let settings = load_settings()?;
        log::info!("AR Pong (headless) starting with seed {}", settings.seed);

        let mut driver = Driver::new();
        driver.setup(settings)?;
        let input = driver.input_sender();

        // No camera here: play as if the marker were always tracked
        let _ = input.send(InputEvent::Bypass(true));
        for event in driver.start()? {
            log::info!("{event:?}");
        }

        let mut frames = 0;
        while driver.is_scheduled() && frames < MAX_FRAMES {
            if let Some(frame) = driver.snapshot() {
                if let (Some(ball), Some(player)) = (frame.ball, frame.player) {
                    let current: Vec2 = player.truncate();
                    let target = current + (ball.truncate() - current) * AUTOPILOT_RATE;
                    let _ = input.send(InputEvent::PaddleTarget(target));
                }
            }

            for event in driver.frame()? {
                match event {
                    GameEvent::WallBounce { .. } => log::trace!("{event:?}"),
                    GameEvent::PaddleHit { .. } => log::debug!("{event:?}"),
                    _ => log::info!("{event:?}"),
                }
            }
            frames += 1;
        }

        if let Some(frame) = driver.snapshot() {
            if frame.phase != MatchPhase::Finished {
                log::warn!("Stopped after {frames} frames without a winner");
            }
            println!("{}", frame.to_json()?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is ar_pong::web::wasm_init, this is just to satisfy the compiler
}
