//! TD Academy headless demo
//!
//! Plays the full campaign with the seeded autopilot, feeding frames through
//! the fixed-step clock, and prints the final snapshot as JSON.
//!
//! Usage: `td-academy [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use td_academy::Settings;
    use td_academy::Tuning;
    use td_academy::autopilot::Autopilot;
    use td_academy::sim::{GameEvent, GameState, SimulationClock};

    env_logger::init();
    log::info!("TD Academy (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let tuning = match &settings.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    log::info!(
        "{} timestep ({:.0} Hz), seed {}",
        settings.step.as_str(),
        1.0 / settings.fixed_dt(),
        settings.seed
    );

    let mut state = GameState::new(tuning)?;
    state.set_speed(settings.game_speed);
    let mut clock = SimulationClock::new(&settings);
    let mut pilot = Autopilot::new(settings.seed);
    let frame_dt = settings.demo_frame_dt();

    let mut frames: u64 = 0;
    while !state.is_over() && state.time < settings.demo_time_limit {
        pilot.act(&mut state);
        clock.advance(&mut state, frame_dt);
        frames += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::WaveCleared { .. } | GameEvent::Victory | GameEvent::Defeat => {
                    log::info!("[{:>7.2}s] {}", state.time, state.message);
                }
                other => log::debug!("[{:>7.2}s] {:?}", state.time, other),
            }
        }
    }

    if !state.is_over() {
        log::warn!(
            "Demo stopped after {:.0}s without a result",
            settings.demo_time_limit
        );
    }
    log::info!(
        "Finished after {} frames: {:?} (gold {}, lives {}, wave {}/{})",
        frames,
        state.phase,
        state.economy.gold,
        state.economy.lives,
        state.waves.wave_number(),
        state.waves.total_waves()
    );

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; a host page drives `GameState` directly
}
