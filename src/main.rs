//! Rupeverse headless demo
//!
//! Plays a scripted round of cosmic golf and a Beat Blitz showdown against
//! a synthetic track, logging what happens.
//!
//! Usage: `rupeverse [seed] [settings.json] [standings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rupeverse::leaderboard::DEFAULT_ROSTER;
    use rupeverse::{Leaderboard, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let standings_path = args.next();

    log::info!("Rupeverse (native) starting, seed {seed:#x}");

    demo::play_golf(seed, &settings);
    let summary = demo::play_showdown(seed, &settings);

    let mut board = match &standings_path {
        Some(path) => Leaderboard::load_from(path).unwrap_or_else(|e| {
            log::warn!("Starting fresh standings ({e})");
            Leaderboard::standard()
        }),
        None => Leaderboard::standard(),
    };
    board.record(DEFAULT_ROSTER[0], &summary);
    if let Some(path) = &standings_path {
        if let Err(e) = board.save_to(path) {
            log::error!("Failed to save standings: {e}");
        }
    }

    println!("\n{summary}\n");
    for (rank, player) in board.standings().iter().enumerate() {
        println!(
            "{}. {:<16} {:>6} pts  {} perfect",
            rank + 1,
            player.name,
            player.best.score,
            player.best.perfect_cuts
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven from JS on the web; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::{Vec2, Vec3};
    use rupeverse::Settings;
    use rupeverse::consts::SIM_TICK_MS;
    use rupeverse::golf::{GolfEvent, GolfSession, TickInput};
    use rupeverse::platform::Metronome;
    use rupeverse::rhythm::{Showdown, ShowdownSummary};

    /// Frames allowed per shot before giving up on it
    const MAX_FLIGHT_TICKS: u32 = 2_000;

    /// Drag vectors the scripted golfer tries, in order
    const SHOTS: [(f32, f32); 6] = [
        (420.0, -380.0),
        (500.0, -300.0),
        (380.0, -420.0),
        (600.0, -200.0),
        (450.0, -350.0),
        (520.0, -260.0),
    ];

    pub fn play_golf(seed: u64, settings: &Settings) {
        let mut session = GolfSession::with_settings(seed, settings);

        for &(dx, dy) in &SHOTS {
            let aim = TickInput {
                drag: Some(Vec2::new(dx, dy)),
                release: true,
                ..Default::default()
            };
            session.update(SIM_TICK_MS as f32, &aim);

            let mut ticks = 0;
            while session.in_flight() && ticks < MAX_FLIGHT_TICKS {
                // Boost once the ball starts dropping
                let input = TickInput {
                    remote_control: session.ball.vel.y > 2.0,
                    ..Default::default()
                };
                session.update(SIM_TICK_MS as f32, &input);
                ticks += 1;
            }
            if session.in_flight() {
                session.reset_ball();
            }

            for event in session.drain_events() {
                match event {
                    GolfEvent::HoleComplete { hole, reward } => log::info!(
                        "Hole {} sunk: {} ({})",
                        hole + 1,
                        reward.tier.as_str(),
                        reward.flavor_text
                    ),
                    GolfEvent::ShotFailed => log::info!("Out of bounds"),
                    GolfEvent::ObstacleHit { kind, .. } => log::debug!("Hit {kind:?}"),
                    _ => {}
                }
            }
        }

        log::info!(
            "Golf done: {} shots, {} holes, pity x{:.1}",
            session.shots,
            session.holes_completed,
            session.rewards.pity_multiplier()
        );
    }

    pub fn play_showdown(seed: u64, settings: &Settings) -> ShowdownSummary {
        let mut showdown = Showdown::from_settings(Metronome::default(), settings).with_seed(seed);
        showdown.start();

        let mut frame = 0u32;
        loop {
            let intensity = showdown.frame();
            // Tap on strong frames, shake now and then regardless
            let result = if intensity > 0.85 && frame % 8 == 0 {
                showdown.tap()
            } else if frame % 45 == 0 {
                showdown.shake(Vec3::new(1.2, 1.1, 0.3))
            } else {
                None
            };
            if let (Some(result), Some(callout)) = (result, showdown.callout()) {
                if result.perfect {
                    log::debug!("{callout}");
                }
            }
            frame += 1;

            if let Some(summary) = showdown.advance(SIM_TICK_MS) {
                return summary;
            }
        }
    }
}
