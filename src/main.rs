//! Order Fix entry point
//!
//! The browser build starts from `platform::web`. Natively this runs a
//! headless game driven by the autopilot and prints a summary.
//!
//! Usage: `order-fix [seconds] [seed] [unlock-file]`
//!
//! Set `ORDER_FIX_TUNING` to a JSON file to override balance values.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use order_fix::persistence::file::JsonFileStore;
    use order_fix::sim::GameEvent;
    use order_fix::{LocalLeaderboard, MemoryStore, Session, Tuning, UnlockStore};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Order Fix (native) starting...");

    let mut args = std::env::args().skip(1);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let store: Box<dyn UnlockStore> = match args.next() {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    let tuning = match std::env::var("ORDER_FIX_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {path}: {e}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let mut session = Session::new(seed, tuning, store, Box::new(LocalLeaderboard::new()));
    session.input_mut().idle_mode = true;

    // Simulated 60 fps display
    let frame_dt = 1.0 / 60.0;
    let mut elapsed = 0.0;
    while elapsed < seconds && !session.state().is_game_over() {
        for event in session.update(frame_dt) {
            match event {
                GameEvent::StationUnlocked { edit } => {
                    log::info!("[{elapsed:6.1}s] Unlocked {} station", edit.as_str())
                }
                GameEvent::PowerUpActivated => log::info!("[{elapsed:6.1}s] Power-up active"),
                GameEvent::LifeLost { remaining } => {
                    log::info!("[{elapsed:6.1}s] Life lost, {remaining} left")
                }
                GameEvent::GameOver { final_score } => {
                    log::info!("[{elapsed:6.1}s] Game over with {final_score} points")
                }
                _ => {}
            }
        }
        elapsed += frame_dt;
    }

    let state = session.state();
    println!("\n=== Run summary (seed {seed}) ===");
    println!("Time played:      {:.1}s", state.stats.play_time);
    println!("Score:            {}", state.score);
    println!("Lives left:       {}", state.lives.remaining());
    println!("Orders completed: {}", state.stats.orders_completed);
    println!("Stations open:    {}/6", state.stations.unlocked_count());
    println!("Power-ups used:   {}", state.power_up.used_count);
    if let Some(rank) = session.last_rank() {
        println!("Rank:             {:?} (best {})", rank.rank, rank.best_score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start
}
