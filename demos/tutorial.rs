use game_of_life::{run_config, JsonPersister, Persister, SimulationConfig};
use std::env;
use std::error::Error;
use std::path::Path;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Optionally read the configuration from the JSON file given as first argument
    let mut config = match env::args().nth(1) {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    let output = config
        .output
        .get_or_insert_with(|| "/tmp/tutorial_simulation.json".to_string())
        .clone();

    let simulation = run_config(&config)?;

    // Replay the saved simulation from disk
    let mut persister = JsonPersister::new();
    persister.open(Path::new(&output))?;
    let replay = persister.load()?;

    for generation in 0..=replay.generation() {
        if let Some(frame) = replay.frame(generation) {
            frame.draw(generation)?;
            thread::sleep(Duration::from_millis(100));
        }
    }

    println!(
        "\nSimulation ran {} generations, stable at the end: {}",
        simulation.generation(),
        simulation.is_stable()
    );

    Ok(())
}
