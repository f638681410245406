use game_of_life::format::parse_frames;
use game_of_life::{
    build_frame, create_persister, run_config, FrameWriter, InitStrategy, JsonPersister,
    Persister, Simulation, SimulationConfig, EXAMPLE_FILE,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

fn test_data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/test_data")
        .join(name)
}

fn temp_file(extension: &str) -> PathBuf {
    env::temp_dir().join(format!("game_of_life_{}.{}", Uuid::new_v4(), extension))
}

#[test]
fn when_stepping_a_blinker_the_generations_match_the_recorded_stream() {
    let contents = fs::read_to_string(test_data("blinker.golh")).unwrap();
    let recorded = parse_frames(&contents).unwrap();

    let mut simulation = Simulation::new(recorded[0].clone());
    simulation.step();

    assert_eq!(simulation.frames(), recorded.as_slice());
}

#[test]
fn when_writing_a_simulation_with_the_frame_writer_the_stream_can_be_replayed() {
    let mut simulation = Simulation::new(
        build_frame(InitStrategy::File {
            path: EXAMPLE_FILE.into(),
        })
        .unwrap(),
    );
    simulation.run(8);

    let path = temp_file("golh");
    let file = fs::File::create(&path).unwrap();
    let current = simulation.current();
    let mut writer = FrameWriter::new(file, current.rows(), current.cols());
    for frame in simulation.frames() {
        writer.write_frame(frame).unwrap();
    }
    writer.flush().unwrap();

    let replayed = parse_frames(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        Simulation::from_frames(replayed).unwrap(),
        simulation
    );

    fs::remove_file(path).unwrap();
}

#[test]
fn when_a_glider_runs_for_eight_generations_it_keeps_its_population() {
    let mut simulation = Simulation::new(
        build_frame(InitStrategy::File {
            path: EXAMPLE_FILE.into(),
        })
        .unwrap(),
    );

    simulation.run(8);

    assert_eq!(simulation.current().population(), 5);
    assert_eq!(
        simulation.current().live_cells(),
        vec![(2, 3), (3, 4), (4, 2), (4, 3), (4, 4)]
    );
}

#[test]
fn when_running_a_config_file_the_simulation_is_saved_and_can_be_loaded() {
    let output = temp_file("json");
    let mut config = SimulationConfig::from_file(test_data("config.json")).unwrap();
    config.output = Some(output.to_str().unwrap().to_string());

    let simulation = run_config(&config).unwrap();

    let mut persister = JsonPersister::new();
    persister.open(&output).unwrap();
    let loaded = persister.load().unwrap();

    assert_eq!(loaded, simulation);
    assert_eq!(loaded.generation(), 10);
    assert_eq!(loaded.current().rows(), 20);
    assert_eq!(loaded.current().cols(), 30);

    fs::remove_file(output).unwrap();
}

#[test]
fn when_appending_generations_one_by_one_the_history_is_persisted() {
    let output = temp_file("json");
    let mut persister = create_persister(Some(output.to_str().unwrap().to_string())).unwrap();
    let mut simulation = Simulation::new(
        build_frame(InitStrategy::Random {
            rows: 12,
            cols: 12,
            p_alive: 0.4,
            seed: 3,
        })
        .unwrap(),
    );

    persister.append(simulation.current()).unwrap();
    for _ in 0..5 {
        let frame = simulation.step().clone();
        persister.append(&frame).unwrap();
    }
    persister.flush().unwrap();

    let mut reopened = JsonPersister::new();
    reopened.open(&output).unwrap();
    assert_eq!(reopened.load().unwrap(), simulation);

    fs::remove_file(output).unwrap();
}
