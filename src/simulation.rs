use crate::builders::{build_frame, InitStrategy};
use crate::cell::Cell;
use crate::error::PersistError;
use crate::frame::Frame;
use crate::persist::create_persister;
use log::{debug, info};
use serde::Deserialize;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// A Game of Life simulation.
/// Holds every generation computed so far, starting with the initial frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    frames: Vec<Frame>,
}

impl Simulation {
    /// Creates a new simulation starting from the given frame.
    pub fn new(initial: Frame) -> Simulation {
        Simulation {
            frames: vec![initial],
        }
    }

    /// Creates a simulation from an existing history of frames.
    ///
    /// All frames must have the same dimensions.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Simulation, PersistError> {
        let first = frames.first().ok_or(PersistError::EmptySimulation)?;
        let expected = (first.rows(), first.cols());

        if let Some(frame) = frames
            .iter()
            .find(|frame| (frame.rows(), frame.cols()) != expected)
        {
            return Err(PersistError::DimensionMismatch {
                expected,
                found: (frame.rows(), frame.cols()),
            });
        }

        Ok(Simulation { frames })
    }

    /// The latest generation.
    pub fn current(&self) -> &Frame {
        // A simulation always holds at least its initial frame
        &self.frames[self.frames.len() - 1]
    }

    /// The number of the latest generation, the initial frame being generation 0.
    pub fn generation(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn frame(&self, generation: usize) -> Option<&Frame> {
        self.frames.get(generation)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Computes the next generation and appends it to the history.
    ///
    /// A dead cell with exactly 3 live neighbours is born, a live cell with 2 or 3 survives,
    /// every other cell is dead in the next generation.
    pub fn step(&mut self) -> &Frame {
        let current = self.current();
        let (rows, cols) = (current.rows(), current.cols());

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                let alive = current.get(row, col).is_some_and(Cell::is_alive);
                let neighbors = current.live_neighbors(row, col);
                let next = match (alive, neighbors) {
                    (true, 2) | (true, 3) => true,
                    (false, 3) => true,
                    _ => false,
                };
                Cell::new(next)
            })
            .collect();
        let next = Frame::from_cells(rows, cols, cells);

        self.frames.push(next);
        debug!(
            "Generation {} has a population of {}",
            self.generation(),
            self.current().population()
        );

        self.current()
    }

    /// Advances the simulation by the given number of generations.
    pub fn run(&mut self, generations: usize) -> &Frame {
        for _ in 0..generations {
            self.step();
        }
        self.current()
    }

    /// Whether the last step left the frame unchanged.
    ///
    /// This is the case for still lifes and for extinct populations.
    pub fn is_stable(&self) -> bool {
        match self.frames.len() {
            0 | 1 => false,
            n => self.frames[n - 1] == self.frames[n - 2],
        }
    }

    /// Draws the current generation to the console.
    pub fn draw(&self) -> io::Result<()> {
        self.current().draw(self.generation())
    }
}

fn default_rows() -> usize {
    50
}

fn default_cols() -> usize {
    50
}

fn default_p_alive() -> f64 {
    0.3
}

fn default_generations() -> usize {
    100
}

/// Configuration for running a random simulation, usually read from a JSON file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// The probability of a cell being alive in the initial frame.
    #[serde(default = "default_p_alive")]
    pub p_alive: f64,
    /// The seed for the random number generator.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// The file to save the simulation to. If `None`, nothing is saved.
    #[serde(default)]
    pub output: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            rows: default_rows(),
            cols: default_cols(),
            p_alive: default_p_alive(),
            seed: 0,
            generations: default_generations(),
            output: None,
        }
    }
}

impl SimulationConfig {
    /// Reads a configuration from a JSON file. Missing fields take their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, PersistError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn strategy(&self) -> InitStrategy {
        InitStrategy::Random {
            rows: self.rows,
            cols: self.cols,
            p_alive: self.p_alive,
            seed: self.seed,
        }
    }
}

/// Runs a simulation as described by the configuration and saves it to `config.output`.
pub fn run_config(config: &SimulationConfig) -> Result<Simulation, Box<dyn Error>> {
    let frame = build_frame(config.strategy())?;
    let mut simulation = Simulation::new(frame);

    simulation.run(config.generations);
    info!(
        "Ran {} generations, final population is {}",
        simulation.generation(),
        simulation.current().population()
    );

    let mut persister = create_persister(config.output.clone())?;
    persister.save(&simulation)?;

    Ok(simulation)
}
