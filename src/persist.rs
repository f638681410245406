use crate::error::PersistError;
use crate::format::{frame_from_rows, frame_to_rows};
use crate::frame::Frame;
use crate::simulation::Simulation;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Creates a persister for the given file.
///
/// If `filename` is `None`, nothing is persisted. Otherwise the file is created (or truncated)
/// right away.
pub fn create_persister(filename: Option<String>) -> Result<Box<dyn Persister>, PersistError> {
    match filename {
        None => Ok(Box::new(NoOpPersister {})),
        Some(filename) => {
            let mut persister = JsonPersister::new();
            persister.create(Path::new(&filename))?;
            Ok(Box::new(persister))
        }
    }
}

/// Stores the frames of a simulation.
///
/// `append` and `modify` only change the frames held in memory, `flush` writes them out.
/// `save` replaces the stored frames with a whole simulation and writes it out.
pub trait Persister: Send + Sync {
    /// Opens an existing simulation file.
    #[allow(unused_variables)]
    fn open(&mut self, path: &Path) -> Result<(), PersistError> {
        Ok(())
    }

    /// Creates an empty simulation file, truncating any existing one.
    #[allow(unused_variables)]
    fn create(&mut self, path: &Path) -> Result<(), PersistError> {
        Ok(())
    }

    #[allow(unused_variables)]
    fn append(&mut self, frame: &Frame) -> Result<(), PersistError> {
        Ok(())
    }

    /// Replaces frame `frame_no`, counting from 0.
    #[allow(unused_variables)]
    fn modify(&mut self, frame_no: usize, frame: &Frame) -> Result<(), PersistError> {
        Ok(())
    }

    #[allow(unused_variables)]
    fn save(&mut self, simulation: &Simulation) -> Result<(), PersistError> {
        Ok(())
    }

    fn flush(&self) -> Result<(), PersistError> {
        Ok(())
    }

    fn load(&self) -> Result<Simulation, PersistError> {
        Err(PersistError::EmptySimulation)
    }
}

/// A persister that stores nothing.
pub struct NoOpPersister;
impl Persister for NoOpPersister {}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
struct SimulationRecord {
    id: String,
    rows: usize,
    cols: usize,
    // Each frame is a list of rows such as ".OO."
    frames: Vec<Vec<String>>,
}

impl SimulationRecord {
    fn new() -> SimulationRecord {
        SimulationRecord {
            id: Uuid::new_v4().to_string(),
            rows: 0,
            cols: 0,
            frames: Vec::new(),
        }
    }

    fn check_dimensions(&self, frame: &Frame) -> Result<(), PersistError> {
        // The first frame decides the dimensions of the simulation
        if self.frames.is_empty() {
            return Ok(());
        }

        let found = (frame.rows(), frame.cols());
        if found != (self.rows, self.cols) {
            warn!(
                "Rejected a {}x{} frame for the {}x{} simulation {}",
                found.0, found.1, self.rows, self.cols, self.id
            );
            return Err(PersistError::DimensionMismatch {
                expected: (self.rows, self.cols),
                found,
            });
        }

        Ok(())
    }

    fn decode(&self) -> Result<Vec<Frame>, PersistError> {
        self.frames
            .iter()
            .map(|rows| frame_from_rows(self.rows, self.cols, rows).map_err(PersistError::from))
            .collect()
    }
}

/// Persists simulations as pretty-printed JSON files.
pub struct JsonPersister {
    path: Option<PathBuf>,
    record: Option<SimulationRecord>,
}

impl JsonPersister {
    pub fn new() -> JsonPersister {
        JsonPersister {
            path: None,
            record: None,
        }
    }

    /// The file this persister writes to, if one was opened or created.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn frame_count(&self) -> usize {
        self.record.as_ref().map_or(0, |record| record.frames.len())
    }

    fn record_mut(&mut self) -> Result<&mut SimulationRecord, PersistError> {
        self.record.as_mut().ok_or(PersistError::NotOpen)
    }

    fn write(&self) -> Result<(), PersistError> {
        match (&self.path, &self.record) {
            (Some(path), Some(record)) => write_record(path, record),
            _ => Err(PersistError::NotOpen),
        }
    }
}

fn write_record(path: &Path, record: &SimulationRecord) -> Result<(), PersistError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;

    Ok(())
}

impl Default for JsonPersister {
    fn default() -> Self {
        JsonPersister::new()
    }
}

impl Persister for JsonPersister {
    fn open(&mut self, path: &Path) -> Result<(), PersistError> {
        let file = File::open(path)?;
        let record: SimulationRecord = serde_json::from_reader(BufReader::new(file))?;

        // Fail on a corrupt file now rather than on the first load
        record.decode()?;

        info!(
            "Opened simulation {} with {} frames from {}",
            record.id,
            record.frames.len(),
            path.display()
        );
        self.path = Some(path.to_path_buf());
        self.record = Some(record);

        Ok(())
    }

    fn create(&mut self, path: &Path) -> Result<(), PersistError> {
        let record = SimulationRecord::new();
        write_record(path, &record)?;

        self.path = Some(path.to_path_buf());
        self.record = Some(record);

        Ok(())
    }

    fn append(&mut self, frame: &Frame) -> Result<(), PersistError> {
        let record = self.record_mut()?;
        record.check_dimensions(frame)?;

        if record.frames.is_empty() {
            record.rows = frame.rows();
            record.cols = frame.cols();
        }
        record.frames.push(frame_to_rows(frame));

        Ok(())
    }

    fn modify(&mut self, frame_no: usize, frame: &Frame) -> Result<(), PersistError> {
        let record = self.record_mut()?;

        let len = record.frames.len();
        if frame_no >= len {
            return Err(PersistError::FrameIndex {
                index: frame_no,
                len,
            });
        }

        record.check_dimensions(frame)?;
        record.frames[frame_no] = frame_to_rows(frame);

        Ok(())
    }

    fn save(&mut self, simulation: &Simulation) -> Result<(), PersistError> {
        let (path, id) = match (&self.path, &self.record) {
            (Some(path), Some(record)) => (path, record.id.clone()),
            _ => return Err(PersistError::NotOpen),
        };

        let current = simulation.current();
        let record = SimulationRecord {
            id,
            rows: current.rows(),
            cols: current.cols(),
            frames: simulation.frames().iter().map(frame_to_rows).collect(),
        };

        // The stored frames are only replaced once they are on disk
        write_record(path, &record)?;
        info!("Saved {} frames to {}", record.frames.len(), path.display());
        self.record = Some(record);

        Ok(())
    }

    fn flush(&self) -> Result<(), PersistError> {
        self.write()
    }

    fn load(&self) -> Result<Simulation, PersistError> {
        let record = self.record.as_ref().ok_or(PersistError::NotOpen)?;
        Simulation::from_frames(record.decode()?)
    }
}
