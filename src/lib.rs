//! # game_of_life
//!
//! Frames, frame builders and persistence for
//! [Conway's Game of Life](https://en.wikipedia.org/wiki/Conway%27s_Game_of_Life).

pub mod builders;
pub use builders::build_frame;
pub use builders::InitStrategy;
pub use builders::EXAMPLE_FILE;

pub mod error;
pub use error::BuildError;
pub use error::FrameError;
pub use error::ParseError;
pub use error::PersistError;

pub mod format;
pub use format::FrameWriter;

pub mod persist;
pub use persist::create_persister;
pub use persist::JsonPersister;
pub use persist::NoOpPersister;
pub use persist::Persister;

pub mod simulation;
pub use simulation::run_config;
pub use simulation::Simulation;
pub use simulation::SimulationConfig;

mod cell;
pub use cell::Cell;

mod frame;
pub use frame::Frame;
