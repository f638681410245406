use crate::cell::Cell;
use crate::error::BuildError;
use crate::frame::Frame;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Example file for testing and getting started. See [`InitStrategy::File`].
pub const EXAMPLE_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/example.golh");

/// How the cells of a new frame are populated.
#[derive(Clone, Debug, PartialEq)]
pub enum InitStrategy {
    /// Every cell is dead.
    Dead { rows: usize, cols: usize },
    /// Every cell is set to `alive`.
    Value {
        rows: usize,
        cols: usize,
        alive: bool,
    },
    /// Every cell is alive with probability `p_alive`.
    /// The same `seed` always produces the same frame.
    Random {
        rows: usize,
        cols: usize,
        p_alive: f64,
        seed: u64,
    },
    /// The frame is read from a `.golh` file.
    File { path: PathBuf },
}

/// Builds a frame with the given initialization strategy.
///
/// # Examples
/// ```
/// use game_of_life::{build_frame, InitStrategy, EXAMPLE_FILE};
///
/// // A 100x100 frame with all cells dead
/// let frame = build_frame(InitStrategy::Value { rows: 100, cols: 100, alive: false }).unwrap();
/// assert_eq!(frame.population(), 0);
///
/// // A 100x100 frame where ~30% of cells are alive
/// let frame = build_frame(InitStrategy::Random { rows: 100, cols: 100, p_alive: 0.3, seed: 7 }).unwrap();
/// assert!(frame.population() > 0);
///
/// // The example file bundled with this crate
/// let frame = build_frame(InitStrategy::File { path: EXAMPLE_FILE.into() }).unwrap();
/// assert!(frame.population() > 0);
/// ```
pub fn build_frame(strategy: InitStrategy) -> Result<Frame, BuildError> {
    match &strategy {
        InitStrategy::Dead { rows, cols }
        | InitStrategy::Value { rows, cols, .. }
        | InitStrategy::Random { rows, cols, .. } => check_size(*rows, *cols)?,
        InitStrategy::File { .. } => {}
    }

    let frame = match &strategy {
        InitStrategy::Dead { rows, cols } => build_frame_value(*rows, *cols, false),
        InitStrategy::Value { rows, cols, alive } => build_frame_value(*rows, *cols, *alive),
        InitStrategy::Random {
            rows,
            cols,
            p_alive,
            seed,
        } => build_frame_random(*rows, *cols, *p_alive, *seed)?,
        InitStrategy::File { path } => build_frame_file(path)?,
    };

    debug!(
        "Built {}x{} frame from {:?}",
        frame.rows(),
        frame.cols(),
        strategy
    );

    Ok(frame)
}

fn check_size(rows: usize, cols: usize) -> Result<(), BuildError> {
    match rows.checked_mul(cols) {
        Some(_) => Ok(()),
        None => Err(BuildError::TooLarge { rows, cols }),
    }
}

fn build_frame_value(rows: usize, cols: usize, alive: bool) -> Frame {
    Frame::filled(rows, cols, alive)
}

fn build_frame_random(
    rows: usize,
    cols: usize,
    p_alive: f64,
    seed: u64,
) -> Result<Frame, BuildError> {
    // Also rejects NaN
    if !(0.0..=1.0).contains(&p_alive) {
        return Err(BuildError::InvalidProbability(p_alive));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let cells = (0..rows * cols)
        .map(|_| Cell::new(rng.gen_bool(p_alive)))
        .collect();

    Ok(Frame::from_cells(rows, cols, cells))
}

fn build_frame_file(path: &Path) -> Result<Frame, BuildError> {
    let contents = fs::read_to_string(path)?;
    Ok(Frame::parse(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_building_a_dead_frame_all_cells_are_dead() {
        let frame = build_frame(InitStrategy::Dead { rows: 10, cols: 20 }).unwrap();

        assert_eq!(frame.rows(), 10);
        assert_eq!(frame.cols(), 20);
        for row in 0..frame.rows() {
            for col in 0..frame.cols() {
                assert!(!frame.cell(row, col).unwrap().is_alive());
            }
        }
    }

    #[test]
    fn when_building_a_frame_with_a_value_all_cells_have_that_value() {
        let frame = build_frame(InitStrategy::Value {
            rows: 10,
            cols: 20,
            alive: true,
        })
        .unwrap();

        assert_eq!(frame.rows(), 10);
        assert_eq!(frame.cols(), 20);
        assert_eq!(frame.population(), 200);
    }

    #[test]
    fn when_building_a_frame_without_rows_it_has_no_cols() {
        let frame = build_frame(InitStrategy::Value {
            rows: 0,
            cols: 20,
            alive: true,
        })
        .unwrap();

        assert_eq!(frame.rows(), 0);
        assert_eq!(frame.cols(), 0);
    }

    #[test]
    fn when_building_a_random_frame_with_the_same_seed_the_frames_are_equal() {
        let strategy = InitStrategy::Random {
            rows: 30,
            cols: 30,
            p_alive: 0.5,
            seed: 42,
        };

        let first = build_frame(strategy.clone()).unwrap();
        let second = build_frame(strategy).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn when_building_a_random_frame_roughly_the_given_share_of_cells_is_alive() {
        let frame = build_frame(InitStrategy::Random {
            rows: 100,
            cols: 100,
            p_alive: 0.3,
            seed: 0,
        })
        .unwrap();

        let population = frame.population();
        assert!(
            (2500..=3500).contains(&population),
            "population was {}",
            population
        );
    }

    #[test]
    fn when_building_a_random_frame_with_probability_zero_or_one_the_frame_is_uniform() {
        let dead = build_frame(InitStrategy::Random {
            rows: 5,
            cols: 5,
            p_alive: 0.0,
            seed: 1,
        })
        .unwrap();
        let alive = build_frame(InitStrategy::Random {
            rows: 5,
            cols: 5,
            p_alive: 1.0,
            seed: 1,
        })
        .unwrap();

        assert_eq!(dead.population(), 0);
        assert_eq!(alive.population(), 25);
    }

    #[test]
    fn when_building_a_random_frame_with_an_invalid_probability_an_error_is_returned() {
        for p_alive in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let result = build_frame(InitStrategy::Random {
                rows: 5,
                cols: 5,
                p_alive,
                seed: 1,
            });

            assert!(matches!(result, Err(BuildError::InvalidProbability(_))));
        }
    }

    #[test]
    fn when_building_a_frame_whose_cell_count_overflows_an_error_is_returned() {
        let rows = usize::MAX / 2 + 1;
        let strategies = [
            InitStrategy::Dead { rows, cols: 2 },
            InitStrategy::Value {
                rows,
                cols: 2,
                alive: true,
            },
            InitStrategy::Random {
                rows,
                cols: 2,
                p_alive: 0.5,
                seed: 0,
            },
        ];

        for strategy in strategies {
            assert!(matches!(
                build_frame(strategy),
                Err(BuildError::TooLarge { cols: 2, .. })
            ));
        }
    }

    #[test]
    fn when_building_a_frame_from_the_example_file_it_is_parsed() {
        let frame = build_frame(InitStrategy::File {
            path: EXAMPLE_FILE.into(),
        })
        .unwrap();

        assert_eq!(frame.rows(), 10);
        assert_eq!(frame.cols(), 10);
        assert_eq!(frame.population(), 5);
    }

    #[test]
    fn when_building_a_frame_from_a_missing_file_an_io_error_is_returned() {
        let result = build_frame(InitStrategy::File {
            path: "/this/file/does/not/exist.golh".into(),
        });

        assert!(matches!(result, Err(BuildError::Io(_))));
    }
}
