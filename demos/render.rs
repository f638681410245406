use game_of_life::{build_frame, InitStrategy, EXAMPLE_FILE};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let frame = build_frame(InitStrategy::File {
        path: EXAMPLE_FILE.into(),
    })?;
    frame.draw(0)?;

    Ok(())
}
