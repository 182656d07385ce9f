//! Navigation domain: point-to-point path search for pursuing entities.

mod path;
mod pathfinder;

pub use path::Path;
pub use pathfinder::{PathParams, find_path};
