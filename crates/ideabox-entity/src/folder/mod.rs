//! Folder entities and derived path values.

pub mod model;
pub mod path;

pub use model::{CreateFolder, Folder};
pub use path::{InvalidSegment, PathDetails, PathResolution, parse_path_segments};
