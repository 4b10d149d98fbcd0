mod assets;
mod explain;
mod features;
mod sequences;
mod types;

pub use assets::*;
pub use explain::*;
pub use features::*;
pub use sequences::*;
pub use types::*;
