pub mod drag;
pub mod geometry;
pub mod host;
pub mod settings;
pub mod task_list;

pub use drag::*;
pub use geometry::*;
pub use host::*;
pub use settings::*;
pub use task_list::*;
