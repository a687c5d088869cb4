pub mod paths;
pub mod recovery;
pub mod settings_io;
pub mod task_store;
pub mod watcher;
