//! Small helpers shared by the CLI modules

pub mod format;
pub mod io;
