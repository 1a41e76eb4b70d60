// Subcommand handlers. main.rs parses arguments, loads the dataset and
// dispatches here; each handler returns the rendered output.

pub mod lookup;
pub mod route;
