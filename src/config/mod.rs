mod global;
mod structs;

pub use global::{get_config, init_config};
pub use structs::*;
