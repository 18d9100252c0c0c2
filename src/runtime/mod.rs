pub mod lifetime;
pub mod sweeper;

pub use lifetime::{AppContext, listen_for_shutdown, prepare_startup};
pub use sweeper::{ExpirySweeper, SweeperHandle};
