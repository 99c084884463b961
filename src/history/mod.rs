mod coordinator;
mod location;
mod stack;
mod token;

pub use coordinator::HistoryCoordinator;
pub use location::{LOCATION_PREFIX, parse_location};
pub use stack::HistoryStack;
pub use token::{NAV_SEQ_MODULO, NavToken, is_forward_nav, wrap_idx};
