pub mod persist;
pub mod state;

pub use persist::StateStore;
pub use state::AppState;
