pub mod simulated;
pub mod store;

pub use simulated::SimulatedProfileStore;
pub use store::{ProfileError, ProfileRecord, ProfileResult, ProfileStore};
