//! Config layer: where files live, the sshc settings, and the ssh config store.
pub mod path;
pub mod settings;
pub mod store;
pub mod io;

pub use io::{load_store, save_store};
pub use settings::Settings;
pub use store::ConfigStore;
