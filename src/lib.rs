pub mod auth;
pub mod demo;
pub mod error;
pub mod leads;
pub mod progress;
pub mod state;
pub mod template;
pub mod timeline;
pub mod types;
pub mod util;

pub use error::{CommandError, ErrorKind, StoreError};
pub use state::AppState;
pub use types::{Lead, NewLead, Stage, StageStatus, User, UserRole};
