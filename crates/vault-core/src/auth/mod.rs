pub mod credentials;
pub mod role;

pub use credentials::{Credentials, extract_basic};
pub use role::{Role, resolve_role};
