//! Shared type definitions.
//!
//! Validated newtypes and closed enums used by the identity core and by
//! every UI surface that consumes it.

mod email;
mod id;
mod profile;
mod role;
mod session;

pub use email::{Email, EmailError};
pub use id::{AccountId, AccountIdError};
pub use profile::{PLACEHOLDER_IMAGE_URL, Profile};
pub use role::{Role, RoleTagError};
pub use session::SessionAccount;
