//! Tables shipped with the library.

mod user_roles;

pub use self::user_roles::{UserRole, UserRolesTable};
