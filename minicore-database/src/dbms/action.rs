//! The default actions every [`crate::prelude::Table`] is created with.

mod delete;
mod insert;
mod select;
mod update;

pub use self::delete::DeleteAction;
pub use self::insert::InsertAction;
pub use self::select::SelectAction;
pub use self::update::UpdateAction;
