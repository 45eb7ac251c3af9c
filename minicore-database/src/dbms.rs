//! This module exposes the tables, the default actions and the statement builder.

pub mod action;
pub mod default_table;
pub mod statement;
pub mod table;
