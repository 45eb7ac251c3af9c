//! This module exposes the types shared between tables, actions and gateways.

pub mod action;
pub mod clause;
pub mod data_action;
pub mod gateway;
pub mod query;
pub mod table;
pub mod value;
