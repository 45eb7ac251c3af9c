#![crate_name = "minicore_api"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # MiniCore API
//!
//! This crate exposes the types shared by `minicore-database` and by code extending it:
//! [`prelude::DataAction`], [`prelude::Value`], the [`prelude::Action`] and
//! [`prelude::Gateway`] traits and the error types.

#![doc(html_playground_url = "https://play.rust-lang.org")]

// makes the crate accessible as `minicore_api` in macros
extern crate self as minicore_api;

pub mod dbms;
pub mod error;
pub mod prelude;
