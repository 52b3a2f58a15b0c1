//! Finderdb Repo - Repository facade for the finderdb record store.
//!
//! This crate ties the storage and query layers together behind a
//! repository surface:
//!
//! - `Repository`: save/find/delete/count/exists plus derived finder queries
//!   (`find_by("findByNameAndAge", ...)`), sorted and paged lookups
//! - `Example` / `Matcher`: example-based querying with per-field comparators
//!   and an ignore set

#![no_std]

extern crate alloc;

mod example;
mod repository;

pub use example::{Comparator, Example, Matcher};
pub use repository::Repository;
