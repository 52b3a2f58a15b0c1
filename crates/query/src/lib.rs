//! Finderdb Query - Derived query engine for the finderdb record store.
//!
//! This crate provides the query pipeline for finder-method derived queries:
//!
//! - `descriptor`: Parser for method-name-style query descriptors
//! - `ast`: Predicate and operator definitions
//! - `planner`: Argument binding and executable plan construction
//! - `page`: Page requests, page windows, and page results
//! - `executor`: Query execution operators (filter, sort, limit, page)
//! - `sort`: Sort specifications
//! - `trace`: Optional execution tracing hooks

#![no_std]

extern crate alloc;

pub mod ast;
pub mod descriptor;
pub mod executor;
pub mod page;
pub mod planner;
pub mod sort;
pub mod trace;
