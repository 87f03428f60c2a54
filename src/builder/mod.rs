//! Builder API for ergonomic navigator construction.
//!
//! This module provides a fluent builder for configuring navigators and the
//! `screen_enum!` macro for declaring screens with minimal boilerplate.

pub mod macros;
pub mod navigator;

pub use navigator::NavigatorBuilder;
