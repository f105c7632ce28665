//! Front ends for the guard generator.
//!
//! `tsguard` turns files, directories or stdin into `.guard.ts` output;
//! `tsguard-server` answers line-delimited JSON requests on stdio. Both share
//! the option resolution, driver and reporting code in this crate.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod server;
pub mod tracing_config;
