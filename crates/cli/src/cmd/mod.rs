//! CLI subcommands

pub mod query;
