//! Library components of the `roster` command line tool.

pub mod logging;
pub mod pipeline;
