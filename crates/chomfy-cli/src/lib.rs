//! Library components of the `chomfy` command-line host.

pub mod logging;
pub mod settings;
