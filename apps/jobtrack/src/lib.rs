//! Job-application tracker and résumé matcher client.
//!
//! Controllers hold explicit state, the `render_*` functions project it into
//! view models, and the `jobtrack` binary prints those views in a terminal.

pub mod api_client;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interaction;
pub mod matching;
pub mod models;
pub mod state;
pub mod tabs;
pub mod tracker;

#[cfg(test)]
mod testing;
