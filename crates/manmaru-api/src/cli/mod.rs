//! CLI command definitions for the `manmaru` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;

use clap::{Parser, Subcommand};

/// Chat relay between a browser and a local Ollama model.
#[derive(Parser)]
#[command(name = "manmaru", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP relay server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "10001", env = "PORT")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Chat with the model from the terminal.
    Chat {
        /// Persona to start with (normal or training).
        #[arg(long, default_value = "normal")]
        mode: String,
    },
}

impl Cli {
    /// Log filter derived from `--quiet` and `-v`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,manmaru=debug",
            _ => "trace",
        }
    }
}
