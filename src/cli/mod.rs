//! CLI interface for VivaCore

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::auth::Role;

#[derive(Parser)]
#[command(name = "vivacore")]
#[command(version)]
#[command(about = "Patient and researcher portal for cardiac research follow-up", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default vivacore.toml in the current directory
    Init,

    /// Start the portal web server
    Serve {
        /// Host to bind to (defaults to the config value)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Sign in and store the session
    Login {
        #[arg(short, long, env = "VIVACORE_EMAIL")]
        email: String,

        #[arg(short, long, env = "VIVACORE_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(short, long, value_enum, default_value = "patient")]
        role: RoleArg,
    },

    /// Sign out and remove the stored session
    Logout,

    /// Show the signed-in identity
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the portal routes and who may open them
    Routes {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show where the signed-in identity would land when opening a path
    Check {
        /// Path to evaluate, e.g. /researcher/patients
        path: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Patient,
    Researcher,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Patient => Role::Patient,
            RoleArg::Researcher => Role::Researcher,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
