//! CLI command definitions.

use calliope_core::Platform;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Calliope - content generation with backend fallback
#[derive(Parser, Debug)]
#[command(name = "calliope")]
#[command(about = "Generate posting calendars, posts, and NOTE material", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for persisted documents; omit to skip persistence
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a monthly posting calendar
    Calendar {
        /// Target month as YYYY-MM
        month: String,

        /// X posts per day
        #[arg(long)]
        x_per_day: Option<u32>,

        /// Threads posts per day
        #[arg(long)]
        threads_per_day: Option<u32>,
    },

    /// Generate a batch of posts for one condition
    Posts {
        /// Target platform (x or threads)
        #[arg(long, default_value = "x")]
        platform: Platform,

        /// Content category
        #[arg(long)]
        category: String,

        /// What the posts should communicate
        #[arg(long, default_value = "")]
        idea: String,

        /// Editorial purpose
        #[arg(long, default_value = "")]
        purpose: String,

        /// Space-separated hashtags
        #[arg(long, default_value = "")]
        hashtags: String,

        /// Number of posts to generate
        #[arg(long, default_value = "3")]
        count: usize,
    },

    /// Generate a target-reader persona description
    Persona {
        /// Age range, e.g. 30代前半
        #[arg(long)]
        age_range: Option<String>,

        /// Gender
        #[arg(long)]
        gender: Option<String>,

        /// Occupation
        #[arg(long)]
        occupation: Option<String>,

        /// Interests
        #[arg(long)]
        interests: Option<String>,

        /// Challenges and worries
        #[arg(long)]
        challenges: Option<String>,

        /// Goals
        #[arg(long)]
        goals: Option<String>,
    },

    /// Generate a month of NOTE article ideas
    NoteIdeas {
        /// Target month as YYYY-MM
        month: String,
    },

    /// Show which backends are enabled in the current environment
    Capability,
}
