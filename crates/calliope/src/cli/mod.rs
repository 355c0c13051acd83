//! Command-line interface.

mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    run_calendar, run_capability, run_note_ideas, run_persona, run_posts,
};
