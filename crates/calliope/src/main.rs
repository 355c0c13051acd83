//! Calliope CLI binary.
//!
//! Command-line access to the generation studio:
//! - Generate monthly posting calendars and per-condition post batches
//! - Generate personas and NOTE article ideas
//! - Inspect which backends the environment enables

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use calliope_core::PersonaAttributes;
    use cli::{Cli, Commands, run_calendar, run_capability, run_note_ideas, run_persona, run_posts};

    // Local environment overrides, optional
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let data_dir = cli.data_dir.as_deref();

    // Execute the requested command
    match cli.command {
        Commands::Calendar {
            month,
            x_per_day,
            threads_per_day,
        } => {
            run_calendar(&month, x_per_day, threads_per_day, data_dir).await?;
        }

        Commands::Posts {
            platform,
            category,
            idea,
            purpose,
            hashtags,
            count,
        } => {
            run_posts(platform, category, idea, purpose, hashtags, count, data_dir).await?;
        }

        Commands::Persona {
            age_range,
            gender,
            occupation,
            interests,
            challenges,
            goals,
        } => {
            let attributes = PersonaAttributes {
                age_range,
                gender,
                occupation,
                interests,
                challenges,
                goals,
            };
            run_persona(attributes, data_dir).await?;
        }

        Commands::NoteIdeas { month } => {
            run_note_ideas(&month, data_dir).await?;
        }

        Commands::Capability => {
            run_capability().await?;
        }
    }

    Ok(())
}
