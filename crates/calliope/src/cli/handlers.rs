//! CLI command handlers.

use calliope_content::{BackendCapability, ContentStudio};
use calliope_core::{FrequencySettings, PersonaAttributes, Platform, PostCondition, parse_month};
use calliope_error::CalliopeResult;
use calliope_interface::BackendKind;
use calliope_storage::FileStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Build a studio from the environment: enabled provider clients plus an
/// optional file-backed document store.
fn studio_from_env(
    capability: &BackendCapability,
    data_dir: Option<&Path>,
) -> CalliopeResult<ContentStudio> {
    let mut builder = ContentStudio::builder();

    #[cfg(feature = "claude")]
    if capability.enabled(BackendKind::Claude) {
        match calliope_models::ClaudeClient::from_env() {
            Ok(client) => builder = builder.backend(Arc::new(client)),
            Err(error) => warn!(%error, "Claude enabled but client setup failed"),
        }
    }
    #[cfg(feature = "gemini")]
    if capability.enabled(BackendKind::Gemini) {
        match calliope_models::GeminiClient::from_env() {
            Ok(client) => builder = builder.backend(Arc::new(client)),
            Err(error) => warn!(%error, "Gemini enabled but client setup failed"),
        }
    }

    if let Some(dir) = data_dir {
        let store = FileStore::new(dir)?;
        builder = builder.documents(Arc::new(store));
    }

    Ok(builder.build())
}

/// Log which APIs the environment enables, mock mode otherwise.
fn log_api_mode(capability: &BackendCapability) {
    if capability.enabled(BackendKind::Claude) {
        info!("Claude API enabled (articles, style learning)");
    } else {
        info!("Claude API disabled (using mock data)");
    }
    if capability.enabled(BackendKind::Gemini) {
        info!("Gemini API enabled (calendars, post generation)");
    } else {
        info!("Gemini API disabled (using mock data)");
    }
}

/// Generate and print a monthly calendar.
pub async fn run_calendar(
    month: &str,
    x_per_day: Option<u32>,
    threads_per_day: Option<u32>,
    data_dir: Option<&Path>,
) -> CalliopeResult<()> {
    let start = parse_month(month)?;
    let mut settings = FrequencySettings::default();
    if let Some(x) = x_per_day {
        settings.x_per_day = x;
    }
    if let Some(threads) = threads_per_day {
        settings.threads_per_day = threads;
    }

    let capability = BackendCapability::from_env();
    log_api_mode(&capability);
    let studio = studio_from_env(&capability, data_dir)?;

    let calendar = studio
        .generate_calendar(&capability, start, &settings, None)
        .await?;
    info!(
        posts = calendar.value.posts.len(),
        origin = %calendar.origin,
        "calendar generated"
    );
    print_json(&calendar.value)
}

/// Generate and print a batch of posts for one condition.
pub async fn run_posts(
    platform: Platform,
    category: String,
    idea: String,
    purpose: String,
    hashtags: String,
    count: usize,
    data_dir: Option<&Path>,
) -> CalliopeResult<()> {
    let condition = PostCondition {
        category,
        content_idea: idea,
        purpose,
        hashtags,
    };
    let capability = BackendCapability::from_env();
    log_api_mode(&capability);
    let studio = studio_from_env(&capability, data_dir)?;

    let results = studio
        .generate_posts(&capability, platform, &[condition], count, None)
        .await?;
    for (category, batch) in &results {
        info!(category = %category, count = batch.value.len(), origin = %batch.origin, "posts generated");
        print_json(&batch.value)?;
    }
    Ok(())
}

/// Generate and print a persona description.
pub async fn run_persona(
    attributes: PersonaAttributes,
    data_dir: Option<&Path>,
) -> CalliopeResult<()> {
    let capability = BackendCapability::from_env();
    log_api_mode(&capability);
    let studio = studio_from_env(&capability, data_dir)?;

    let persona = studio.generate_persona(&capability, &attributes).await?;
    info!(origin = %persona.origin, "persona generated");
    println!("{}", persona.value);
    Ok(())
}

/// Generate and print a month of NOTE article ideas.
pub async fn run_note_ideas(month: &str, data_dir: Option<&Path>) -> CalliopeResult<()> {
    let start = parse_month(month)?;
    let capability = BackendCapability::from_env();
    log_api_mode(&capability);
    let studio = studio_from_env(&capability, data_dir)?;

    let ideas = studio
        .generate_note_ideas(&capability, start, &FrequencySettings::default())
        .await?;
    info!(count = ideas.value.ideas.len(), origin = %ideas.origin, "note ideas generated");
    print_json(&ideas.value)
}

/// Print the backend capability derived from the environment.
pub async fn run_capability() -> CalliopeResult<()> {
    let capability = BackendCapability::from_env();
    log_api_mode(&capability);
    println!(
        "claude: {}\ngemini: {}",
        capability.enabled(BackendKind::Claude),
        capability.enabled(BackendKind::Gemini),
    );
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> CalliopeResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| calliope_error::JsonError::new(format!("Failed to render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}
