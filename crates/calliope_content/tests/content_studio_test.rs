//! Orchestrator tests against a scripted backend.

use async_trait::async_trait;
use calliope_content::{
    BackendCapability, ContentStudio, OFFLINE_CHAT_MESSAGE, TaskKind, TaskRouting,
};
use calliope_core::{
    FrequencySettings, GuideKind, NoteKind, Origin, PersonaAttributes, Platform, PostCondition,
    StyleKind,
};
use calliope_error::{BackendError, CalliopeResult};
use calliope_interface::{
    BackendKind, Caller, CompletionRequest, CredentialStore, DocumentStore, ProviderTokens,
    TextBackend,
};
use calliope_storage::{InMemoryCredentials, MemoryStore};
use chrono::{Datelike, NaiveDate};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A backend that replays a scripted sequence of responses.
struct ScriptedBackend {
    kind: BackendKind,
    script: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedBackend {
    fn new(kind: BackendKind, script: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            kind,
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn complete(&self, _request: &CompletionRequest) -> CalliopeResult<String> {
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()));
        next.map_err(|message| BackendError::new(message).into())
    }

    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn march() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn condition() -> PostCondition {
    PostCondition {
        category: "HSP共感".to_string(),
        content_idea: "朝のリセット習慣".to_string(),
        purpose: "共感形成".to_string(),
        hashtags: "#HSP #AI活用".to_string(),
    }
}

/// One scripted calendar row per day of a window, as a JSON array.
fn window_json(year: i32, month: u32, days: std::ops::RangeInclusive<u32>) -> String {
    let rows: Vec<String> = days
        .map(|day| {
            format!(
                r##"{{"date":"{year}-{month:02}-{day:02}","day_of_week":"月","time":"07:30","platform":"X","category":"HSP共感","title_idea":"バックエンド案 {day}","purpose":"共感形成","hashtags":["#HSP"]}}"##
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}

#[tokio::test]
async fn every_task_is_total_without_backends() {
    let studio = ContentStudio::builder().build();
    let capability = BackendCapability::none();
    let settings = FrequencySettings::default();

    let calendar = studio
        .generate_calendar(&capability, march(), &settings, None)
        .await
        .unwrap();
    assert_eq!(calendar.origin, Origin::Mock);
    assert!(!calendar.value.posts.is_empty());

    let week = studio
        .generate_week(&capability, march(), 1, 7, &settings)
        .await
        .unwrap();
    assert_eq!(week.origin, Origin::Mock);

    let row = studio
        .regenerate_row(&capability, &week.value[0], None)
        .await
        .unwrap();
    assert_eq!(row.origin, Origin::Mock);

    let posts = studio
        .generate_posts(&capability, Platform::X, &[condition()], 3, None)
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "HSP共感");
    assert_eq!(posts[0].1.origin, Origin::Mock);
    assert_eq!(posts[0].1.value.len(), 3);

    let style = studio
        .analyze_style(&capability, StyleKind::XStyle, &["サンプル".to_string()])
        .await
        .unwrap();
    assert_eq!(style.origin, Origin::Mock);

    let persona = studio
        .generate_persona(&capability, &PersonaAttributes::default())
        .await
        .unwrap();
    assert_eq!(persona.origin, Origin::Mock);
    assert!(!persona.value.is_empty());

    let ideas = studio
        .generate_note_ideas(&capability, march(), &settings)
        .await
        .unwrap();
    assert_eq!(ideas.origin, Origin::Mock);
    assert_eq!(ideas.value.month, "2025-03");

    let article = studio
        .generate_article(&capability, NoteKind::Paid, "転職マニュアル", "", None)
        .await
        .unwrap();
    assert_eq!(article.origin, Origin::Mock);

    let revision = studio
        .brush_up_article(&capability, &article.value, "結論を先に")
        .await
        .unwrap();
    assert_eq!(revision.origin, Origin::Mock);

    let chat = studio
        .style_chat(&capability, GuideKind::X, "", "語尾を相談したい", &[])
        .await
        .unwrap();
    assert!(!chat.guide_updated);
    assert_eq!(chat.reply, OFFLINE_CHAT_MESSAGE);
}

#[tokio::test]
async fn march_mock_calendar_fills_every_slot() {
    let studio = ContentStudio::builder().build();
    let settings = FrequencySettings {
        x_per_day: 2,
        threads_per_day: 1,
        ..FrequencySettings::default()
    };

    let calendar = studio
        .generate_calendar(&BackendCapability::none(), march(), &settings, None)
        .await
        .unwrap();
    let posts = &calendar.value.posts;
    assert_eq!(posts.len(), 93);

    for day in 1..=31 {
        let of_day: Vec<_> = posts.iter().filter(|p| p.date.day() == day).collect();
        assert_eq!(of_day.len(), 3, "day {day}");
        let times: Vec<_> = of_day.iter().filter_map(|p| p.time.as_deref()).collect();
        assert!(times.contains(&"07:30"));
        assert!(times.contains(&"12:30"));
        assert!(times.contains(&"10:00"));
    }
    assert!(posts.windows(2).all(|w| w[0].date <= w[1].date));
}

#[tokio::test]
async fn calendar_windows_mix_backend_and_mock() {
    // February 2025: four exact 7-day windows. Window 1 and 3 come from the
    // backend, window 2 errors, window 4 returns garbage.
    let february = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let gemini = ScriptedBackend::new(
        BackendKind::Gemini,
        vec![
            Ok(window_json(2025, 2, 1..=7)),
            Err("rate limited".to_string()),
            Ok(window_json(2025, 2, 15..=21)),
            Ok("説明文だけで、構造化データはありません。".to_string()),
        ],
    );
    let studio = ContentStudio::builder().backend(gemini).build();
    let capability = BackendCapability::new(false, true);

    let calendar = studio
        .generate_calendar(&capability, february, &FrequencySettings::default(), None)
        .await
        .unwrap();
    assert_eq!(calendar.origin, Origin::Backend);

    let posts = &calendar.value.posts;
    assert!(posts.windows(2).all(|w| w[0].date <= w[1].date));

    // Every day of the month appears exactly once per expected slot count:
    // backend windows scripted one row per day, mock windows four per day.
    for day in 1..=28u32 {
        let count = posts.iter().filter(|p| p.date.day() == day).count();
        let backend_window = (1..=7).contains(&day) || (15..=21).contains(&day);
        assert_eq!(count, if backend_window { 1 } else { 4 }, "day {day}");
    }
    assert!(posts.iter().any(|p| p.title_idea.starts_with("バックエンド案")));

    // Weekday labels on backend rows are recomputed, not trusted.
    let feb_1 = posts.iter().find(|p| p.date.day() == 1).unwrap();
    assert_eq!(feb_1.day_of_week, "土");
}

#[tokio::test]
async fn backend_posts_get_fresh_counts_and_truncation() {
    let long_content = "あ".repeat(160);
    let claude = ScriptedBackend::new(
        BackendKind::Claude,
        vec![Ok(format!(
            r##"[{{"content":"{long_content}","hashtags":["#HSP"]}}]"##
        ))],
    );
    let studio = ContentStudio::builder().backend(claude).build();
    let capability = BackendCapability::new(true, false);

    let posts = studio
        .generate_posts(&capability, Platform::X, &[condition()], 1, None)
        .await
        .unwrap();
    let batch = &posts[0].1;
    assert_eq!(batch.origin, Origin::Backend);
    assert_eq!(*batch.value[0].character_count(), 140);
    assert!(batch.value[0].content().ends_with("..."));
    assert_eq!(batch.value[0].category(), "HSP共感");
}

#[tokio::test]
async fn garbage_backend_output_falls_back_per_condition() {
    let claude = ScriptedBackend::new(
        BackendKind::Claude,
        vec![
            Ok("ここにはJSONがありません".to_string()),
            Ok(r#"[{"content":"本文です","hashtags":[]}]"#.to_string()),
        ],
    );
    let studio = ContentStudio::builder().backend(claude).build();
    let capability = BackendCapability::new(true, false);

    let mut second = condition();
    second.category = "マインド".to_string();
    let posts = studio
        .generate_posts(
            &capability,
            Platform::Threads,
            &[condition(), second],
            2,
            None,
        )
        .await
        .unwrap();

    // First condition fell back, second succeeded; order follows input.
    assert_eq!(posts[0].0, "HSP共感");
    assert_eq!(posts[0].1.origin, Origin::Mock);
    assert_eq!(posts[0].1.value.len(), 2);
    assert_eq!(posts[1].0, "マインド");
    assert_eq!(posts[1].1.origin, Origin::Backend);
}

#[tokio::test]
async fn repairable_backend_json_is_accepted() {
    let claude = ScriptedBackend::new(
        BackendKind::Claude,
        vec![Ok(
            "```json\n[{\"content\":\"修復可能です\",\"hashtags\":[\"#HSP\"]},]\n```".to_string(),
        )],
    );
    let studio = ContentStudio::builder().backend(claude).build();
    let capability = BackendCapability::new(true, false);

    let posts = studio
        .generate_posts(&capability, Platform::X, &[condition()], 1, None)
        .await
        .unwrap();
    assert_eq!(posts[0].1.origin, Origin::Backend);
    assert_eq!(posts[0].1.value[0].content(), "修復可能です");
}

#[tokio::test]
async fn validation_errors_surface_before_dispatch() {
    let studio = ContentStudio::builder().build();
    let capability = BackendCapability::none();

    let err = studio
        .generate_posts(&capability, Platform::X, &[], 3, None)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = studio
        .generate_posts(&capability, Platform::X, &[condition()], 0, None)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = studio
        .analyze_style(&capability, StyleKind::XStyle, &[" ".to_string()])
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = studio
        .generate_article(&capability, NoteKind::Paid, " ", "", None)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = studio
        .brush_up_article(&capability, "記事", "")
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = studio
        .style_chat(&capability, GuideKind::Note, "", " ", &[])
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = studio
        .generate_week(&capability, march(), 0, 7, &FrequencySettings::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn style_chat_applies_guide_updates() {
    let claude = ScriptedBackend::new(
        BackendKind::Claude,
        vec![Ok(
            "更新しました。\n<<<GUIDE_UPDATE>>>\n# 新ガイド\n<<<END_GUIDE_UPDATE>>>".to_string(),
        )],
    );
    let studio = ContentStudio::builder().backend(claude).build();
    let capability = BackendCapability::new(true, false);

    let outcome = studio
        .style_chat(&capability, GuideKind::X, "旧ガイド", "更新して", &[])
        .await
        .unwrap();
    assert!(outcome.guide_updated);
    assert_eq!(outcome.updated_guide.as_deref(), Some("# 新ガイド"));
    assert_eq!(outcome.reply, "更新しました。");
}

#[tokio::test]
async fn persistence_is_namespaced_by_resolved_credentials() {
    let store = Arc::new(MemoryStore::new());
    let credentials = Arc::new(InMemoryCredentials::new());
    let alice = Caller::User("alice".to_string());
    credentials
        .store(
            &alice,
            ProviderTokens {
                access_token: "token".to_string(),
                refresh_token: None,
            },
        )
        .await
        .unwrap();

    let studio = ContentStudio::builder()
        .caller(alice)
        .documents(store.clone())
        .credentials(credentials.clone())
        .build();
    studio
        .generate_calendar(
            &BackendCapability::none(),
            march(),
            &FrequencySettings::default(),
            None,
        )
        .await
        .unwrap();
    assert!(
        store
            .load("calendars_alice", "calendar_2025-03")
            .await
            .unwrap()
            .is_some()
    );

    // Anonymous callers use the shared namespace.
    let anonymous = ContentStudio::builder()
        .documents(store.clone())
        .credentials(credentials)
        .build();
    anonymous
        .generate_calendar(
            &BackendCapability::none(),
            march(),
            &FrequencySettings::default(),
            None,
        )
        .await
        .unwrap();
    assert!(
        store
            .load("calendars", "calendar_2025-03")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn note_ideas_from_backend_get_fresh_ids() {
    let raw = r#"[{"id":"model-1","publish_date":"2025-03-05","type":"free_no_affiliate","title":"案","summary":"概要","status":"approved"}]"#;
    let claude = ScriptedBackend::new(BackendKind::Claude, vec![Ok(raw.to_string())]);
    let studio = ContentStudio::builder().backend(claude).build();
    let capability = BackendCapability::new(true, false);

    let ideas = studio
        .generate_note_ideas(&capability, march(), &FrequencySettings::default())
        .await
        .unwrap();
    assert_eq!(ideas.origin, Origin::Backend);
    let idea = &ideas.value.ideas[0];
    assert_ne!(idea.id, "model-1");
    assert_eq!(idea.status, calliope_core::IdeaStatus::Pending);
}

#[tokio::test]
async fn monthly_calendar_routes_independently_of_weekly() {
    // The composed month consults the monthly_calendar route; a standalone
    // window consults weekly_calendar. Send the month to Claude while the
    // weekly default (Gemini) stays disabled.
    let claude = ScriptedBackend::new(
        BackendKind::Claude,
        vec![
            Ok(window_json(2025, 3, 1..=7)),
            Ok(window_json(2025, 3, 8..=14)),
            Ok(window_json(2025, 3, 15..=21)),
            Ok(window_json(2025, 3, 22..=28)),
            Ok(window_json(2025, 3, 29..=31)),
        ],
    );
    let mut routing = TaskRouting::default();
    routing.route(TaskKind::MonthlyCalendar, BackendKind::Claude);
    let studio = ContentStudio::builder()
        .routing(routing)
        .backend(claude)
        .build();
    let capability = BackendCapability::new(true, false);
    let settings = FrequencySettings::default();

    let calendar = studio
        .generate_calendar(&capability, march(), &settings, None)
        .await
        .unwrap();
    assert_eq!(calendar.origin, Origin::Backend);
    assert!(
        calendar
            .value
            .posts
            .iter()
            .any(|p| p.title_idea.starts_with("バックエンド案"))
    );

    let week = studio
        .generate_week(&capability, march(), 1, 7, &settings)
        .await
        .unwrap();
    assert_eq!(week.origin, Origin::Mock);
}
