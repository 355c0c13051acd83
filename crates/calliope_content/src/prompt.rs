//! Prompt rendering.
//!
//! One function per task type, each producing a [`CompletionRequest`].
//! Prompts are Japanese and instruct JSON-only output where the task has a
//! structured result; the extractor still treats the response as untrusted.

use calliope_core::{
    CalendarPost, ChatMessage, FrequencySettings, GuideKind, LearnedCharacteristics, NoteKind,
    PersonaAttributes, Platform, PostCondition, THREADS_TIME, X_POST_TIMES,
    article_character_limit,
};
use calliope_error::{CalliopeResult, ValidationError};
use calliope_interface::CompletionRequest;
use chrono::{Datelike, NaiveDate};

const CALENDAR_MAX_TOKENS: u32 = 8000;
const POSTS_MAX_TOKENS: u32 = 4000;
const STYLE_ANALYSIS_MAX_TOKENS: u32 = 1000;
const ARTICLE_MAX_TOKENS: u32 = 8000;
const CHAT_MAX_TOKENS: u32 = 4000;

/// Markers the style chat uses to carry a revised guide in its reply.
pub(crate) const GUIDE_UPDATE_OPEN: &str = "<<<GUIDE_UPDATE>>>";
pub(crate) const GUIDE_UPDATE_CLOSE: &str = "<<<END_GUIDE_UPDATE>>>";

fn finish(builder: &mut calliope_interface::CompletionRequestBuilder) -> CalliopeResult<CompletionRequest> {
    builder
        .build()
        .map_err(|e| ValidationError::new(e.to_string()).into())
}

/// Calendar prompt for one window of days within a month.
pub(crate) fn week_calendar(
    month_anchor: NaiveDate,
    start_day: u32,
    end_day: u32,
    settings: &FrequencySettings,
    style: Option<&LearnedCharacteristics>,
) -> CalliopeResult<CompletionRequest> {
    let year = month_anchor.year();
    let month = month_anchor.month();
    let style_line = style
        .map(|s| format!("- 文体: {}（語尾: {}）\n", s.tone, s.sentence_endings.join("・")))
        .unwrap_or_default();
    let prompt = format!(
        "{year}年{month}月{start_day}日〜{end_day}日のSNS投稿カレンダーをJSON配列で出力。\n\n\
         条件:\n\
         - X投稿: 1日{x}回（時間: {times}）\n\
         - Threads投稿: 1日{threads}回（時間: {threads_time}）\n\
         - カテゴリ: HSP共感, 家庭DX, IT資格, マインド, NOTE誘導\n\
         - 対象: HSP（繊細さん）女性エンジニア\n\
         {style_line}\n\
         JSON配列のみ出力（説明不要）:\n\
         [{{\"date\":\"{year}-{month:02}-{start_day:02}\",\"day_of_week\":\"月\",\"time\":\"07:30\",\"platform\":\"X\",\"category\":\"HSP共感\",\"title_idea\":\"具体的な投稿アイデア\",\"purpose\":\"目的\",\"hashtags\":[\"#HSP\"]}}]",
        x = settings.x_per_day,
        times = X_POST_TIMES.join(", "),
        threads = settings.threads_per_day,
        threads_time = THREADS_TIME,
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(CALENDAR_MAX_TOKENS)
            .json_only(true),
    )
}

/// Bulk post generation prompt for one condition.
pub(crate) fn posts(
    platform: Platform,
    condition: &PostCondition,
    count: usize,
    style: Option<&LearnedCharacteristics>,
) -> CalliopeResult<CompletionRequest> {
    let platform_label = match platform {
        Platform::X => "X（Twitter）",
        Platform::Threads => "Threads",
        Platform::Note => "NOTE",
    };
    let style_section = style
        .map(|s| {
            format!(
                "\n## 文体の特徴\n- トーン: {}\n- 語尾: {}\n- 絵文字: {}\n",
                s.tone,
                s.sentence_endings.join(", "),
                s.emoji_usage,
            )
        })
        .unwrap_or_default();

    let prompt = format!(
        "あなたはSNS運用のプロフェッショナルです。\n\
         {platform_label}向けの投稿を{count}個生成してください。\n\n\
         ## 条件\n\
         - カテゴリ: {category}\n\
         - 発信内容: {idea}\n\
         - 目的: {purpose}\n\
         - ハッシュタグ: {hashtags}\n\n\
         ## 文字数制限\n\
         - 最大{limit}文字\n\n\
         ## ターゲット\n\
         - HSP（繊細さん）女性エンジニア\n\
         - 共働き、家庭とキャリアの両立に悩んでいる\n\
         {style_section}\n\
         ## 出力形式\n\
         以下のJSON配列のみを出力してください（説明文は不要）:\n\
         [\n  {{\n    \"content\": \"投稿本文（ハッシュタグ含む）\",\n    \"hashtags\": [\"#タグ1\", \"#タグ2\"]\n  }}\n]",
        category = condition.category,
        idea = condition.content_idea,
        purpose = condition.purpose,
        hashtags = condition.hashtags,
        limit = platform.character_limit(),
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(POSTS_MAX_TOKENS)
            .json_only(true),
    )
}

/// Regeneration prompt for a single calendar row.
pub(crate) fn row_regeneration(
    post: &CalendarPost,
    custom_instruction: Option<&str>,
) -> CalliopeResult<CompletionRequest> {
    let instruction_section = custom_instruction
        .map(|i| format!("## 修正指示\n{i}\n\n"))
        .unwrap_or_default();
    let time_json = match &post.time {
        Some(time) => format!("\"{time}\""),
        None => "null".to_string(),
    };

    let prompt = format!(
        "あなたはSNS運用のプロフェッショナルです。\n\
         以下のSNS投稿案を再生成してください。\n\n\
         ## 現在の投稿案\n\
         - 日付: {date}（{day_of_week}）\n\
         - 時間: {time}\n\
         - Platform: {platform}\n\
         - カテゴリ: {category}\n\
         - タイトル案: {title_idea}\n\
         - 目的: {purpose}\n\
         - ハッシュタグ: {hashtags}\n\n\
         {instruction_section}\
         ## ターゲット\n\
         HSP（繊細さん）女性エンジニア\n\n\
         ## 出力形式\n\
         以下のJSONのみを出力してください（説明文は不要）:\n\
         {{\n  \"date\": \"{date}\",\n  \"day_of_week\": \"{day_of_week}\",\n  \"time\": {time_json},\n  \"platform\": \"{platform}\",\n  \"category\": \"カテゴリ名\",\n  \"title_idea\": \"新しい投稿タイトル・内容案\",\n  \"purpose\": \"投稿の目的\",\n  \"hashtags\": [\"#タグ1\", \"#タグ2\"]\n}}",
        date = post.date,
        day_of_week = post.day_of_week,
        time = post.time.as_deref().unwrap_or("指定なし"),
        platform = post.platform,
        category = post.category,
        title_idea = post.title_idea,
        purpose = post.purpose,
        hashtags = post.hashtags.join(" "),
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(POSTS_MAX_TOKENS)
            .json_only(true),
    )
}

/// Style analysis prompt over writing samples.
pub(crate) fn style_analysis(samples: &[String]) -> CalliopeResult<CompletionRequest> {
    let sample_section = samples
        .iter()
        .enumerate()
        .map(|(i, s)| format!("### サンプル{}\n{}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = format!(
        "以下の文章サンプルから、文体の特徴を分析してください。\n\n\
         ## サンプル\n\
         {sample_section}\n\n\
         ## 分析項目\n\
         1. トーン（例: 共感的・温かい、プロフェッショナル、カジュアル）\n\
         2. 語尾パターン（例: です、ます、だよ）\n\
         3. 絵文字の使用頻度（例: 多め、少なめ、なし）\n\
         4. 段落スタイル（例: 短め、長め）\n\
         5. 頻出キーワード\n\n\
         ## 出力形式\n\
         以下のJSON形式で出力してください:\n\
         {{\n  \"tone\": \"トーンの説明\",\n  \"sentence_endings\": [\"語尾1\", \"語尾2\"],\n  \"emoji_usage\": \"絵文字使用の説明\",\n  \"paragraph_style\": \"段落スタイルの説明\",\n  \"keywords\": [\"キーワード1\", \"キーワード2\"]\n}}"
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(STYLE_ANALYSIS_MAX_TOKENS)
            .json_only(true),
    )
}

/// Persona description prompt. Free-text output, no extraction.
pub(crate) fn persona(attributes: &PersonaAttributes) -> CalliopeResult<CompletionRequest> {
    let field = |value: &Option<String>| -> String {
        value.clone().unwrap_or_else(|| "指定なし".to_string())
    };

    let prompt = format!(
        "以下の属性からターゲット読者のペルソナ例を作成してください。\n\n\
         ## 属性\n\
         - 年齢層: {age}\n\
         - 性別: {gender}\n\
         - 職業: {occupation}\n\
         - 興味関心: {interests}\n\
         - 課題・悩み: {challenges}\n\
         - 目標: {goals}\n\n\
         ## 出力形式\n\
         具体的な1人の人物像として、以下の項目を含めて作成してください:\n\
         - 名前（仮名）\n\
         - 年齢\n\
         - 職業・立場\n\
         - 日常の様子\n\
         - 抱えている悩み\n\
         - 求めている情報\n\
         - SNSの使い方\n\n\
         読みやすい文章形式で出力してください。",
        age = field(&attributes.age_range),
        gender = field(&attributes.gender),
        occupation = field(&attributes.occupation),
        interests = field(&attributes.interests),
        challenges = field(&attributes.challenges),
        goals = field(&attributes.goals),
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(POSTS_MAX_TOKENS),
    )
}

/// Monthly NOTE article idea prompt.
pub(crate) fn note_ideas(
    month_anchor: NaiveDate,
    settings: &FrequencySettings,
) -> CalliopeResult<CompletionRequest> {
    let prompt = format!(
        "あなたはNOTE運用のプロフェッショナルです。\n\
         HSP（繊細さん）女性エンジニア向けのNOTE記事案を{year}年{month}月分として作成してください。\n\n\
         ## 本数\n\
         - 無料（アフィなし）: {free}本\n\
         - 無料（アフィあり）: {affiliate}本\n\
         - メンバーシップ: {membership}本\n\
         - 有料: {paid}本\n\n\
         ## 条件\n\
         - 公開日は月内に分散させる\n\
         - アフィありの記事は affiliate_info にアフィリエイト先を含める\n\n\
         ## 出力形式\n\
         以下のJSON配列のみを出力してください（説明文は不要）:\n\
         [\n  {{\n    \"id\": \"idea-1\",\n    \"publish_date\": \"{year}-{month:02}-03\",\n    \"type\": \"free_no_affiliate\",\n    \"title\": \"記事タイトル\",\n    \"summary\": \"記事の概要\",\n    \"status\": \"pending\"\n  }}\n]",
        year = month_anchor.year(),
        month = month_anchor.month(),
        free = settings.note_free_no_affiliate_per_month,
        affiliate = settings.note_free_with_affiliate_per_month,
        membership = settings.note_membership_per_month,
        paid = settings.note_paid_per_month,
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(CALENDAR_MAX_TOKENS)
            .json_only(true),
    )
}

/// Article draft prompt. Free-text markdown output.
pub(crate) fn article(
    kind: NoteKind,
    title_idea: &str,
    content_idea: &str,
    style_guide: Option<&str>,
) -> CalliopeResult<CompletionRequest> {
    let guide_section = style_guide
        .map(|g| format!("\n## 文体ガイド\n{g}\n"))
        .unwrap_or_default();

    let prompt = format!(
        "あなたはNOTE記事のプロのライターです。\n\
         {label}を1本執筆してください。\n\n\
         ## 記事案\n\
         - タイトル案: {title}\n\
         - 内容: {idea}\n\n\
         ## 条件\n\
         - 文字数: {limit}文字程度\n\
         - 対象読者: HSP（繊細さん）女性エンジニア\n\
         - Markdown形式（見出し・リストを使用）\n\
         {guide_section}\n\
         記事本文のみを出力してください。",
        label = kind.label(),
        title = if title_idea.is_empty() { "（内容から提案）" } else { title_idea },
        idea = if content_idea.is_empty() { "（タイトルから構成）" } else { content_idea },
        limit = article_character_limit(kind),
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(ARTICLE_MAX_TOKENS),
    )
}

/// Brush-up prompt over an existing article.
pub(crate) fn brush_up(article: &str, instruction: &str) -> CalliopeResult<CompletionRequest> {
    let prompt = format!(
        "あなたはNOTE記事のプロの編集者です。\n\
         以下の記事を指示に従ってブラッシュアップしてください。\n\n\
         ## 指示\n\
         {instruction}\n\n\
         ## 記事\n\
         {article}\n\n\
         修正後の記事本文のみを出力してください。"
    );

    finish(
        CompletionRequest::builder()
            .prompt(prompt)
            .max_tokens(ARTICLE_MAX_TOKENS),
    )
}

/// Style-guide chat turn: current guide as system context plus the full
/// conversation so far.
pub(crate) fn style_chat(
    kind: GuideKind,
    guide_text: &str,
    message: &str,
    history: &[ChatMessage],
) -> CalliopeResult<CompletionRequest> {
    let system = format!(
        "あなたは{label}の文体ガイドを一緒に育てる編集アシスタントです。\n\
         ユーザーと対話しながらガイドの改善を提案してください。\n\n\
         ## 現在のガイド\n\
         {guide}\n\n\
         ガイド本文を更新する場合は、返信の末尾に更新後の全文を\n\
         {open}\n（更新後のガイド全文）\n{close}\n\
         の形で含めてください。更新が不要な返信にはこのブロックを含めないでください。",
        label = kind.label(),
        guide = if guide_text.is_empty() { "（まだありません）" } else { guide_text },
        open = GUIDE_UPDATE_OPEN,
        close = GUIDE_UPDATE_CLOSE,
    );

    finish(
        CompletionRequest::builder()
            .prompt(message.to_string())
            .system(system)
            .history(history.to_vec())
            .max_tokens(CHAT_MAX_TOKENS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use calliope_core::Role;

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn week_prompt_names_window_and_frequencies() {
        let settings = FrequencySettings {
            x_per_day: 2,
            ..FrequencySettings::default()
        };
        let request = week_calendar(march(), 8, 14, &settings, None).unwrap();
        assert!(request.prompt().contains("2025年3月8日〜14日"));
        assert!(request.prompt().contains("1日2回"));
        assert!(*request.json_only());
    }

    #[test]
    fn posts_prompt_includes_condition_and_limit() {
        let condition = PostCondition {
            category: "HSP共感".to_string(),
            content_idea: "朝の習慣".to_string(),
            purpose: "共感形成".to_string(),
            hashtags: "#HSP".to_string(),
        };
        let request = posts(Platform::X, &condition, 3, None).unwrap();
        assert!(request.prompt().contains("投稿を3個生成"));
        assert!(request.prompt().contains("最大140文字"));
        assert!(request.prompt().contains("朝の習慣"));

        let styled = posts(
            Platform::Threads,
            &condition,
            3,
            Some(&crate::mock_style_characteristics()),
        )
        .unwrap();
        assert!(styled.prompt().contains("文体の特徴"));
        assert!(styled.prompt().contains("最大500文字"));
    }

    #[test]
    fn row_prompt_pins_slot_fields() {
        let post = CalendarPost {
            date: march(),
            day_of_week: "土".to_string(),
            time: None,
            platform: Platform::X,
            category: "HSP共感".to_string(),
            title_idea: "朝の過ごし方".to_string(),
            purpose: "共感形成".to_string(),
            hashtags: vec!["#HSP".to_string()],
        };
        let request = row_regeneration(&post, Some("もっと具体的に")).unwrap();
        assert!(request.prompt().contains("修正指示"));
        assert!(request.prompt().contains("\"time\": null"));
        assert!(request.prompt().contains("2025-03-01"));

        let plain = row_regeneration(&post, None).unwrap();
        assert!(!plain.prompt().contains("修正指示"));
    }

    #[test]
    fn style_chat_carries_guide_and_history() {
        let history = vec![ChatMessage::now(Role::User, "語尾を柔らかくしたい")];
        let request = style_chat(GuideKind::X, "現行ガイド", "続けて", &history).unwrap();
        assert_eq!(request.prompt(), "続けて");
        assert_eq!(request.history().len(), 1);
        let system = request.system().as_deref().unwrap();
        assert!(system.contains("現行ガイド"));
        assert!(system.contains(GUIDE_UPDATE_OPEN));
    }

    #[test]
    fn persona_prompt_defaults_missing_attributes() {
        let request = persona(&PersonaAttributes::default()).unwrap();
        assert!(request.prompt().contains("指定なし"));
        assert!(!*request.json_only());
    }
}
