//! Wire types for the desktop-memory backend.

use std::collections::BTreeMap;

use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::timezone;

/// GET /auth/check
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthCheck {
    pub auth_enabled: bool,
    #[serde(default)]
    pub authenticated: Option<bool>,
}

/// POST /auth/login
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Plain `{success, message}` acknowledgement used by maintenance endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// GET /stats/today
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TodayStats {
    pub date: String,
    pub screenshot_count: u64,
    pub activity_count: u64,
    pub analyzed_count: u64,
    #[serde(default)]
    pub activity_distribution: BTreeMap<String, u64>,
}

impl TodayStats {
    /// Distribution entries sorted by count, largest first.
    pub fn distribution_by_count(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .activity_distribution
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries
    }
}

/// `{items, total}` envelope. `total` is absent on some endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Total item count, falling back to the number of items returned.
    pub fn total_or_len(&self) -> u64 {
        self.total.unwrap_or(self.items.len() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Screenshot {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(with = "timezone::timestamp")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub is_analyzed: bool,
    #[serde(default)]
    pub is_similar: bool,
}

impl Screenshot {
    /// Server-relative path of the full-size image.
    pub fn file_path(&self) -> String {
        format!("/files/{}", self.filename)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Activity {
    pub id: i64,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub application: Option<String>,
    #[serde(with = "timezone::timestamp")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub screenshot_id: Option<i64>,
    #[serde(default)]
    pub screenshot_filename: Option<String>,
    #[serde(default)]
    pub content_summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyReport {
    pub id: i64,
    #[serde(with = "timezone::timestamp")]
    pub start_time: OffsetDateTime,
    #[serde(with = "timezone::timestamp")]
    pub end_time: OffsetDateTime,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub screenshot_count: u64,
    #[serde(default)]
    pub work_minutes: u32,
    #[serde(default)]
    pub study_minutes: u32,
    #[serde(default)]
    pub entertainment_minutes: u32,
    #[serde(default)]
    pub other_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyReport {
    pub id: i64,
    #[serde(with = "timezone::date")]
    pub date: Date,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub screenshot_count: u64,
    #[serde(default)]
    pub work_minutes: u32,
    #[serde(default)]
    pub study_minutes: u32,
    #[serde(default)]
    pub entertainment_minutes: u32,
    #[serde(default)]
    pub other_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Semantic,
    Keyword,
}

impl Relevance {
    pub fn label(self) -> &'static str {
        match self {
            Relevance::Semantic => "semantic match",
            Relevance::Keyword => "keyword match",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub application: Option<String>,
    #[serde(with = "timezone::timestamp")]
    pub timestamp: OffsetDateTime,
    pub relevance: Relevance,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub screenshot_filename: Option<String>,
}

impl SearchHit {
    /// Score as a whole percentage, e.g. `0.87` → `87`.
    pub fn score_percent(&self) -> Option<u32> {
        self.score.map(|s| (s * 100.0).round().clamp(0.0, 100.0) as u32)
    }

    /// Server-relative path of the screenshot behind this hit, if any.
    pub fn screenshot_path(&self) -> Option<String> {
        self.screenshot_filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("/files/{name}"))
    }
}

/// GET /failed-screenshots
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FailedScreenshot {
    pub id: i64,
    pub filename: String,
    #[serde(with = "timezone::timestamp")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub failed_count: u32,
    #[serde(default)]
    pub last_error: Option<String>,
}

/// Filters for GET /screenshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenshotQuery {
    pub skip: u32,
    pub limit: u32,
    /// ISO instant, e.g. `2024-06-02T00:00:00+08:00`.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ScreenshotQuery {
    /// One page of a single UTC+8 day.
    pub fn for_day(date: Date, page: u32, limit: u32) -> Self {
        let (start, end) = timezone::day_bounds(date);
        Self {
            skip: page * limit,
            limit,
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(start) = &self.start_date {
            params.push(("start_date", start.clone()));
        }
        if let Some(end) = &self.end_date {
            params.push(("end_date", end.clone()));
        }
        params
    }
}

/// Filters for GET /activities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    pub limit: u32,
    pub skip: Option<u32>,
    pub activity_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ActivityQuery {
    pub fn latest(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.limit.to_string())];
        if let Some(skip) = self.skip {
            params.push(("skip", skip.to_string()));
        }
        if let Some(kind) = &self.activity_type {
            params.push(("activity_type", kind.clone()));
        }
        if let Some(start) = &self.start_date {
            params.push(("start_date", start.clone()));
        }
        if let Some(end) = &self.end_date {
            params.push(("end_date", end.clone()));
        }
        params
    }
}
