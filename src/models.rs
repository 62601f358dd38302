use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::i18n::{Locale, DEFAULT_LOCALE};

pub const MAX_MESSAGE_NAME_CHARS: usize = 20;
pub const MAX_MESSAGE_CONTENT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    News,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::News => "news",
        }
    }
}

/// One locale's body of a content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedBody {
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub category: String,
    pub content: String,
}

/// A stored article or news item, as the backend returns it. Treated as an
/// immutable value once fetched; the only local mutation callers apply is
/// the optimistic `likes + 1` after a successful like call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub translations: HashMap<String, LocalizedBody>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub read_time_seconds: u32,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Flat per-locale projection of a [`ContentRecord`] for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedContent {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub category: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub likes: u64,
    pub read_time_seconds: u32,
    pub image_url: String,
    pub display_date: String,
    pub display_read_time: String,
}

impl ContentRecord {
    /// Project to one locale's flat display fields, falling back to the
    /// default locale's body. Pure: the source record is untouched, and the
    /// same (record, locale) pair always yields the same output. Returns
    /// `None` when not even the fallback body exists.
    pub fn normalize(&self, locale: Locale) -> Option<NormalizedContent> {
        let body = self
            .translations
            .get(locale.as_tag())
            .or_else(|| self.translations.get(DEFAULT_LOCALE.as_tag()))?;
        let minutes = ((self.read_time_seconds + 59) / 60).max(1);
        let display_read_time = match locale {
            Locale::ZhCn => format!("约 {} 分钟", minutes),
            Locale::EnUs => format!("{} min read", minutes),
        };
        Some(NormalizedContent {
            id: self.id.clone(),
            kind: self.kind,
            title: body.title.clone(),
            author: body.author.clone(),
            excerpt: body.excerpt.clone(),
            category: body.category.clone(),
            content: body.content.clone(),
            date: self.date,
            likes: self.likes,
            read_time_seconds: self.read_time_seconds,
            image_url: self
                .cover_image
                .clone()
                .unwrap_or_else(|| format!("/assets/content/{}.jpg", self.id)),
            display_date: self.date.format("%Y-%m-%d").to_string(),
            display_read_time,
        })
    }
}

/// Draft content for the publishing surface (POST/PUT `/content`). Updates
/// are full replacements, so the same shape serves both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub translations: HashMap<String, LocalizedBody>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub read_time_seconds: u32,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// A wall post. Created by submission, deleted by id, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub name: String,
    pub content: String,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is empty")]
    NameEmpty,
    #[error("name exceeds 20 characters")]
    NameTooLong,
    #[error("content is empty")]
    ContentEmpty,
    #[error("content exceeds 200 characters")]
    ContentTooLong,
}

impl NewMessage {
    /// Length caps are counted in characters, not bytes (CJK names).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        let content = self.content.trim();
        if name.is_empty() {
            return Err(ValidationError::NameEmpty);
        }
        if name.chars().count() > MAX_MESSAGE_NAME_CHARS {
            return Err(ValidationError::NameTooLong);
        }
        if content.is_empty() {
            return Err(ValidationError::ContentEmpty);
        }
        if content.chars().count() > MAX_MESSAGE_CONTENT_CHARS {
            return Err(ValidationError::ContentTooLong);
        }
        Ok(())
    }
}

/// Client-side page window over an already sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub page: usize,
    pub limit: usize,
}

impl PageParams {
    /// Clamps both fields to at least 1.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(tags: &[&str]) -> ContentRecord {
        let mut translations = HashMap::new();
        for tag in tags {
            translations.insert(
                tag.to_string(),
                LocalizedBody {
                    title: format!("title-{tag}"),
                    author: "author".into(),
                    excerpt: "excerpt".into(),
                    category: "category".into(),
                    content: "content".into(),
                },
            );
        }
        ContentRecord {
            id: "c1".into(),
            kind: ContentKind::Article,
            translations,
            date: "2024-03-01T08:00:00Z".parse().unwrap(),
            likes: 3,
            read_time_seconds: 150,
            cover_image: None,
        }
    }

    #[test]
    fn normalize_picks_requested_locale() {
        let rec = record_with(&["zh-CN", "en-US"]);
        let n = rec.normalize(Locale::EnUs).unwrap();
        assert_eq!(n.title, "title-en-US");
        assert_eq!(n.display_read_time, "3 min read"); // 150s rounds up
        assert_eq!(n.display_date, "2024-03-01");
    }

    #[test]
    fn normalize_falls_back_to_default_locale() {
        let rec = record_with(&["zh-CN"]);
        let n = rec.normalize(Locale::EnUs).unwrap();
        assert_eq!(n.title, "title-zh-CN");
    }

    #[test]
    fn normalize_without_fallback_body_is_none() {
        // en-only record: requesting zh-CN finds neither the requested
        // body nor the zh-CN fallback
        let rec = record_with(&["en-US"]);
        assert!(rec.normalize(Locale::ZhCn).is_none());
    }

    #[test]
    fn normalize_is_pure_and_idempotent() {
        let rec = record_with(&["zh-CN", "en-US"]);
        let before = serde_json::to_string(&rec).unwrap();
        let a = rec.normalize(Locale::ZhCn).unwrap();
        let b = rec.normalize(Locale::ZhCn).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&rec).unwrap(), before);
    }

    #[test]
    fn message_validation_counts_characters() {
        let ok = NewMessage { name: "访客".repeat(10), content: "你好".into() };
        assert!(ok.validate().is_ok()); // 20 CJK chars, 60 bytes

        let long_name = NewMessage { name: "x".repeat(21), content: "hi".into() };
        assert_eq!(long_name.validate(), Err(ValidationError::NameTooLong));

        let long_content = NewMessage { name: "a".into(), content: "x".repeat(201) };
        assert_eq!(long_content.validate(), Err(ValidationError::ContentTooLong));

        let blank = NewMessage { name: "  ".into(), content: "hi".into() };
        assert_eq!(blank.validate(), Err(ValidationError::NameEmpty));
    }
}
