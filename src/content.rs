use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::models::*;
use crate::prefs::Prefs;

/// Slice one page out of an already sorted list. Pages are 1-based; a page
/// past the end yields an empty vec, never an error.
pub fn page_window<T>(items: Vec<T>, params: PageParams) -> Vec<T> {
    let start = params.page.saturating_sub(1).saturating_mul(params.limit);
    items.into_iter().skip(start).take(params.limit).collect()
}

/// Content access seam consumed by the views.
///
/// The backing store offers no server-side filter, count, or pagination, so
/// every listing fetches the full collection and derives the rest locally.
/// Mutations (`delete_message`, `like_content`, the publishing calls) do NOT
/// invalidate anything previously fetched: the caller owns the consistency
/// of any list it holds, e.g. dropping a deleted id or applying the
/// optimistic `likes + 1` itself.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn articles(&self, page: Option<PageParams>) -> ApiResult<Vec<NormalizedContent>>;
    async fn news(&self, page: Option<PageParams>) -> ApiResult<Vec<NormalizedContent>>;
    /// Full filtered set; callers use the length for page-count math since
    /// the backend has no COUNT endpoint.
    async fn all_articles(&self) -> ApiResult<Vec<NormalizedContent>>;
    async fn all_news(&self) -> ApiResult<Vec<NormalizedContent>>;
    async fn content_detail(&self, id: &str) -> ApiResult<NormalizedContent>;
    /// Returns the raw server payload; the caller applies the optimistic
    /// `+1` to its own copy, this layer does not re-fetch to confirm.
    async fn like_content(&self, id: &str) -> ApiResult<serde_json::Value>;
    async fn article_categories(&self) -> ApiResult<Vec<String>>;
    async fn news_categories(&self) -> ApiResult<Vec<String>>;

    async fn messages(&self, page: Option<PageParams>) -> ApiResult<Vec<Message>>;
    async fn all_messages(&self) -> ApiResult<Vec<Message>>;
    async fn submit_message(&self, new: NewMessage) -> ApiResult<Message>;
    async fn delete_message(&self, id: &str) -> ApiResult<()>;

    // publishing surface
    async fn publish_content(&self, new: NewContent) -> ApiResult<ContentRecord>;
    async fn update_content(&self, id: &str, upd: NewContent) -> ApiResult<ContentRecord>;
    async fn delete_content(&self, id: &str) -> ApiResult<()>;
}

#[derive(Clone)]
pub struct ContentClient {
    http: HttpClient,
    prefs: Prefs,
}

impl ContentClient {
    pub fn new(http: HttpClient, prefs: Prefs) -> Self {
        Self { http, prefs }
    }

    /// Fetch the full collection, keep one kind, project to the active
    /// locale and sort newest first.
    async fn fetch_kind(&self, kind: ContentKind) -> ApiResult<Vec<NormalizedContent>> {
        let records: Vec<ContentRecord> = self.http.get_json("/content").await?;
        let locale = self.prefs.locale();
        let mut items: Vec<_> = records
            .into_iter()
            .filter(|r| r.kind == kind)
            .filter_map(|r| r.normalize(locale))
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(kind = kind.as_str(), %locale, total = items.len(), "fetched content");
        Ok(items)
    }

    async fn categories(&self, kind: ContentKind) -> ApiResult<Vec<String>> {
        let path = format!(
            "/content/categories?type={}&language={}",
            kind.as_str(),
            self.prefs.locale().as_tag()
        );
        self.http.get_json(&path).await
    }
}

#[async_trait]
impl ContentApi for ContentClient {
    async fn articles(&self, page: Option<PageParams>) -> ApiResult<Vec<NormalizedContent>> {
        let items = self.fetch_kind(ContentKind::Article).await?;
        Ok(match page {
            Some(p) => page_window(items, p),
            None => items,
        })
    }

    async fn news(&self, page: Option<PageParams>) -> ApiResult<Vec<NormalizedContent>> {
        let items = self.fetch_kind(ContentKind::News).await?;
        Ok(match page {
            Some(p) => page_window(items, p),
            None => items,
        })
    }

    async fn all_articles(&self) -> ApiResult<Vec<NormalizedContent>> {
        self.fetch_kind(ContentKind::Article).await
    }

    async fn all_news(&self) -> ApiResult<Vec<NormalizedContent>> {
        self.fetch_kind(ContentKind::News).await
    }

    async fn content_detail(&self, id: &str) -> ApiResult<NormalizedContent> {
        let path = format!("/content/{}", urlencoding::encode(id));
        let record: ContentRecord = self.http.get_json(&path).await?;
        record
            .normalize(self.prefs.locale())
            .ok_or_else(|| ApiError::Parse(format!("content {id} has no usable translation")))
    }

    async fn like_content(&self, id: &str) -> ApiResult<serde_json::Value> {
        let path = format!("/content/{}/like", urlencoding::encode(id));
        let fetched = self.http.request(Method::POST, &path, None).await?;
        Ok(fetched.data)
    }

    async fn article_categories(&self) -> ApiResult<Vec<String>> {
        self.categories(ContentKind::Article).await
    }

    async fn news_categories(&self) -> ApiResult<Vec<String>> {
        self.categories(ContentKind::News).await
    }

    async fn messages(&self, page: Option<PageParams>) -> ApiResult<Vec<Message>> {
        let items = self.all_messages().await?;
        Ok(match page {
            Some(p) => page_window(items, p),
            None => items,
        })
    }

    async fn all_messages(&self) -> ApiResult<Vec<Message>> {
        let mut items: Vec<Message> = self.http.get_json("/messages").await?;
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(items)
    }

    async fn submit_message(&self, new: NewMessage) -> ApiResult<Message> {
        new.validate().map_err(|e| ApiError::Invalid(e.to_string()))?;
        let body = serde_json::json!({
            "name": new.name.trim(),
            "content": new.content.trim(),
            "timestamp": Utc::now(),
        });
        self.http.post_json("/messages", body).await
    }

    async fn delete_message(&self, id: &str) -> ApiResult<()> {
        let path = format!("/messages/{}", urlencoding::encode(id));
        self.http.delete(&path).await?;
        Ok(())
    }

    async fn publish_content(&self, new: NewContent) -> ApiResult<ContentRecord> {
        let body = serde_json::to_value(&new).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.http.post_json("/content", body).await
    }

    async fn update_content(&self, id: &str, upd: NewContent) -> ApiResult<ContentRecord> {
        let path = format!("/content/{}", urlencoding::encode(id));
        let body = serde_json::to_value(&upd).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.http.put_json(&path, body).await
    }

    async fn delete_content(&self, id: &str) -> ApiResult<()> {
        let path = format!("/content/{}", urlencoding::encode(id));
        self.http.delete(&path).await?;
        Ok(())
    }
}
