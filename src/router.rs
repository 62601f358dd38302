use std::sync::Arc;

use tracing::debug;

/// The full-page view currently active, derived solely from the URL
/// fragment. Parsed once here; views consume the typed value via
/// subscription instead of re-parsing the fragment themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ArticleList,
    ArticleDetail(String),
    NewsDetail(String),
}

impl Route {
    /// Resolve a location fragment (`#<page>[?id=<value>]`).
    ///
    /// Unknown fragments are not an error, they resolve to `Home`; so does
    /// a detail page with no `id` to carry. Query suffixes on non-detail
    /// pages are ignored.
    pub fn parse(fragment: &str) -> Route {
        let frag = fragment.strip_prefix('#').unwrap_or(fragment);
        let (path, query) = match frag.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (frag, None),
        };
        match path {
            "article-list" => Route::ArticleList,
            "article-detail" => match query_param(query, "id") {
                Some(id) => Route::ArticleDetail(id),
                None => Route::Home,
            },
            "news-detail" => match query_param(query, "id") {
                Some(id) => Route::NewsDetail(id),
                None => Route::Home,
            },
            _ => Route::Home,
        }
    }
}

fn query_param(query: Option<&str>, key: &str) -> Option<String> {
    let query = query?;
    for pair in query.split('&') {
        if let Some((k, v)) = pair.split_once('=') {
            if k == key && !v.is_empty() {
                return Some(urlencoding::decode(v).map(|c| c.into_owned()).unwrap_or_else(|_| v.to_string()));
            }
        }
    }
    None
}

/// Host-side scroll control. The real application resets the window
/// scroll; tests record the call.
pub trait Viewport: Send + Sync {
    /// Synchronously put the viewport back at the origin.
    fn reset_scroll(&self);
}

/// Viewport for headless callers.
pub struct NoopViewport;

impl Viewport for NoopViewport {
    fn reset_scroll(&self) {}
}

type Subscriber = Box<dyn Fn(&Route) + Send + Sync>;

/// Single source of truth for the active view.
///
/// Feed it every fragment-change notification (including the initial one on
/// load). No transition is ever rejected and there is no terminal state.
pub struct Router {
    current: Route,
    viewport: Arc<dyn Viewport>,
    subscribers: Vec<Subscriber>,
}

impl Router {
    pub fn new(viewport: Arc<dyn Viewport>) -> Self {
        Self {
            current: Route::Home,
            viewport,
            subscribers: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn subscribe(&mut self, f: impl Fn(&Route) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// Apply a fragment change. The scroll reset happens before the state
    /// swap and the subscriber notifications: a newly mounted view must
    /// never render at the previous view's scroll offset.
    pub fn on_fragment_change(&mut self, fragment: &str) {
        let next = Route::parse(fragment);
        debug!(?next, fragment, "route transition");
        self.viewport.reset_scroll();
        self.current = next;
        for sub in &self.subscribers {
            sub(&self.current);
        }
    }
}
