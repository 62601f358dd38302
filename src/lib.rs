pub mod content;
pub mod error;
pub mod http;
pub mod i18n;
pub mod models;
pub mod prefs;
pub mod router;
pub mod token; // stale-response guards

// Re-export commonly used items for tests / external users
pub use content::{page_window, ContentApi, ContentClient};
pub use error::{ApiError, ApiResult};
pub use http::{Fetched, HttpClient, DEFAULT_TIMEOUT};
pub use i18n::{Locale, DEFAULT_LOCALE};
pub use prefs::{FsPrefsStore, MemPrefsStore, Prefs, PrefsStore};
pub use router::{NoopViewport, Route, Router, Viewport};
pub use token::{RequestToken, RequestTokens};
