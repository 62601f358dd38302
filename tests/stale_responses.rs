use std::sync::Arc;

use aurora_client::models::NormalizedContent;
use aurora_client::{
    ContentApi, ContentClient, HttpClient, Locale, MemPrefsStore, Prefs, RequestTokens,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A locale switch while a fetch is in flight must not let the older
/// response overwrite the newer view state. Views guard against that with
/// a per-scope request token checked before applying a result.
#[tokio::test]
async fn late_response_for_a_superseded_fetch_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "a1", "type": "article", "date": "2024-03-03T08:00:00Z",
                "likes": 0, "readTimeSeconds": 60,
                "translations": {
                    "zh-CN": {
                        "title": "中文标题", "author": "a", "excerpt": "e",
                        "category": "c", "content": "b"
                    },
                    "en-US": {
                        "title": "English title", "author": "a", "excerpt": "e",
                        "category": "c", "content": "b"
                    }
                }
            }
        ])))
        .mount(&server)
        .await;

    let prefs = Prefs::with_locale(Arc::new(MemPrefsStore::new()), Locale::ZhCn);
    let api = ContentClient::new(HttpClient::new(server.uri(), prefs.clone()), prefs.clone());
    let tokens = RequestTokens::new();

    // fetch under the zh-CN locale begins
    let stale = tokens.issue("article-list");
    let zh_items = api.all_articles().await.unwrap();

    // the user toggles the language before that response is applied,
    // which re-issues the scope token and starts a fresh fetch
    prefs.set_locale(Locale::EnUs).await.unwrap();
    let current = tokens.issue("article-list");
    let en_items = api.all_articles().await.unwrap();

    let mut shown: Option<Vec<NormalizedContent>> = None;
    if tokens.is_current(&current) {
        shown = Some(en_items);
    }
    // the zh-CN result lands last but its token is no longer current
    if tokens.is_current(&stale) {
        shown = Some(zh_items);
    }

    assert_eq!(shown.unwrap()[0].title, "English title");
}
