use dashmap::DashMap;
use std::sync::Arc;

/// Per-scope generation counters used to discard stale responses.
///
/// A view issues a token before starting a fetch; issuing a new token for
/// the same scope (a locale switch, a re-navigation) invalidates the old
/// one, so a late-arriving response can be checked with [`is_current`]
/// and dropped before it overwrites fresher state.
///
/// [`is_current`]: RequestTokens::is_current
#[derive(Clone, Default)]
pub struct RequestTokens {
    store: Arc<DashMap<String, u64>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    scope: String,
    seq: u64,
}

impl RequestToken {
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `scope`, invalidating any earlier one.
    pub fn issue(&self, scope: &str) -> RequestToken {
        let mut entry = self.store.entry(scope.to_string()).or_insert(0);
        *entry += 1;
        RequestToken {
            scope: scope.to_string(),
            seq: *entry,
        }
    }

    /// True while no newer token has been issued for the token's scope.
    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.store
            .get(&token.scope)
            .map(|seq| *seq == token.seq)
            .unwrap_or(false)
    }
}
