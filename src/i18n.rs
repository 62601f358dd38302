use serde::{Deserialize, Serialize};

/// Locales the content backend carries translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

/// Fallback locale: every valid record carries at least this translation.
pub const DEFAULT_LOCALE: Locale = Locale::ZhCn;

impl Locale {
    /// BCP 47 tag, also sent as `Accept-Language`.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-CN",
            Locale::EnUs => "en-US",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Locale> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Some(Locale::ZhCn),
            "en-us" | "en" => Some(Locale::EnUs),
            _ => None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Keys into the user-facing error message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKey {
    Network,
    Timeout,
    Server,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    TooManyRequests,
    Parse,
    Invalid,
    Unknown,
}

pub(crate) fn message(key: MessageKey, locale: Locale) -> &'static str {
    use MessageKey::*;
    match locale {
        Locale::ZhCn => match key {
            Network => "网络连接失败，请检查网络设置",
            Timeout => "请求超时，请稍后重试",
            Server => "服务器开小差了，请稍后重试",
            BadRequest => "请求参数有误",
            Unauthorized => "请先登录",
            Forbidden => "没有权限执行此操作",
            NotFound => "请求的内容不存在",
            TooManyRequests => "操作过于频繁，请稍后再试",
            Parse => "数据解析失败",
            Invalid => "提交的内容不符合要求",
            Unknown => "发生未知错误",
        },
        Locale::EnUs => match key {
            Network => "Network connection failed, please check your connection",
            Timeout => "The request timed out, please try again",
            Server => "The server ran into a problem, please try again later",
            BadRequest => "The request was invalid",
            Unauthorized => "Please sign in first",
            Forbidden => "You are not allowed to do that",
            NotFound => "The requested content does not exist",
            TooManyRequests => "Too many requests, please slow down",
            Parse => "Failed to parse the server response",
            Invalid => "The submitted content is not valid",
            Unknown => "An unknown error occurred",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        assert_eq!(Locale::from_tag("zh-CN"), Some(Locale::ZhCn));
        assert_eq!(Locale::from_tag("en-us"), Some(Locale::EnUs));
        assert_eq!(Locale::from_tag("fr-FR"), None);
        assert_eq!(Locale::EnUs.as_tag(), "en-US");
    }

    #[test]
    fn every_key_has_text_in_both_locales() {
        use MessageKey::*;
        for key in [
            Network, Timeout, Server, BadRequest, Unauthorized, Forbidden, NotFound,
            TooManyRequests, Parse, Invalid, Unknown,
        ] {
            assert!(!message(key, Locale::ZhCn).is_empty());
            assert!(!message(key, Locale::EnUs).is_empty());
        }
    }
}
