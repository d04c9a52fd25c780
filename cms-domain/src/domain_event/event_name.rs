use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// 事件种类（封闭枚举），事件总线以此为路由键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "book.created")]
    BookCreated,
    #[serde(rename = "book.deleted")]
    BookDeleted,
    #[serde(rename = "article.created")]
    ArticleCreated,
    #[serde(rename = "article.updated")]
    ArticleUpdated,
    #[serde(rename = "article.deleted")]
    ArticleDeleted,
    #[serde(rename = "article_series.created")]
    ArticleSeriesCreated,
}

impl EventName {
    pub const ALL: [EventName; 6] = [
        EventName::BookCreated,
        EventName::BookDeleted,
        EventName::ArticleCreated,
        EventName::ArticleUpdated,
        EventName::ArticleDeleted,
        EventName::ArticleSeriesCreated,
    ];

    /// 稳定的线上名称（日志、序列化与外部集成使用）
    pub const fn as_str(self) -> &'static str {
        match self {
            EventName::BookCreated => "book.created",
            EventName::BookDeleted => "book.deleted",
            EventName::ArticleCreated => "article.created",
            EventName::ArticleUpdated => "article.updated",
            EventName::ArticleDeleted => "article.deleted",
            EventName::ArticleSeriesCreated => "article_series.created",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::Parse {
                reason: format!("unknown event name: {s}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde_and_parse_back() {
        for name in EventName::ALL {
            let json = serde_json::to_value(name).unwrap();
            assert_eq!(json, name.as_str());
            assert_eq!(name.as_str().parse::<EventName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_name_is_a_parse_error() {
        let err = "book.archived".parse::<EventName>().unwrap_err();
        assert!(matches!(err, DomainError::Parse { .. }));
    }
}
