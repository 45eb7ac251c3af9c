use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dbms::query::QueryError;

/// The kind of a clause appended after the base statement.
///
/// Clause kinds are a closed set: a caller cannot smuggle arbitrary SQL
/// through the keyword slot of a [`crate::dbms::data_action::Property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKind {
    Where,
    OrderBy,
    GroupBy,
    Having,
    Limit,
    Offset,
    Join,
    InnerJoin,
    LeftJoin,
    RightJoin,
    OnDuplicateKeyUpdate,
    Returning,
}

impl ClauseKind {
    /// Every supported clause kind.
    pub const ALL: [ClauseKind; 12] = [
        ClauseKind::Where,
        ClauseKind::OrderBy,
        ClauseKind::GroupBy,
        ClauseKind::Having,
        ClauseKind::Limit,
        ClauseKind::Offset,
        ClauseKind::Join,
        ClauseKind::InnerJoin,
        ClauseKind::LeftJoin,
        ClauseKind::RightJoin,
        ClauseKind::OnDuplicateKeyUpdate,
        ClauseKind::Returning,
    ];

    /// Returns the SQL keyword(s) for the clause.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Where => "WHERE",
            ClauseKind::OrderBy => "ORDER BY",
            ClauseKind::GroupBy => "GROUP BY",
            ClauseKind::Having => "HAVING",
            ClauseKind::Limit => "LIMIT",
            ClauseKind::Offset => "OFFSET",
            ClauseKind::Join => "JOIN",
            ClauseKind::InnerJoin => "INNER JOIN",
            ClauseKind::LeftJoin => "LEFT JOIN",
            ClauseKind::RightJoin => "RIGHT JOIN",
            ClauseKind::OnDuplicateKeyUpdate => "ON DUPLICATE KEY UPDATE",
            ClauseKind::Returning => "RETURNING",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClauseKind {
    type Err = QueryError;

    /// Parses a clause keyword, ignoring case and collapsing inner whitespace,
    /// so `"order  by"` yields [`ClauseKind::OrderBy`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .map(str::to_ascii_uppercase)
            .collect::<Vec<_>>()
            .join(" ");

        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| QueryError::UnknownClause(s.to_string()))
    }
}

impl Serialize for ClauseKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClauseKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_parse_clause_kind() {
        assert_eq!("WHERE".parse::<ClauseKind>().unwrap(), ClauseKind::Where);
        assert_eq!("limit".parse::<ClauseKind>().unwrap(), ClauseKind::Limit);
        assert_eq!(
            " order   By ".parse::<ClauseKind>().unwrap(),
            ClauseKind::OrderBy
        );
        assert_eq!(
            "on duplicate key update".parse::<ClauseKind>().unwrap(),
            ClauseKind::OnDuplicateKeyUpdate
        );
    }

    #[test]
    fn test_should_reject_unknown_clause() {
        let err = "WHERE 1=1; DROP".parse::<ClauseKind>().unwrap_err();
        assert_eq!(err, QueryError::UnknownClause("WHERE 1=1; DROP".to_string()));
    }

    #[test]
    fn test_should_roundtrip_every_keyword() {
        for kind in ClauseKind::ALL {
            assert_eq!(kind.as_str().parse::<ClauseKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_should_serde_as_keyword() {
        let json = serde_json::to_string(&ClauseKind::GroupBy).unwrap();
        assert_eq!(json, r#""GROUP BY""#);
        let kind: ClauseKind = serde_json::from_str(r#""left join""#).unwrap();
        assert_eq!(kind, ClauseKind::LeftJoin);
        assert!(serde_json::from_str::<ClauseKind>(r#""UNION""#).is_err());
    }
}
