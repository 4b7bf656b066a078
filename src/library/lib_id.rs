//! Library item identifier
//!
//! Written as `nickname:item`. A string without a colon names an item with
//! no library nickname.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibIdError {
    #[error("library id has an empty item name: {0:?}")]
    EmptyItem(String),
    #[error("library id has more than one ':' separator: {0:?}")]
    ExtraSeparator(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LibId {
    nickname: String,
    item: String,
}

impl LibId {
    pub fn new(nickname: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            item: item.into(),
        }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn is_valid(&self) -> bool {
        !self.item.is_empty()
    }
}

impl FromStr for LibId {
    type Err = LibIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (nickname, item) = s.split_once(':').unwrap_or(("", s));
        if item.contains(':') {
            return Err(LibIdError::ExtraSeparator(s.to_string()));
        }
        if item.trim().is_empty() {
            return Err(LibIdError::EmptyItem(s.to_string()));
        }
        Ok(LibId::new(nickname.trim(), item.trim()))
    }
}

impl fmt::Display for LibId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nickname.is_empty() {
            write!(f, "{}", self.item)
        } else {
            write!(f, "{}:{}", self.nickname, self.item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: LibId = "Resistor_SMD:R_0603".parse().unwrap();
        assert_eq!(id.nickname(), "Resistor_SMD");
        assert_eq!(id.item(), "R_0603");
        assert_eq!(id.to_string(), "Resistor_SMD:R_0603");
    }

    #[test]
    fn test_parse_without_nickname() {
        let id: LibId = "R_0603".parse().unwrap();
        assert_eq!(id.nickname(), "");
        assert_eq!(id.to_string(), "R_0603");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("Lib:".parse::<LibId>(), Err(LibIdError::EmptyItem(_))));
        assert!(matches!("a:b:c".parse::<LibId>(), Err(LibIdError::ExtraSeparator(_))));
    }
}
