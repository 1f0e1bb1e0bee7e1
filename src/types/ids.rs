use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The identifier of the Notion page an export request targets.
///
/// Produced from whatever the user pasted into the form. Only emptiness is
/// checked here; a malformed identifier is left for the Notion API to reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageReference(String);

impl PageReference {
    /// Extracts the page identifier from a Notion page URL.
    ///
    /// Notion URLs carry the identifier as the last hyphen-separated part of
    /// the title slug, e.g. `https://www.notion.so/My-Page-<id>?pvs=4`.
    pub fn from_url(url: &str) -> Result<Self, ValidationError> {
        let without_query = url.split('?').next().unwrap_or_default();
        let mut candidate = without_query.rsplit('-').next().unwrap_or_default();
        if candidate.contains('/') {
            candidate = candidate.rsplit('/').next().unwrap_or_default();
        }

        let id = candidate.replace('-', "");
        if id.is_empty() {
            return Err(ValidationError::InvalidId(format!(
                "No page identifier found in: {}",
                url
            )));
        }
        Ok(Self(id))
    }

    /// Returns the identifier exactly as extracted.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hyphenated UUID form used in API paths.
    ///
    /// Identifiers that are not 32 characters long are passed through unchanged.
    pub fn to_hyphenated(&self) -> String {
        hyphenate(&self.0)
    }
}

impl fmt::Display for PageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a block returned by the Notion API, normalized without dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockId(String);

impl BlockId {
    /// Parses a dashed or undashed 32-character hex identifier.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim();

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(Self(uuid.as_simple().to_string()));
        }

        let normalized = cleaned.replace('-', "");
        if normalized.len() != 32 {
            return Err(ValidationError::InvalidId(format!(
                "Invalid ID length: expected 32 characters, got {}",
                normalized.len()
            )));
        }
        if !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidId(
                "ID must contain only hexadecimal characters".to_string(),
            ));
        }
        Ok(Self(normalized.to_lowercase()))
    }

    /// Creates a random identifier (used for synthesized blocks in tests and fixtures).
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the ID with dashes for API calls
    pub fn to_hyphenated(&self) -> String {
        hyphenate(&self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BlockId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Unique identifier of one export request; scopes its temporary files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    /// Recognizes the directory names produced by [`RequestId::new_v4`].
    pub fn parse(name: &str) -> Option<Self> {
        let uuid = Uuid::try_parse(name).ok()?;
        let simple = uuid.as_simple().to_string();
        (simple == name).then_some(Self(simple))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn hyphenate(id: &str) -> String {
    if id.len() == 32 && id.is_ascii() && !id.contains('-') {
        format!(
            "{}-{}-{}-{}-{}",
            &id[0..8],
            &id[8..12],
            &id[12..16],
            &id[16..20],
            &id[20..32]
        )
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "1a2b8fc7dab580bba3b4d8592d9234f3";

    #[test]
    fn test_request_id_parse_accepts_only_generated_names() {
        let id = RequestId::new_v4();
        assert_eq!(RequestId::parse(id.as_str()), Some(id));
        assert_eq!(RequestId::parse("assets"), None);
        assert_eq!(RequestId::parse("550e8400-e29b-41d4-a716-446655440000"), None);
    }

    #[test]
    fn test_extracts_id_from_title_slug() {
        let url = format!("https://www.notion.so/CI-CD-Process-management-{}", ID);
        let page = PageReference::from_url(&url).unwrap();
        assert_eq!(page.as_str(), ID);
    }

    #[test]
    fn test_discards_query_string() {
        let url = format!("https://www.notion.so/Roadmap-{}?pvs=4&foo=bar-baz", ID);
        let page = PageReference::from_url(&url).unwrap();
        assert_eq!(page.as_str(), ID);
    }

    #[test]
    fn test_takes_trailing_path_segment() {
        let url = format!("https://www.notion.so/acme/Team-Wiki-abc/{}", ID);
        let page = PageReference::from_url(&url).unwrap();
        assert_eq!(page.as_str(), ID);
    }

    #[test]
    fn test_input_without_hyphens_is_not_validated() {
        let page = PageReference::from_url(ID).unwrap();
        assert_eq!(page.as_str(), ID);

        // No slug: the last path segment survives and the Notion API rejects it later.
        let page = PageReference::from_url("https://www.notion.so/workspace").unwrap();
        assert_eq!(page.as_str(), "workspace");
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        assert!(PageReference::from_url("").is_err());
        assert!(PageReference::from_url(&format!("https://www.notion.so/Page-{}/", ID)).is_err());
    }

    #[test]
    fn test_hyphenated_form() {
        let page = PageReference::from_url(ID).unwrap();
        assert_eq!(page.to_hyphenated(), "1a2b8fc7-dab5-80bb-a3b4-d8592d9234f3");

        let short = PageReference::from_url("abc").unwrap();
        assert_eq!(short.to_hyphenated(), "abc");
    }

    #[test]
    fn test_block_id_parsing() {
        let id = BlockId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.as_str(), "550e8400e29b41d4a716446655440000");
        assert_eq!(id.to_hyphenated(), "550e8400-e29b-41d4-a716-446655440000");

        assert!(BlockId::parse("too-short").is_err());
        assert!(BlockId::parse("zz0e8400e29b41d4a716446655440000").is_err());
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new_v4(), RequestId::new_v4());
    }
}
