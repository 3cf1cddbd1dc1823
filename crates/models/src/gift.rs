use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Stored gift record. Every field except `description` is server-maintained
/// once the record exists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

impl Gift {
    /// List ordering: title ascending, then id so equal titles page stably.
    pub fn cmp_by_title(a: &Gift, b: &Gift) -> Ordering {
        a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id))
    }
}

/// Client payload for create and update.
///
/// `id`, `created_at` and `created_by` are accepted so that clients can echo a
/// record back, but the store never trusts them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GiftInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl GiftInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Client-supplied id, treating an empty string as absent.
    pub fn client_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn validate_title(&self) -> Result<(), ModelError> {
        if self.title.is_empty() {
            return Err(ModelError::Validation("gift must contain a valid title".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn gift(id: &str, title: &str) -> Gift {
        let at = Utc.with_ymd_and_hms(2015, 6, 1, 12, 0, 0).unwrap();
        Gift {
            id: id.into(),
            title: title.into(),
            description: None,
            created_at: at,
            created_by: "DUMMY_USER".into(),
            modified_at: at,
            modified_by: "DUMMY_USER".into(),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(gift("g1", "Book")).unwrap();
        assert_eq!(json["id"], "g1");
        assert_eq!(json["createdBy"], "DUMMY_USER");
        assert!(json.get("modifiedAt").is_some());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn input_accepts_sparse_payload() {
        let input: GiftInput = serde_json::from_str(r#"{"title":"Book"}"#).unwrap();
        assert_eq!(input, GiftInput::new("Book"));
        assert_eq!(input.client_id(), None);
    }

    #[test]
    fn empty_client_id_counts_as_absent() {
        let mut input = GiftInput::new("Book");
        input.id = Some(String::new());
        assert_eq!(input.client_id(), None);
        input.id = Some("abc".into());
        assert_eq!(input.client_id(), Some("abc"));
    }

    #[test]
    fn title_validation() {
        assert!(GiftInput::new("Book").validate_title().is_ok());
        assert!(matches!(GiftInput::new("").validate_title(), Err(ModelError::Validation(_))));
    }

    #[test]
    fn ordering_is_title_then_id() {
        let mut list = vec![gift("2", "Banana"), gift("b", "Apple"), gift("a", "Apple")];
        list.sort_by(Gift::cmp_by_title);
        let keys: Vec<_> = list.iter().map(|g| (g.title.as_str(), g.id.as_str())).collect();
        assert_eq!(keys, vec![("Apple", "a"), ("Apple", "b"), ("Banana", "2")]);
    }
}
