//! Store and rating domain entities.

use serde::{Deserialize, Serialize};

/// A store listed on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: u64,
    pub name: String,
    pub address: String,
    /// Absent for unclaimed stores, which normal users cannot discover
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
}

impl Store {
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Case-insensitive substring match against name or address.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.address.to_lowercase().contains(needle)
    }
}

/// Search parameters for store discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreFilter {
    pub query: String,
}

impl StoreFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// A user's star rating of a store; one per (user, store) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: u64,
    pub user_id: u64,
    pub store_id: u64,
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe() -> Store {
        Store {
            id: 1,
            name: "Cafe Central".to_string(),
            address: "1 Main St".to_string(),
            owner_id: Some(7),
        }
    }

    #[test]
    fn test_store_persisted_field_names() {
        let json = serde_json::to_value(cafe()).unwrap();
        assert_eq!(json["ownerId"], 7);

        let unowned: Store =
            serde_json::from_str(r#"{"id":2,"name":"Kiosk","address":"Dock 4"}"#).unwrap();
        assert_eq!(unowned.owner_id, None);
    }

    #[test]
    fn test_store_matches_name_or_address() {
        let store = cafe();
        assert!(store.matches("central"));
        assert!(store.matches("main"));
        assert!(!store.matches("bakery"));
        assert!(store.matches(""));
    }

    #[test]
    fn test_rating_persisted_field_names() {
        let rating = Rating {
            id: 3,
            user_id: 2,
            store_id: 1,
            rating: 4,
        };
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, r#"{"id":3,"userId":2,"storeId":1,"rating":4}"#);
    }
}
