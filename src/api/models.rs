//! Front API resource models
//!
//! Wire keys are snake_case; timestamps are float seconds since the epoch.

use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Tags
// ============================================================================

/// A tag, possibly nested under a parent tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub resource_links: Option<JsonValue>,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// Contacts
// ============================================================================

/// A handle (email, phone, ...) through which a contact is reached
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactHandle {
    pub handle: String,
    pub source: String,
}

impl ContactHandle {
    /// Create a handle
    pub fn new(handle: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            source: source.into(),
        }
    }
}

/// A contact group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactGroup {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub resource_links: Option<JsonValue>,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
}

/// A contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub resource_links: Option<JsonValue>,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_spammer: Option<bool>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub handles: Vec<ContactHandle>,
    #[serde(default)]
    pub groups: Vec<ContactGroup>,
    #[serde(default, with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_fields: HashMap<String, JsonValue>,
    #[serde(default)]
    pub is_private: bool,
}

/// Body of a create-contact request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_spammer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<HashMap<String, String>>,
    pub handles: Vec<ContactHandle>,
}

impl CreateContact {
    /// Body for a contact reachable through `primary`, plus any extra handles
    ///
    /// The primary handle always comes first.
    pub fn new(name: Option<String>, primary: ContactHandle, extra: Vec<ContactHandle>) -> Self {
        let mut handles = Vec::with_capacity(extra.len() + 1);
        handles.push(primary);
        handles.extend(extra);
        Self {
            name,
            handles,
            ..Default::default()
        }
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the contact as a spammer (or not)
    #[must_use]
    pub fn spammer(mut self, is_spammer: bool) -> Self {
        self.is_spammer = Some(is_spammer);
        self
    }

    /// Set the contact's links
    #[must_use]
    pub fn links(mut self, links: Vec<String>) -> Self {
        self.links = Some(links);
        self
    }

    /// Set the groups to add the contact to
    #[must_use]
    pub fn group_names(mut self, group_names: Vec<String>) -> Self {
        self.group_names = Some(group_names);
        self
    }

    /// Set custom fields
    #[must_use]
    pub fn custom_fields(mut self, custom_fields: HashMap<String, String>) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }
}

// ============================================================================
// Conversations
// ============================================================================

/// A message recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub resource_links: Option<JsonValue>,
    pub handle: String,
    pub role: String,
}

/// A teammate a conversation is assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub resource_links: Option<JsonValue>,
    pub id: String,
    #[serde(default)]
    pub subject: String,
    pub status: String,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    #[serde(default)]
    pub recipient: Option<Recipient>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_private: bool,
}

// ============================================================================
// Timestamps
// ============================================================================

/// Float seconds since the epoch <-> `DateTime<Utc>`
pub(crate) mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn from_secs_f64(secs: f64) -> Option<DateTime<Utc>> {
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
        DateTime::from_timestamp(whole as i64, nanos)
    }

    pub fn to_secs_f64(dt: &DateTime<Utc>) -> f64 {
        dt.timestamp_millis() as f64 / 1000.0
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        from_secs_f64(secs).ok_or_else(|| de::Error::custom(format!("timestamp out of range: {secs}")))
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(to_secs_f64(dt))
    }

    pub mod optional {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<f64>::deserialize(deserializer)? {
                None => Ok(None),
                Some(secs) => super::from_secs_f64(secs).map(Some).ok_or_else(|| {
                    de::Error::custom(format!("timestamp out of range: {secs}"))
                }),
            }
        }

        pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(dt) => serializer.serialize_some(&super::to_secs_f64(dt)),
                None => serializer.serialize_none(),
            }
        }
    }
}
