use crate::config::Config;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Project identifiers arrive as numbers from the API, but strings are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Number(n) => write!(f, "{}", n),
            ProjectId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Profile {
        #[serde(default)]
        username: Option<String>,
    },
    Name(String),
    Other(Value),
}

/// Accepts any JSON for an optional text field and keeps it only if it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// A project as returned by the remote API. Only `id` is guaranteed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawProject {
    pub id: ProjectId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,
}

impl RawProject {
    /// Profile username first, then any other scalar author rendered as text,
    /// then `"unknown"`. Empty strings never win.
    pub fn author_name(&self) -> String {
        let name = match &self.author {
            Some(Author::Profile { username }) => username.clone(),
            Some(Author::Name(name)) => Some(name.clone()),
            Some(Author::Other(Value::Number(n))) => Some(n.to_string()),
            Some(Author::Other(Value::Bool(b))) => Some(b.to_string()),
            Some(Author::Other(_)) | None => None,
        };

        name.filter(|n| !n.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        [&self.image, &self.thumbnail]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
    }
}

/// The public shape written to the snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: ProjectId,
    pub title: Option<String>,
    pub author: String,
    pub thumbnail: Option<String>,
    pub url: String,
}

impl ProjectEntry {
    pub fn from_raw(raw: RawProject, config: &Config) -> Self {
        let author = raw.author_name();
        let thumbnail = raw.thumbnail_url();
        let url = config.project_url(&raw.id);

        ProjectEntry {
            id: raw.id,
            title: raw.title,
            author,
            thumbnail,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawProject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn author_from_profile_username() {
        let p = raw(json!({"id": 1, "author": {"username": "alice", "id": 9}}));
        assert_eq!(p.author_name(), "alice");
    }

    #[test]
    fn author_from_plain_string() {
        let p = raw(json!({"id": 1, "author": "bob"}));
        assert_eq!(p.author_name(), "bob");
    }

    #[test]
    fn author_missing_is_unknown() {
        assert_eq!(raw(json!({"id": 1})).author_name(), "unknown");
        assert_eq!(raw(json!({"id": 1, "author": null})).author_name(), "unknown");
    }

    #[test]
    fn author_without_usable_name_is_unknown() {
        assert_eq!(
            raw(json!({"id": 1, "author": {"username": ""}})).author_name(),
            "unknown"
        );
        assert_eq!(raw(json!({"id": 1, "author": {}})).author_name(), "unknown");
        assert_eq!(raw(json!({"id": 1, "author": ""})).author_name(), "unknown");
        assert_eq!(raw(json!({"id": 1, "author": [1, 2]})).author_name(), "unknown");
    }

    #[test]
    fn scalar_author_is_used_as_is() {
        assert_eq!(raw(json!({"id": 1, "author": 17})).author_name(), "17");
        assert_eq!(raw(json!({"id": 1, "author": true})).author_name(), "true");
    }

    #[test]
    fn mistyped_optional_fields_degrade_to_none() {
        let p = raw(json!({"id": 1, "title": 2024, "author": "bob"}));
        assert_eq!(p.title, None);
        assert_eq!(p.author_name(), "bob");

        let p = raw(json!({"id": 2, "image": {"url": "x"}, "thumbnail": "b.png"}));
        assert_eq!(p.thumbnail_url().as_deref(), Some("b.png"));

        let p = raw(json!({"id": 3, "image": null, "thumbnail": ["x"]}));
        assert_eq!(p.thumbnail_url(), None);
    }

    #[test]
    fn thumbnail_prefers_image() {
        let p = raw(json!({"id": 1, "image": "a.png", "thumbnail": "b.png"}));
        assert_eq!(p.thumbnail_url().as_deref(), Some("a.png"));
    }

    #[test]
    fn thumbnail_falls_back() {
        let p = raw(json!({"id": 1, "thumbnail": "b.png"}));
        assert_eq!(p.thumbnail_url().as_deref(), Some("b.png"));

        let p = raw(json!({"id": 1, "image": "", "thumbnail": "b.png"}));
        assert_eq!(p.thumbnail_url().as_deref(), Some("b.png"));

        assert_eq!(raw(json!({"id": 1})).thumbnail_url(), None);
    }

    #[test]
    fn missing_id_is_rejected() {
        let result: Result<RawProject, _> = serde_json::from_value(json!({"title": "no id"}));
        assert!(result.is_err());
    }

    #[test]
    fn entry_serializes_exact_fields() {
        let p = raw(json!({
            "id": 123,
            "title": "Maze",
            "author": {"username": "alice"},
            "image": "https://cdn/123.png",
            "stats": {"views": 4}
        }));
        let entry = ProjectEntry::from_raw(p, &Config::default());

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "id": 123,
                "title": "Maze",
                "author": "alice",
                "thumbnail": "https://cdn/123.png",
                "url": "https://scratch.mit.edu/projects/123/"
            })
        );
    }
}
