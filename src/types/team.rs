use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Team {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Fields the dashboard does not interpret, kept for JSON output.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Team {
    #[cfg(test)]
    pub fn named(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            created_by: None,
            created_at: None,
            extra: Map::new(),
        }
    }
}

/// Body of a create-team request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub created_by: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Id {
    Str(String),
    Num(serde_json::Number),
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        match id {
            Id::Str(s) => s,
            Id::Num(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Id::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Id>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_become_strings() {
        let team: Team = serde_json::from_str(
            r#"{"id": 42, "name": "Platform", "created_by": 7, "member_count": 3}"#,
        )
        .unwrap();

        assert_eq!(team.id, "42");
        assert_eq!(team.created_by.as_deref(), Some("7"));
        assert_eq!(team.extra.get("member_count"), Some(&Value::from(3)));
    }

    #[test]
    fn string_ids_and_missing_creator() {
        let team: Team = serde_json::from_str(r#"{"id": "t-1", "name": "Design"}"#).unwrap();

        assert_eq!(team.id, "t-1");
        assert_eq!(team.created_by, None);
        assert!(team.extra.is_empty());
    }

    #[test]
    fn extra_fields_survive_serialization() {
        let team: Team =
            serde_json::from_str(r#"{"id": 1, "name": "Ops", "color": "blue"}"#).unwrap();
        let json = serde_json::to_value(&team).unwrap();

        assert_eq!(json["color"], "blue");
        assert_eq!(json["id"], "1");
    }
}
