use crate::domain::model::{FlatRow, FollowerRecord};
use serde_json::Value;

const PROFILE_URL_PREFIX: &str = "https://www.linkedin.com/in/";

fn text_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(key))
}

fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub fn first_name(record: &FollowerRecord) -> String {
    render(text_at(record.as_value(), &["firstName"]))
}

pub fn last_name(record: &FollowerRecord) -> String {
    render(text_at(record.as_value(), &["lastName"]))
}

pub fn headline(record: &FollowerRecord) -> String {
    render(text_at(record.as_value(), &["headline"]))
}

pub fn public_identifier(record: &FollowerRecord) -> String {
    render(text_at(record.as_value(), &["publicIdentifier"]))
}

pub fn entity_urn(record: &FollowerRecord) -> String {
    render(text_at(record.as_value(), &["entityUrn"]))
}

/// `followedAt.text`; a bare scalar `followedAt` counts as its text.
pub fn followed_at_text(record: &FollowerRecord) -> String {
    match record.as_value().get("followedAt") {
        Some(followed_at @ Value::Object(_)) => render(followed_at.get("text")),
        other => render(other),
    }
}

pub fn followed_at_accessibility_text(record: &FollowerRecord) -> String {
    render(text_at(record.as_value(), &["followedAt", "accessibilityText"]))
}

pub fn profile_url(public_identifier: &str) -> String {
    if public_identifier.is_empty() {
        String::new()
    } else {
        format!("{}{}/", PROFILE_URL_PREFIX, public_identifier)
    }
}

/// Flattens one follower. Missing attributes become empty strings.
pub fn project(record: &FollowerRecord) -> FlatRow {
    let public_identifier = public_identifier(record);
    FlatRow {
        first_name: first_name(record),
        last_name: last_name(record),
        headline: headline(record),
        linkedin_url: profile_url(&public_identifier),
        public_identifier,
        followed_at_text: followed_at_text(record),
        followed_at_accessibility_text: followed_at_accessibility_text(record),
        entity_urn: entity_urn(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_record() {
        let record = FollowerRecord::new(json!({
            "firstName": "Jane",
            "publicIdentifier": "jane-1",
            "followedAt": {"text": "May 2025"}
        }));

        let row = project(&record);

        assert_eq!(row.first_name, "Jane");
        assert_eq!(row.last_name, "");
        assert_eq!(row.linkedin_url, "https://www.linkedin.com/in/jane-1/");
        assert_eq!(row.followed_at_text, "May 2025");
        assert_eq!(row.followed_at_accessibility_text, "");
        assert_eq!(row.get("followedAt.accessibilityText"), Some(""));
    }

    #[test]
    fn test_full_record() {
        let record = FollowerRecord::new(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "headline": "Analyst, Engines",
            "publicIdentifier": "ada",
            "entityUrn": "urn:li:fsd_profile:A",
            "followedAt": {"text": "1w", "accessibilityText": "1 week ago"}
        }));

        let row = project(&record);

        assert_eq!(
            row.values(),
            [
                "Ada",
                "Lovelace",
                "Analyst, Engines",
                "ada",
                "https://www.linkedin.com/in/ada/",
                "1w",
                "1 week ago",
                "urn:li:fsd_profile:A",
            ]
        );
    }

    #[test]
    fn test_malformed_inputs_degrade_to_empty_fields() {
        let inputs = [
            json!(null),
            json!([]),
            json!("just text"),
            json!({}),
            json!({"followedAt": null}),
            json!({"followedAt": {"text": {"nested": true}}}),
            json!({"firstName": ["a"], "publicIdentifier": null}),
        ];

        for input in inputs {
            let row = project(&FollowerRecord::new(input));
            assert_eq!(row.first_name, "");
            assert_eq!(row.linkedin_url, "");
            assert_eq!(row.followed_at_text, "");
            assert_eq!(row.values().len(), 8);
        }
    }

    #[test]
    fn test_followed_at_as_plain_string() {
        let record = FollowerRecord::new(json!({"followedAt": "2 days ago"}));
        let row = project(&record);
        assert_eq!(row.followed_at_text, "2 days ago");
        assert_eq!(row.followed_at_accessibility_text, "");
    }

    #[test]
    fn test_followed_at_as_bare_number() {
        let record = FollowerRecord::new(json!({"followedAt": 1746598607000u64}));
        let row = project(&record);
        assert_eq!(row.followed_at_text, "1746598607000");
        assert_eq!(row.followed_at_accessibility_text, "");
    }

    #[test]
    fn test_projection_is_deterministic() {
        let record = FollowerRecord::new(json!({
            "firstName": "Jane",
            "headline": "CTO",
            "followedAt": {"text": "May 2025", "accessibilityText": "May 2025"}
        }));
        assert_eq!(project(&record), project(&record));
    }
}
