#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;

/// A normalized followers response with `count` members numbered from `first`,
/// each profile listed once in `included`.
pub fn followers_page(first: usize, count: usize) -> Value {
    let elements: Vec<Value> = (first..first + count)
        .map(|n| {
            json!({
                "entityUrn": format!("urn:li:fsd_follower:{}", n),
                "followerV2": {"*profile": format!("urn:li:fsd_profile:{}", n)},
                "followedAt": {"text": "May 2025", "accessibilityText": "Followed in May 2025"}
            })
        })
        .collect();
    let included: Vec<Value> = (first..first + count)
        .map(|n| {
            json!({
                "entityUrn": format!("urn:li:fsd_profile:{}", n),
                "publicIdentifier": format!("member-{}", n),
                "firstName": format!("First{}", n),
                "lastName": format!("Last{}", n),
                "headline": "Engineer"
            })
        })
        .collect();

    json!({
        "data": {
            "data": {
                "organizationDashFollowersByOrganizationalPage": {
                    "paging": {"start": first, "count": 50, "total": 2417},
                    "elements": elements
                }
            }
        },
        "included": included
    })
}

/// Header and data rows of a CSV export, as strings.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

pub fn saved_page_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("followers_page_"))
        .collect();
    names.sort();
    names
}
