//! Navigation of raw follower page payloads.
//!
//! A page body is a normalized voyager response: follower elements sit under
//! `organizationDashFollowersByOrganizationalPage` and point at their member
//! profile through `followerV2.*profile`, while the profiles themselves are
//! listed once in the top-level `included` array.

use crate::domain::model::{FollowerRecord, Page};
use crate::utils::error::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;

const COLLECTION_KEY: &str = "organizationDashFollowersByOrganizationalPage";

impl Page {
    pub fn from_raw(index: usize, offset: usize, page_size: usize, raw: String) -> Result<Self> {
        let payload: Value = serde_json::from_str(&raw)?;
        let total_hint = paging_total(&payload);
        Ok(Self {
            index,
            offset,
            page_size,
            total_hint,
            raw,
            payload,
        })
    }

    pub fn elements(&self) -> &[Value] {
        follower_elements(&self.payload)
    }

    pub fn record_count(&self) -> usize {
        self.elements().len()
    }
}

fn follower_collection(payload: &Value) -> Option<&Value> {
    let root = match payload.get("data") {
        Some(data) if data.get("data").is_some() => &data["data"],
        Some(data) => data,
        None => payload,
    };
    root.get(COLLECTION_KEY)
}

pub fn follower_elements(payload: &Value) -> &[Value] {
    follower_collection(payload)
        .and_then(|c| c.get("elements"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn paging_total(payload: &Value) -> Option<u64> {
    follower_collection(payload)?
        .get("paging")?
        .get("total")?
        .as_u64()
}

/// Profiles in `included` that carry both an `entityUrn` and a `publicIdentifier`.
pub fn included_profiles(payload: &Value) -> impl Iterator<Item = (&str, &Value)> {
    payload
        .get("included")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|p| p.get("publicIdentifier").is_some())
        .filter_map(|p| p.get("entityUrn").and_then(Value::as_str).map(|urn| (urn, p)))
}

fn profile_reference(element: &Value) -> Option<&str> {
    element.get("followerV2")?.get("*profile")?.as_str()
}

/// Member profiles keyed by URN, accumulated over the pages of a run.
#[derive(Debug, Default)]
pub struct ProfileIndex {
    profiles: HashMap<String, Value>,
}

impl ProfileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the page's profiles; a URN seen again is replaced by the newer profile.
    pub fn absorb(&mut self, page: &Page) -> usize {
        let mut added = 0;
        for (urn, profile) in included_profiles(&page.payload) {
            self.profiles.insert(urn.to_string(), profile.clone());
            added += 1;
        }
        added
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Merges the referenced profile over the element. Profile attributes win,
    /// so its `entityUrn` replaces the element's own. Unresolved or flat
    /// elements pass through unchanged.
    pub fn resolve(&self, element: &Value) -> FollowerRecord {
        let profile = profile_reference(element)
            .and_then(|urn| self.profiles.get(urn))
            .and_then(Value::as_object);

        match (element.as_object(), profile) {
            (Some(fields), Some(profile)) => {
                let mut merged: Map<String, Value> = fields.clone();
                for (key, value) in profile {
                    merged.insert(key.clone(), value.clone());
                }
                FollowerRecord::new(Value::Object(merged))
            }
            _ => FollowerRecord::new(element.clone()),
        }
    }
}
