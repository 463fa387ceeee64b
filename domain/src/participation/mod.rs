//! Linz participation platform: proposal ("idea") queries and records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::error::AdapterResult;
use crate::core::paging::page_number;
use crate::core::vocabulary::Vocabulary;

/// Locale read from the platform's multilingual fields
pub const LOCALE: &str = "de-DE";

pub const PROPOSAL_STATUS: Vocabulary<&'static str> = Vocabulary::new(
    "status",
    &[
        ("submitted", "c4b79ddc-99e4-4643-8c7e-d77a68b78863"),
        ("threshold_reached", "27a5c84b-44c3-4382-af89-ec60ae2576ab"),
        ("expired", "9d2bb2e7-d51d-4134-9832-afdb66104b77"),
        ("answered", "2f0fc4b0-5ce6-4f79-aaac-908dd87ae9da"),
        ("inadmissible", "31db10fb-c128-4e7c-a44a-c2a1e5f58bd4"),
    ],
);

pub const PROPOSAL_SORT: Vocabulary<&'static str> = Vocabulary::new(
    "sort",
    &[
        ("most_reactions", "popular"),
        ("most_discussed", "comments_count"),
        ("popular", "trending"),
        ("random", "random"),
        ("newest", "new"),
        ("oldest", "-new"),
    ],
);

/// A validated proposal query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalQuery {
    pub page: u32,
    pub status: Option<&'static str>,
    pub sort: Option<&'static str>,
}

impl ProposalQuery {
    pub fn from_names(page: Option<i64>, status: Option<&str>, sort: Option<&str>) -> AdapterResult<Self> {
        Ok(Self {
            page: page_number(page)?,
            status: PROPOSAL_STATUS.lookup_optional(status)?,
            sort: PROPOSAL_SORT.lookup_optional(sort)?,
        })
    }

    /// Query string pairs for the ideas endpoint
    pub fn query_pairs(&self, page_size: u32, phase: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page[number]", self.page.to_string()),
            ("page[size]", page_size.to_string()),
        ];
        if let Some(status) = self.status {
            pairs.push(("idea_status", status.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        pairs.push(("phase", phase.to_string()));
        pairs
    }
}

/// JSON:API envelope of the ideas endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaPage {
    pub data: Vec<Idea>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Idea {
    pub id: String,
    pub attributes: IdeaAttributes,
}

/// The subset of idea attributes passed on to callers.
///
/// Everything except the multilingual texts is passed through untouched,
/// including explicit `null`s.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdeaAttributes {
    #[serde(default)]
    pub title_multiloc: HashMap<String, Option<String>>,
    #[serde(default)]
    pub body_multiloc: HashMap<String, Option<String>>,
    #[serde(default)]
    pub likes_count: serde_json::Value,
    #[serde(default)]
    pub dislikes_count: serde_json::Value,
    #[serde(default)]
    pub comments_count: serde_json::Value,
    #[serde(default)]
    pub official_feedbacks_count: serde_json::Value,
    #[serde(default)]
    pub followers_count: serde_json::Value,
    #[serde(default)]
    pub location_point_geojson: serde_json::Value,
    #[serde(default)]
    pub location_description: serde_json::Value,
    #[serde(default)]
    pub created_at: serde_json::Value,
    #[serde(default)]
    pub updated_at: serde_json::Value,
    #[serde(default)]
    pub submitted_at: serde_json::Value,
    #[serde(default)]
    pub published_at: serde_json::Value,
    #[serde(default)]
    pub budget: serde_json::Value,
    #[serde(default)]
    pub proposed_budget: serde_json::Value,
    #[serde(default)]
    pub author_name: serde_json::Value,
}

/// Flattened proposal handed to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub likes_count: serde_json::Value,
    pub dislikes_count: serde_json::Value,
    pub comments_count: serde_json::Value,
    pub official_feedbacks_count: serde_json::Value,
    pub followers_count: serde_json::Value,
    pub location_point_geojson: serde_json::Value,
    pub location_description: serde_json::Value,
    pub created_at: serde_json::Value,
    pub updated_at: serde_json::Value,
    pub submitted_at: serde_json::Value,
    pub published_at: serde_json::Value,
    pub budget: serde_json::Value,
    pub proposed_budget: serde_json::Value,
    pub author_name: serde_json::Value,
}

impl From<Idea> for ProposalRecord {
    fn from(idea: Idea) -> Self {
        let Idea { id, mut attributes } = idea;
        Self {
            id,
            title: attributes.title_multiloc.remove(LOCALE).flatten(),
            description: attributes.body_multiloc.remove(LOCALE).flatten(),
            likes_count: attributes.likes_count,
            dislikes_count: attributes.dislikes_count,
            comments_count: attributes.comments_count,
            official_feedbacks_count: attributes.official_feedbacks_count,
            followers_count: attributes.followers_count,
            location_point_geojson: attributes.location_point_geojson,
            location_description: attributes.location_description,
            created_at: attributes.created_at,
            updated_at: attributes.updated_at,
            submitted_at: attributes.submitted_at,
            published_at: attributes.published_at,
            budget: attributes.budget,
            proposed_budget: attributes.proposed_budget,
            author_name: attributes.author_name,
        }
    }
}

/// Flatten a page of ideas, keeping the platform's order
pub fn map_proposals(page: IdeaPage) -> Vec<ProposalRecord> {
    page.data.into_iter().map(ProposalRecord::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PHASE: &str = "060ee331-38c9-4683-a493-6cd00093e617";

    #[test]
    fn test_query_pairs() {
        let query = ProposalQuery::from_names(Some(2), Some("answered"), Some("oldest")).unwrap();

        assert_eq!(
            query.query_pairs(10, PHASE),
            vec![
                ("page[number]", "2".to_string()),
                ("page[size]", "10".to_string()),
                ("idea_status", "2f0fc4b0-5ce6-4f79-aaac-908dd87ae9da".to_string()),
                ("sort", "-new".to_string()),
                ("phase", PHASE.to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_without_filters() {
        let query = ProposalQuery::from_names(None, None, None).unwrap();
        let keys: Vec<&str> = query.query_pairs(10, PHASE).iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["page[number]", "page[size]", "phase"]);
    }

    #[test]
    fn test_query_rejects_unknown_sort() {
        let err = ProposalQuery::from_names(None, None, Some("alphabetical")).unwrap_err();
        assert!(err.to_string().contains("most_reactions, most_discussed"));
    }

    #[test]
    fn test_map_proposals() {
        let page: IdeaPage = serde_json::from_value(json!({
            "data": [{
                "id": "a1",
                "type": "idea",
                "attributes": {
                    "title_multiloc": {"de-DE": "Mehr Bäume", "en": "More trees"},
                    "body_multiloc": {"de-DE": "<p>Am Hauptplatz</p>"},
                    "likes_count": 12,
                    "dislikes_count": 1,
                    "comments_count": 3,
                    "official_feedbacks_count": 0,
                    "followers_count": 5,
                    "location_point_geojson": {"type": "Point", "coordinates": [14.28, 48.30]},
                    "location_description": "Hauptplatz",
                    "created_at": "2024-04-01T10:00:00Z",
                    "updated_at": "2024-04-02T10:00:00Z",
                    "submitted_at": "2024-04-01T10:00:00Z",
                    "published_at": "2024-04-01T10:05:00Z",
                    "budget": null,
                    "proposed_budget": 5000,
                    "author_name": "Anna M.",
                    "slug": "mehr-baeume"
                }
            }]
        }))
        .unwrap();

        let records = map_proposals(page);
        assert_eq!(records.len(), 1);

        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value["id"], "a1");
        assert_eq!(value["title"], "Mehr Bäume");
        assert_eq!(value["description"], "<p>Am Hauptplatz</p>");
        assert_eq!(value["likes_count"], 12);
        assert_eq!(value["location_point_geojson"]["type"], "Point");
        assert_eq!(value["budget"], serde_json::Value::Null);
        assert_eq!(value["proposed_budget"], 5000);
        assert!(value.get("slug").is_none());
    }

    #[test]
    fn test_missing_locale_omits_title() {
        let page: IdeaPage = serde_json::from_value(json!({
            "data": [{"id": "b2", "attributes": {"title_multiloc": {"en": "Only English"}}}]
        }))
        .unwrap();

        let value = serde_json::to_value(&map_proposals(page)[0]).unwrap();
        assert!(value.get("title").is_none());
        assert_eq!(value["likes_count"], serde_json::Value::Null);
    }
}
