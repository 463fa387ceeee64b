//! klimaaktiv funding catalogue: filter vocabularies and result rendering.
//!
//! The catalogue is an HTML page; fetching and HTML→markdown conversion
//! happen in the infrastructure layer. This module owns the query shape and
//! the text layout of the result.

use crate::core::error::AdapterResult;
use crate::core::paging::page_number;
use crate::core::vocabulary::Vocabulary;

pub const FUNDING_TYPE: Vocabulary<u32> = Vocabulary::new(
    "fundingType",
    &[
        ("buildings_and_building_technology", 41),
        ("energy_savings_and_energy_efficiency", 33),
        ("energy_production_and_distribution", 44),
        ("mobility", 35),
        ("concepts_and_consulting", 40),
    ],
);

pub const TARGET_AUDIENCE: Vocabulary<u32> = Vocabulary::new(
    "targetAudience",
    &[
        ("private", 19),
        ("company", 20),
        ("municipality", 28),
        ("clubs_and_associations", 30),
    ],
);

pub const FEDERAL_STATE: Vocabulary<u32> = Vocabulary::new(
    "state",
    &[
        ("austria", 46),
        ("burgenland", 21),
        ("carinthia", 17),
        ("lower_austria", 22),
        ("upper_austria", 23),
        ("salzburg", 24),
        ("styria", 25),
        ("tyrol", 26),
        ("vorarlberg", 27),
        ("vienna", 16),
    ],
);

/// Separator between rendered funding programmes
pub const FUNDING_SEPARATOR: &str = "\n\n---\n\n";

/// A validated funding catalogue query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingQuery {
    pub page: u32,
    pub funding_type: Option<u32>,
    pub target_audience: Option<u32>,
    pub state: Option<u32>,
}

impl FundingQuery {
    /// Resolve caller-facing filter names to catalogue ids
    pub fn from_names(
        page: Option<i64>,
        funding_type: Option<&str>,
        target_audience: Option<&str>,
        state: Option<&str>,
    ) -> AdapterResult<Self> {
        Ok(Self {
            page: page_number(page)?,
            funding_type: FUNDING_TYPE.lookup_optional(funding_type)?,
            target_audience: TARGET_AUDIENCE.lookup_optional(target_audience)?,
            state: FEDERAL_STATE.lookup_optional(state)?,
        })
    }

    /// Query string pairs for the catalogue page; unset filters are omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("fundingType", self.funding_type),
            ("stakeholder", self.target_audience),
            ("federalstate", self.state),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|id| (key, id.to_string())))
        .collect()
    }
}

/// One funding programme as scraped from the catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Funding {
    pub heading: String,
    /// Programme details already converted to markdown
    pub body: Option<String>,
}

impl Funding {
    pub fn render(&self) -> String {
        let mut text = format!("# Förderung: {}", self.heading);
        if let Some(body) = &self.body {
            text.push_str("\n\n");
            text.push_str(body);
        }
        text
    }
}

/// Render a page of programmes as one markdown document
pub fn render_fundings(fundings: &[Funding]) -> String {
    fundings
        .iter()
        .map(Funding::render)
        .collect::<Vec<_>>()
        .join(FUNDING_SEPARATOR)
}
