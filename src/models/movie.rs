//! Typed views of the documents returned by the movie endpoints.
//!
//! These are optional: every endpoint returns a [`Page`](super::Page)
//! holding the raw JSON, and [`Page::docs_as`](super::Page::docs_as)
//! decodes its documents into these types on request.

use serde::{Deserialize, Serialize};

use super::MovieId;

/// A movie document from `/v2/movie`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Movie ID
    #[serde(rename = "_id")]
    pub id: MovieId,
    /// Title
    pub name: String,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime_in_minutes: Option<f64>,
    /// Budget in millions of USD
    #[serde(default)]
    pub budget_in_millions: Option<f64>,
    /// Box office revenue in millions of USD
    #[serde(default)]
    pub box_office_revenue_in_millions: Option<f64>,
    /// Academy Award nominations
    #[serde(default)]
    pub academy_award_nominations: Option<u32>,
    /// Academy Award wins
    #[serde(default)]
    pub academy_award_wins: Option<u32>,
    /// Rotten Tomatoes score
    #[serde(default)]
    pub rotten_tomatoes_score: Option<f64>,
}

/// A quote document from `/v2/movie/{id}/quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote ID
    #[serde(rename = "_id")]
    pub id: String,
    /// The spoken line
    pub dialog: String,
    /// ID of the movie the quote is from
    pub movie: MovieId,
    /// ID of the speaking character
    pub character: String,
}
