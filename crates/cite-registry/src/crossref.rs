//! Crossref `/works/{doi}` response mapping.

use serde::Deserialize;

use crate::WorkRecord;

#[derive(Deserialize)]
pub(crate) struct WorkEnvelope {
    pub message: CrossrefWork,
}

#[derive(Deserialize)]
pub(crate) struct CrossrefWork {
    #[serde(rename = "DOI")]
    pub doi: String,
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub author: Vec<CrossrefAuthor>,
    #[serde(rename = "container-title", default)]
    pub container_title: Vec<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub published: Option<DateParts>,
    #[serde(rename = "published-print", default)]
    pub published_print: Option<DateParts>,
    #[serde(rename = "published-online", default)]
    pub published_online: Option<DateParts>,
    #[serde(default)]
    pub issued: Option<DateParts>,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct CrossrefAuthor {
    #[serde(default)]
    pub given: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    /// Organizational authors carry only a `name`.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct DateParts {
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<Option<i64>>>,
}

impl DateParts {
    fn year(&self) -> Option<i32> {
        self.date_parts
            .first()
            .and_then(|parts| parts.first().copied().flatten())
            .and_then(|year| i32::try_from(year).ok())
    }
}

impl CrossrefAuthor {
    fn display_name(&self) -> Option<String> {
        let given = self.given.as_deref().map(str::trim).unwrap_or_default();
        let family = self.family.as_deref().map(str::trim).unwrap_or_default();
        match (given.is_empty(), family.is_empty()) {
            (false, false) => Some(format!("{given} {family}")),
            (true, false) => Some(family.to_string()),
            (false, true) => Some(given.to_string()),
            (true, true) => self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }
}

impl From<CrossrefWork> for WorkRecord {
    fn from(work: CrossrefWork) -> Self {
        // Crossref's `published` is the earliest of print/online; fall back
        // through the narrower fields, then `issued`.
        let year = [
            work.published.as_ref(),
            work.published_print.as_ref(),
            work.published_online.as_ref(),
            work.issued.as_ref(),
        ]
        .into_iter()
        .flatten()
        .find_map(DateParts::year);

        Self {
            doi: work.doi,
            title: first_non_blank(work.title),
            authors: work
                .author
                .iter()
                .filter_map(CrossrefAuthor::display_name)
                .collect(),
            year,
            journal: first_non_blank(work.container_title),
            volume: work.volume.filter(|v| !v.trim().is_empty()),
            issue: work.issue.filter(|v| !v.trim().is_empty()),
            url: work.url,
        }
    }
}

fn first_non_blank(values: Vec<String>) -> Option<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
