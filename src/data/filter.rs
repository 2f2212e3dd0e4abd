use std::cmp::Ordering;

use serde::Deserialize;

use super::model::Paper;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchSettings {
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSettings {
    pub value: Option<String>,
    pub field: Option<String>,
    pub zoomed: bool,
    pub area: Option<String>,
    pub is_streamgraph: bool,
    pub title: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Relevance,
    Year,
    Readers,
    Citations,
    Title,
}

impl SortField {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "relevance" => Some(Self::Relevance),
            "year" => Some(Self::Year),
            "readers" => Some(Self::Readers),
            "citations" | "citation_count" => Some(Self::Citations),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

fn search_terms(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

fn matches_search(paper: &Paper, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }

    let title = paper.title.to_lowercase();
    let authors = paper.authors.to_lowercase();
    terms
        .iter()
        .all(|term| title.contains(term.as_str()) || authors.contains(term.as_str()))
}

fn matches_area(paper: &Paper, settings: &FilterSettings) -> bool {
    if !settings.zoomed {
        return true;
    }

    if settings.is_streamgraph {
        let Some(title) = settings.title.as_deref() else {
            return true;
        };
        return paper.has_keyword(title);
    }

    match settings.area.as_deref() {
        Some(area) => paper.area_uri == area,
        None => true,
    }
}

fn matches_option(paper: &Paper, settings: &FilterSettings) -> bool {
    let Some(value) = settings.value.as_deref() else {
        return true;
    };
    if value.is_empty() || value == "all" {
        return true;
    }

    if let Some(field) = settings.field.as_deref() {
        return paper
            .field_value(field)
            .is_some_and(|actual| actual.eq_ignore_ascii_case(value));
    }

    match value {
        "open_access" => paper.oa,
        "free_access" => paper.free_access,
        other => paper
            .result_type
            .as_deref()
            .is_some_and(|result_type| result_type.eq_ignore_ascii_case(other)),
    }
}

/// Returns the papers matching the search text, the option filter and, when
/// zoomed, the zoomed area. Relative order is preserved.
pub fn filter_data<'a, I>(
    papers: I,
    search: &SearchSettings,
    filter: &FilterSettings,
) -> Vec<&'a Paper>
where
    I: IntoIterator<Item = &'a Paper>,
{
    let terms = search_terms(&search.value);

    papers
        .into_iter()
        .filter(|paper| matches_search(paper, &terms))
        .filter(|paper| matches_area(paper, filter))
        .filter(|paper| matches_option(paper, filter))
        .collect()
}

fn compare_desc<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort; relevance keeps payload order.
pub fn sort_data(papers: &mut [&Paper], field: SortField) {
    match field {
        SortField::Relevance => {}
        SortField::Year => papers.sort_by(|a, b| compare_desc(a.year_number(), b.year_number())),
        SortField::Readers => papers.sort_by(|a, b| b.num_readers.cmp(&a.num_readers)),
        SortField::Citations => {
            papers.sort_by(|a, b| compare_desc(a.citation_count, b.citation_count))
        }
        SortField::Title => papers.sort_by_key(|paper| paper.title.to_lowercase()),
    }
}
