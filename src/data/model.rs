use std::collections::HashMap;

use super::streams::StreamGraph;

#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub comment: String,
    pub author: Option<String>,
}

/// One document of the search result. Loaded once and never mutated by the
/// view layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Paper {
    pub id: String,
    pub safe_id: String,
    pub title: String,
    pub authors: String,
    pub published_in: Option<String>,
    pub year: Option<String>,
    pub paper_abstract: String,
    pub result_type: Option<String>,
    pub oa: bool,
    pub free_access: bool,
    pub citation_count: Option<u64>,
    pub readers: Option<u64>,
    pub tweets: Option<u64>,
    pub num_readers: u64,
    pub area_uri: String,
    pub area: String,
    pub position: [f32; 2],
    pub keywords: Vec<String>,
    pub url: Option<String>,
    pub doi: Option<String>,
    pub link: Option<String>,
    pub comments: Vec<Comment>,
    pub tags: Vec<String>,
}

impl Paper {
    pub fn reference(&self) -> PaperRef {
        PaperRef {
            safe_id: self.safe_id.clone(),
            area_uri: self.area_uri.clone(),
            keywords: self.keywords.iter().map(|keyword| keyword_key(keyword)).collect(),
        }
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        let key = keyword_key(keyword);
        self.keywords.iter().any(|own| keyword_key(own) == key)
    }

    pub fn area_reference(&self) -> AreaRef {
        AreaRef {
            uri: self.area_uri.clone(),
            title: self.area.clone(),
        }
    }

    pub fn is_dataset(&self) -> bool {
        self.result_type.as_deref() == Some("dataset")
    }

    /// Returns the textual value of a filterable field, if the paper has one.
    pub fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "title" => Some(self.title.clone()),
            "authors" | "authors_string" => Some(self.authors.clone()),
            "published_in" => self.published_in.clone(),
            "year" => self.year.clone(),
            "resulttype" => self.result_type.clone(),
            "oa" | "open_access" => Some(self.oa.to_string()),
            "free_access" => Some(self.free_access.to_string()),
            "area" => Some(self.area.clone()),
            "area_uri" => Some(self.area_uri.clone()),
            _ => None,
        }
    }

    pub fn year_number(&self) -> Option<i32> {
        let year = self.year.as_deref()?.trim();
        year.get(..4).unwrap_or(year).parse().ok()
    }
}

/// A topic cluster drawn as a bubble on the knowledge map.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    pub uri: String,
    pub title: String,
    pub position: [f32; 2],
    pub size: f32,
    pub papers: Vec<String>,
}

impl Area {
    pub fn reference(&self) -> AreaRef {
        AreaRef {
            uri: self.uri.clone(),
            title: self.title.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaRef {
    pub uri: String,
    pub title: String,
}

/// Case-folded form under which keywords are grouped and matched.
pub fn keyword_key(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaperRef {
    pub safe_id: String,
    pub area_uri: String,
    /// Keywords in [`keyword_key`] form; streams are keywords.
    pub keywords: Vec<String>,
}

impl PaperRef {
    /// Whether the paper belongs to `area`: its topic area on the map, one of
    /// its keywords on the streamgraph.
    pub fn belongs_to(&self, area: &AreaRef, streamgraph: bool) -> bool {
        if streamgraph {
            let key = keyword_key(&area.title);
            self.keywords.iter().any(|keyword| *keyword == key)
        } else {
            self.area_uri == area.uri
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DataSet {
    pub papers: Vec<Paper>,
    pub areas: Vec<Area>,
    pub streams: StreamGraph,
    pub timestamp: Option<String>,
    pub service: Option<String>,
    pub query: Option<String>,
    index_by_id: HashMap<String, usize>,
}

impl DataSet {
    pub fn new(papers: Vec<Paper>, areas: Vec<Area>, streams: StreamGraph) -> Self {
        let index_by_id = papers
            .iter()
            .enumerate()
            .map(|(index, paper)| (paper.safe_id.clone(), index))
            .collect();

        Self {
            papers,
            areas,
            streams,
            timestamp: None,
            service: None,
            query: None,
            index_by_id,
        }
    }

    pub fn paper(&self, safe_id: &str) -> Option<&Paper> {
        self.index_by_id
            .get(safe_id)
            .and_then(|&index| self.papers.get(index))
    }

    pub fn area(&self, uri: &str) -> Option<&Area> {
        self.areas.iter().find(|area| area.uri == uri)
    }

    pub fn paper_count(&self) -> usize {
        self.papers.len()
    }
}
