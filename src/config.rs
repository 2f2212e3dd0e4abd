use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::LinkType;
use crate::localization::Localization;
use crate::util::json_body;

/// Services whose results carry the "created by" footer.
pub const FOOTER_SERVICES: [&str; 3] = ["base", "pubmed", "openaire"];

const DEFAULT_FAQS_URL: &str = "https://openknowledgemaps.org/faq";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct DataFile {
    pub title: String,
    pub file: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DropdownKind {
    #[default]
    Filter,
    Sort,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DropdownEntry {
    pub id: String,
    pub text: String,
}

/// One dropdown of the search options bar.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Dropdown {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: DropdownKind,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub fields: Vec<DropdownEntry>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisType {
    #[default]
    KnowledgeMap,
    Timeline,
}

impl VisType {
    /// `timeline` selects the streamgraph; anything else the knowledge map.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("timeline") => Self::Timeline,
            _ => Self::KnowledgeMap,
        }
    }
}

/// Parameters of the embedding page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub service: Option<String>,
    pub query: Option<String>,
    pub file: Option<String>,
    pub vis_type: VisType,
    pub server_url: Option<String>,
}

/// Configuration consumed by the visualization root.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Window title.
    pub title: String,
    /// Data sources; the first entry is loaded.
    pub files: Vec<DataFile>,
    /// Base directory for relative data files.
    pub server_url: Option<String>,
    /// Show the context line (document count, source, date) under the title.
    pub show_context: bool,
    /// Build the heading from the query instead of `title`.
    pub create_title_from_context: bool,
    /// Intro text in the header; empty disables it.
    pub intro: String,
    /// Streamgraph instead of knowledge map.
    pub is_streamgraph: bool,
    /// Show the area link in list entries.
    pub show_area: bool,
    /// Filter and sort dropdowns; knowledge-map mode only.
    pub options: Option<Vec<Dropdown>>,
    /// Dropdowns available per service.
    pub search_options: HashMap<String, Vec<Dropdown>>,
    /// Display names of the data integrations.
    pub service_names: HashMap<String, String>,
    pub service: Option<String>,
    pub abstract_size: Option<usize>,
    pub link_type: LinkType,
    pub show_document_type: bool,
    pub show_metrics: bool,
    pub is_content_based: bool,
    pub base_unit: Option<String>,
    pub show_keywords: bool,
    pub hide_keywords_overview: bool,
    pub faqs_url: String,
    pub localization: Localization,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            title: "Headstart".to_owned(),
            files: Vec::new(),
            server_url: None,
            show_context: false,
            create_title_from_context: false,
            intro: String::new(),
            is_streamgraph: false,
            show_area: true,
            options: None,
            search_options: HashMap::new(),
            service_names: default_service_names(),
            service: None,
            abstract_size: Some(250),
            link_type: LinkType::Url,
            show_document_type: true,
            show_metrics: false,
            is_content_based: false,
            base_unit: Some("readers".to_owned()),
            show_keywords: true,
            hide_keywords_overview: true,
            faqs_url: DEFAULT_FAQS_URL.to_owned(),
            localization: Localization::default(),
        }
    }
}

fn default_service_names() -> HashMap<String, String> {
    [
        ("base", "BASE"),
        ("pubmed", "PubMed"),
        ("openaire", "OpenAIRE"),
        ("linkedcat", "LinkedCat+"),
        ("linkedcat_authorview", "LinkedCat+"),
        ("linkedcat_browseview", "LinkedCat+"),
    ]
    .into_iter()
    .map(|(key, name)| (key.to_owned(), name.to_owned()))
    .collect()
}

impl EmbedConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(json_body(&raw))
            .with_context(|| format!("invalid config JSON in {}", path.display()))
    }

    /// Applies the embedding page's parameters on top of the data config.
    pub fn apply_query(&mut self, params: &QueryParams) {
        if let Some(file) = &params.file {
            self.files = vec![DataFile {
                title: params.query.clone().unwrap_or_default(),
                file: file.clone(),
            }];
        }
        if let Some(server_url) = &params.server_url {
            self.server_url = Some(server_url.clone());
        }
        if params.service.is_some() {
            self.service = params.service.clone();
        }

        self.show_context = true;
        self.create_title_from_context = true;
        self.intro = String::new();

        match params.vis_type {
            VisType::Timeline => {
                self.is_streamgraph = true;
                self.show_area = false;
            }
            VisType::KnowledgeMap => {
                self.options = self
                    .service
                    .as_ref()
                    .and_then(|service| self.search_options.get(service))
                    .cloned();
            }
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.files
            .first()
            .map(|file| file.title.as_str())
            .filter(|title| !title.is_empty())
    }

    pub fn service_name(&self, service: &str) -> String {
        self.service_names
            .get(service)
            .cloned()
            .unwrap_or_else(|| service.to_owned())
    }

    pub fn dropdown(&self, kind: DropdownKind) -> Option<&Dropdown> {
        self.options
            .as_ref()?
            .iter()
            .find(|dropdown| dropdown.kind == kind)
    }
}
