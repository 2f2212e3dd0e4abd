use crate::config::{DropdownKind, EmbedConfig};
use crate::data::{LinkType, SortField};

/// List settings and the user-controlled search, filter and sort values.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    pub show: bool,
    pub search_value: String,
    pub filter_value: Option<String>,
    pub filter_field: Option<String>,
    pub sort: SortField,
    pub abstract_size: Option<usize>,
    pub link_type: LinkType,
    pub show_document_type: bool,
    pub show_metrics: bool,
    pub is_content_based: bool,
    pub base_unit: Option<String>,
    pub show_keywords: bool,
    pub hide_unselected_keywords: bool,
    pub show_area: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self::from_config(&EmbedConfig::default())
    }
}

impl ListState {
    pub fn from_config(config: &EmbedConfig) -> Self {
        let filter_field = config
            .dropdown(DropdownKind::Filter)
            .and_then(|dropdown| dropdown.field.clone());

        Self {
            show: true,
            search_value: String::new(),
            filter_value: None,
            filter_field,
            sort: SortField::Relevance,
            abstract_size: config.abstract_size,
            link_type: config.link_type,
            show_document_type: config.show_document_type,
            show_metrics: config.show_metrics,
            is_content_based: config.is_content_based,
            base_unit: config.base_unit.clone(),
            show_keywords: config.show_keywords,
            hide_unselected_keywords: config.hide_keywords_overview,
            show_area: config.show_area,
        }
    }
}
