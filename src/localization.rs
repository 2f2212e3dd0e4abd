use serde::Deserialize;

/// Display strings used by the list, header and map. Every entry can be
/// overridden from the data config; missing entries keep the English default.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Localization {
    pub show_list: String,
    pub hide_list: String,
    pub items: String,
    pub no_keywords: String,
    pub keywords: String,
    pub area: String,
    pub default_readers: String,
    pub citations: String,
    pub tweets: String,
    pub readers: String,
    pub dataset: String,
    pub open_access: String,
    pub free_access: String,
    pub backlink: String,
    pub backlink_list: String,
    pub overview_title: String,
    pub streamgraph_title: String,
    pub documents: String,
    pub source: String,
    pub search_placeholder: String,
    pub no_results: String,
    pub intro_label: String,
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            show_list: "Show list".to_owned(),
            hide_list: "Hide list".to_owned(),
            items: "items".to_owned(),
            no_keywords: "n/a".to_owned(),
            keywords: "Keywords".to_owned(),
            area: "Area".to_owned(),
            default_readers: "readers".to_owned(),
            citations: "citations".to_owned(),
            tweets: "tweets".to_owned(),
            readers: "readers".to_owned(),
            dataset: "dataset".to_owned(),
            open_access: "open access".to_owned(),
            free_access: "free access".to_owned(),
            backlink: "← Show all documents in stream".to_owned(),
            backlink_list: "← Show all documents".to_owned(),
            overview_title: "Overview of research on".to_owned(),
            streamgraph_title: "Streamgraph for".to_owned(),
            documents: "documents".to_owned(),
            source: "Source".to_owned(),
            search_placeholder: "Search within visualization...".to_owned(),
            no_results: "Sorry, no documents match your search.".to_owned(),
            intro_label: "More info".to_owned(),
        }
    }
}
