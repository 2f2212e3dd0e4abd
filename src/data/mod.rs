mod accessors;
mod collect;
mod filter;
mod model;
mod parse;
mod streams;

pub use accessors::{
    LinkType, TextLink, get_paper_comments, get_paper_keywords, get_paper_preview_link,
    get_paper_tags, get_paper_text_link,
};
pub use collect::load_dataset;
pub use filter::{FilterSettings, SearchSettings, SortField, filter_data, sort_data};
pub use model::{Area, AreaRef, Comment, DataSet, Paper, PaperRef};
pub use streams::StreamBand;
