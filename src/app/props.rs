//! Pure derivations from the store to what the widgets draw. Everything the
//! render code decides lives here so it can be checked without a window.

use std::fmt;

use crate::config::{EmbedConfig, FOOTER_SERVICES};
use crate::data::{
    Area, Comment, DataSet, Paper, TextLink, filter_data, get_paper_comments, get_paper_keywords,
    get_paper_preview_link, get_paper_tags, get_paper_text_link, sort_data,
};
use crate::localization::Localization;
use crate::state::ViewState;
use crate::util::{date_time_from_timestamp, shorten};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct AccessFlags {
    pub open_access: bool,
    pub free_access: bool,
    pub dataset: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Metrics {
    pub tweets: Option<u64>,
    pub readers: Option<u64>,
    pub citations: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct Backlink {
    pub show: bool,
    pub in_stream: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct ListEntryProps<'a> {
    pub safe_id: &'a str,
    pub title: &'a str,
    pub access: AccessFlags,
    pub tags: Option<&'a [String]>,
    pub preview_link: Option<String>,
    pub authors: &'a str,
    pub source: Option<&'a str>,
    pub year: Option<&'a str>,
    pub link: Option<TextLink>,
    pub document_type: Option<&'a str>,
    pub abstract_text: String,
    pub comments: Option<&'a [Comment]>,
    pub keywords: Option<String>,
    pub metrics: Option<Metrics>,
    pub base_unit: Option<&'a str>,
    pub area: Option<&'a str>,
    /// Reader count shown next to the title when metrics are off.
    pub citations: Option<u64>,
    pub backlink: Backlink,
}

pub(super) fn list_entry_props<'a>(paper: &'a Paper, state: &'a ViewState) -> ListEntryProps<'a> {
    let list = &state.list;
    let selected = state.selected_paper.is_some();
    let base_unit = list.base_unit.as_deref();

    let abstract_size = if selected { None } else { list.abstract_size };
    let abstract_text = match abstract_size {
        Some(size) if size > 0 => shorten(&paper.paper_abstract, size),
        _ => paper.paper_abstract.clone(),
    };

    let show_keywords = list.show_keywords && (selected || !list.hide_unselected_keywords);

    ListEntryProps {
        safe_id: &paper.safe_id,
        title: &paper.title,
        access: AccessFlags {
            open_access: paper.oa,
            free_access: paper.free_access,
            dataset: paper.is_dataset(),
        },
        tags: get_paper_tags(paper),
        preview_link: get_paper_preview_link(paper),
        authors: &paper.authors,
        source: paper.published_in.as_deref(),
        year: paper.year.as_deref(),
        link: get_paper_text_link(paper, list.link_type),
        document_type: if list.show_document_type {
            paper.result_type.as_deref()
        } else {
            None
        },
        abstract_text,
        comments: get_paper_comments(paper),
        keywords: show_keywords.then(|| get_paper_keywords(paper, &state.localization)),
        metrics: list.show_metrics.then_some(Metrics {
            tweets: paper.tweets,
            readers: paper.readers,
            citations: paper.citation_count,
        }),
        base_unit: if list.is_content_based { None } else { base_unit },
        area: if !state.is_streamgraph() && list.show_area {
            Some(paper.area.as_str())
        } else {
            None
        },
        citations: (!list.is_content_based && base_unit.is_some() && !list.show_metrics)
            .then_some(paper.num_readers),
        backlink: Backlink {
            show: state.is_streamgraph() && selected,
            in_stream: state.selected_bubble.is_some(),
        },
    }
}

/// Papers the list shows: the selected paper alone, or every paper passing
/// the current search and filter, in the chosen sort order.
pub(super) fn displayed_papers<'a>(data: &'a DataSet, state: &ViewState) -> Vec<&'a Paper> {
    if let Some(selected) = state.selected_paper_id() {
        return data.paper(selected).into_iter().collect();
    }

    let mut papers = filter_data(
        &data.papers,
        &state.search_settings(),
        &state.filter_settings(),
    );
    sort_data(&mut papers, state.list.sort);
    papers
}

pub(super) fn list_toggle_label(show: bool, count: usize, localization: &Localization) -> String {
    let action = if show {
        &localization.hide_list
    } else {
        &localization.show_list
    };
    format!("{action} ({count} {})", localization.items)
}

/// Attribution line under the visualization, split around the FAQ link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct CreatedBy {
    pub lead: String,
    pub link_label: &'static str,
    pub tail: &'static str,
}

impl fmt::Display for CreatedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lead, self.link_label, self.tail)
    }
}

/// Only the hosted integrations carry the attribution.
pub(super) fn created_by(service: Option<&str>, timestamp: Option<&str>) -> Option<CreatedBy> {
    let service = service?;
    if !FOOTER_SERVICES.contains(&service) {
        return None;
    }

    let date = date_time_from_timestamp(timestamp)
        .map(|date| format!(" {date}"))
        .unwrap_or_default();
    Some(CreatedBy {
        lead: format!(
            "This visualization was created by Open Knowledge Maps{date}. For more information read our "
        ),
        link_label: "FAQs",
        tail: ".",
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct HeaderProps<'a> {
    pub intro: Option<&'a str>,
    pub title: String,
    pub context: Option<String>,
}

pub(super) fn header_props<'a>(
    config: &'a EmbedConfig,
    data: &DataSet,
    state: &ViewState,
) -> HeaderProps<'a> {
    let localization = &state.localization;
    let query = config.query().or(data.query.as_deref());

    let title = match query {
        Some(query) if config.create_title_from_context => {
            let prefix = if state.is_streamgraph() {
                &localization.streamgraph_title
            } else {
                &localization.overview_title
            };
            format!("{prefix} {query}")
        }
        _ => config.title.clone(),
    };

    let context = config.show_context.then(|| {
        let mut parts = vec![format!("{} {}", data.paper_count(), localization.documents)];
        if let Some(service) = data.service.as_deref().or(config.service.as_deref()) {
            parts.push(format!("{}: {}", localization.source, config.service_name(service)));
        }
        if let Some(date) = date_time_from_timestamp(data.timestamp.as_deref()) {
            parts.push(date);
        }
        parts.join(" · ")
    });

    HeaderProps {
        intro: Some(config.intro.as_str()).filter(|intro| !intro.trim().is_empty()),
        title,
        context,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct PaperVisual {
    pub selected: bool,
    pub hovered: bool,
    /// Size multiplier applied on top of the reader-based size.
    pub scale: f32,
    pub faded: bool,
}

pub(super) fn paper_visual(paper: &Paper, state: &ViewState) -> PaperVisual {
    let selected = state.selected_paper_id() == Some(paper.safe_id.as_str());
    let hovered = state.paper_order.hovered() == Some(paper.safe_id.as_str());
    let faded = state.selected_paper.is_some() && !selected;

    PaperVisual {
        selected,
        hovered,
        scale: if hovered && !selected {
            state.enlarge_factor
        } else {
            1.0
        },
        faded,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct BubbleVisual {
    pub hovered: bool,
    pub zoomed: bool,
    pub highlighted: bool,
    /// Another bubble is zoomed.
    pub dimmed: bool,
    pub show_label: bool,
}

pub(super) fn bubble_visual(area: &Area, state: &ViewState) -> BubbleVisual {
    let zoomed = state.zoomed_uri() == Some(area.uri.as_str());
    let hovered = state.bubble_order.hovered() == Some(area.uri.as_str());

    BubbleVisual {
        hovered,
        zoomed,
        highlighted: state.highlighted_bubble.as_deref() == Some(area.uri.as_str()),
        dimmed: state.zoom && !zoomed,
        show_label: !state.zoom || zoomed,
    }
}

/// Splits the map's papers into those drawn below the bubbles and those drawn
/// above them: papers of the hovered or zoomed area go on top.
pub(super) fn split_active_papers<'a>(
    papers: &[&'a Paper],
    state: &ViewState,
) -> (Vec<&'a Paper>, Vec<&'a Paper>) {
    let hovered = state.bubble_order.hovered();
    let zoomed = state.zoomed_uri();
    papers.iter().copied().partition(|paper| {
        let uri = Some(paper.area_uri.as_str());
        uri != hovered && uri != zoomed
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::test_support::{area, paper};
    use crate::data::AreaRef;
    use crate::state::{Action, Store, ZoomSource};

    fn store_with(config: &EmbedConfig) -> Store {
        Store::new(ViewState::from_config(config))
    }

    fn created_by_text(service: Option<&str>, timestamp: Option<&str>) -> Option<String> {
        created_by(service, timestamp).map(|created| created.to_string())
    }

    fn rich_paper() -> Paper {
        let mut entry = paper("p1", "a");
        entry.paper_abstract = "one two three four five six seven eight".to_owned();
        entry.keywords = vec!["orient".to_owned(), "travel".to_owned()];
        entry.readers = Some(12);
        entry.num_readers = 12;
        entry.citation_count = Some(3);
        entry.tweets = Some(1);
        entry.result_type = Some("dataset".to_owned());
        entry.oa = true;
        entry.link = Some("https://example.org/p1.pdf".to_owned());
        entry
    }

    #[test]
    fn footer_renders_for_base_with_date() {
        assert_eq!(
            created_by_text(Some("base"), Some("2020-07-09 18:20:14")).as_deref(),
            Some(
                "This visualization was created by Open Knowledge Maps on 9 Jul 2020 at 18:20. For more information read our FAQs."
            )
        );
    }

    #[test]
    fn footer_renders_without_timestamp() {
        assert_eq!(
            created_by_text(Some("pubmed"), None).as_deref(),
            Some(
                "This visualization was created by Open Knowledge Maps. For more information read our FAQs."
            )
        );
    }

    #[test]
    fn footer_is_hidden_for_unknown_or_missing_service() {
        assert_eq!(
            created_by_text(Some("something-random"), Some("2020-07-09 18:20:14")),
            None
        );
        assert_eq!(created_by_text(None, Some("2020-07-09 18:20:14")), None);
    }

    #[test]
    fn footer_link_is_the_faq_label_only() {
        let created = created_by(Some("base"), None).unwrap();
        assert_eq!(created.link_label, "FAQs");
        assert_eq!(created.tail, ".");
        assert!(created.lead.ends_with("read our "));
        assert!(!created.lead.contains("FAQs"));
        assert_eq!(
            created.to_string(),
            "This visualization was created by Open Knowledge Maps. For more information read our FAQs."
        );
    }

    #[test]
    fn overview_entry_shortens_abstract_and_hides_keywords() {
        let mut config = EmbedConfig::default();
        config.abstract_size = Some(15);
        let store = store_with(&config);
        let entry = rich_paper();

        let props = list_entry_props(&entry, store.state());
        assert_eq!(props.abstract_text, "one two three...");
        assert_eq!(props.keywords, None);
        assert_eq!(props.area, Some("Area a"));
        assert_eq!(props.document_type, Some("dataset"));
        assert!(props.access.dataset && props.access.open_access);
        assert_eq!(props.preview_link.as_deref(), Some("https://example.org/p1.pdf"));
        assert_eq!(props.citations, Some(12));
        assert_eq!(props.metrics, None);
        assert_eq!(props.backlink, Backlink::default());
    }

    #[test]
    fn selected_entry_shows_full_abstract_and_keywords() {
        let mut config = EmbedConfig::default();
        config.abstract_size = Some(15);
        let mut store = store_with(&config);
        let entry = rich_paper();
        store.dispatch(Action::SelectPaper(entry.reference()));

        let props = list_entry_props(&entry, store.state());
        assert_eq!(props.abstract_text, entry.paper_abstract);
        assert_eq!(props.keywords.as_deref(), Some("orient; travel"));
    }

    #[test]
    fn keywords_shown_in_overview_when_not_hidden() {
        let config = EmbedConfig {
            hide_keywords_overview: false,
            ..EmbedConfig::default()
        };
        let store = store_with(&config);
        let entry = rich_paper();
        assert_eq!(
            list_entry_props(&entry, store.state()).keywords.as_deref(),
            Some("orient; travel")
        );

        let config = EmbedConfig {
            show_keywords: false,
            hide_keywords_overview: false,
            ..EmbedConfig::default()
        };
        let store = store_with(&config);
        assert_eq!(list_entry_props(&entry, store.state()).keywords, None);
    }

    #[test]
    fn metrics_replace_reader_count() {
        let config = EmbedConfig {
            show_metrics: true,
            ..EmbedConfig::default()
        };
        let store = store_with(&config);
        let entry = rich_paper();
        let props = list_entry_props(&entry, store.state());
        assert_eq!(
            props.metrics,
            Some(Metrics {
                tweets: Some(1),
                readers: Some(12),
                citations: Some(3),
            })
        );
        assert_eq!(props.citations, None);
    }

    #[test]
    fn content_based_maps_have_no_base_unit() {
        let config = EmbedConfig {
            is_content_based: true,
            ..EmbedConfig::default()
        };
        let store = store_with(&config);
        let entry = rich_paper();
        let props = list_entry_props(&entry, store.state());
        assert_eq!(props.base_unit, None);
        assert_eq!(props.citations, None);
    }

    #[test]
    fn streamgraph_entries_carry_backlink_instead_of_area() {
        let config = EmbedConfig {
            is_streamgraph: true,
            ..EmbedConfig::default()
        };
        let mut store = store_with(&config);
        let entry = rich_paper();

        let props = list_entry_props(&entry, store.state());
        assert_eq!(props.area, None);
        assert!(!props.backlink.show);

        store.dispatch(Action::SelectPaper(entry.reference()));
        let props = list_entry_props(&entry, store.state());
        assert_eq!(
            props.backlink,
            Backlink {
                show: true,
                in_stream: false,
            }
        );

        store.dispatch(Action::ZoomIn {
            area: AreaRef {
                uri: "orient".to_owned(),
                title: "orient".to_owned(),
            },
            source: ZoomSource::Map,
            already_zoomed: false,
        });
        let props = list_entry_props(&entry, store.state());
        assert!(props.backlink.show && props.backlink.in_stream);
    }

    #[test]
    fn list_shows_only_the_selected_paper() {
        let data = DataSet::new(
            vec![paper("a1", "a"), paper("a2", "a"), paper("b1", "b")],
            vec![area("a", &["a1", "a2"]), area("b", &["b1"])],
            Default::default(),
        );
        let mut store = Store::default();
        assert_eq!(displayed_papers(&data, store.state()).len(), 3);

        store.dispatch(Action::SelectPaper(data.papers[1].reference()));
        let shown = displayed_papers(&data, store.state());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].safe_id, "a2");
    }

    #[test]
    fn list_follows_zoom_and_search() {
        let data = DataSet::new(
            vec![paper("a1", "a"), paper("a2", "a"), paper("b1", "b")],
            vec![area("a", &["a1", "a2"]), area("b", &["b1"])],
            Default::default(),
        );
        let mut store = Store::default();
        store.dispatch(Action::ZoomIn {
            area: data.areas[0].reference(),
            source: ZoomSource::Map,
            already_zoomed: false,
        });
        store.dispatch(Action::SetSearchValue("a2".to_owned()));

        let shown = displayed_papers(&data, store.state())
            .into_iter()
            .map(|paper| paper.safe_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(shown, ["a2"]);
    }

    #[test]
    fn toggle_label() {
        let localization = Localization::default();
        assert_eq!(list_toggle_label(true, 12, &localization), "Hide list (12 items)");
        assert_eq!(list_toggle_label(false, 0, &localization), "Show list (0 items)");
    }

    #[test]
    fn header_built_from_context() {
        let mut config: EmbedConfig = serde_json::from_value(json!({
            "title": "LinkedCat+",
            "intro": "  ",
        }))
        .expect("valid config");
        config.files = vec![crate::config::DataFile {
            title: "hammer-purgstall".to_owned(),
            file: "data.json".to_owned(),
        }];
        config.create_title_from_context = true;
        config.show_context = true;

        let mut data = DataSet::new(vec![paper("p", "a")], Vec::new(), Default::default());
        data.service = Some("linkedcat".to_owned());
        data.timestamp = Some("2020-07-09 18:20:14".to_owned());

        let state = ViewState::from_config(&config);
        let header = header_props(&config, &data, &state);
        assert_eq!(header.intro, None);
        assert_eq!(header.title, "Overview of research on hammer-purgstall");
        assert_eq!(
            header.context.as_deref(),
            Some("1 documents · Source: LinkedCat+ · on 9 Jul 2020 at 18:20")
        );

        config.is_streamgraph = true;
        let state = ViewState::from_config(&config);
        assert_eq!(
            header_props(&config, &data, &state).title,
            "Streamgraph for hammer-purgstall"
        );
    }

    #[test]
    fn header_falls_back_to_configured_title() {
        let config = EmbedConfig {
            intro: "Welcome".to_owned(),
            ..EmbedConfig::default()
        };
        let data = DataSet::default();
        let state = ViewState::from_config(&config);
        let header = header_props(&config, &data, &state);
        assert_eq!(header.title, "Headstart");
        assert_eq!(header.intro, Some("Welcome"));
        assert_eq!(header.context, None);
    }

    #[test]
    fn paper_visual_flags() {
        let mut store = Store::default();
        let first = paper("p", "a");
        let second = paper("q", "a");
        store.dispatch(Action::HoverPaper(Some("q".to_owned()), 2.0));

        let visual = paper_visual(&second, store.state());
        assert!(visual.hovered && !visual.selected);
        assert_eq!(visual.scale, 2.0);

        store.dispatch(Action::SelectPaper(first.reference()));
        assert!(paper_visual(&first, store.state()).selected);
        assert!(paper_visual(&second, store.state()).faded);
    }

    #[test]
    fn bubble_visual_flags() {
        let mut store = Store::default();
        let first = area("a", &[]);
        let second = area("b", &[]);
        store.dispatch(Action::HoverBubble(Some("a".to_owned())));
        store.dispatch(Action::HighlightArea(Some("b".to_owned())));

        assert!(bubble_visual(&first, store.state()).hovered);
        assert!(bubble_visual(&second, store.state()).highlighted);

        store.dispatch(Action::ZoomIn {
            area: second.reference(),
            source: ZoomSource::Map,
            already_zoomed: false,
        });
        let zoomed = bubble_visual(&second, store.state());
        assert!(zoomed.zoomed && zoomed.show_label && !zoomed.dimmed);
        let other = bubble_visual(&first, store.state());
        assert!(other.dimmed && !other.show_label);
    }

    #[test]
    fn active_papers_are_those_of_hovered_or_zoomed_area() {
        let papers = [paper("a1", "a"), paper("b1", "b"), paper("c1", "c")];
        let refs = papers.iter().collect::<Vec<_>>();
        let mut store = Store::default();
        store.dispatch(Action::HoverBubble(Some("b".to_owned())));

        let (inactive, active) = split_active_papers(&refs, store.state());
        assert_eq!(inactive.len(), 2);
        assert_eq!(active[0].safe_id, "b1");
    }
}
