use tracing::debug;

use crate::config::EmbedConfig;
use crate::data::{AreaRef, FilterSettings, PaperRef, SearchSettings, SortField};
use crate::localization::Localization;

mod animation;
mod list;
mod order;
mod zoom;

pub use animation::{AnimationState, Transition, TransitionKind, TransitionToken};
pub use list::ListState;
pub use order::{DrawOrder, sort_by_order};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartType {
    #[default]
    KnowledgeMap,
    Streamgraph,
}

/// Where a zoom request came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomSource {
    Map,
    ListArea,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ZoomIn {
        area: AreaRef,
        source: ZoomSource,
        already_zoomed: bool,
    },
    ZoomOut,
    StopAnimation(TransitionToken),
    SelectPaper(PaperRef),
    DeselectPaper,
    DeselectPaperBacklink,
    HoverBubble(Option<String>),
    HoverPaper(Option<String>, f32),
    HighlightArea(Option<String>),
    ShowPreview(String),
    HidePreview,
    ToggleList,
    SetSearchValue(String),
    SetFilter {
        field: Option<String>,
        value: Option<String>,
    },
    SetSort(SortField),
    Resize {
        width: f32,
        height: f32,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartSize {
    pub width: f32,
    pub height: f32,
}

/// Everything the views render from. Mutated only through [`Store::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub chart_type: ChartType,
    pub zoom: bool,
    pub zoom_source: Option<ZoomSource>,
    pub selected_bubble: Option<AreaRef>,
    pub selected_paper: Option<PaperRef>,
    pub highlighted_bubble: Option<String>,
    pub bubble_order: DrawOrder,
    pub paper_order: DrawOrder,
    pub enlarge_factor: f32,
    pub animation: AnimationState,
    pub list: ListState,
    pub preview: Option<String>,
    pub chart: ChartSize,
    pub localization: Localization,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::from_config(&EmbedConfig::default())
    }
}

impl ViewState {
    pub fn from_config(config: &EmbedConfig) -> Self {
        Self {
            chart_type: if config.is_streamgraph {
                ChartType::Streamgraph
            } else {
                ChartType::KnowledgeMap
            },
            zoom: false,
            zoom_source: None,
            selected_bubble: None,
            selected_paper: None,
            highlighted_bubble: None,
            bubble_order: DrawOrder::default(),
            paper_order: DrawOrder::default(),
            enlarge_factor: 1.0,
            animation: AnimationState::default(),
            list: ListState::from_config(config),
            preview: None,
            chart: ChartSize::default(),
            localization: config.localization.clone(),
        }
    }

    pub fn is_streamgraph(&self) -> bool {
        self.chart_type == ChartType::Streamgraph
    }

    pub fn zoomed_uri(&self) -> Option<&str> {
        self.selected_bubble.as_ref().map(|area| area.uri.as_str())
    }

    pub fn selected_paper_id(&self) -> Option<&str> {
        self.selected_paper
            .as_ref()
            .map(|paper| paper.safe_id.as_str())
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            value: self.list.search_value.clone(),
        }
    }

    pub fn filter_settings(&self) -> FilterSettings {
        FilterSettings {
            value: self.list.filter_value.clone(),
            field: self.list.filter_field.clone(),
            zoomed: self.zoom,
            area: self.zoomed_uri().map(str::to_owned),
            is_streamgraph: self.is_streamgraph(),
            title: self.selected_bubble.as_ref().map(|area| area.title.clone()),
        }
    }

    fn apply(&mut self, action: Action) -> Option<TransitionToken> {
        match action {
            Action::ZoomIn {
                area,
                source,
                already_zoomed,
            } => return Some(self.zoom_in(area, source, already_zoomed)),
            Action::ZoomOut => return Some(self.zoom_out()),
            Action::StopAnimation(token) => {
                if !self.animation.complete(token) {
                    debug!(?token, "ignoring stale transition completion");
                }
            }
            Action::SelectPaper(paper) => self.select_paper(paper),
            Action::DeselectPaper => self.deselect_paper(),
            Action::DeselectPaperBacklink => self.deselect_paper_backlink(),
            Action::HoverBubble(uri) => self.bubble_order.hover(uri.as_deref()),
            Action::HoverPaper(safe_id, enlarge_factor) => {
                self.paper_order.hover(safe_id.as_deref());
                self.enlarge_factor = if safe_id.is_some() {
                    enlarge_factor
                } else {
                    1.0
                };
            }
            Action::HighlightArea(uri) => self.highlighted_bubble = uri,
            Action::ShowPreview(safe_id) => self.preview = Some(safe_id),
            Action::HidePreview => self.preview = None,
            Action::ToggleList => self.list.show = !self.list.show,
            Action::SetSearchValue(value) => self.list.search_value = value,
            Action::SetFilter { field, value } => {
                if field.is_some() {
                    self.list.filter_field = field;
                }
                self.list.filter_value = value;
            }
            Action::SetSort(sort) => self.list.sort = sort,
            Action::Resize { width, height } => self.chart = ChartSize { width, height },
        }

        None
    }
}

/// Owns the view state; every change goes through [`Store::dispatch`].
#[derive(Clone, Debug, Default)]
pub struct Store {
    state: ViewState,
}

impl Store {
    pub fn new(state: ViewState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Applies `action`. Zoom transitions return the token that has to be
    /// passed back through [`Action::StopAnimation`] once they finish.
    pub fn dispatch(&mut self, action: Action) -> Option<TransitionToken> {
        debug!(?action, "dispatch");
        self.state.apply(action)
    }

    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }
}
