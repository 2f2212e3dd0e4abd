//! Translates pointer gestures into store actions.
//!
//! Views never touch the store: they report what happened through these
//! functions and hand the returned actions to the app, which dispatches them.

use crate::data::{Area, AreaRef, Paper};
use crate::state::{Action, TransitionToken, ViewState, ZoomSource};

/// Paper size multiplier while the pointer rests on a paper.
pub const HOVER_ENLARGE_FACTOR: f32 = 2.0;

/// Fired by the camera once the transition started for `token` finishes.
pub fn animation_callback(token: TransitionToken) -> Action {
    Action::StopAnimation(token)
}

fn zoom_to_paper_area(paper: &Paper, source: ZoomSource, already_zoomed: bool) -> Action {
    Action::ZoomIn {
        area: paper.area_reference(),
        source,
        already_zoomed,
    }
}

/// Title click in the list: bring the paper's area into view, then select
/// the paper so the zoom cannot drop it. The streamgraph keeps its current
/// stream.
pub fn list_title_click(state: &ViewState, paper: &Paper) -> Vec<Action> {
    let mut actions = Vec::with_capacity(2);
    if !state.is_streamgraph() {
        actions.push(zoom_to_paper_area(paper, ZoomSource::ListArea, state.zoom));
    }
    actions.push(Action::SelectPaper(paper.reference()));
    actions
}

/// Area link click in the list.
pub fn list_area_click(state: &ViewState, paper: &Paper) -> Vec<Action> {
    vec![
        Action::DeselectPaper,
        zoom_to_paper_area(paper, ZoomSource::ListArea, state.zoom),
    ]
}

pub fn list_area_mouse_over(paper: &Paper) -> Action {
    Action::HighlightArea(Some(paper.area_uri.clone()))
}

pub fn list_area_mouse_out() -> Action {
    Action::HighlightArea(None)
}

pub fn pdf_click(paper: &Paper) -> Action {
    Action::ShowPreview(paper.safe_id.clone())
}

pub fn backlink_click() -> Action {
    Action::DeselectPaperBacklink
}

/// The slice of view state the map's handlers depend on.
#[derive(Clone, Copy, Debug)]
pub struct MapContext<'a> {
    pub zoom: bool,
    pub zoomed_uri: Option<&'a str>,
    pub hovered_bubble: Option<&'a str>,
    pub selected_paper: Option<&'a str>,
}

impl<'a> MapContext<'a> {
    pub fn new(state: &'a ViewState) -> Self {
        Self {
            zoom: state.zoom,
            zoomed_uri: state.zoomed_uri(),
            hovered_bubble: state.bubble_order.hovered(),
            selected_paper: state.selected_paper_id(),
        }
    }
}

fn zoom_to_area(area: &Area, already_zoomed: bool) -> Action {
    Action::ZoomIn {
        area: area.reference(),
        source: ZoomSource::Map,
        already_zoomed,
    }
}

/// Single click on a bubble. Inside the zoomed bubble it drops the
/// selection; on another bubble it moves the zoom there.
pub fn bubble_click(ctx: &MapContext<'_>, area: &Area) -> Vec<Action> {
    if ctx.zoomed_uri == Some(area.uri.as_str()) {
        return vec![Action::DeselectPaper];
    }
    if ctx.zoom {
        return vec![zoom_to_area(area, true), Action::DeselectPaper];
    }
    vec![zoom_to_area(area, false)]
}

/// Hover tracking is frozen while zoomed.
pub fn bubble_mouse_over(ctx: &MapContext<'_>, area: &Area) -> Option<Action> {
    if ctx.zoom || ctx.hovered_bubble == Some(area.uri.as_str()) {
        return None;
    }
    Some(Action::HoverBubble(Some(area.uri.clone())))
}

pub fn bubble_double_click(ctx: &MapContext<'_>, area: &Area) -> Option<Action> {
    (ctx.zoomed_uri == Some(area.uri.as_str())).then_some(Action::ZoomOut)
}

/// Click on empty chart space.
pub fn chart_click(ctx: &MapContext<'_>) -> Option<Action> {
    ctx.zoom.then_some(Action::ZoomOut)
}

/// Pointer over empty chart space.
pub fn chart_mouse_over(ctx: &MapContext<'_>) -> Option<Action> {
    if ctx.zoom || ctx.hovered_bubble.is_none() {
        return None;
    }
    Some(Action::HoverBubble(None))
}

/// Click on a paper. Outside zoom the click zooms into the paper's area; a
/// paper click is consumed so the bubble underneath does not see it.
pub fn paper_click(ctx: &MapContext<'_>, paper: &Paper, areas: &[Area]) -> Vec<Action> {
    if !ctx.zoom {
        return areas
            .iter()
            .find(|area| area.uri == paper.area_uri)
            .map(|area| vec![zoom_to_area(area, false)])
            .unwrap_or_default();
    }
    if ctx.selected_paper == Some(paper.safe_id.as_str()) {
        return Vec::new();
    }
    vec![Action::SelectPaper(paper.reference())]
}

pub fn paper_mouse_over(paper: &Paper, enlarge_factor: f32) -> Action {
    Action::HoverPaper(Some(paper.safe_id.clone()), enlarge_factor)
}

pub fn paper_mouse_out() -> Action {
    Action::HoverPaper(None, 1.0)
}

/// Click on a stream band; `None` is a click beside every stream.
pub fn stream_click(ctx: &MapContext<'_>, stream: Option<&str>) -> Vec<Action> {
    match stream {
        Some(name) if ctx.zoomed_uri == Some(name) => vec![Action::DeselectPaper],
        Some(name) => vec![Action::ZoomIn {
            area: AreaRef {
                uri: name.to_owned(),
                title: name.to_owned(),
            },
            source: ZoomSource::Map,
            already_zoomed: ctx.zoom,
        }],
        None if ctx.zoom => vec![Action::ZoomOut],
        None => Vec::new(),
    }
}
