use crate::data::{AreaRef, PaperRef};

use super::{TransitionKind, TransitionToken, ViewState, ZoomSource};

impl ViewState {
    pub(super) fn zoom_in(
        &mut self,
        area: AreaRef,
        source: ZoomSource,
        already_zoomed: bool,
    ) -> TransitionToken {
        // Moving between zoom targets always drops the selection; from the
        // overview it survives only a zoom into a target it belongs to.
        let switching = self.zoom && self.zoomed_uri() != Some(area.uri.as_str());
        let streamgraph = self.is_streamgraph();
        if switching
            || self
                .selected_paper
                .as_ref()
                .is_some_and(|paper| !paper.belongs_to(&area, streamgraph))
        {
            self.selected_paper = None;
        }

        self.bubble_order.bring_to_front(&area.uri);
        self.bubble_order.clear_hover();
        self.paper_order.clear_hover();
        self.enlarge_factor = 1.0;
        self.highlighted_bubble = None;

        self.zoom = true;
        self.zoom_source = Some(source);
        self.selected_bubble = Some(area);
        self.animation
            .start(TransitionKind::ZoomIn { already_zoomed })
    }

    pub(super) fn zoom_out(&mut self) -> TransitionToken {
        self.zoom = false;
        self.zoom_source = None;
        self.selected_bubble = None;
        self.selected_paper = None;
        self.preview = None;
        self.bubble_order.clear_hover();
        self.paper_order.clear_hover();
        self.enlarge_factor = 1.0;
        self.animation.start(TransitionKind::ZoomOut)
    }

    pub(super) fn select_paper(&mut self, paper: PaperRef) {
        self.paper_order.bring_to_front(&paper.safe_id);
        self.selected_paper = Some(paper);
    }

    pub(super) fn deselect_paper(&mut self) {
        self.selected_paper = None;
    }

    /// Leaving a paper through the streamgraph backlink keeps the zoomed
    /// stream in place.
    pub(super) fn deselect_paper_backlink(&mut self) {
        self.selected_paper = None;
    }
}
