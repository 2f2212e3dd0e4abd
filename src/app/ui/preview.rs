use eframe::egui::{self, Context, RichText, ScrollArea};

use crate::data::get_paper_preview_link;
use crate::state::Action;

use super::super::ViewModel;

impl ViewModel {
    /// Floating document preview opened from a list entry's PDF button.
    pub(in crate::app) fn draw_preview(&self, ctx: &Context, actions: &mut Vec<Action>) {
        let Some(safe_id) = self.store.state().preview.as_deref() else {
            return;
        };
        let Some(paper) = self.data.paper(safe_id) else {
            actions.push(Action::HidePreview);
            return;
        };

        let mut open = true;
        egui::Window::new("Preview")
            .id(egui::Id::new("paper_preview"))
            .open(&mut open)
            .collapsible(false)
            .default_width(480.0)
            .show(ctx, |ui| {
                ui.label(RichText::new(&paper.title).strong());
                if !paper.authors.is_empty() {
                    ui.small(paper.authors.as_str());
                }
                match get_paper_preview_link(paper) {
                    Some(link) => {
                        ui.hyperlink_to("Open full text", link);
                    }
                    None => {
                        ui.weak("No full text available.");
                    }
                }
                ui.separator();
                ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                    ui.label(paper.paper_abstract.as_str());
                });
            });

        if !open {
            actions.push(Action::HidePreview);
        }
    }
}
