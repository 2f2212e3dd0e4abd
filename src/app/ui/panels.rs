use eframe::egui::{RichText, Ui};

use super::super::ViewModel;
use super::super::props::{created_by, header_props};

impl ViewModel {
    pub(in crate::app) fn draw_header(&self, ui: &mut Ui) {
        let state = self.store.state();
        let header = header_props(&self.config, &self.data, state);

        ui.add_space(4.0);
        ui.heading(RichText::new(&header.title).strong());
        if let Some(context) = &header.context {
            ui.small(context.as_str());
        }
        if let Some(intro) = header.intro {
            ui.collapsing(state.localization.intro_label.as_str(), |ui| {
                ui.label(intro);
            });
        }
        ui.add_space(4.0);
    }

    pub(in crate::app) fn draw_footer(&self, ui: &mut Ui) {
        let service = self
            .data
            .service
            .as_deref()
            .or(self.config.service.as_deref());
        let Some(created) = created_by(service, self.data.timestamp.as_deref()) else {
            return;
        };

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.small(created.lead);
            ui.hyperlink_to(RichText::new(created.link_label).small(), &self.config.faqs_url);
            ui.small(created.tail);
        });
    }
}
