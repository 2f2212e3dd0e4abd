use eframe::egui::{self, Button, Color32, FontId, Label, RichText, ScrollArea, Sense, Ui, vec2};

use crate::data::Paper;
use crate::events;
use crate::state::Action;
use crate::util::format_count;

use super::super::ViewModel;
use super::super::props::{
    ListEntryProps, Metrics, displayed_papers, list_entry_props, list_toggle_label,
};
use super::highlight::highlighted_job;

const OPEN_ACCESS_COLOR: Color32 = Color32::from_rgb(222, 120, 40);
const TAG_COLOR: Color32 = Color32::from_rgb(110, 110, 110);

fn metric_text(value: Option<u64>, label: &str) -> String {
    let value = value.map(format_count).unwrap_or_else(|| "n/a".to_owned());
    format!("{value} {label}")
}

impl ViewModel {
    pub(in crate::app) fn draw_list(&self, ui: &mut Ui, actions: &mut Vec<Action>) {
        let state = self.store.state();
        let papers = displayed_papers(&self.data, state);

        let label = list_toggle_label(state.list.show, papers.len(), &state.localization);
        let toggle = ui.add_sized([ui.available_width(), 28.0], Button::new(label));
        if toggle.clicked() {
            actions.push(Action::ToggleList);
        }
        if !state.list.show {
            return;
        }

        ui.add_space(4.0);
        self.draw_search_controls(ui, actions);
        ui.separator();

        if papers.is_empty() {
            ui.label(state.localization.no_results.as_str());
            return;
        }

        let mut area_hovered = false;
        ScrollArea::vertical()
            .id_salt("papers_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for paper in &papers {
                    area_hovered |= self.draw_list_entry(ui, paper, actions);
                    ui.separator();
                }
            });

        if !area_hovered && state.highlighted_bubble.is_some() {
            actions.push(events::list_area_mouse_out());
        }
    }

    /// Draws one entry and reports whether its area link is hovered.
    fn draw_list_entry(&self, ui: &mut Ui, paper: &Paper, actions: &mut Vec<Action>) -> bool {
        let state = self.store.state();
        let localization = &state.localization;
        let props = list_entry_props(paper, state);
        let query = state.list.search_value.as_str();
        let width = ui.available_width();

        ui.push_id(props.safe_id, |ui| {
            self.draw_access_row(ui, paper, &props, actions);

            let title = highlighted_job(
                props.title,
                query,
                FontId::proportional(14.0),
                ui.visuals().strong_text_color(),
                width,
            );
            let title_response = ui
                .add(Label::new(title).wrap().sense(Sense::click()))
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if title_response.clicked() {
                actions.extend(events::list_title_click(state, paper));
            }

            self.draw_entry_details(ui, &props);

            if let Some(link) = &props.link {
                let label = if link.is_doi {
                    format!("doi: {}", link.address)
                } else {
                    link.address.clone()
                };
                ui.hyperlink_to(RichText::new(label).small(), &link.address);
            }

            if let Some(citations) = props.citations {
                let unit = props.base_unit.unwrap_or(localization.default_readers.as_str());
                ui.small(format!("{} {unit}", format_count(citations)));
            }

            if !props.abstract_text.is_empty() {
                let job = highlighted_job(
                    &props.abstract_text,
                    query,
                    FontId::proportional(12.5),
                    ui.visuals().text_color(),
                    width,
                );
                ui.add(Label::new(job).wrap());
            }

            if let Some(comments) = props.comments {
                for comment in comments {
                    let text = match &comment.author {
                        Some(author) => format!("\u{201c}{}\u{201d} ({author})", comment.comment),
                        None => format!("\u{201c}{}\u{201d}", comment.comment),
                    };
                    ui.label(RichText::new(text).italics());
                }
            }

            if let Some(keywords) = &props.keywords {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(format!("{}:", localization.keywords)).strong().small());
                    ui.small(keywords.as_str());
                });
            }

            if let Some(metrics) = props.metrics {
                self.draw_metrics(ui, metrics);
            }

            let mut area_hovered = false;
            if let Some(area) = props.area {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(format!("{}:", localization.area)).strong().small());
                    let response = ui.link(RichText::new(area).small());
                    if response.hovered() {
                        area_hovered = true;
                        if state.highlighted_bubble.as_deref() != Some(paper.area_uri.as_str()) {
                            actions.push(events::list_area_mouse_over(paper));
                        }
                    }
                    if response.clicked() {
                        actions.extend(events::list_area_click(state, paper));
                    }
                });
            }

            if props.backlink.show {
                let text = if props.backlink.in_stream {
                    &localization.backlink
                } else {
                    &localization.backlink_list
                };
                if ui.link(text.as_str()).clicked() {
                    actions.push(events::backlink_click());
                }
            }

            area_hovered
        })
        .inner
    }

    fn draw_access_row(
        &self,
        ui: &mut Ui,
        paper: &Paper,
        props: &ListEntryProps<'_>,
        actions: &mut Vec<Action>,
    ) {
        let localization = &self.store.state().localization;
        let has_row = props.access.open_access
            || props.access.free_access
            || props.access.dataset
            || props.document_type.is_some()
            || props.preview_link.is_some()
            || props.tags.is_some();
        if !has_row {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = vec2(6.0, 2.0);
            if props.access.open_access {
                ui.label(
                    RichText::new(localization.open_access.as_str())
                        .small()
                        .color(OPEN_ACCESS_COLOR),
                );
            }
            if props.access.free_access {
                ui.label(
                    RichText::new(localization.free_access.as_str())
                        .small()
                        .color(OPEN_ACCESS_COLOR),
                );
            }
            if props.access.dataset {
                ui.label(RichText::new(localization.dataset.as_str()).small().strong());
            } else if let Some(document_type) = props.document_type {
                ui.small(document_type);
            }
            if let Some(tags) = props.tags {
                for tag in tags {
                    ui.label(RichText::new(tag.as_str()).small().color(TAG_COLOR));
                }
            }
            if props.preview_link.is_some() && ui.small_button("PDF").clicked() {
                actions.push(events::pdf_click(paper));
            }
        });
    }

    fn draw_metrics(&self, ui: &mut Ui, metrics: Metrics) {
        let localization = &self.store.state().localization;
        ui.horizontal_wrapped(|ui| {
            ui.small(metric_text(metrics.citations, &localization.citations));
            ui.small("|");
            ui.small(metric_text(metrics.readers, &localization.readers));
            ui.small("|");
            ui.small(metric_text(metrics.tweets, &localization.tweets));
        });
    }
}
