use eframe::egui::{Color32, FontId, Label, Ui};

use super::super::ViewModel;
use super::super::props::ListEntryProps;
use super::highlight::highlighted_job;

const DETAILS_COLOR: Color32 = Color32::from_rgb(90, 94, 102);

/// "authors in source (year)" with the same fields as the search query.
pub(in crate::app) fn details_text(authors: &str, source: Option<&str>, year: Option<&str>) -> String {
    let mut text = authors.to_owned();
    if let Some(source) = source {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str("in ");
        text.push_str(source);
    }
    if let Some(year) = year {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("({year})"));
    }
    text
}

impl ViewModel {
    pub(in crate::app) fn draw_entry_details(&self, ui: &mut Ui, props: &ListEntryProps<'_>) {
        let text = details_text(props.authors, props.source, props.year);
        if text.is_empty() {
            return;
        }

        let job = highlighted_job(
            &text,
            &self.store.state().list.search_value,
            FontId::proportional(12.0),
            DETAILS_COLOR,
            ui.available_width(),
        );
        ui.add(Label::new(job).wrap());
    }
}
