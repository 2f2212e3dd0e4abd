use eframe::egui::{self, TextEdit, Ui};

use crate::config::{Dropdown, DropdownKind};
use crate::data::SortField;
use crate::state::Action;

use super::super::ViewModel;

const ALL_ENTRIES: &str = "all";

fn selected_text<'a>(dropdown: &'a Dropdown, id: &'a str) -> &'a str {
    dropdown
        .fields
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.text.as_str())
        .unwrap_or(id)
}

impl ViewModel {
    pub(in crate::app) fn draw_search_controls(&self, ui: &mut Ui, actions: &mut Vec<Action>) {
        let state = self.store.state();

        let mut search = state.list.search_value.clone();
        let search_response = ui.add(
            TextEdit::singleline(&mut search)
                .hint_text(state.localization.search_placeholder.as_str())
                .desired_width(f32::INFINITY),
        );
        if search_response.changed() {
            actions.push(Action::SetSearchValue(search));
        }

        ui.horizontal_wrapped(|ui| {
            if let Some(dropdown) = self.config.dropdown(DropdownKind::Filter) {
                self.draw_filter_dropdown(ui, dropdown, actions);
            }
            if let Some(dropdown) = self.config.dropdown(DropdownKind::Sort) {
                self.draw_sort_dropdown(ui, dropdown, actions);
            }
        });
    }

    fn draw_filter_dropdown(&self, ui: &mut Ui, dropdown: &Dropdown, actions: &mut Vec<Action>) {
        let list = &self.store.state().list;
        let current = list.filter_value.as_deref().unwrap_or(ALL_ENTRIES);

        if !dropdown.name.is_empty() {
            ui.label(dropdown.name.as_str());
        }
        egui::ComboBox::from_id_salt(("dropdown", dropdown.id.as_str()))
            .selected_text(selected_text(dropdown, current))
            .show_ui(ui, |ui| {
                for entry in &dropdown.fields {
                    let selected = entry.id == current;
                    if ui.selectable_label(selected, entry.text.as_str()).clicked() && !selected {
                        actions.push(Action::SetFilter {
                            field: dropdown.field.clone(),
                            value: Some(entry.id.clone()),
                        });
                    }
                }
            });
    }

    fn draw_sort_dropdown(&self, ui: &mut Ui, dropdown: &Dropdown, actions: &mut Vec<Action>) {
        let current = self.store.state().list.sort;
        let current_text = dropdown
            .fields
            .iter()
            .find(|entry| SortField::from_id(&entry.id) == Some(current))
            .map(|entry| entry.text.as_str())
            .unwrap_or_default();

        if !dropdown.name.is_empty() {
            ui.label(dropdown.name.as_str());
        }
        egui::ComboBox::from_id_salt(("dropdown", dropdown.id.as_str()))
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for entry in &dropdown.fields {
                    let Some(field) = SortField::from_id(&entry.id) else {
                        continue;
                    };
                    if ui
                        .selectable_label(field == current, entry.text.as_str())
                        .clicked()
                        && field != current
                    {
                        actions.push(Action::SetSort(field));
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DropdownEntry;

    #[test]
    fn selected_text_falls_back_to_id() {
        let dropdown = Dropdown {
            id: "filter".to_owned(),
            name: String::new(),
            kind: DropdownKind::Filter,
            multiple: false,
            field: Some("resulttype".to_owned()),
            fields: vec![DropdownEntry {
                id: "all".to_owned(),
                text: "any document type".to_owned(),
            }],
        };
        assert_eq!(selected_text(&dropdown, "all"), "any document type");
        assert_eq!(selected_text(&dropdown, "dataset"), "dataset");
    }
}
