//! Catalog side panel for `OrbitrApp`.
//!
//! Search box bound to the view's filter text, catalog counts, the list of
//! visible records, and details for the current selection.

use eframe::egui;

use orbitr::catalog::{RsoRecord, SatcatNumber};

use super::OrbitrApp;

impl OrbitrApp {
    pub fn draw_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.query)
                .hint_text("Search name, designator, SatCat, alias, tag…")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.view.set_filter_text(self.query.clone());
        }

        let selected_id = self.view.selected().map(|r| r.satcat_number.clone());
        let visible = self.view.visible_records();
        let state = self.view.state();

        ui.horizontal(|ui| {
            ui.small(format!("Catalog {}", state.catalog_size()));
            ui.small("·");
            ui.small(format!("Loaded {}", state.records().len()));
            ui.small("·");
            ui.small(format!("Showing {}", visible.len()));
        });
        ui.separator();

        let scroll_to_selected = self.scroll_to_selected;
        let mut clicked: Option<SatcatNumber> = None;
        egui::ScrollArea::vertical()
            .id_salt("results")
            .max_height(ui.available_height() * 0.6)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for rec in &visible {
                    let is_selected = selected_id.as_ref() == Some(&rec.satcat_number);
                    let row = ui.selectable_label(
                        is_selected,
                        format!("{}  #{}", rec.display_name, rec.satcat_number),
                    );
                    if is_selected && scroll_to_selected {
                        row.scroll_to_me(Some(egui::Align::Center));
                    }
                    if row.clicked() {
                        clicked = Some(rec.satcat_number.clone());
                    }
                }
                if visible.is_empty() && !state.records().is_empty() {
                    ui.weak("No matches");
                }
            });
        ui.separator();

        if let Some(rec) = self.view.selected() {
            draw_details(ui, rec);
        }

        self.scroll_to_selected = false;
        if let Some(id) = clicked {
            if let Err(e) = self.view.select(&id) {
                log::warn!("{}", e);
            }
        }
    }
}

fn draw_details(ui: &mut egui::Ui, rec: &RsoRecord) {
    ui.strong(&rec.display_name);
    egui::Grid::new("selection_details")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.weak("SatCat");
            ui.label(rec.satcat_number.as_str());
            ui.end_row();
            ui.weak("Designator");
            ui.label(&rec.international_designator);
            ui.end_row();
            if !rec.aliases().is_empty() {
                ui.weak("Aliases");
                ui.label(rec.aliases().join(", "));
                ui.end_row();
            }
            if !rec.tags().is_empty() {
                ui.weak("Tags");
                ui.label(rec.tags().join(", "));
                ui.end_row();
            }
        });
    if let Some(tle) = &rec.tle {
        ui.add_space(4.0);
        ui.label(egui::RichText::new(tle).monospace().small());
    }
}
