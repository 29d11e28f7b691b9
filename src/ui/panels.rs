use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::config::{FIRST_YEAR, LAST_YEAR};
use crate::data::query::{Overview, OVERVIEW_TEXT};
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, tab strip and dataset status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open local archive…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                log::info!("Reload requested");
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            let span = ds
                .year_span()
                .map(|(first, last)| format!(", {first}–{last}"))
                .unwrap_or_default();
            ui.label(format!("{} rows{span}", ds.len()));
        } else if state.loading {
            ui.label("Downloading…");
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn overview_summary(ui: &mut Ui, overview: &Overview) {
    ui.label(OVERVIEW_TEXT);
    ui.add_space(6.0);

    egui::Grid::new("overview_stats")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Rows");
            ui.label(overview.rows.to_string());
            ui.end_row();

            ui.strong("Distinct names");
            ui.label(overview.distinct_names.to_string());
            ui.end_row();

            ui.strong("Years");
            ui.label(
                overview
                    .year_span
                    .map(|(first, last)| format!("{first}–{last}"))
                    .unwrap_or_else(|| "none".to_string()),
            );
            ui.end_row();
        });
}

/// Per-year birth totals as a table.
pub fn births_table(ui: &mut Ui, overview: &Overview) {
    let totals = &overview.births_by_year;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Year", "Female", "Male", "Total"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, totals.len(), |mut row| {
                let t = totals[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(t.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(t.female.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(t.male.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label((t.female + t.male).to_string());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// By Name / By Year inputs
// ---------------------------------------------------------------------------

pub fn trend_controls(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Name");
        ui.add(egui::TextEdit::singleline(&mut state.trend_name).hint_text("Enter a name"));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut state.plot_female, "Plot female line");
        ui.checkbox(&mut state.plot_male, "Plot male line");
    });
}

pub fn ratio_controls(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Name");
        ui.add(egui::TextEdit::singleline(&mut state.ratio_name).hint_text("Enter a name"));
    });

    ui.label("Select a year or range of years");
    let mut start = state.year_start;
    if ui
        .add(egui::Slider::new(&mut start, FIRST_YEAR..=LAST_YEAR).text("From"))
        .changed()
    {
        state.set_year_start(start);
    }
    let mut end = state.year_end;
    if ui
        .add(egui::Slider::new(&mut end, FIRST_YEAR..=LAST_YEAR).text("To"))
        .changed()
    {
        state.set_year_end(end);
    }
}

/// Informational "nothing to show" line; not an error.
pub fn no_data(ui: &mut Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(text).italics());
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open names archive")
        .add_filter("ZIP archive", &["zip"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Switching to local archive {}", path.display());
        state.open_archive(&path);
    }
}
