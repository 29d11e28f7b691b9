use eframe::egui::{self, Ui};

use crate::data::query;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NamesApp {
    pub state: AppState,
}

impl Default for NamesApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for NamesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Paint "Downloading…" for one frame, then block on the load.
        if self.state.loading {
            self.state.load();
        } else if self.state.needs_load() {
            self.state.loading = true;
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading {
                ui.heading("Downloading baby-name data…");
            } else if state.status_message.is_some() {
                ui.heading("The names archive could not be loaded  (File → Reload to retry)");
            } else {
                ui.heading("No dataset loaded  (File → Open local archive…)");
            }
        });
        return;
    };

    match state.tab {
        Tab::Overview => {
            ui.heading("Overview");
            if dataset.is_empty() {
                panels::no_data(ui, "The archive did not contain any yearly name files.");
                return;
            }
            let overview = query::overview(&dataset);
            panels::overview_summary(ui, &overview);
            ui.separator();
            plot::births_plot(ui, &overview);
            ui.separator();
            panels::births_table(ui, &overview);
        }
        Tab::ByName => {
            ui.heading("Name");
            panels::trend_controls(ui, state);
            ui.separator();

            let name = state.trend_name.trim();
            let trend = query::name_trend(&dataset, name, state.plot_female, state.plot_male);
            if name.is_empty() {
                panels::no_data(ui, "Enter a name to plot its popularity.");
            } else if !state.plot_female && !state.plot_male {
                panels::no_data(ui, "Select the female and/or male line to plot.");
            } else if trend.is_empty() {
                panels::no_data(ui, &format!("No data available for '{name}'."));
            } else {
                plot::trend_plot(ui, name, &trend);
            }
        }
        Tab::ByYear => {
            ui.heading("Year");
            panels::ratio_controls(ui, state);
            ui.separator();

            let name = state.ratio_name.trim();
            let (start, end) = (state.year_start, state.year_end);
            if name.is_empty() {
                panels::no_data(ui, "Enter a name to see its sex balance.");
            } else if let Some(ratio) = query::sex_ratio(&dataset, name, start, end) {
                plot::ratio_plot(ui, name, start, end, &ratio);
            } else if query::name_exists(&dataset, name) {
                panels::no_data(
                    ui,
                    &format!("No data available for '{name}' in the selected year range."),
                );
            } else {
                panels::no_data(ui, &format!("No data available for '{name}'."));
            }
        }
    }
}
