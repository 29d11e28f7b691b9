use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Text};

use crate::color::{color_for, FEMALE_COLOR, MALE_COLOR};
use crate::config::{FIRST_YEAR, LAST_YEAR};
use crate::data::model::Sex;
use crate::data::query::{Overview, SeriesSet, SexRatio};

// ---------------------------------------------------------------------------
// Overview: births per year
// ---------------------------------------------------------------------------

pub fn births_plot(ui: &mut Ui, overview: &Overview) {
    Plot::new("births_plot")
        .legend(Legend::default())
        .height(260.0)
        .x_axis_label("Year")
        .y_axis_label("Births")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for sex in Sex::ALL {
                let points: PlotPoints = overview
                    .births_by_year
                    .iter()
                    .map(|t| {
                        let births = match sex {
                            Sex::Female => t.female,
                            Sex::Male => t.male,
                        };
                        [t.year as f64, births as f64]
                    })
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(sex.label())
                        .color(color_for(sex))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// By Name: proportion over time
// ---------------------------------------------------------------------------

pub fn trend_plot(ui: &mut Ui, name: &str, trend: &SeriesSet) {
    ui.heading(format!("Popularity of {name} over time"));

    Plot::new("name_trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Proportion")
        .include_x(FIRST_YEAR as f64)
        .include_x(LAST_YEAR as f64)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Fixed female-then-male order keeps legend entries stable.
            for series in Sex::ALL.into_iter().filter_map(|sex| trend.get(sex)) {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|&(year, prop)| [year as f64, prop])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .name(series.sex.label())
                        .color(color_for(series.sex))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// By Year: sex balance as one stacked horizontal bar
// ---------------------------------------------------------------------------

pub fn ratio_plot(ui: &mut Ui, name: &str, year_start: i32, year_end: i32, ratio: &SexRatio) {
    ui.heading(format!("Sex Balance of '{name}' ({year_start}-{year_end})"));

    let male = BarChart::new(vec![Bar::new(0.0, ratio.male_ratio).width(0.8)])
        .horizontal()
        .color(MALE_COLOR)
        .name("Male");
    let female = BarChart::new(vec![Bar::new(0.0, ratio.female_ratio)
        .base_offset(ratio.male_ratio)
        .width(0.8)])
    .horizontal()
    .color(FEMALE_COLOR)
    .name("Female");

    Plot::new("sex_ratio_plot")
        .legend(Legend::default())
        .height(200.0)
        .x_axis_label("Share of births")
        .show_axes([true, false])
        .include_x(0.0)
        .include_x(1.0)
        .include_y(-0.6)
        .include_y(0.6)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(male);
            plot_ui.bar_chart(female);

            let segments = [
                ("Male", ratio.male_ratio / 2.0, ratio.male_ratio),
                (
                    "Female",
                    ratio.male_ratio + ratio.female_ratio / 2.0,
                    ratio.female_ratio,
                ),
            ];
            for (label, center, share) in segments {
                if share <= 0.0 {
                    continue;
                }
                plot_ui.text(Text::new(
                    PlotPoint::new(center, 0.1),
                    RichText::new(format!("{:.1}%", share * 100.0))
                        .color(Color32::WHITE)
                        .strong()
                        .size(20.0),
                ));
                plot_ui.text(Text::new(
                    PlotPoint::new(center, -0.2),
                    RichText::new(label).color(Color32::WHITE).strong().size(16.0),
                ));
            }
        });
}
