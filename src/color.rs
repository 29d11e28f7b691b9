use eframe::egui::Color32;

use crate::data::model::Sex;

// ---------------------------------------------------------------------------
// Per-sex colours shared by every chart
// ---------------------------------------------------------------------------

pub const MALE_COLOR: Color32 = Color32::from_rgb(52, 101, 214);
pub const FEMALE_COLOR: Color32 = Color32::from_rgb(236, 112, 166);

pub fn color_for(sex: Sex) -> Color32 {
    match sex {
        Sex::Female => FEMALE_COLOR,
        Sex::Male => MALE_COLOR,
    }
}
