use std::collections::BTreeSet;

use super::model::{Dataset, Sex};
use crate::config::{FIRST_YEAR, LAST_YEAR};

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub const OVERVIEW_TEXT: &str = "Yearly counts of given names for babies born in the \
United States, as published by the Social Security Administration. Each row is one \
name/sex/year combination; its proportion is its share of all births of that sex in \
that year.";

/// Female and male births recorded for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearTotals {
    pub year: i32,
    pub female: u64,
    pub male: u64,
}

/// Whole-dataset summary shown on the overview tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub rows: usize,
    pub distinct_names: usize,
    pub year_span: Option<(i32, i32)>,
    /// Ascending by year.
    pub births_by_year: Vec<YearTotals>,
}

pub fn overview(dataset: &Dataset) -> Overview {
    let years: BTreeSet<i32> = dataset.groups().map(|((year, _), _)| year).collect();
    let births_by_year = years
        .into_iter()
        .map(|year| YearTotals {
            year,
            female: dataset.total_births(year, Sex::Female),
            male: dataset.total_births(year, Sex::Male),
        })
        .collect();

    Overview {
        rows: dataset.len(),
        distinct_names: dataset.distinct_names(),
        year_span: dataset.year_span(),
        births_by_year,
    }
}

// ---------------------------------------------------------------------------
// Name trend by sex
// ---------------------------------------------------------------------------

/// `(year, prop)` points for one sex, ascending by year.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub sex: Sex,
    pub points: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesSet {
    pub series: Vec<Series>,
}

impl SeriesSet {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, sex: Sex) -> Option<&Series> {
        self.series.iter().find(|s| s.sex == sex)
    }
}

/// Popularity of `name` over time for each enabled sex.
///
/// Only years within the display bounds are kept. A sex without any matching
/// rows contributes no series, so an unknown name yields an empty set.
pub fn name_trend(
    dataset: &Dataset,
    name: &str,
    include_female: bool,
    include_male: bool,
) -> SeriesSet {
    let wanted: Vec<Sex> = Sex::ALL
        .into_iter()
        .filter(|sex| match sex {
            Sex::Female => include_female,
            Sex::Male => include_male,
        })
        .collect();

    let series = wanted
        .into_iter()
        .filter_map(|sex| {
            let mut points: Vec<(i32, f64)> = dataset
                .rows_for(name)
                .filter(|r| r.sex == sex && (FIRST_YEAR..=LAST_YEAR).contains(&r.year))
                .map(|r| (r.year, r.prop))
                .collect();
            if points.is_empty() {
                return None;
            }
            points.sort_by_key(|&(year, _)| year);
            Some(Series { sex, points })
        })
        .collect();

    SeriesSet { series }
}

// ---------------------------------------------------------------------------
// Sex ratio over a year range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexRatio {
    pub male_count: u64,
    pub female_count: u64,
    pub male_ratio: f64,
    pub female_ratio: f64,
}

/// Share of male and female births named `name` within `[year_start, year_end]`.
///
/// `None` when no births match; an inverted range simply matches nothing.
pub fn sex_ratio(
    dataset: &Dataset,
    name: &str,
    year_start: i32,
    year_end: i32,
) -> Option<SexRatio> {
    let (mut male_count, mut female_count) = (0u64, 0u64);
    for row in dataset
        .rows_for(name)
        .filter(|r| (year_start..=year_end).contains(&r.year))
    {
        match row.sex {
            Sex::Male => male_count += row.count,
            Sex::Female => female_count += row.count,
        }
    }

    let total = male_count + female_count;
    if total == 0 {
        return None;
    }

    let male_ratio = male_count as f64 / total as f64;
    Some(SexRatio {
        male_count,
        female_count,
        male_ratio,
        female_ratio: 1.0 - male_ratio,
    })
}

/// Whether `name` appears in any year at all.
pub fn name_exists(dataset: &Dataset, name: &str) -> bool {
    dataset.contains_name(name)
}
