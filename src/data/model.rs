use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Sex – the two category codes used by the source files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Sex {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    /// Single-letter code as written in the source files.
    pub fn code(self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Male => "M",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one decoded line of one archive entry
// ---------------------------------------------------------------------------

/// Fields in source order: `name,sex,count`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub sex: Sex,
    pub count: u64,
}

/// All records of one archive entry, tagged with the entry's year.
#[derive(Debug, Clone)]
pub struct EntryTable {
    pub year: i32,
    pub records: Vec<RawRecord>,
}

// ---------------------------------------------------------------------------
// NameRow – one row of the normalized dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NameRow {
    pub name: String,
    pub sex: Sex,
    pub count: u64,
    pub year: i32,
    /// Sum of `count` over every row sharing this row's (year, sex).
    pub total_births: u64,
    /// `count / total_births`.
    pub prop: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete ingested table
// ---------------------------------------------------------------------------

/// Immutable table of every name/sex/year row with derived group columns.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<NameRow>,
    /// (year, sex) → total births.
    totals: BTreeMap<(i32, Sex), u64>,
    /// name → indices into `rows`, in row order.
    name_index: BTreeMap<String, Vec<usize>>,
}

impl Dataset {
    /// Concatenate per-entry tables and derive `total_births` / `prop`.
    ///
    /// Every input record becomes exactly one row; nothing is deduplicated.
    pub fn concat(tables: Vec<EntryTable>) -> Self {
        let mut totals: BTreeMap<(i32, Sex), u64> = BTreeMap::new();
        for table in &tables {
            for rec in &table.records {
                *totals.entry((table.year, rec.sex)).or_default() += rec.count;
            }
        }

        let n_rows = tables.iter().map(|t| t.records.len()).sum();
        let mut rows = Vec::with_capacity(n_rows);
        let mut name_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for table in tables {
            let year = table.year;
            for rec in table.records {
                let total_births = totals.get(&(year, rec.sex)).copied().unwrap_or(0);
                // A group whose counts are all zero has no meaningful share.
                let prop = if total_births == 0 {
                    0.0
                } else {
                    rec.count as f64 / total_births as f64
                };

                name_index
                    .entry(rec.name.clone())
                    .or_default()
                    .push(rows.len());
                rows.push(NameRow {
                    name: rec.name,
                    sex: rec.sex,
                    count: rec.count,
                    year,
                    total_births,
                    prop,
                });
            }
        }

        Dataset {
            rows,
            totals,
            name_index,
        }
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[NameRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total births for a (year, sex) group; 0 when the group is absent.
    pub fn total_births(&self, year: i32, sex: Sex) -> u64 {
        self.totals.get(&(year, sex)).copied().unwrap_or(0)
    }

    /// All (year, sex) groups with their totals, ordered by year then sex.
    pub fn groups(&self) -> impl Iterator<Item = ((i32, Sex), u64)> + '_ {
        self.totals.iter().map(|(k, v)| (*k, *v))
    }

    /// First and last year present, if any rows were ingested.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.totals.keys().next()?.0;
        let last = self.totals.keys().next_back()?.0;
        Some((first, last))
    }

    /// Rows whose name matches exactly (case-sensitive).
    pub fn rows_for<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a NameRow> + 'a {
        self.name_index
            .get(name)
            .map(|idx| idx.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.rows[i])
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn distinct_names(&self) -> usize {
        self.name_index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, sex: Sex, count: u64) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            sex,
            count,
        }
    }

    fn sample() -> Dataset {
        Dataset::concat(vec![
            EntryTable {
                year: 2000,
                records: vec![
                    rec("Emma", Sex::Female, 30),
                    rec("Ava", Sex::Female, 10),
                    rec("Noah", Sex::Male, 25),
                    rec("Avery", Sex::Male, 75),
                    rec("Avery", Sex::Female, 60),
                ],
            },
            EntryTable {
                year: 2001,
                records: vec![rec("Emma", Sex::Female, 5), rec("Noah", Sex::Male, 5)],
            },
        ])
    }

    #[test]
    fn concat_keeps_every_row() {
        let ds = sample();
        assert_eq!(ds.len(), 7);
        assert!(!ds.is_empty());
        assert_eq!(ds.distinct_names(), 4);
    }

    #[test]
    fn totals_are_grouped_by_year_and_sex() {
        let ds = sample();
        assert_eq!(ds.total_births(2000, Sex::Female), 100);
        assert_eq!(ds.total_births(2000, Sex::Male), 100);
        assert_eq!(ds.total_births(2001, Sex::Female), 5);
        assert_eq!(ds.total_births(1999, Sex::Male), 0);
        assert_eq!(ds.groups().count(), 4);
    }

    #[test]
    fn props_sum_to_one_per_group() {
        let ds = sample();
        for ((year, sex), _) in ds.groups() {
            let sum: f64 = ds
                .rows()
                .iter()
                .filter(|r| r.year == year && r.sex == sex)
                .map(|r| r.prop)
                .sum();
            assert!((sum - 1.0).abs() < 1e-9, "group ({year}, {sex}) sums to {sum}");
        }
    }

    #[test]
    fn rows_carry_their_group_total() {
        let ds = sample();
        let avery_f = ds
            .rows_for("Avery")
            .find(|r| r.sex == Sex::Female)
            .unwrap();
        assert_eq!(avery_f.total_births, 100);
        assert!((avery_f.prop - 0.6).abs() < 1e-12);
    }

    #[test]
    fn name_lookup_is_case_sensitive() {
        let ds = sample();
        assert_eq!(ds.rows_for("Emma").count(), 2);
        assert_eq!(ds.rows_for("emma").count(), 0);
        assert!(ds.contains_name("Noah"));
        assert!(!ds.contains_name("NOAH"));
    }

    #[test]
    fn zero_total_group_yields_zero_prop() {
        let ds = Dataset::concat(vec![EntryTable {
            year: 1950,
            records: vec![rec("Ghost", Sex::Male, 0)],
        }]);
        assert_eq!(ds.rows()[0].prop, 0.0);
    }

    #[test]
    fn year_span_covers_all_groups() {
        assert_eq!(sample().year_span(), Some((2000, 2001)));
        assert_eq!(Dataset::default().year_span(), None);
    }
}
