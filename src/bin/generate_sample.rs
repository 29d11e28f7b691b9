use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const FIRST_YEAR: i32 = 1880;
const LAST_YEAR: i32 = 2025;
const OUTPUT_PATH: &str = "sample_names.zip";

/// One synthetic name: births peak around `peak_year` and fall off like a bell
/// curve of width `spread`; `male_share` of births are boys.
struct NameProfile {
    name: &'static str,
    peak_year: f64,
    spread: f64,
    peak_births: f64,
    male_share: f64,
}

const PROFILES: &[NameProfile] = &[
    NameProfile {
        name: "Mary",
        peak_year: 1920.0,
        spread: 30.0,
        peak_births: 70_000.0,
        male_share: 0.004,
    },
    NameProfile {
        name: "John",
        peak_year: 1925.0,
        spread: 35.0,
        peak_births: 80_000.0,
        male_share: 0.995,
    },
    NameProfile {
        name: "Linda",
        peak_year: 1948.0,
        spread: 8.0,
        peak_births: 99_000.0,
        male_share: 0.002,
    },
    NameProfile {
        name: "Jennifer",
        peak_year: 1972.0,
        spread: 9.0,
        peak_births: 63_000.0,
        male_share: 0.001,
    },
    NameProfile {
        name: "Michael",
        peak_year: 1965.0,
        spread: 20.0,
        peak_births: 90_000.0,
        male_share: 0.996,
    },
    NameProfile {
        name: "Jordan",
        peak_year: 1995.0,
        spread: 10.0,
        peak_births: 20_000.0,
        male_share: 0.72,
    },
    NameProfile {
        name: "Taylor",
        peak_year: 1993.0,
        spread: 7.0,
        peak_births: 22_000.0,
        male_share: 0.25,
    },
    NameProfile {
        name: "Avery",
        peak_year: 2015.0,
        spread: 12.0,
        peak_births: 12_000.0,
        male_share: 0.3,
    },
    NameProfile {
        name: "Emma",
        peak_year: 2010.0,
        spread: 25.0,
        peak_births: 22_000.0,
        male_share: 0.001,
    },
    NameProfile {
        name: "Liam",
        peak_year: 2020.0,
        spread: 10.0,
        peak_births: 20_000.0,
        male_share: 0.999,
    },
];

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Deterministic splitmix64 generator so every run writes the same archive.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[1 - jitter, 1 + jitter)`.
    fn jitter(&mut self, jitter: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        1.0 + jitter * (2.0 * unit - 1.0)
    }
}

/// `name,sex,count` lines for one year; names with fewer than 5 births are
/// left out, as in the published files.
fn year_rows(year: i32, rng: &mut SampleRng) -> Vec<(&'static str, &'static str, u64)> {
    let mut rows = Vec::new();
    for p in PROFILES {
        let births = gaussian(year as f64, p.peak_year, p.spread, p.peak_births) * rng.jitter(0.05);
        for (sex, share) in [("F", 1.0 - p.male_share), ("M", p.male_share)] {
            let count = (births * share).round() as u64;
            if count >= 5 {
                rows.push((p.name, sex, count));
            }
        }
    }
    // Published files list girls first, then boys, each by descending count.
    rows.sort_by(|a, b| a.1.cmp(b.1).then(b.2.cmp(&a.2)));
    rows
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);

    let file = File::create(OUTPUT_PATH).with_context(|| format!("creating {OUTPUT_PATH}"))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let mut total_rows = 0usize;
    for year in FIRST_YEAR..=LAST_YEAR {
        let entry = format!("yob{year}.txt");
        zip.start_file(entry.as_str(), options)
            .with_context(|| format!("starting entry {entry}"))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut zip);
        for row in year_rows(year, &mut rng) {
            writer.serialize(row).with_context(|| format!("writing {entry}"))?;
            total_rows += 1;
        }
        writer.flush().with_context(|| format!("flushing {entry}"))?;
    }

    // Non-data entry, skipped by the loader.
    zip.start_file("NationalReadMe.pdf", options)
        .context("starting read-me entry")?;
    zip.write_all(b"Synthetic sample archive; counts are generated, not published data.\n")
        .context("writing read-me entry")?;

    zip.finish().context("finishing archive")?;

    println!(
        "Wrote {total_rows} rows for {} years to {OUTPUT_PATH}",
        LAST_YEAR - FIRST_YEAR + 1
    );
    Ok(())
}
