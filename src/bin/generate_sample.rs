use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Log-normal draw, rounded to a whole head count.
    fn headcount(&mut self, median: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (median * (0.9 * z).exp()).round().max(1.0)
    }
}

#[derive(Serialize)]
struct Row<'a> {
    company: &'a str,
    location: &'a str,
    industry: &'a str,
    total_laid_off: Option<f64>,
    date: NaiveDate,
    stage: &'a str,
    country: &'a str,
}

const COMPANIES: [(&str, &str, &str, &str, &str, f64); 14] = [
    ("Amazon", "Seattle", "Retail", "Post-IPO", "United States", 900.0),
    ("Meta", "SF Bay Area", "Consumer", "Post-IPO", "United States", 1200.0),
    ("Stripe", "SF Bay Area", "Finance", "Private Equity", "United States", 300.0),
    ("Coinbase", "SF Bay Area", "Crypto", "Post-IPO", "United States", 500.0),
    ("Shopify", "Ottawa", "Retail", "Post-IPO", "Canada", 400.0),
    ("Wealthsimple", "Toronto", "Finance", "Series E", "Canada", 60.0),
    ("Delivery Hero", "Berlin", "Food", "Post-IPO", "Germany", 250.0),
    ("N26", "Berlin", "Finance", "Series E", "Germany", 80.0),
    ("Byju's", "Bengaluru", "Education", "Private Equity", "India", 700.0),
    ("Swiggy", "Bengaluru", "Food", "Unknown", "India", 350.0),
    ("Ola", "Bengaluru", "Transportation", "Series J", "India", 200.0),
    ("Klarna", "Stockholm", "Finance", "Unknown", "Sweden", 500.0),
    ("Gopuff", "Philadelphia", "Food", "Series H", "United States", 150.0),
    ("Sea", "Singapore", "Consumer", "Post-IPO", "Singapore", 300.0),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).context("invalid start date")?;
    let days = 365 * 3;

    let output_path = "sample_layoffs.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let rows = 600;
    for _ in 0..rows {
        let &(company, location, industry, stage, country, median) = rng.pick(&COMPANIES);
        let date = start + Duration::days(rng.below(days) as i64);
        // About one event in eight has no reported head count.
        let total_laid_off = if rng.below(8) == 0 {
            None
        } else {
            Some(rng.headcount(median))
        };

        writer
            .serialize(Row {
                company,
                location,
                industry,
                total_laid_off,
                date,
                stage,
                country,
            })
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} layoff events to {output_path}");
    Ok(())
}
