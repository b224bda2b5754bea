use std::path::PathBuf;

use clap::Parser;

/// Interactive dashboard of tech-industry layoff events.
#[derive(Debug, Clone, Parser)]
#[command(name = "layoff-lens", version, about)]
pub struct Config {
    /// CSV file with the layoff events.
    #[arg(default_value = "layoffs.csv")]
    pub path: PathBuf,

    /// Country selected at startup (repeatable).
    #[arg(long = "country", value_name = "NAME", default_value = "United States")]
    pub countries: Vec<String>,

    /// Industry selected at startup (repeatable); none means every industry.
    #[arg(long = "industry", value_name = "NAME")]
    pub industries: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["layoff-lens"]).unwrap();
        assert_eq!(cfg.path, PathBuf::from("layoffs.csv"));
        assert_eq!(cfg.countries, vec!["United States"]);
        assert!(cfg.industries.is_empty());
    }

    #[test]
    fn repeated_selections() {
        let cfg = Config::try_parse_from([
            "layoff-lens",
            "data/layoffs_2024.csv",
            "--country",
            "India",
            "--country",
            "Germany",
            "--industry",
            "Retail",
        ])
        .unwrap();
        assert_eq!(cfg.path, PathBuf::from("data/layoffs_2024.csv"));
        assert_eq!(cfg.countries, vec!["India", "Germany"]);
        assert_eq!(cfg.industries, vec!["Retail"]);
    }
}
