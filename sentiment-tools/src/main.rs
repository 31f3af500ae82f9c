use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sentiment_server::db::{repositories::SentimentRepository, Dataset};
use sentiment_types::{AirlineSentiment, NegativeReason, Sentiment, SentimentStats};

/// Dataset Inspector
///
/// Opens a tweets dataset read-only and prints the same aggregates the API
/// serves, which is handy for checking a dataset file before deploying it.
#[derive(Parser, Debug)]
#[command(name = "inspect-dataset")]
#[command(about = "Print sentiment aggregates for an airline tweets dataset", long_about = None)]
struct Args {
    /// Path to the SQLite dataset file
    #[arg(short, long, env = "DATASET_PATH", default_value = "./database.sqlite")]
    dataset: String,

    /// Which report to print
    #[arg(short, long, value_enum, default_value_t = Section::All)]
    section: Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Overview,
    Airlines,
    Reasons,
    List,
    All,
}

impl Section {
    fn includes(self, other: Section) -> bool {
        self == Section::All || self == other
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SentimentRepository::new(Dataset::new(&args.dataset));

    println!("Airline Sentiment Dataset Inspector");
    println!("===================================");
    println!("Dataset: {}", args.dataset);

    if args.section.includes(Section::Overview) {
        let stats = repo.overview().context("Failed to compute overview")?;
        println!();
        print!("{}", render_overview(&stats));
    }

    if args.section.includes(Section::Airlines) {
        let breakdown = repo
            .airline_breakdown()
            .context("Failed to compute airline breakdown")?;
        println!();
        print!("{}", render_airlines(&breakdown));
    }

    if args.section.includes(Section::Reasons) {
        let reasons = repo
            .negative_reasons()
            .context("Failed to rank negative reasons")?;
        println!();
        print!("{}", render_reasons(&reasons));
    }

    if args.section.includes(Section::List) {
        let airlines = repo.airlines().context("Failed to list airlines")?;
        println!();
        println!("=== Airlines ({}) ===", airlines.len());
        for (i, airline) in airlines.iter().enumerate() {
            println!("  {}. {}", i + 1, airline);
        }
    }

    Ok(())
}

fn render_overview(stats: &SentimentStats) -> String {
    let mut out = String::from("=== Overview ===\n");
    out.push_str(&format!("Total tweets: {}\n", stats.total_tweets));
    for sentiment in Sentiment::ALL {
        let (count, pct) = match sentiment {
            Sentiment::Positive => (stats.positive, stats.positive_percentage),
            Sentiment::Negative => (stats.negative, stats.negative_percentage),
            Sentiment::Neutral => (stats.neutral, stats.neutral_percentage),
        };
        out.push_str(&format!(
            "  {:<9} {:>7}  {:>6.2}%\n",
            sentiment.as_str(),
            count,
            pct
        ));
    }
    out
}

fn render_airlines(breakdown: &[AirlineSentiment]) -> String {
    let mut out = String::from("=== Airlines by volume ===\n");
    out.push_str(&format!(
        "  {:<16} {:>7} {:>8} {:>8} {:>8} {:>7}\n",
        "airline", "total", "positive", "negative", "neutral", "score"
    ));
    for row in breakdown {
        out.push_str(&format!(
            "  {:<16} {:>7} {:>8} {:>8} {:>8} {:>7.3}\n",
            row.airline, row.total_tweets, row.positive, row.negative, row.neutral, row.sentiment_score
        ));
    }
    out
}

fn render_reasons(reasons: &[NegativeReason]) -> String {
    let mut out = String::from("=== Top negative reasons ===\n");
    if reasons.is_empty() {
        out.push_str("  (none)\n");
    }
    for (i, reason) in reasons.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<28} {:>6}  {:>6.2}%\n",
            i + 1,
            reason.reason,
            reason.count,
            reason.percentage
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_all_includes_everything() {
        for section in [Section::Overview, Section::Airlines, Section::Reasons, Section::List] {
            assert!(Section::All.includes(section));
        }
        assert!(Section::Overview.includes(Section::Overview));
        assert!(!Section::Overview.includes(Section::Reasons));
    }

    #[test]
    fn test_render_overview() {
        let stats = SentimentStats {
            total_tweets: 4,
            positive: 2,
            negative: 1,
            neutral: 1,
            positive_percentage: 50.0,
            negative_percentage: 25.0,
            neutral_percentage: 25.0,
        };

        let out = render_overview(&stats);
        assert!(out.contains("Total tweets: 4"));
        assert!(out.contains("50.00%"));
        let labels: Vec<&str> = out
            .lines()
            .skip(2)
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(labels, vec!["positive", "negative", "neutral"]);
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_render_reasons_empty() {
        assert!(render_reasons(&[]).contains("(none)"));
    }

    #[test]
    fn test_args_parse_section() {
        let args = Args::try_parse_from(["inspect-dataset", "--dataset", "x.sqlite", "--section", "reasons"])
            .expect("valid arguments");
        assert_eq!(args.section, Section::Reasons);
        assert_eq!(args.dataset, "x.sqlite");
    }
}
