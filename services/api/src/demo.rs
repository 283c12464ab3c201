use crate::infra::{parse_experience, read_transcript};
use clap::Args;
use leadflow::advisor::{ExperienceLevel, HeuristicScorer};
use leadflow::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Transcript file with one message per line (`user:`/`assistant:` prefixes optional)
    #[arg(long)]
    pub(crate) transcript: PathBuf,
    /// Self-reported experience level (none, some or established)
    #[arg(long, value_parser = parse_experience)]
    pub(crate) experience: Option<ExperienceLevel>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let turns = read_transcript(&args.transcript)?;
    let assessment = HeuristicScorer::default().assess(&turns, args.experience);

    println!("Transcript: {} messages", turns.len());
    println!("Readiness score: {}", assessment.readiness_score);
    println!("Business stage: {}", assessment.stage.label());
    println!("Urgency: {}", assessment.urgency.label());

    match assessment.budget_range {
        Some(range) if range.low == range.high => println!("Budget: ${}", range.low),
        Some(range) => println!("Budget: ${} to ${}", range.low, range.high),
        None => println!("Budget: not mentioned"),
    }

    if assessment.pain_points.is_empty() {
        println!("Pain points: none detected");
    } else {
        println!("Pain points:");
        for pain_point in &assessment.pain_points {
            println!("  - {pain_point}");
        }
    }

    let metrics = assessment.metrics;
    println!(
        "Signals: business={} team={} capital={} experience={} growth={}",
        metrics.has_existing_business,
        metrics.has_team,
        metrics.has_capital,
        metrics.has_experience,
        metrics.seeking_growth
    );

    Ok(())
}
