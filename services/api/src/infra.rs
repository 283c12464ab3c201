use leadflow::advisor::{ExperienceLevel, Turn};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_experience(raw: &str) -> Result<ExperienceLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" => Ok(ExperienceLevel::None),
        "some" => Ok(ExperienceLevel::Some),
        "established" => Ok(ExperienceLevel::Established),
        other => Err(format!(
            "unknown experience level '{other}' (expected none, some or established)"
        )),
    }
}

pub(crate) fn read_transcript(path: &Path) -> Result<Vec<Turn>, std::io::Error> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_transcript(&raw))
}

/// One message per line. Lines may carry a `user:` or `assistant:`
/// prefix; unprefixed lines read as user messages.
pub(crate) fn parse_transcript(raw: &str) -> Vec<Turn> {
    raw.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            if let Some(rest) = line.strip_prefix("assistant:") {
                Some(Turn::assistant(rest.trim()))
            } else if let Some(rest) = line.strip_prefix("user:") {
                Some(Turn::user(rest.trim()))
            } else {
                Some(Turn::user(line))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadflow::advisor::TurnRole;

    #[test]
    fn transcript_lines_map_to_roles() {
        let turns = parse_transcript(
            "user: Hi\nassistant: Welcome!\n\nI can invest $60,000\n",
        );

        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].content, "Hi");
        assert_eq!(turns[1].role, TurnRole::Assistant);
        assert_eq!(turns[2].role, TurnRole::User);
        assert_eq!(turns[2].content, "I can invest $60,000");
    }

    #[test]
    fn experience_parsing_is_case_insensitive() {
        assert_eq!(parse_experience(" Some "), Ok(ExperienceLevel::Some));
        assert!(parse_experience("plenty").is_err());
    }
}
