use std::collections::BTreeSet;

use eframe::egui::text::LayoutJob;
use eframe::egui::{Color32, FontId, TextFormat};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

const HIGHLIGHT_BACKGROUND: Color32 = Color32::from_rgb(255, 226, 122);

/// Splits `text` into runs, flagging the characters matched by any search
/// term.
pub(in crate::app) fn highlight_runs(text: &str, query: &str) -> Vec<(String, bool)> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let matched = query
        .split_whitespace()
        .filter_map(|term| matcher.fuzzy_indices(text, term))
        .flat_map(|(_score, indices)| indices)
        .collect::<BTreeSet<_>>();

    let mut runs: Vec<(String, bool)> = Vec::new();
    for (index, character) in text.chars().enumerate() {
        let flagged = matched.contains(&index);
        match runs.last_mut() {
            Some((run, run_flag)) if *run_flag == flagged => run.push(character),
            _ => runs.push((character.to_string(), flagged)),
        }
    }
    runs
}

pub(in crate::app) fn highlighted_job(
    text: &str,
    query: &str,
    font: FontId,
    color: Color32,
    wrap_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    for (run, flagged) in highlight_runs(text, query) {
        let mut format = TextFormat::simple(font.clone(), color);
        if flagged {
            format.background = HIGHLIGHT_BACKGROUND;
        }
        job.append(&run, 0.0, format);
    }
    job
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_single_plain_run() {
        assert_eq!(
            highlight_runs("Ottoman travel", ""),
            vec![("Ottoman travel".to_owned(), false)]
        );
    }

    #[test]
    fn matching_term_is_flagged_case_insensitively() {
        let runs = highlight_runs("Ottoman travel", "TRAVEL");
        assert_eq!(
            runs,
            vec![("Ottoman ".to_owned(), false), ("travel".to_owned(), true)]
        );
    }

    #[test]
    fn unmatched_term_leaves_text_plain() {
        let runs = highlight_runs("Orient", "xyz");
        assert!(runs.iter().all(|(_, flagged)| !flagged));
        assert_eq!(
            runs.iter().map(|(run, _)| run.as_str()).collect::<String>(),
            "Orient"
        );
    }
}
