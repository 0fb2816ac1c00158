use std::collections::BTreeMap;

use quiz_core::model::{QuestionBank, QuestionResult, Theme, ThemeId};

/// A theme paired with the results recorded for its questions.
///
/// Recomputed on read from the session's result list, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeResult {
    pub theme: Theme,
    pub results: Vec<QuestionResult>,
}

/// Groups recorded results by owning theme.
///
/// Themes nobody has answered yet are absent; within a theme, results keep
/// submission order; themes are ordered by ascending id. Results whose
/// theme id cannot be resolved against the bank are discarded.
pub(crate) fn group_by_theme(bank: &QuestionBank, results: &[QuestionResult]) -> Vec<ThemeResult> {
    let mut by_theme: BTreeMap<ThemeId, Vec<QuestionResult>> = BTreeMap::new();
    for result in results {
        let Some(theme_id) = result.theme_id else {
            continue;
        };
        by_theme.entry(theme_id).or_default().push(result.clone());
    }

    by_theme
        .into_iter()
        .filter_map(|(theme_id, results)| {
            bank.theme(theme_id).map(|theme| ThemeResult {
                theme: theme.clone(),
                results,
            })
        })
        .collect()
}
