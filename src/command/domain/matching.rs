//! Resolution of a title fragment against an owner's tasks.

use crate::task::domain::Task;

/// Result of matching a title fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleMatch<'a> {
    /// No task matched.
    None,
    /// Exactly one task matched.
    One(&'a Task),
    /// Several tasks matched.
    Many(Vec<&'a Task>),
}

/// Matches `fragment` against task titles, ignoring case.
///
/// Exact title matches win; only when there is none does substring
/// containment apply. A blank fragment matches nothing.
#[must_use]
pub fn match_title<'a>(tasks: &'a [Task], fragment: &str) -> TitleMatch<'a> {
    let needle = fragment.trim().to_lowercase();
    if needle.is_empty() {
        return TitleMatch::None;
    }

    let exact: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.title().as_str().to_lowercase() == needle)
        .collect();
    if !exact.is_empty() {
        return classify(exact);
    }

    classify(
        tasks
            .iter()
            .filter(|task| task.title().as_str().to_lowercase().contains(&needle))
            .collect(),
    )
}

fn classify(mut matches: Vec<&Task>) -> TitleMatch<'_> {
    match matches.len() {
        0 => TitleMatch::None,
        1 => matches.pop().map_or(TitleMatch::None, TitleMatch::One),
        _ => TitleMatch::Many(matches),
    }
}
