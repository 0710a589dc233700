//! Downtime-transition analysis engine.
//!
//! The pipeline turns a raw, time-ordered log of downtime events into a
//! transition-frequency model between grouping-dimension values:
//!
//! 1. [`build_line_sequences`] reconstructs, per production line, the
//!    ordered sequence of node values.
//! 2. [`aggregate_transitions`] pools consecutive-pair counts across all
//!    lines, applying any `fromValue`/`toValue` constraint during
//!    aggregation so percentages always reflect the constrained population.
//! 3. [`rank_transitions`] orders by count (lexicographic tie-break) and
//!    truncates to the top N, collapsing the remainder.
//! 4. [`assemble_result`] derives percentages and summary statistics.
//!
//! All stages are pure, synchronous transformations; the only suspension
//! point is the repository fetch in [`get_transitions_data`].

use std::collections::{BTreeMap, HashMap, HashSet};

use super::error::ServiceResult;
use crate::api::{OtherTransitions, TransitionEdge, TransitionsData};
use crate::db::repository::FullRepository;
use crate::models::downtime::{DowntimeEvent, GroupingDimension};
use crate::models::filters::TransitionsFilters;

/// Pooled transition counts keyed by the ordered `(from, to)` pair.
pub type TransitionCounts = HashMap<(String, String), u64>;

/// Compute the transitions dataset for a validated filter set.
///
/// Fetches matching events from the repository (ordered per line by start
/// time, per the fetcher contract) and runs the aggregation stages over the
/// in-memory set. An empty event population yields an empty result, not an
/// error.
pub async fn get_transitions_data(
    repo: &dyn FullRepository,
    filters: &TransitionsFilters,
) -> ServiceResult<TransitionsData> {
    let events = repo.fetch_downtime_events(&filters.event_filters()).await?;
    log::debug!(
        "transitions: fetched {} events (grouping={}, top_n={})",
        events.len(),
        filters.grouping,
        filters.top_n
    );

    let sequences = build_line_sequences(&events, filters.grouping);
    let counts = aggregate_transitions(&sequences, filters);
    Ok(assemble_result(filters.grouping, counts, filters.top_n))
}

/// Group events by line, preserving per-line arrival order, and map each
/// event to its node value under the active grouping dimension.
///
/// Events without a value for the dimension are excluded from their line's
/// sequence. Only per-line ordering of the input is relied upon; no global
/// time-ordering across lines is assumed.
pub fn build_line_sequences(
    events: &[DowntimeEvent],
    grouping: GroupingDimension,
) -> BTreeMap<i64, Vec<String>> {
    let mut sequences: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    for event in events {
        if let Some(value) = grouping.value_of(event) {
            sequences
                .entry(event.line_id)
                .or_default()
                .push(value.to_string());
        }
    }
    sequences
}

/// Walk every line's sequence and count consecutive `(from, to)` pairs,
/// pooled across all lines.
///
/// Sequences of length 0 or 1 contribute nothing. Self-transitions are
/// counted unless the filters disable them. `from_value`/`to_value`
/// constraints are applied here, during aggregation, so the total stays
/// consistent with the constrained population. Counting is a commutative
/// sum per key, so the result does not depend on line-processing order.
pub fn aggregate_transitions(
    sequences: &BTreeMap<i64, Vec<String>>,
    filters: &TransitionsFilters,
) -> TransitionCounts {
    let mut counts = TransitionCounts::new();
    for sequence in sequences.values() {
        for pair in sequence.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if !filters.include_self_transitions && from == to {
                continue;
            }
            if let Some(ref wanted) = filters.from_value {
                if from != wanted {
                    continue;
                }
            }
            if let Some(ref wanted) = filters.to_value {
                if to != wanted {
                    continue;
                }
            }
            *counts.entry((from.clone(), to.clone())).or_insert(0) += 1;
        }
    }
    counts
}

/// Sort transitions by count descending, tie-breaking lexicographically on
/// the `(from, to)` pair, and truncate to `top_n`.
///
/// Returns the kept transitions and, when strictly more than `top_n`
/// distinct transitions existed, the summed count of the excluded ones.
pub fn rank_transitions(
    counts: TransitionCounts,
    top_n: usize,
) -> (Vec<((String, String), u64)>, Option<u64>) {
    let mut ranked: Vec<((String, String), u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if ranked.len() > top_n {
        let excluded: u64 = ranked[top_n..].iter().map(|(_, count)| count).sum();
        ranked.truncate(top_n);
        (ranked, Some(excluded))
    } else {
        (ranked, None)
    }
}

/// Package ranked transitions into the response dataset, deriving each
/// row's percentage of the total (one decimal place, half-up).
pub fn assemble_result(
    grouping: GroupingDimension,
    counts: TransitionCounts,
    top_n: usize,
) -> TransitionsData {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return TransitionsData::empty(grouping);
    }

    let distinct_node_count = distinct_nodes(&counts);
    let (ranked, excluded) = rank_transitions(counts, top_n);

    let transitions = ranked
        .into_iter()
        .map(|((from, to), count)| TransitionEdge {
            from,
            to,
            percentage: percentage_of(count, total),
            count,
        })
        .collect();

    let other = excluded.map(|count| OtherTransitions {
        count,
        percentage: percentage_of(count, total),
    });

    TransitionsData {
        grouping,
        total_transitions: total,
        distinct_node_count,
        transitions,
        other,
    }
}

/// Unique node values across `from` and `to` of the aggregated transition
/// set, counted before truncation.
fn distinct_nodes(counts: &TransitionCounts) -> usize {
    let mut nodes: HashSet<&str> = HashSet::new();
    for (from, to) in counts.keys() {
        nodes.insert(from);
        nodes.insert(to);
    }
    nodes.len()
}

/// `count / total * 100`, rounded to one decimal place (ties half-up).
fn percentage_of(count: u64, total: u64) -> f64 {
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}
