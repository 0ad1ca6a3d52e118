//! The search pipeline: filter, sort, prioritize, paginate.
//!
//! Every stage is a pure function over borrowed entries. Order matters:
//! prioritization runs on the filtered and sorted set, and pagination runs on
//! the final ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Entry, SearchConfig};
use crate::policy::PolicyProvider;
use crate::search::params::{SearchState, SortField, SortOrder};

/// Pagination metadata plus the entries on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultWindow {
    /// Number of entries that matched
    pub count: usize,
    /// Number of pages, never below 1
    pub page_count: usize,
    /// 1-based position of the first entry on the page
    pub from: usize,
    /// 1-based position of the last entry on the page
    pub to: usize,
    pub results: Vec<Entry>,
}

impl Default for ResultWindow {
    fn default() -> Self {
        Self {
            count: 0,
            page_count: 1,
            from: 0,
            to: 0,
            results: Vec::new(),
        }
    }
}

/// Run all four stages over `entries` for the given state and policy.
pub fn run_pipeline<P>(entries: &[Entry], state: &SearchState, policy: &P) -> ResultWindow
where
    P: PolicyProvider + ?Sized,
{
    let config = policy.config();
    let filtered = filter(entries, &state.query, policy);
    let sorted = sort(filtered, state.sorting, state.order);
    let prioritized = prioritize(sorted, &state.query, &config);
    paginate(&prioritized, state.page, state.limit)
}

/// Keep entries allowed by policy and matching the query.
///
/// Only the query is lowercased; field values are compared as stored.
pub fn filter<'a, P>(entries: &'a [Entry], query: &str, policy: &P) -> Vec<&'a Entry>
where
    P: PolicyProvider + ?Sized,
{
    let config = policy.config();
    let needle = query.to_lowercase();

    entries
        .iter()
        .filter(|entry| !config.ignore_deprecated_packages || is_allowed(entry, policy))
        .filter(|entry| query.is_empty() || matches_query(entry, &needle, &config))
        .collect()
}

/// Stable ascending sort by `field`, reversed as a whole for descending order.
pub fn sort(mut entries: Vec<&Entry>, field: SortField, order: SortOrder) -> Vec<&Entry> {
    entries.sort_by(|left, right| compare_by(left, right, field));
    if order == SortOrder::Desc {
        entries.reverse();
    }
    entries
}

/// Move the first exact (case-insensitive) name match to the front.
pub fn prioritize<'a>(
    mut entries: Vec<&'a Entry>,
    query: &str,
    config: &SearchConfig,
) -> Vec<&'a Entry> {
    if !config.pins_exact_match() {
        return entries;
    }

    let needle = query.to_lowercase();
    if let Some(index) = entries
        .iter()
        .position(|entry| entry.name.to_lowercase() == needle)
    {
        let pinned = entries.remove(index);
        entries.insert(0, pinned);
    }
    entries
}

/// Cut the 1-based window `[from, to]` for `page` out of `entries`.
///
/// Out-of-range pages produce an empty window rather than being clamped.
pub fn paginate(entries: &[&Entry], page: usize, limit: usize) -> ResultWindow {
    let limit = limit.max(1);
    let count = entries.len();
    let page_count = count.div_ceil(limit).max(1);
    let from = page
        .saturating_sub(1)
        .saturating_mul(limit)
        .saturating_add(1);
    let to = from.saturating_add(limit).min(count);

    let results = if from > count {
        Vec::new()
    } else {
        entries[from - 1..to]
            .iter()
            .map(|entry| (*entry).clone())
            .collect()
    };

    ResultWindow {
        count,
        page_count,
        from,
        to,
        results,
    }
}

fn is_allowed<P>(entry: &Entry, policy: &P) -> bool
where
    P: PolicyProvider + ?Sized,
{
    if policy.is_ignored(&entry.name) {
        return false;
    }
    match entry
        .website
        .as_deref()
        .and_then(|website| policy.canonical_name(website))
    {
        Some(canonical) => canonical == entry.name,
        None => true,
    }
}

fn matches_query(entry: &Entry, needle: &str, config: &SearchConfig) -> bool {
    let fields = config.search_field;
    (fields.name && entry.name.contains(needle))
        || (fields.description
            && entry
                .description
                .as_deref()
                .is_some_and(|description| description.contains(needle)))
        || (fields.owner && entry.owner.contains(needle))
}

fn compare_by(left: &Entry, right: &Entry, field: SortField) -> Ordering {
    match field {
        SortField::Name => left.name.cmp(&right.name),
        SortField::Owner => left.owner.cmp(&right.owner),
        SortField::Stars => missing_last(left.stars.as_ref(), right.stars.as_ref()),
        SortField::Updated => missing_last(left.updated.as_ref(), right.updated.as_ref()),
    }
}

/// Ascending order with absent values after every present one.
fn missing_last<T: Ord>(left: Option<&T>, right: Option<&T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchFields;
    use crate::policy::StaticPolicy;
    use pretty_assertions::assert_eq;

    fn names(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|entry| entry.name.clone()).collect()
    }

    fn result_names(window: &ResultWindow) -> Vec<String> {
        window
            .results
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    fn open_policy() -> StaticPolicy {
        StaticPolicy::new(SearchConfig {
            ignore_deprecated_packages: false,
            ..SearchConfig::default()
        })
    }

    fn state(query: &str, sorting: SortField, order: SortOrder) -> SearchState {
        SearchState {
            query: query.to_string(),
            sorting,
            order,
            ..SearchState::default()
        }
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let entries = vec![Entry::new("b", "x"), Entry::new("a", "y")];
        let filtered = filter(&entries, "", &open_policy());
        assert_eq!(names(&filtered), vec!["b", "a"]);
    }

    #[test]
    fn query_is_lowercased_but_fields_are_not() {
        let entries = vec![
            Entry::new("jquery", "jquery"),
            Entry::new("JQuery-UI", "someone"),
            Entry::new("other", "x").with_description("plugin for jquery"),
        ];
        let filtered = filter(&entries, "JQuery", &open_policy());
        assert_eq!(names(&filtered), vec!["jquery", "other"]);
    }

    #[test]
    fn disabled_fields_do_not_match() {
        let entries = vec![
            Entry::new("alpha", "bob"),
            Entry::new("beta", "x").with_description("bob's tool"),
            Entry::new("bobcat", "x"),
        ];
        let policy = open_policy().with_config(SearchConfig {
            ignore_deprecated_packages: false,
            search_field: SearchFields {
                name: false,
                description: true,
                owner: false,
            },
            exact_match: true,
        });
        assert_eq!(names(&filter(&entries, "bob", &policy)), vec!["beta"]);
    }

    #[test]
    fn missing_description_never_matches() {
        let entries = vec![Entry::new("a", "b")];
        let policy = open_policy().with_config(SearchConfig {
            ignore_deprecated_packages: false,
            search_field: SearchFields {
                name: false,
                description: true,
                owner: false,
            },
            exact_match: false,
        });
        assert!(filter(&entries, "a", &policy).is_empty());
    }

    #[test]
    fn policy_gate_drops_ignored_and_non_canonical_entries() {
        let entries = vec![
            Entry::new("angular", "angular").with_website("https://angularjs.org"),
            Entry::new("angularjs", "someone").with_website("https://angularjs.org"),
            Entry::new("angular-legacy", "someone"),
            Entry::new("lodash", "lodash").with_website("https://lodash.com"),
        ];
        let policy = StaticPolicy::default()
            .with_ignored(["angular-legacy"])
            .with_whitelisted("https://angularjs.org", "angular");

        assert_eq!(
            names(&filter(&entries, "", &policy)),
            vec!["angular", "lodash"]
        );
    }

    #[test]
    fn policy_gate_is_off_when_not_ignoring_deprecated() {
        let entries = vec![
            Entry::new("angularjs", "someone").with_website("https://angularjs.org"),
            Entry::new("angular-legacy", "someone"),
        ];
        let policy = StaticPolicy::new(SearchConfig {
            ignore_deprecated_packages: false,
            ..SearchConfig::default()
        })
        .with_ignored(["angular-legacy"])
        .with_whitelisted("https://angularjs.org", "angular");

        assert_eq!(filter(&entries, "", &policy).len(), 2);
    }

    #[test]
    fn descending_sort_reverses_equal_key_groups() {
        let entries = vec![
            Entry::new("a", "x").with_stars(1),
            Entry::new("b", "x").with_stars(2),
            Entry::new("c", "x").with_stars(1),
            Entry::new("d", "x").with_stars(2),
        ];
        let refs = entries.iter().collect::<Vec<_>>();

        let ascending = sort(refs.clone(), SortField::Stars, SortOrder::Asc);
        assert_eq!(names(&ascending), vec!["a", "c", "b", "d"]);

        let descending = sort(refs, SortField::Stars, SortOrder::Desc);
        assert_eq!(names(&descending), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn sorts_by_strings_and_dates() {
        let entries = vec![
            Entry::new("b", "zed").with_updated("2014-01-01T00:00:00Z"),
            Entry::new("a", "amy"),
            Entry::new("c", "max").with_updated("2013-01-01"),
        ];
        let refs = entries.iter().collect::<Vec<_>>();

        assert_eq!(
            names(&sort(refs.clone(), SortField::Name, SortOrder::Asc)),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            names(&sort(refs.clone(), SortField::Owner, SortOrder::Desc)),
            vec!["b", "c", "a"]
        );
        assert_eq!(
            names(&sort(refs, SortField::Updated, SortOrder::Asc)),
            vec!["c", "b", "a"]
        );
    }

    #[test]
    fn missing_stars_sort_last_ascending_and_first_descending() {
        let entries = vec![
            Entry::new("nostars", "x"),
            Entry::new("three", "x").with_stars(3),
            Entry::new("zero", "x").with_stars(0),
        ];
        let refs = entries.iter().collect::<Vec<_>>();

        assert_eq!(
            names(&sort(refs.clone(), SortField::Stars, SortOrder::Asc)),
            vec!["zero", "three", "nostars"]
        );
        assert_eq!(
            names(&sort(refs, SortField::Stars, SortOrder::Desc)),
            vec!["nostars", "three", "zero"]
        );
    }

    #[test]
    fn missing_updated_sorts_last_ascending_and_first_descending() {
        let entries = vec![
            Entry::new("undated", "x"),
            Entry::new("dated", "x").with_updated("2014-06-01"),
        ];
        let refs = entries.iter().collect::<Vec<_>>();

        assert_eq!(
            names(&sort(refs.clone(), SortField::Updated, SortOrder::Asc)),
            vec!["dated", "undated"]
        );
        assert_eq!(
            names(&sort(refs, SortField::Updated, SortOrder::Desc)),
            vec!["undated", "dated"]
        );
    }

    #[test]
    fn prioritize_moves_exact_match_to_front() {
        let entries = vec![
            Entry::new("beta-tools", "x"),
            Entry::new("alpha", "x"),
            Entry::new("Beta", "x"),
            Entry::new("beta", "x"),
        ];
        let refs = entries.iter().collect::<Vec<_>>();

        let prioritized = prioritize(refs, "BETA", &SearchConfig::default());
        assert_eq!(names(&prioritized), vec!["Beta", "beta-tools", "alpha", "beta"]);
    }

    #[test]
    fn prioritize_requires_exact_match_and_name_field() {
        let entries = vec![Entry::new("alpha", "x"), Entry::new("beta", "x")];

        let mut config = SearchConfig {
            exact_match: false,
            ..SearchConfig::default()
        };
        let unchanged = prioritize(entries.iter().collect(), "beta", &config);
        assert_eq!(names(&unchanged), vec!["alpha", "beta"]);

        config.exact_match = true;
        config.search_field.name = false;
        let unchanged = prioritize(entries.iter().collect(), "beta", &config);
        assert_eq!(names(&unchanged), vec!["alpha", "beta"]);
    }

    #[test]
    fn prioritize_without_match_is_a_no_op() {
        let entries = vec![Entry::new("alpha", "x"), Entry::new("beta", "x")];
        let result = prioritize(entries.iter().collect(), "gamma", &SearchConfig::default());
        assert_eq!(names(&result), vec!["alpha", "beta"]);
    }

    #[test]
    fn paginate_window_covers_from_to_inclusive() {
        let entries = (1..=25)
            .map(|index| Entry::new(format!("pkg-{index}"), "x"))
            .collect::<Vec<_>>();
        let refs = entries.iter().collect::<Vec<_>>();

        let first = paginate(&refs, 1, 20);
        assert_eq!((first.count, first.page_count), (25, 2));
        assert_eq!((first.from, first.to), (1, 21));
        assert_eq!(first.results.len(), 21);

        let second = paginate(&refs, 2, 20);
        assert_eq!((second.from, second.to), (21, 25));
        assert_eq!(second.results.first().map(|e| e.name.as_str()), Some("pkg-21"));
        assert_eq!(second.results.len(), 5);
    }

    #[test]
    fn paginate_out_of_range_page_is_empty() {
        let entries = (0..10)
            .map(|index| Entry::new(format!("pkg-{index}"), "x"))
            .collect::<Vec<_>>();
        let refs = entries.iter().collect::<Vec<_>>();

        let window = paginate(&refs, 3, 20);
        assert_eq!(window.count, 10);
        assert_eq!(window.from, 41);
        assert_eq!(window.to, 10);
        assert!(window.results.is_empty());
    }

    #[test]
    fn paginate_empty_list_has_one_page() {
        let window = paginate(&[], 1, 20);
        assert_eq!(
            window,
            ResultWindow {
                count: 0,
                page_count: 1,
                from: 1,
                to: 0,
                results: Vec::new(),
            }
        );
    }

    #[test]
    fn paginate_huge_page_saturates() {
        let entries = vec![Entry::new("a", "x")];
        let refs = entries.iter().collect::<Vec<_>>();
        let window = paginate(&refs, usize::MAX, 20);
        assert!(window.results.is_empty());
        assert!(window.to <= window.count);
    }

    #[test]
    fn window_invariants_hold_across_pages() {
        let entries = (0..47)
            .map(|index| Entry::new(format!("pkg-{index}"), "x"))
            .collect::<Vec<_>>();
        let refs = entries.iter().collect::<Vec<_>>();

        for page in 1..=5 {
            let window = paginate(&refs, page, 10);
            assert!(window.to <= window.count);
            assert!(window.from <= window.to || window.results.is_empty());
            assert_eq!(window.page_count, 5);
        }
    }

    #[test]
    fn scenario_stars_descending() {
        let entries = vec![
            Entry::new("alpha", "x").with_stars(5),
            Entry::new("beta", "x").with_stars(10),
        ];
        let window = run_pipeline(
            &entries,
            &state("", SortField::Stars, SortOrder::Desc),
            &open_policy(),
        );
        assert_eq!(result_names(&window), vec!["beta", "alpha"]);
    }

    #[test]
    fn scenario_exact_match_pinned_over_sort_order() {
        let entries = vec![
            Entry::new("beta-plugin", "x").with_stars(100),
            Entry::new("Beta", "x").with_stars(1),
            Entry::new("alphabeta", "x").with_stars(50),
        ];
        let window = run_pipeline(
            &entries,
            &state("beta", SortField::Stars, SortOrder::Desc),
            &open_policy(),
        );
        // "Beta" does not contain lowercase "beta", so it is filtered out
        // before prioritization ever sees it.
        assert_eq!(result_names(&window), vec!["beta-plugin", "alphabeta"]);

        let entries = vec![
            Entry::new("beta-plugin", "x").with_stars(100),
            Entry::new("beta", "x").with_stars(1),
            Entry::new("alphabeta", "x").with_stars(50),
        ];
        let window = run_pipeline(
            &entries,
            &state("Beta", SortField::Stars, SortOrder::Desc),
            &open_policy(),
        );
        assert_eq!(
            result_names(&window),
            vec!["beta", "beta-plugin", "alphabeta"]
        );
    }

    #[test]
    fn scenario_no_match_has_one_empty_page() {
        let entries = vec![
            Entry::new("alpha", "x").with_description("first"),
            Entry::new("beta", "y"),
        ];
        let window = run_pipeline(
            &entries,
            &state("zzz-nomatch", SortField::Stars, SortOrder::Desc),
            &open_policy(),
        );
        assert!(window.results.is_empty());
        assert_eq!(window.count, 0);
        assert_eq!(window.page_count, 1);
    }
}
