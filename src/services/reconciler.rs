//! Splits fetched issues into creates and updates.

use crate::domain::models::{PendingUpdate, ResolvedIssue};

use super::identity_map::IdentityMap;

/// Writes needed to make the store mirror the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Issues with no record in the store.
    pub to_create: Vec<ResolvedIssue>,
    /// Issues that already have a record, paired with its id.
    pub to_update: Vec<PendingUpdate>,
}

/// Counts-only view of a plan, for logs and dry-run output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanCounts {
    pub creates: usize,
    pub updates: usize,
}

impl SyncPlan {
    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_update.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty()
    }

    pub fn counts(&self) -> PlanCounts {
        PlanCounts {
            creates: self.to_create.len(),
            updates: self.to_update.len(),
        }
    }
}

/// Route each issue to create or update by looking up its number.
///
/// Input order is preserved within each list. Every issue lands in
/// exactly one of the two lists.
pub fn reconcile(issues: Vec<ResolvedIssue>, map: &IdentityMap) -> SyncPlan {
    let mut plan = SyncPlan::default();
    for issue in issues {
        match map.record_id(issue.number) {
            Some(record_id) => plan.to_update.push(PendingUpdate {
                record_id: record_id.to_string(),
                issue,
            }),
            None => plan.to_create.push(issue),
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::IssueState;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn issue(number: u64) -> ResolvedIssue {
        ResolvedIssue {
            number,
            title: format!("Issue {number}"),
            state: IssueState::Open,
            comment_count: 0,
            url: format!("https://x/{number}"),
            assignees: vec![],
        }
    }

    #[test]
    fn test_existing_numbers_go_to_update_with_record_id() {
        let map = IdentityMap::from_pairs([(2, "page-2"), (4, "page-4")]);
        let plan = reconcile((1..=4).map(issue).collect(), &map);

        let creates: Vec<u64> = plan.to_create.iter().map(|i| i.number).collect();
        assert_eq!(creates, vec![1, 3]);

        let updates: Vec<(u64, &str)> = plan
            .to_update
            .iter()
            .map(|u| (u.issue.number, u.record_id.as_str()))
            .collect();
        assert_eq!(updates, vec![(2, "page-2"), (4, "page-4")]);
    }

    #[test]
    fn test_empty_map_creates_everything() {
        let plan = reconcile(vec![issue(42)], &IdentityMap::default());
        assert_eq!(plan.counts(), PlanCounts { creates: 1, updates: 0 });
    }

    #[test]
    fn test_map_entries_without_issues_are_ignored() {
        let map = IdentityMap::from_pairs([(99, "page-99")]);
        let plan = reconcile(vec![], &map);
        assert!(plan.is_empty());
    }

    proptest! {
        #[test]
        fn prop_partition_is_complete_and_exclusive(
            numbers in proptest::collection::hash_set(0u64..500, 0..60),
            stored in proptest::collection::hash_set(0u64..500, 0..60),
        ) {
            let issues: Vec<ResolvedIssue> = numbers.iter().copied().map(issue).collect();
            let map = IdentityMap::from_pairs(stored.iter().map(|n| (*n, format!("page-{n}"))));

            let plan = reconcile(issues.clone(), &map);

            prop_assert_eq!(plan.len(), issues.len());

            let created: HashSet<u64> = plan.to_create.iter().map(|i| i.number).collect();
            let updated: HashSet<u64> = plan.to_update.iter().map(|u| u.issue.number).collect();
            prop_assert!(created.is_disjoint(&updated));

            for n in &created {
                prop_assert!(!stored.contains(n));
            }
            for update in &plan.to_update {
                prop_assert!(stored.contains(&update.issue.number));
                let expected = format!("page-{}", update.issue.number);
                prop_assert_eq!(update.record_id.as_str(), expected.as_str());
            }

            let union: HashSet<u64> = created.union(&updated).copied().collect();
            prop_assert_eq!(union, numbers);
        }

        #[test]
        fn prop_input_order_is_preserved(count in 0usize..40, stride in 1u64..4) {
            let issues: Vec<ResolvedIssue> = (0..count as u64).map(issue).collect();
            let map = IdentityMap::from_pairs(
                (0..count as u64).filter(|n| n % stride == 0).map(|n| (n, n.to_string())),
            );

            let plan = reconcile(issues, &map);

            let creates: Vec<u64> = plan.to_create.iter().map(|i| i.number).collect();
            let updates: Vec<u64> = plan.to_update.iter().map(|u| u.issue.number).collect();
            prop_assert!(creates.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(updates.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
