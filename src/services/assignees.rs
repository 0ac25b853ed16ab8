//! Tracker login → store user resolution.

use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::models::{AssigneeRef, Issue, ResolvedIssue, UnresolvedAssignee};

/// Lookup table from tracker login to store user id.
///
/// Loaded from the `assignees` section of the configuration. Logins
/// without an entry are dropped from the issue they appear on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssigneeDirectory {
    users: BTreeMap<String, String>,
}

/// Issues with resolved assignees, plus every login that could not be
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub issues: Vec<ResolvedIssue>,
    pub unresolved: Vec<UnresolvedAssignee>,
}

impl AssigneeDirectory {
    pub fn new(users: BTreeMap<String, String>) -> Self {
        Self { users }
    }

    pub fn lookup(&self, login: &str) -> Option<AssigneeRef> {
        self.users.get(login).map(|id| AssigneeRef { id: id.clone() })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolve one issue's assignees.
    pub fn resolve(&self, issue: Issue) -> (ResolvedIssue, Vec<UnresolvedAssignee>) {
        let mut resolved = Vec::with_capacity(issue.assignees.len());
        let mut unresolved = Vec::new();

        for login in &issue.assignees {
            match self.lookup(login) {
                Some(user) => resolved.push(user),
                None => {
                    warn!(
                        issue_number = issue.number,
                        login = %login,
                        "Could not find user with login {login}"
                    );
                    unresolved.push(UnresolvedAssignee {
                        issue_number: issue.number,
                        login: login.clone(),
                    });
                }
            }
        }

        (ResolvedIssue::from_issue(issue, resolved), unresolved)
    }

    /// Resolve every issue, preserving order.
    pub fn resolve_issues(&self, issues: Vec<Issue>) -> Normalized {
        let mut out = Normalized {
            issues: Vec::with_capacity(issues.len()),
            unresolved: Vec::new(),
        };
        for issue in issues {
            let (issue, unresolved) = self.resolve(issue);
            out.issues.push(issue);
            out.unresolved.extend(unresolved);
        }
        out
    }
}

impl FromIterator<(String, String)> for AssigneeDirectory {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
