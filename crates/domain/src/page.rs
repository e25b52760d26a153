//! Pages, branches and selector matching.
//!
//! A page is the routing table one data source exposes. Each branch pairs a
//! prefix selector with either terminal records or delegation targets.

use crate::errors::DomainError;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Trailing marker accepted on selectors. It carries no meaning beyond
/// documenting that the selector is a prefix.
pub const WILDCARD: char = '*';

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Page {
    /// Builds a normalized page.
    pub fn new(branches: Vec<Branch>) -> Self {
        let mut page = Self { branches };
        page.normalize();
        page
    }

    /// Orders branches by descending pattern length, keeping the original
    /// order between equal lengths. Idempotent.
    pub fn normalize(&mut self) {
        self.branches.sort_by_key(|branch| Reverse(branch.pattern().len()));
    }

    pub fn is_normalized(&self) -> bool {
        self.branches
            .windows(2)
            .all(|pair| pair[0].pattern().len() >= pair[1].pattern().len())
    }

    /// Most specific branch whose selector is a prefix of `query`.
    ///
    /// On a normalized page this is the first matching branch; on a page that
    /// skipped normalization the longest match still wins, earliest first.
    pub fn find_match(&self, query: &str) -> Option<&Branch> {
        let mut best: Option<&Branch> = None;
        for branch in self.branches.iter().filter(|b| b.matches(query)) {
            match best {
                Some(current) if current.pattern().len() >= branch.pattern().len() => {}
                _ => best = Some(branch),
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BranchDef", into = "BranchDef")]
pub struct Branch {
    pub selector: String,
    pub action: BranchAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BranchAction {
    /// Terminal answer, returned verbatim.
    Records(Vec<Record>),
    /// Scheme URIs (or alias names) to delegate to, in priority order.
    Targets(Vec<String>),
    /// Valid leaf with no answer.
    Empty,
}

impl Branch {
    pub fn records(selector: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            selector: selector.into(),
            action: BranchAction::Records(records),
        }
    }

    pub fn targets<S: Into<String>>(selector: impl Into<String>, targets: Vec<S>) -> Self {
        Self {
            selector: selector.into(),
            action: BranchAction::Targets(targets.into_iter().map(Into::into).collect()),
        }
    }

    pub fn empty(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            action: BranchAction::Empty,
        }
    }

    /// Selector with any trailing wildcard marker removed.
    pub fn pattern(&self) -> &str {
        self.selector
            .strip_suffix(WILDCARD)
            .unwrap_or(&self.selector)
    }

    pub fn matches(&self, query: &str) -> bool {
        query.starts_with(self.pattern())
    }
}

/// Serialized form: `records` and `targets` are separate optional keys.
#[derive(Serialize, Deserialize)]
struct BranchDef {
    selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    records: Option<Vec<Record>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    targets: Option<Vec<String>>,
}

impl TryFrom<BranchDef> for Branch {
    type Error = DomainError;

    fn try_from(def: BranchDef) -> Result<Self, Self::Error> {
        let action = match (def.records, def.targets) {
            (Some(_), Some(_)) => return Err(DomainError::InvalidBranch(def.selector)),
            (Some(records), None) => BranchAction::Records(records),
            (None, Some(targets)) => BranchAction::Targets(targets),
            (None, None) => BranchAction::Empty,
        };
        Ok(Self {
            selector: def.selector,
            action,
        })
    }
}

impl From<Branch> for BranchDef {
    fn from(branch: Branch) -> Self {
        let (records, targets) = match branch.action {
            BranchAction::Records(records) => (Some(records), None),
            BranchAction::Targets(targets) => (None, Some(targets)),
            BranchAction::Empty => (None, None),
        };
        Self {
            selector: branch.selector,
            records,
            targets,
        }
    }
}
