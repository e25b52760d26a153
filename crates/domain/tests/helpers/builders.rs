#![allow(dead_code)]
use djdns_domain::{Branch, Page, Record};

/// Builds pages without normalizing them, so tests control branch order.
pub struct PageBuilder {
    branches: Vec<Branch>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self { branches: vec![] }
    }

    pub fn a_records(mut self, selector: &str, records: &[(&str, &str)]) -> Self {
        let records = records
            .iter()
            .map(|(name, ip)| Record::new(*name, "A", *ip))
            .collect();
        self.branches.push(Branch::records(selector, records));
        self
    }

    pub fn targets(mut self, selector: &str, targets: &[&str]) -> Self {
        self.branches
            .push(Branch::targets(selector, targets.to_vec()));
        self
    }

    pub fn empty(mut self, selector: &str) -> Self {
        self.branches.push(Branch::empty(selector));
        self
    }

    pub fn build(self) -> Page {
        Page {
            branches: self.branches,
        }
    }

    pub fn build_normalized(self) -> Page {
        Page::new(self.branches)
    }
}
