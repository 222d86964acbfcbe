//! Plan catalog: the immutable snapshot of every known carrier plan
//!
//! - `plan`: plan record and field normalization
//! - `loader`: CSV parsing
//! - `cache`: time-based refresh of the in-memory snapshot

pub mod cache;
pub mod loader;
pub mod plan;

pub use cache::CatalogCache;
pub use loader::{load_catalog, CatalogError};
pub use plan::{Plan, PlanType};

/// Row counts from the load that produced a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub skipped: usize,
}

/// Plans in source order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    plans: Vec<Plan>,
    summary: LoadSummary,
}

impl Catalog {
    pub fn new(plans: Vec<Plan>, summary: LoadSummary) -> Self {
        Self { plans, summary }
    }

    pub fn from_plans(plans: Vec<Plan>) -> Self {
        let rows_read = plans.len();
        Self::new(
            plans,
            LoadSummary {
                rows_read,
                skipped: 0,
            },
        )
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn by_type(&self, plan_type: PlanType) -> impl Iterator<Item = &Plan> {
        self.plans.iter().filter(move |p| p.plan_type == plan_type)
    }

    /// Distinct carrier names in first-seen order
    pub fn carriers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for plan in &self.plans {
            if !seen.contains(&plan.carrier.as_str()) {
                seen.push(&plan.carrier);
            }
        }
        seen
    }
}
