//! Rule-based plan recommendation
//!
//! Candidates are always postpaid plans from carriers other than the user's
//! current one. With a known data usage the engine looks for plans that
//! match both data and budget, relaxes the budget when that yields fewer than
//! [`MAX_RECOMMENDATIONS`], and falls back to the cheapest plans when nothing
//! matches at all. Every tier keeps one plan per carrier.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::{Catalog, Plan};

pub const MAX_RECOMMENDATIONS: usize = 3;

/// Preference words picked out of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hint {
    Unlimited,
    Budget,
    Family,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    pub current_price: Option<f64>,
    pub current_data_gb: Option<f64>,
    pub current_carrier: Option<String>,
    pub hints: Vec<Hint>,
}

impl RecommendationQuery {
    /// True when any of price, data or carrier is known
    pub fn has_plan_details(&self) -> bool {
        self.current_price.is_some() || self.current_data_gb.is_some() || self.current_carrier.is_some()
    }
}

/// Which rule produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Enough data at or under the current price
    WithinBudget,
    /// Enough data, budget relaxed to fill the list
    DataOnly,
    /// Cheapest plans regardless of data
    Cheapest,
    /// Cheapest plans matching a keyword hint
    Keyword,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::WithinBudget => "within_budget",
            Strategy::DataOnly => "data_only",
            Strategy::Cheapest => "cheapest",
            Strategy::Keyword => "keyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub plans: Vec<Plan>,
    pub strategy: Strategy,
}

/// Up to three postpaid plans from distinct carriers, cheapest first
pub fn recommend(catalog: &Catalog, query: &RecommendationQuery) -> Vec<Plan> {
    recommend_detailed(catalog, query).plans
}

pub fn recommend_detailed(catalog: &Catalog, query: &RecommendationQuery) -> Recommendation {
    let excluded = query
        .current_carrier
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    // Catalog position travels with each plan so ties resolve in source order
    let pool: Vec<(usize, &Plan)> = catalog
        .plans()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_postpaid())
        .filter(|(_, p)| {
            excluded
                .as_deref()
                .map_or(true, |c| p.carrier.to_lowercase() != c)
        })
        .collect();

    if !query.has_plan_details() && !query.hints.is_empty() {
        return keyword_pick(&pool, &query.hints);
    }

    let Some(min_data) = query.current_data_gb.filter(|d| *d > 0.0) else {
        return finish(cheapest_per_carrier(pool), Strategy::Cheapest);
    };

    let within_budget = cheapest_per_carrier(
        pool.iter()
            .copied()
            .filter(|(_, p)| p.data_gb >= min_data)
            .filter(|(_, p)| query.current_price.map_or(true, |max| p.price <= max))
            .collect(),
    );

    if within_budget.len() >= MAX_RECOMMENDATIONS {
        return finish(within_budget, Strategy::WithinBudget);
    }

    let picked = within_budget;

    let data_only = cheapest_per_carrier(
        pool.iter()
            .copied()
            .filter(|(_, p)| p.data_gb >= min_data)
            .collect(),
    );

    let mut merged = picked.clone();
    for candidate in data_only {
        if !merged.iter().any(|(idx, _)| *idx == candidate.0) {
            merged.push(candidate);
        }
    }
    let merged = cheapest_per_carrier(merged);

    if merged.is_empty() {
        return finish(cheapest_per_carrier(pool), Strategy::Cheapest);
    }

    let strategy = if merged.len() > picked.len() {
        Strategy::DataOnly
    } else {
        Strategy::WithinBudget
    };
    finish(merged, strategy)
}

fn keyword_pick(pool: &[(usize, &Plan)], hints: &[Hint]) -> Recommendation {
    // Unlimited outranks budget, budget outranks family
    let primary = [Hint::Unlimited, Hint::Budget, Hint::Family]
        .into_iter()
        .find(|h| hints.contains(h));

    let matching: Vec<(usize, &Plan)> = match primary {
        Some(Hint::Unlimited) => pool.iter().copied().filter(|(_, p)| p.mentions("unlimited")).collect(),
        Some(Hint::Family) => pool
            .iter()
            .copied()
            .filter(|(_, p)| p.plan_name.to_lowercase().contains("family"))
            .collect(),
        Some(Hint::Budget) | None => pool.to_vec(),
    };

    let candidates = if matching.is_empty() { pool.to_vec() } else { matching };
    finish(cheapest_per_carrier(candidates), Strategy::Keyword)
}

/// Sort by price (catalog order on ties) and keep the first plan per carrier
fn cheapest_per_carrier(mut plans: Vec<(usize, &Plan)>) -> Vec<(usize, &Plan)> {
    plans.sort_by(|(ia, a), (ib, b)| a.price.total_cmp(&b.price).then(ia.cmp(ib)));

    let mut seen = HashSet::new();
    plans.retain(|(_, p)| seen.insert(p.carrier.clone()));
    plans
}

fn finish(plans: Vec<(usize, &Plan)>, strategy: Strategy) -> Recommendation {
    Recommendation {
        plans: plans
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|(_, p)| p.clone())
            .collect(),
        strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanType;

    fn plan(carrier: &str, name: &str, data_gb: f64, price: f64) -> Plan {
        Plan::new(
            String::new(),
            carrier.to_string(),
            name.to_string(),
            price,
            Some(data_gb),
            PlanType::Postpaid,
            vec![],
        )
    }

    fn prepaid(carrier: &str, data_gb: f64, price: f64) -> Plan {
        Plan::new(
            String::new(),
            carrier.to_string(),
            "Prepaid".to_string(),
            price,
            Some(data_gb),
            PlanType::Prepaid,
            vec![],
        )
    }

    fn query(price: Option<f64>, data: Option<f64>, carrier: Option<&str>) -> RecommendationQuery {
        RecommendationQuery {
            current_price: price,
            current_data_gb: data,
            current_carrier: carrier.map(str::to_string),
            hints: vec![],
        }
    }

    fn carriers(plans: &[Plan]) -> Vec<&str> {
        plans.iter().map(|p| p.carrier.as_str()).collect()
    }

    #[test]
    fn test_relaxes_budget_to_fill_three() {
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "Fido 10", 10.0, 50.0),
            plan("Koodo", "Koodo 10", 10.0, 45.0),
            plan("Bell", "Bell 20", 20.0, 60.0),
        ]);

        let rec = recommend_detailed(&catalog, &query(Some(55.0), Some(8.0), Some("Rogers")));
        assert_eq!(carriers(&rec.plans), vec!["Koodo", "Fido", "Bell"]);
        assert_eq!(rec.strategy, Strategy::DataOnly);
    }

    #[test]
    fn test_within_budget_when_three_qualify() {
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "F", 10.0, 50.0),
            plan("Koodo", "K", 10.0, 45.0),
            plan("Virgin", "V", 15.0, 40.0),
            plan("Bell", "B", 20.0, 30.0),
            plan("Telus", "T", 50.0, 80.0),
        ]);

        let rec = recommend_detailed(&catalog, &query(Some(55.0), Some(8.0), None));
        assert_eq!(carriers(&rec.plans), vec!["Bell", "Virgin", "Koodo"]);
        assert_eq!(rec.strategy, Strategy::WithinBudget);
    }

    #[test]
    fn test_one_plan_per_carrier_keeps_cheapest() {
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "Fido big", 50.0, 55.0),
            plan("Fido", "Fido small", 10.0, 35.0),
            plan("Koodo", "Koodo", 10.0, 40.0),
        ]);

        let plans = recommend(&catalog, &query(Some(60.0), Some(5.0), None));
        assert_eq!(carriers(&plans), vec!["Fido", "Koodo"]);
        assert_eq!(plans[0].plan_name, "Fido small");
    }

    #[test]
    fn test_excludes_current_carrier_case_insensitive() {
        let catalog = Catalog::from_plans(vec![
            plan("Rogers", "R", 10.0, 20.0),
            plan("Fido", "F", 10.0, 50.0),
        ]);

        let plans = recommend(&catalog, &query(Some(60.0), Some(5.0), Some("  rOgErS ")));
        assert_eq!(carriers(&plans), vec!["Fido"]);
    }

    #[test]
    fn test_unknown_current_carrier_is_noop() {
        let catalog = Catalog::from_plans(vec![plan("Fido", "F", 10.0, 50.0)]);
        let plans = recommend(&catalog, &query(Some(60.0), Some(5.0), Some("Eastlink")));
        assert_eq!(plans.len(), 1);
    }

    #[test]
    fn test_falls_back_to_cheapest_when_no_data_match() {
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "F", 10.0, 50.0),
            plan("Koodo", "K", 5.0, 30.0),
            plan("Bell", "B", 2.0, 25.0),
            plan("Telus", "T", 1.0, 20.0),
        ]);

        let rec = recommend_detailed(&catalog, &query(Some(40.0), Some(100.0), Some("Telus")));
        assert_eq!(carriers(&rec.plans), vec!["Bell", "Koodo", "Fido"]);
        assert_eq!(rec.strategy, Strategy::Cheapest);
    }

    #[test]
    fn test_no_data_goes_straight_to_cheapest() {
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "F", 100.0, 50.0),
            plan("Koodo", "K", 1.0, 30.0),
            plan("Fido", "F2", 1.0, 25.0),
        ]);

        let rec = recommend_detailed(&catalog, &query(Some(10.0), None, None));
        assert_eq!(carriers(&rec.plans), vec!["Fido", "Koodo"]);
        assert_eq!(rec.plans[0].plan_name, "F2");
        assert_eq!(rec.strategy, Strategy::Cheapest);
    }

    #[test]
    fn test_prepaid_never_recommended() {
        let catalog = Catalog::from_plans(vec![
            prepaid("Chatr", 10.0, 10.0),
            prepaid("Public Mobile", 10.0, 15.0),
        ]);

        assert!(recommend(&catalog, &query(Some(60.0), Some(5.0), None)).is_empty());
        assert!(recommend(&catalog, &query(None, None, None)).is_empty());
    }

    #[test]
    fn test_empty_catalog_is_empty_result() {
        let catalog = Catalog::default();
        assert!(recommend(&catalog, &query(Some(50.0), Some(10.0), Some("Bell"))).is_empty());
    }

    #[test]
    fn test_price_ties_follow_catalog_order() {
        let catalog = Catalog::from_plans(vec![
            plan("Virgin", "V", 10.0, 45.0),
            plan("Koodo", "K", 10.0, 45.0),
            plan("Fido", "F", 10.0, 45.0),
            plan("Bell", "B", 10.0, 45.0),
        ]);

        let plans = recommend(&catalog, &query(Some(50.0), Some(10.0), None));
        assert_eq!(carriers(&plans), vec!["Virgin", "Koodo", "Fido"]);
    }

    #[test]
    fn test_keyword_hint_unlimited() {
        let mut unlimited = plan("Telus", "Telus Unlimited 100", 100.0, 75.0);
        unlimited.features = vec!["Unlimited data".to_string()];
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "Fido 10", 10.0, 30.0),
            unlimited,
        ]);

        let q = RecommendationQuery {
            hints: vec![Hint::Budget, Hint::Unlimited],
            ..Default::default()
        };
        let rec = recommend_detailed(&catalog, &q);
        assert_eq!(carriers(&rec.plans), vec!["Telus"]);
        assert_eq!(rec.strategy, Strategy::Keyword);
    }

    #[test]
    fn test_keyword_hint_without_match_uses_all() {
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "Fido 10", 10.0, 30.0),
            plan("Bell", "Bell 20", 20.0, 40.0),
        ]);

        let q = RecommendationQuery {
            hints: vec![Hint::Family],
            ..Default::default()
        };
        assert_eq!(recommend(&catalog, &q).len(), 2);
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let catalog = Catalog::from_plans(vec![
            plan("Fido", "F", 10.0, 50.0),
            plan("Koodo", "K", 10.0, 45.0),
            plan("Bell", "B", 20.0, 60.0),
            plan("Freedom", "Fr", 30.0, 45.0),
        ]);
        let q = query(Some(55.0), Some(8.0), Some("Rogers"));

        assert_eq!(recommend(&catalog, &q), recommend(&catalog, &q));
    }
}
