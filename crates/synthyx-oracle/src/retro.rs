//! Retrosynthesis search-result interpretation.
//!
//! Consumes the planning service's JSON response and reduces it to step
//! count, plausibility, and cost signals. The response schema is externally
//! owned. Trees alternate reaction and molecule layers, encoded here as
//! half-integer depths: odd half-steps are reaction layers (plausibility
//! multiplies), even half-steps are molecule layers (prices sum). The
//! traversal and its sentinel outputs are kept exactly as downstream
//! consumers expect them; do not unify the fallback rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One node of a retrosynthesis tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetroNode {
    /// Purchase price per gram; 0 when not directly purchasable.
    #[serde(default)]
    pub ppg: f64,
    /// Per-reaction-step confidence in [0, 1]; meaningful on reaction
    /// layers only, neutral elsewhere.
    #[serde(default = "default_plausibility")]
    pub plausibility: f64,
    #[serde(default)]
    pub children: Vec<RetroNode>,
}

fn default_plausibility() -> f64 {
    1.0
}

/// Top-level planner response. Exactly one of the three shapes is
/// meaningful: an `error` marker, a direct `price`, or a `trees` list of
/// ranked candidate plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetroResult {
    /// Present when the upstream query failed; content is irrelevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    /// Present when the compound is directly purchasable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trees: Option<Vec<RetroNode>>,
}

/// Reduction of one search result.
///
/// The failed-query row `(-1, {}, 11, -1.0, -1, -1.0)` is a documented
/// sentinel, not an error: downstream consumers branch on these exact
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeAnalysis {
    /// Number of candidate plans found; −1 for a failed query.
    pub num_paths: i64,
    /// Children seen per depth, keyed by depth in half-steps
    /// (key 1 = depth 0.5, key 2 = depth 1.0, ...). Key 0 is the root.
    pub depth_status: BTreeMap<u32, u64>,
    /// Reaction step count; 11 is the "no route found" ceiling.
    pub num_steps: i64,
    /// Product of reaction plausibilities, zeroed when unsynthesizable;
    /// −1.0 for a failed query.
    pub plausibility: f64,
    /// 1 = route found, 0 = none, −1 = failed query.
    pub synthesizability: i64,
    /// Purchase cost; −1.0 when unknown or no route exists.
    pub price: f64,
}

impl TreeAnalysis {
    fn failed_query() -> Self {
        Self {
            num_paths: -1,
            depth_status: BTreeMap::new(),
            num_steps: 11,
            plausibility: -1.0,
            synthesizability: -1,
            price: -1.0,
        }
    }

    fn purchasable(num_paths: i64, price: f64) -> Self {
        Self {
            num_paths,
            depth_status: BTreeMap::new(),
            num_steps: 0,
            plausibility: 1.0,
            synthesizability: 1,
            price,
        }
    }

    fn no_plans() -> Self {
        Self {
            num_paths: 0,
            depth_status: BTreeMap::new(),
            num_steps: 11,
            plausibility: -1.0,
            synthesizability: 0,
            price: -1.0,
        }
    }
}

/// Analyze the planner's tree-builder result.
pub fn analyze_tree(result: &RetroResult) -> TreeAnalysis {
    if result.error.is_some() {
        debug!("planner reported an error, returning the failed-query sentinel");
        return TreeAnalysis::failed_query();
    }
    if let Some(price) = result.price {
        return TreeAnalysis::purchasable(0, price);
    }

    let trees = result.trees.as_deref().unwrap_or(&[]);
    if trees.is_empty() {
        return TreeAnalysis::no_plans();
    }
    let num_paths = trees.len() as i64;

    // Only the best-ranked plan is interpreted.
    let root = &trees[0];
    if root.ppg != 0.0 {
        return TreeAnalysis::purchasable(0, root.ppg);
    }

    let mut frontier: Vec<&RetroNode> = vec![root];
    let mut depth_status = BTreeMap::from([(0u32, 1u64)]);
    let mut plausibility = 1.0f64;
    let mut price = 0.0f64;
    // depth in half-steps; the loop overshoots by one before breaking
    let mut half_depth = 0u32;
    loop {
        half_depth += 1;
        let children: Vec<&RetroNode> = frontier
            .iter()
            .flat_map(|node| node.children.iter())
            .collect();
        if children.is_empty() {
            break;
        }
        if half_depth % 2 == 1 {
            // reaction layer
            for node in &children {
                plausibility *= node.plausibility;
            }
        } else {
            // molecule layer
            for node in &children {
                price += node.ppg;
            }
        }
        depth_status.insert(half_depth, children.len() as u64);
        frontier = children;
    }

    let synthesizability = if depth_status.len() > 1 { 1 } else { 0 };
    // floor(last depth − 0.5) in whole steps
    let steps = (half_depth as i64 - 1) / 2;
    let (num_steps, price) = if steps == 0 { (11, -1.0) } else { (steps, price) };

    TreeAnalysis {
        num_paths,
        depth_status,
        num_steps,
        plausibility: plausibility * synthesizability as f64,
        synthesizability,
        price,
    }
}
