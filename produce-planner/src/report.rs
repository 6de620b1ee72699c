//! Plain-text rendering of plans, routes and paths.

use askama::Template;

use crate::graph::{Route, ShortestPath};
use crate::optimizer::{OptimizationResult, TransportPlan};

/// Plan report, in the layout of the planner's output file.
#[derive(Template)]
#[template(
    source = "{% if plans.is_empty() %}No optimal plans found.
{% else %}Optimal Transport Plans:
{% for plan in plans %}Destination: {{ plan.destination }}
  Total Profit: ${{ plan.total_profit }}
  Estimated Delivery Days: {{ plan.estimated_days }}
  Total Weight: {{ plan.total_weight }} kg
  Items to Transport:
{% for item in plan.items %}    {{ item.name }}: {{ item.quantity }} units
{% endfor %}
{% endfor %}{% endif %}",
    ext = "txt"
)]
pub struct PlanReportTemplate {
    pub plans: Vec<PlanView>,
}

/// Plan view model with numbers pre-formatted for display.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub destination: String,
    pub total_profit: String,
    pub estimated_days: u32,
    pub total_weight: String,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone)]
pub struct ItemView {
    pub name: String,
    pub quantity: u32,
}

impl From<&TransportPlan> for PlanView {
    fn from(plan: &TransportPlan) -> Self {
        Self {
            destination: plan.destination.clone(),
            total_profit: format!("{:.2}", plan.total_profit),
            estimated_days: plan.estimated_days,
            total_weight: format!("{:.2}", plan.total_weight),
            items: plan
                .items
                .iter()
                .map(|(name, &quantity)| ItemView {
                    name: name.clone(),
                    quantity,
                })
                .collect(),
        }
    }
}

/// Render an optimization result as a text report.
pub fn render_plans(result: &OptimizationResult) -> Result<String, askama::Error> {
    PlanReportTemplate {
        plans: result.plans.iter().map(PlanView::from).collect(),
    }
    .render()
}

/// One line per route: `A -> B (500 km)`.
pub fn render_routes(routes: &[Route]) -> String {
    let mut out = String::from("Current routes in the graph:\n");
    for route in routes {
        out.push_str(&format!("{} -> {} ({} km)\n", route.from, route.to, route.distance));
    }
    out
}

/// `Route: A -> B -> C` followed by the total distance.
pub fn render_path(path: &ShortestPath) -> String {
    format!(
        "Route: {}\nTotal distance: {} km\n",
        path.locations.join(" -> "),
        path.distance
    )
}
