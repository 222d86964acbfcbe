use anyhow::Result;
use colored::Colorize;
use plan_advisor::{
    catalog::{load_catalog, Plan},
    config,
    extract::{extract_details, PlanDetails},
    recommend::recommend_detailed,
};
use std::path::Path;
use tracing::info;

/// Execute the recommend command
///
/// Runs the same recommendation the chat endpoint would, straight against
/// the configured catalog file.
pub fn execute(
    config_path: &Path,
    price: Option<f64>,
    data: Option<f64>,
    carrier: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let catalog = load_catalog(&cfg.catalog.path)?;
    info!("Loaded {} plans for offline recommendation", catalog.len());

    let details = match message {
        Some(message) => extract_details(&message, &catalog),
        None => PlanDetails {
            price,
            data_gb: data,
            carrier,
            hints: Vec::new(),
        },
    };

    if details.is_empty() {
        println!(
            "{}",
            "No plan details given. Pass --price/--data/--carrier or --message.".yellow()
        );
        return Ok(());
    }

    print_details(&details);

    let recommendation = recommend_detailed(&catalog, &details.to_query());
    println!(
        "{} {}",
        "Recommendations".green().bold(),
        format!("({})", recommendation.strategy.as_str()).dimmed()
    );

    if recommendation.plans.is_empty() {
        println!("  {}", "No qualifying plans".yellow());
    }
    for (idx, plan) in recommendation.plans.iter().enumerate() {
        println!("  {}. {}", idx + 1, describe(plan));
    }

    Ok(())
}

fn print_details(details: &PlanDetails) {
    println!("{}", "Current plan:".bold());
    if let Some(price) = details.price {
        println!("  {}: ${:.2}", "Price".cyan(), price);
    }
    if let Some(data) = details.data_gb {
        println!("  {}: {} GB", "Data".cyan(), data);
    }
    if let Some(carrier) = &details.carrier {
        println!("  {}: {}", "Carrier".cyan(), carrier);
    }
    println!();
}

fn describe(plan: &Plan) -> String {
    let data = if plan.data.ends_with("MB") {
        plan.data.clone()
    } else {
        format!("{} GB", plan.data)
    };
    format!(
        "{} {} - ${:.2}/mo, {} ({})",
        plan.carrier, plan.plan_name, plan.price, data, plan.network_speed
    )
}
