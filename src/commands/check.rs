use anyhow::Result;
use colored::Colorize;
use plan_advisor::{
    catalog::{load_catalog, Catalog, PlanType},
    config,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Execute the check command
///
/// Parses the plan CSV the way the server would and prints what it found
pub fn execute(config_path: &Path, file: Option<PathBuf>) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => config::load_config(config_path)?.catalog.path,
    };

    println!(
        "{} {}",
        "Checking plan catalog".yellow(),
        path.display().to_string().cyan()
    );
    info!("Loading catalog from {} for check", path.display());

    let catalog = load_catalog(&path)?;

    println!("{}", "✓ Catalog parsed successfully".green());
    println!();
    print_summary(&catalog);

    Ok(())
}

fn print_summary(catalog: &Catalog) {
    let summary = catalog.summary();

    println!("{}", "Catalog Summary:".bold());
    println!("  {}: {}", "Rows read".cyan(), summary.rows_read);
    if summary.skipped > 0 {
        println!("  {}: {}", "Rows skipped".cyan(), summary.skipped.to_string().red());
    } else {
        println!("  {}: 0", "Rows skipped".cyan());
    }
    println!("  {}: {}", "Plans".cyan(), catalog.len());
    println!(
        "    postpaid: {}",
        catalog.by_type(PlanType::Postpaid).count()
    );
    println!(
        "    prepaid: {}",
        catalog.by_type(PlanType::Prepaid).count()
    );
    println!();

    println!("  {}:", "Carriers".cyan());
    for carrier in catalog.carriers() {
        let plans: Vec<_> = catalog.plans().iter().filter(|p| p.carrier == carrier).collect();
        let cheapest = plans
            .iter()
            .map(|p| p.price)
            .fold(f64::INFINITY, f64::min);
        println!(
            "    {} ({} plans, from ${:.2})",
            carrier,
            plans.len(),
            cheapest
        );
    }

    if catalog.is_empty() {
        println!();
        println!("{}", "  Warning: catalog holds no plans".yellow());
    }
}
