use inventory_monte_carlo::io::reporting;
use inventory_monte_carlo::model::frequency::DEFAULT_FREQUENCY;
use inventory_monte_carlo::{
    analyse_inventory_with_trace, FrequencyTable, RandomSource, SimulationConfig,
};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter =
        EnvFilter::try_from_env("INVENTORY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Inventory Monte Carlo ===");

    // 1. SETUP CONFIGURATION
    let config = match SimulationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let output_file = env::args()
        .nth(1)
        .unwrap_or_else(|| "inventory_days.csv".to_string());

    if let Err(e) = run(&config, &output_file) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: &SimulationConfig, output_file: &str) -> Result<(), Box<dyn std::error::Error>> {
    // 2. BUILD TABLES
    // Demand 0..=4 and lead times 1..=3 days, each observed equally often.
    let demand = FrequencyTable::with_default_records(5, DEFAULT_FREQUENCY)?;
    let lead_time = FrequencyTable::from_pairs(&[
        (1, DEFAULT_FREQUENCY),
        (2, DEFAULT_FREQUENCY),
        (3, DEFAULT_FREQUENCY),
    ])?;

    // 3. ANALYSE
    let mut source = RandomSource::new(config.seed, config.seed_policy);
    let (analysis, trace) =
        analyse_inventory_with_trace(config, &demand, Some(&lead_time), &mut source)?;

    println!("\n=== Expected Demand ===");
    println!("Closed form:  {:.4}", analysis.demand_expectation.closed_form);
    println!(
        "Monte Carlo:  {:.4} ({} samples)",
        analysis.demand_expectation.monte_carlo, analysis.demand_expectation.sample_count
    );
    if let Some(lead) = analysis.lead_time_expectation {
        println!("\n=== Expected Lead Time ===");
        println!("Closed form:  {:.4}", lead.closed_form);
        println!("Monte Carlo:  {:.4}", lead.monte_carlo);
    }

    println!("\n=== Simulation ({} days) ===", analysis.simulation.horizon_days);
    println!(
        "Average Ending Inventory: {:.2}",
        analysis.simulation.average_ending_inventory
    );
    println!("Average Lost Sales: {:.2}", analysis.simulation.average_lost_sales);
    println!(
        "Average Number Of Orders: {:.2}",
        analysis.simulation.average_orders_per_day
    );

    // 4. EXPORT DAY LOG
    reporting::write_day_log(output_file, &trace)?;
    println!("\nDay log written to ./{}", output_file);

    Ok(())
}
