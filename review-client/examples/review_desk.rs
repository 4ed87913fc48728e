// review-client/examples/review_desk.rs
// Lists the review queue and prints the breakdown of one order

use review_client::{ClientConfig, ReviewDesk, logger};
use review_core::money::format_brl;
use shared::ReviewList;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = ClientConfig::from_env()?;
    logger::init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    let args: Vec<String> = std::env::args().collect();
    let order_id = match args.get(1).map(|raw| raw.parse::<i64>()) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => {
            println!("Usage: {} [order_id]", args[0]);
            return Ok(());
        }
        None => None,
    };

    let mut desk = ReviewDesk::new(config.build_http_client()?);

    let stats = desk.refresh_stats().await?;
    println!(
        "pending {} | standby {} | approved {} | archived {}",
        stats.pending, stats.standby, stats.approved, stats.archived
    );

    desk.refresh_lists().await?;
    for row in desk.lists().rows(ReviewList::Pending) {
        let total = row.grand_total.map(format_brl).unwrap_or_default();
        println!(
            "#{:<6} {:<12} {:<30} {}",
            row.id,
            row.order_number,
            row.company_name.as_deref().unwrap_or("-"),
            total
        );
    }

    let Some(order_id) = order_id else {
        return Ok(());
    };

    let session = desk.open(order_id).await?;
    let b = session.breakdown();
    println!("Order {} ({})", session.order().order_number, session.status());
    println!("  Tier          {}", b.tier_label);
    println!("  Hours         {} billed of {} worked", b.billable_hours, b.actual_hours);
    println!("  Labour        {}", format_brl(b.hours_cost));
    println!("  Displacement  {} ({} km)", format_brl(b.total_displacement), b.total_km);
    println!("  Materials     {}", format_brl(b.total_materials));
    println!("  Services      {}", format_brl(b.total_additional_services));
    println!("  Total         {}", format_brl(b.grand_total));

    for violation in session.validate() {
        println!("  ! {violation}");
    }

    Ok(())
}
