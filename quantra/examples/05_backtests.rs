use std::sync::Arc;

use quantra::{BacktestQuery, Quantra};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Backtest demos run against the mock provider; it serves both the data
    // and the backtest roles.
    let mock = Arc::new(quantra_mock::MockProvider::new());
    let quantra = Quantra::builder()
        .with_data_provider(mock.clone())
        .with_backtest_provider(mock)
        .build()?;
    let backtests = quantra.backtests()?;

    // 1. List what the provider knows about.
    let all = backtests.list(&BacktestQuery::default()).await?;
    for backtest in &all {
        println!(
            "{}  {}",
            backtest.id.as_deref().unwrap_or("<no id>"),
            backtest.name.as_deref().unwrap_or("<unnamed>")
        );
    }

    // 2. Pull one backtest's stored results next to its comparison series.
    let (own, comparison) = backtests.comparison_results("bt-momentum-us").await?;
    println!("{} result rows, {} comparison rows", own.len(), comparison.len());
    for result in &own {
        let date = result.extra.get("date").cloned().unwrap_or_default();
        let pnl = result.extra.get("pnl").cloned().unwrap_or_default();
        println!("  {date}  pnl {pnl}");
    }

    // 3. Run a transient backtest without persisting it.
    let run = backtests.run(&all[0]).await?;
    println!(
        "transient run: {} performance rows, {} risk rows",
        run.performance.len(),
        run.risks.len()
    );

    Ok(())
}
