use core_types::{OpponentSummary, Stat};
use rust_decimal::Decimal;

/// Column headers matching [`format_summary`]:
/// `Opponent`, `# Games`, then `Total X` / `Average X` per stat.
pub fn summary_headers(stats: &[Stat]) -> Vec<String> {
    let mut headers = vec!["Opponent".to_string(), "# Games".to_string()];
    for stat in stats {
        headers.push(format!("Total {stat}"));
        headers.push(format!("Average {stat}"));
    }
    headers
}

/// Renders one summary row as display strings with exactly two decimals.
/// Missing aggregates render as an empty cell.
pub fn format_summary(summary: &OpponentSummary, stats: &[Stat]) -> Vec<String> {
    let mut cells = vec![summary.opponent.clone(), summary.games.to_string()];
    for &stat in stats {
        let aggregate = summary.aggregate(stat).copied().unwrap_or_default();
        cells.push(format_value(aggregate.total));
        cells.push(format_value(aggregate.average));
    }
    cells
}

pub fn format_value(value: Option<Decimal>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}
