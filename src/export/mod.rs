use std::io::Write;

use rust_decimal::Decimal;

use crate::indicators::IndicatorSeries;
use crate::types::PriceSeries;

/// Write the raw series plus derived columns as CSV, one row per bar.
/// Positions where a rolling window has no value render as empty fields.
pub fn write_csv<W: Write>(
    series: &PriceSeries,
    indicators: &IndicatorSeries,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "timestamp,open,high,low,close,sma,rsi,volatility")?;

    for (i, bar) in series.bars().iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            bar.date,
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            field(indicators.sma.get(i)),
            field(indicators.momentum.get(i)),
            field(indicators.volatility.get(i)),
        )?;
    }
    Ok(())
}

fn field(value: Option<&Option<Decimal>>) -> String {
    value
        .copied()
        .flatten()
        .map(|v| v.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowSettings;
    use crate::indicators::series_from_closes;
    use rust_decimal_macros::dec;

    #[test]
    fn test_csv_has_header_and_empty_fields() {
        let series = series_from_closes(&[dec!(100), dec!(101), dec!(102), dec!(103)]);
        let windows = WindowSettings {
            trend: 3,
            momentum: 2,
            volatility: 2,
        };
        let indicators = IndicatorSeries::compute(&series, &windows);

        let mut buf = Vec::new();
        write_csv(&series, &indicators, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "timestamp,open,high,low,close,sma,rsi,volatility");
        assert_eq!(lines.len(), 5);

        // first bar: no window has resolved yet, derived fields are empty
        assert!(lines[1].starts_with("2024-01-01,100,100,100,100"));
        assert!(lines[1].ends_with(",,,"));

        // sma window of 3 resolves on the third bar
        let third: Vec<&str> = lines[3].split(',').collect();
        assert_eq!(third[5], "101");
    }

    #[test]
    fn test_row_count_matches_series() {
        let closes: Vec<Decimal> = (0..20).map(|i| Decimal::from(100 + i)).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorSeries::compute(&series, &WindowSettings::default());

        let mut buf = Vec::new();
        write_csv(&series, &indicators, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 21);
    }
}
