//! SVG chart components over the geometry in `contracts::shared::charts`

pub mod doughnut;
pub mod line_chart;
pub mod stacked_bar;

pub use doughnut::DoughnutChart;
pub use line_chart::LineChart;
pub use stacked_bar::StackedBarChart;

use crate::shared::components::stat_card::format_thousands;

/// SVG coordinate attribute
pub fn num(value: f64) -> String {
    format!("{:.2}", value)
}

/// Legend/axis text for a chart value
pub fn format_value(value: f64, money: bool) -> String {
    if money {
        format!("US$ {}", format_thousands(value.round() as i64))
    } else if value.fract().abs() < 1e-9 {
        format_thousands(value as i64)
    } else {
        format!("{:.1}", value).replace('.', ",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1234.0, false), "1.234");
        assert_eq!(format_value(2.5, false), "2,5");
        assert_eq!(format_value(15300.4, true), "US$ 15.300");
    }
}
