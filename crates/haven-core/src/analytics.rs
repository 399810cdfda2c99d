//! Seller analytics payload as produced by the analytics data source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Aggregation window for seller analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Week,
    #[default]
    Month,
    Year,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 3] = [TimeFrame::Week, TimeFrame::Month, TimeFrame::Year];

    /// Parse an optional query-string value. Missing or blank means `month`.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Week => "week",
            TimeFrame::Month => "month",
            TimeFrame::Year => "year",
        }
    }
}

impl FromStr for TimeFrame {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(CoreError::InvalidTimeFrame(other.to_string())),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One period of the sales time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub month: String,
    pub sales: f64,
}

impl SalesPoint {
    pub fn new(month: impl Into<String>, sales: f64) -> Self {
        Self {
            month: month.into(),
            sales,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: i64,
    pub name: String,
    pub sales: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_sales: u64,
    pub total_revenue: f64,
    pub total_orders: u64,
    pub average_order_value: f64,
    pub new_customers: u64,
}

impl AnalyticsSummary {
    /// Build a summary with `average_order_value` derived from revenue and orders.
    pub fn new(total_sales: u64, total_revenue: f64, total_orders: u64, new_customers: u64) -> Self {
        Self {
            total_sales,
            total_revenue,
            total_orders,
            average_order_value: average_order_value(total_revenue, total_orders),
            new_customers,
        }
    }

    /// True when the average order value agrees with revenue / orders and no
    /// amount is negative.
    pub fn is_consistent(&self) -> bool {
        if self.total_revenue < 0.0 || self.average_order_value < 0.0 {
            return false;
        }
        let expected = average_order_value(self.total_revenue, self.total_orders);
        let tolerance = 1e-9 * expected.abs().max(1.0);
        (self.average_order_value - expected).abs() <= tolerance
    }
}

/// `revenue / orders`, or 0 when there are no orders.
pub fn average_order_value(total_revenue: f64, total_orders: u64) -> f64 {
    if total_orders == 0 {
        0.0
    } else {
        total_revenue / total_orders as f64
    }
}

/// Root aggregate returned by `GET /api/seller/analytics`.
///
/// `Default` is the zero-value payload: every sequence empty and every summary
/// figure 0. Consumers substitute it whenever a fetch fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub sales_over_time: Vec<SalesPoint>,
    pub sales_by_category: Vec<CategorySales>,
    pub top_products: Vec<TopProduct>,
    pub summary: AnalyticsSummary,
}

impl AnalyticsData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_defaults_to_month() {
        assert_eq!(TimeFrame::parse(None).unwrap(), TimeFrame::Month);
        assert_eq!(TimeFrame::parse(Some("")).unwrap(), TimeFrame::Month);
        assert_eq!(TimeFrame::parse(Some("  ")).unwrap(), TimeFrame::Month);
    }

    #[test]
    fn timeframe_accepts_only_known_windows() {
        assert_eq!(TimeFrame::parse(Some("week")).unwrap(), TimeFrame::Week);
        assert_eq!(TimeFrame::parse(Some("year")).unwrap(), TimeFrame::Year);
        assert!(matches!(
            TimeFrame::parse(Some("decade")),
            Err(CoreError::InvalidTimeFrame(v)) if v == "decade"
        ));
        assert!(TimeFrame::parse(Some("Month")).is_err());
    }

    #[test]
    fn timeframe_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TimeFrame::Week).unwrap(), "\"week\"");
        assert_eq!(TimeFrame::Year.to_string(), "year");
    }

    #[test]
    fn average_order_value_is_zero_without_orders() {
        let summary = AnalyticsSummary::new(0, 0.0, 0, 0);
        assert_eq!(summary.average_order_value, 0.0);
        assert!(summary.is_consistent());
    }

    #[test]
    fn average_order_value_divides_revenue_by_orders() {
        let summary = AnalyticsSummary::new(12, 250.0, 4, 3);
        assert_eq!(summary.average_order_value, 62.5);
        assert!(summary.is_consistent());

        let skewed = AnalyticsSummary {
            average_order_value: 70.0,
            ..summary
        };
        assert!(!skewed.is_consistent());
    }

    #[test]
    fn zero_value_has_nothing_in_it() {
        let empty = AnalyticsData::default();
        assert!(empty.sales_over_time.is_empty());
        assert!(empty.sales_by_category.is_empty());
        assert!(empty.top_products.is_empty());
        assert_eq!(empty.summary, AnalyticsSummary::default());
        assert!(empty.is_empty());
    }

    #[test]
    fn parses_wire_shape_and_keeps_order() {
        let body = r#"{
            "salesOverTime": [{"month": "Mar", "sales": 4}, {"month": "Jan", "sales": 9.5}],
            "salesByCategory": [{"category": "pottery", "sales": 3, "revenue": 120.0}],
            "topProducts": [{"id": 7, "name": "Vase", "sales": 2, "revenue": 80.0}],
            "summary": {
                "totalSales": 13,
                "totalRevenue": 300.0,
                "totalOrders": 6,
                "averageOrderValue": 50.0,
                "newCustomers": 2
            }
        }"#;
        let data: AnalyticsData = serde_json::from_str(body).unwrap();
        let months: Vec<&str> = data.sales_over_time.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, ["Mar", "Jan"]);
        assert_eq!(data.top_products[0].name, "Vase");
        assert_eq!(data.summary.total_orders, 6);
        assert!(data.summary.is_consistent());
        assert!(!data.is_empty());
    }

    #[test]
    fn negative_counts_are_rejected_by_the_wire_types() {
        let body = r#"{"totalSales": -1, "totalRevenue": 0, "totalOrders": 0,
                       "averageOrderValue": 0, "newCustomers": 0}"#;
        assert!(serde_json::from_str::<AnalyticsSummary>(body).is_err());
    }
}
