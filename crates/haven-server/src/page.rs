//! Server-rendered HTML for the seller dashboard.

use std::fmt::Write;

use haven_chart::RenderedChart;
use haven_core::analytics::{AnalyticsData, TimeFrame};

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn currency(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn analytics_page(timeframe: TimeFrame, data: &AnalyticsData, chart: &RenderedChart) -> String {
    let mut html = String::new();
    html.push_str(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Seller analytics | Handcrafted Haven</title></head><body>\
         <h1>Seller analytics</h1>",
    );

    html.push_str("<nav class=\"timeframes\">");
    for option in TimeFrame::ALL {
        if option == timeframe {
            let _ = write!(html, "<strong>{option}</strong> ");
        } else {
            let _ = write!(
                html,
                "<a href=\"/dashboard/analytics?timeframe={option}\">{option}</a> "
            );
        }
    }
    html.push_str("</nav>");

    if data.is_empty() {
        html.push_str("<p class=\"empty\">No sales data for this period.</p>");
    }

    let s = &data.summary;
    let _ = write!(
        html,
        "<dl class=\"summary\">\
         <dt>Total sales</dt><dd>{}</dd>\
         <dt>Total revenue</dt><dd>{}</dd>\
         <dt>Total orders</dt><dd>{}</dd>\
         <dt>Average order value</dt><dd>{}</dd>\
         <dt>New customers</dt><dd>{}</dd></dl>",
        s.total_sales,
        currency(s.total_revenue),
        s.total_orders,
        currency(s.average_order_value),
        s.new_customers
    );

    push_chart(&mut html, chart);

    if !data.sales_by_category.is_empty() {
        html.push_str(
            "<h2>Sales by category</h2><table class=\"categories\">\
             <tr><th>Category</th><th>Sales</th><th>Revenue</th></tr>",
        );
        for row in &data.sales_by_category {
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&row.category),
                row.sales,
                currency(row.revenue)
            );
        }
        html.push_str("</table>");
    }

    if !data.top_products.is_empty() {
        html.push_str("<h2>Top products</h2><ol class=\"top-products\">");
        for product in &data.top_products {
            let _ = write!(
                html,
                "<li>{} ({} sold, {})</li>",
                escape(&product.name),
                product.sales,
                currency(product.revenue)
            );
        }
        html.push_str("</ol>");
    }

    html.push_str("</body></html>");
    html
}

/// Inline SVG plus one transparent hover region per column; the region's
/// `title` is the tooltip.
fn push_chart(html: &mut String, chart: &RenderedChart) {
    let _ = write!(
        html,
        "<div class=\"chart\" style=\"position:relative;width:{}px;height:{}px\">{}",
        chart.width, chart.height, chart.svg
    );
    for bar in &chart.bars {
        let _ = write!(
            html,
            "<div class=\"bar-tooltip\" title=\"{}\" \
             style=\"position:absolute;left:{}px;top:{}px;width:{}px;height:{}px\"></div>",
            escape(&bar.tooltip().to_string()),
            bar.column_left,
            bar.column_top,
            bar.column_right - bar.column_left,
            bar.bottom - bar.column_top
        );
    }
    html.push_str("</div>");
}
