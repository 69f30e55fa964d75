//! HTML fragment builders for calculator results.
//!
//! Every calculator can emit its result as a self-contained HTML fragment:
//! a KPI list, an explanatory paragraph or two, and a detail table where the
//! calculation produces one. User-supplied text (debt names, categories,
//! notes) is always escaped.

use fin_core::calculations::budget_split::BudgetSplit;
use fin_core::calculations::coverage::CoverageReport;
use fin_core::calculations::debt_plan::DebtPlan;
use fin_core::calculations::loan::LoanSchedule;
use fin_core::calculations::payoff::PayoffOutcome;
use rust_decimal::Decimal;

use super::{format_money, format_month_span};

/// Escapes text for inclusion in an HTML fragment.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn kpi(
    label: &str,
    value: &str,
) -> String {
    format!("<li><strong>{label}:</strong> {value}</li>")
}

fn table(
    headers: &[&str],
    rows: &[Vec<String>],
) -> String {
    let mut html = String::from(
        "<div class=\"result-table-wrap\"><table class=\"result-table\"><thead><tr>",
    );
    for header in headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

/// Renders an amortization schedule result.
pub fn render_loan(
    schedule: &LoanSchedule,
    show_schedule: bool,
) -> String {
    let mut html = String::from("<ul class=\"result-kpis\">");
    html.push_str(&kpi(
        "Estimated monthly payment",
        &format_money(schedule.monthly_payment),
    ));
    html.push_str(&kpi(
        "Total interest (with extra payments)",
        &format_money(schedule.total_interest),
    ));
    html.push_str(&kpi(
        "Total paid (with extra payments)",
        &format_money(schedule.total_paid),
    ));
    html.push_str(&kpi(
        "Estimated payoff time (with extra payments)",
        &format_month_span(schedule.months),
    ));
    html.push_str("</ul>");

    let has_extra = schedule.rows.iter().any(|r| r.extra > Decimal::ZERO);
    if has_extra {
        html.push_str(&format!(
            "<p><strong>Impact of extra payments:</strong> You save about \
             <strong>{}</strong> in interest and finish about <strong>{}</strong> months \
             earlier, compared to making only the scheduled payment.</p>",
            format_money(schedule.interest_saved),
            schedule.months_saved
        ));
    } else {
        html.push_str(
            "<p><strong>Tip:</strong> Add a small extra monthly payment to see how much \
             interest you can save and how much sooner you can finish.</p>",
        );
    }

    if show_schedule {
        html.push_str("<h3>Amortization schedule</h3>");
        let rows: Vec<Vec<String>> = schedule
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.month.to_string(),
                    format_money(r.payment),
                    format_money(r.interest),
                    format_money(r.principal),
                    format_money(r.extra),
                    format_money(r.balance),
                ]
            })
            .collect();
        html.push_str(&table(
            &["Month", "Payment", "Interest", "Principal", "Extra", "Balance"],
            &rows,
        ));
    }

    html
}

/// Renders a revolving payoff result.
pub fn render_payoff(outcome: &PayoffOutcome) -> String {
    let mut html = String::from("<ul class=\"result-kpis\">");
    html.push_str(&kpi(
        "Estimated time to payoff",
        &format_month_span(outcome.months),
    ));
    html.push_str(&kpi(
        "Estimated total interest",
        &format_money(outcome.total_interest),
    ));
    html.push_str(&kpi(
        "Estimated total paid",
        &format_money(outcome.total_paid),
    ));
    if let Some(date) = outcome.payoff_date {
        html.push_str(&kpi("Estimated payoff date", &date.format("%Y-%m-%d").to_string()));
    }
    html.push_str("</ul>");

    if let Some(baseline) = &outcome.baseline {
        html.push_str(&format!(
            "<p><strong>Impact of extra payments:</strong> You save about \
             <strong>{}</strong> in interest and finish about <strong>{}</strong> months \
             earlier than the {}-month baseline.</p>",
            format_money(outcome.interest_saved),
            outcome.months_saved,
            baseline.months
        ));
    }

    html
}

/// Renders a debt repayment plan result.
pub fn render_plan(plan: &DebtPlan) -> String {
    let mut html = format!(
        "<p><strong>Estimated time to become debt-free:</strong> {}</p>\
         <p><strong>Starting total debt:</strong> {}</p>\
         <p><strong>Estimated total interest paid:</strong> {}</p>\
         <p><strong>Estimated total paid (principal + interest):</strong> {}</p>",
        format_month_span(plan.months),
        format_money(plan.starting_balance),
        format_money(plan.total_interest),
        format_money(plan.total_paid),
    );

    html.push_str(&format!(
        "<p class=\"muted small\">Assumes monthly interest, minimum payments on all active \
         debts, and all extra money directed to the {} target. When a debt is paid off, its \
         minimum payment is rolled into the pool.</p>",
        plan.strategy.as_str()
    ));

    if plan.negative_amortization_risk {
        html.push_str(
            "<p class=\"muted small\"><strong>Note:</strong> One or more debts have a minimum \
             payment that may not cover monthly interest. Payoff estimates may be unrealistic \
             unless you increase payments or the lender minimum changes.</p>",
        );
    }

    html.push_str(&format!(
        "<h3 class=\"small\">Payoff order ({})</h3><ul>",
        plan.strategy.as_str()
    ));
    for (idx, event) in plan.payoff_order.iter().enumerate() {
        html.push_str(&format!(
            "<li><strong>{}.</strong> {} — paid off in month {} ({})</li>",
            idx + 1,
            escape_html(&event.name),
            event.month,
            format_month_span(event.month)
        ));
    }
    html.push_str("</ul>");

    html.push_str("<h3 class=\"small\">First 12 months preview</h3>");
    let rows: Vec<Vec<String>> = plan
        .preview
        .iter()
        .map(|m| {
            let paid_off = if m.paid_off.is_empty() {
                "—".to_string()
            } else {
                escape_html(&m.paid_off.join(", "))
            };
            vec![
                m.month.to_string(),
                format_money(m.payment),
                format_money(m.interest),
                format_money(m.remaining),
                paid_off,
            ]
        })
        .collect();
    html.push_str(&table(
        &[
            "Month",
            "Total payment",
            "Interest",
            "Remaining balance",
            "Paid off",
        ],
        &rows,
    ));

    html
}

/// Renders a budget split result.
pub fn render_split(split: &BudgetSplit) -> String {
    format!(
        "<p><strong>Estimated monthly income:</strong> {}</p>\
         <p><strong>Needs ({}%):</strong> {}</p>\
         <p><strong>Wants ({}%):</strong> {}</p>\
         <p><strong>Savings &amp; debt ({}%):</strong> {}</p>",
        format_money(split.monthly_income),
        split.percents.needs,
        format_money(split.needs),
        split.percents.wants,
        format_money(split.wants),
        split.percents.savings,
        format_money(split.savings),
    )
}

/// Renders a coverage diagnostic result.
pub fn render_coverage(report: &CoverageReport) -> String {
    let mut html = format!(
        "<p><strong>Result:</strong> {} ({}x essential coverage)</p><p>{}</p>",
        report.band.as_str(),
        report.ratio,
        report.note
    );

    html.push_str("<p><strong>Do this now:</strong></p><ul>");
    for action in &report.actions {
        html.push_str(&format!("<li>{}</li>", escape_html(action)));
    }
    html.push_str("</ul>");

    html
}

/// Renders the tracker summary snapshot.
pub fn render_tracker_summary(
    fixed_total: Decimal,
    variable_pool: Decimal,
    base_daily: Decimal,
    today_allowance: Decimal,
) -> String {
    format!(
        "<p><strong>Fixed monthly expenses:</strong> {}</p>\
         <p><strong>Available for variable spending:</strong> {}</p>\
         <p><strong>Base daily allowance (31-day rule):</strong> {}</p>\
         <p><strong>Today's rolling allowance:</strong> {}</p>",
        format_money(fixed_total),
        format_money(variable_pool),
        format_money(base_daily),
        format_money(today_allowance),
    )
}
