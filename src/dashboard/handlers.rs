//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The query type that selects the month, page and search shown

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    app_state::lock_connection,
    combined::{MonthReport, build_month_report},
    dashboard::{
        charts::{
            DashboardChart, ECHARTS_SCRIPT_URL, category_chart, charts_script, charts_view,
            price_range_chart,
        },
        tables::{pagination_view, statistics_cards, transactions_table},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base,
    },
    month::{DEFAULT_MONTH, all_months, month_name, parse_month},
    pagination::{create_pagination_indicators, page_count},
    sale::{SaleQueryState, SearchTerm},
};

/// The query parameters for the dashboard page.
///
/// Every section of the page is rendered for the same month.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// The full English name of the month, defaults to March.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// The one-based page of the transaction table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Text to look for in titles and descriptions, or an exact price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl DashboardQuery {
    fn new(month: Month, page: Option<u64>, search: &SearchTerm) -> Self {
        Self {
            month: Some(month_name(month).to_owned()),
            page,
            search: (!search.is_empty()).then(|| search.text().to_owned()),
        }
    }

    /// The dashboard URL that shows this query.
    fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if query.is_empty() => endpoints::DASHBOARD_VIEW.to_owned(),
            Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
            Err(error) => {
                tracing::error!("Could not encode dashboard query {self:?}: {error}");
                endpoints::DASHBOARD_VIEW.to_owned()
            }
        }
    }
}

/// Display a page with every section of a month's report.
pub async fn get_dashboard_page(
    State(state): State<SaleQueryState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let result = resolve_dashboard_month(query.month.as_deref()).and_then(|month| {
        let page_request = state.pagination_config.page_request(query.page, None)?;
        let search = SearchTerm::new(query.search.as_deref().unwrap_or_default());
        let connection = lock_connection(&state.db_connection)?;

        let report = build_month_report(month, &search, page_request, &connection)
            .inspect_err(|error| tracing::error!("Could not build dashboard report: {error}"))?;

        Ok(dashboard_view(
            month,
            &search,
            &report,
            state.pagination_config.max_pages,
        ))
    });

    match result {
        Ok(page) => page.into_response(),
        Err(error) => error.into_plain_text_response("Error loading dashboard"),
    }
}

/// The month to show, falling back to the default when none is selected.
fn resolve_dashboard_month(month: Option<&str>) -> Result<Month, Error> {
    match month {
        Some(name) if !name.trim().is_empty() => parse_month(name),
        _ => Ok(DEFAULT_MONTH),
    }
}

fn month_controls(month: Month, search: &SearchTerm) -> Markup {
    let previous_url = DashboardQuery::new(month.previous(), None, search).to_url();
    let next_url = DashboardQuery::new(month.next(), None, search).to_url();

    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex flex-wrap items-end gap-4 w-full mb-4"
        {
            div
            {
                label for="month" class="block mb-2 text-sm font-medium" { "Month" }

                select id="month" name="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for candidate in all_months() {
                        option value=(month_name(candidate)) selected[candidate == month]
                        {
                            (month_name(candidate))
                        }
                    }
                }
            }

            div class="flex-1"
            {
                label for="search" class="block mb-2 text-sm font-medium" { "Search" }

                input
                    type="search"
                    id="search"
                    name="search"
                    placeholder="Search transactions"
                    value=(search.text())
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }

        nav class="flex justify-between w-full mb-4" aria-label="Month navigation"
        {
            a href=(previous_url) id="previous-month" class=(LINK_STYLE)
            {
                "Previous: " (month_name(month.previous()))
            }

            a href=(next_url) id="next-month" class=(LINK_STYLE)
            {
                "Next: " (month_name(month.next()))
            }
        }
    }
}

fn dashboard_view(
    month: Month,
    search: &SearchTerm,
    report: &MonthReport,
    max_pages: u64,
) -> Markup {
    let month_label = month_name(month);
    let pagination = report.transactions.pagination;
    let indicators = create_pagination_indicators(
        pagination.page,
        page_count(pagination.total_count, pagination.per_page),
        max_pages,
    );
    let page_url = |page: u64| DashboardQuery::new(month, Some(page), search).to_url();

    let charts = [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(month_label, &report.bar_chart).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(month_label, &report.pie_chart).to_string(),
        },
    ];

    let content = html!(
        main
            id="dashboard-content"
            class={ (PAGE_CONTAINER_STYLE) " max-w-screen-xl" }
        {
            header class="w-full mb-4"
            {
                h1 class="text-2xl font-bold" { "Transaction Dashboard" }
            }

            (month_controls(month, search))

            (statistics_cards(month_label, &report.statistics))

            section id="transactions" class="w-full mb-4"
            {
                h3 class="text-xl font-semibold mb-4" { "Transactions - " (month_label) }

                (transactions_table(&report.transactions.transactions))

                (pagination_view(&indicators, page_url))
            }

            (charts_view(&charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}
