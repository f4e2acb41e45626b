//! Table and card views for the dashboard.

use maud::{Markup, html};

use crate::{
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    pagination::PaginationIndicator,
    sale::{SaleRecord, SaleStatistics},
};

const CARD_STYLE: &str = "rounded-lg shadow bg-white dark:bg-gray-800 px-6 py-4";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";
const CARD_VALUE_STYLE: &str = "text-2xl font-bold";

/// Renders the sale totals for the month as a row of cards.
pub(super) fn statistics_cards(month_name: &str, statistics: &SaleStatistics) -> Markup {
    html! {
        section id="statistics" class="w-full mb-4"
        {
            h3 class="text-xl font-semibold mb-4" { "Statistics - " (month_name) }

            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                div class=(CARD_STYLE) data-statistic="total-sale-amount"
                {
                    p class=(CARD_LABEL_STYLE) { "Total sale" }
                    p class=(CARD_VALUE_STYLE) { (format_currency(statistics.total_sale_amount)) }
                }

                div class=(CARD_STYLE) data-statistic="sold-items"
                {
                    p class=(CARD_LABEL_STYLE) { "Total sold items" }
                    p class=(CARD_VALUE_STYLE) { (statistics.sold_items) }
                }

                div class=(CARD_STYLE) data-statistic="unsold-items"
                {
                    p class=(CARD_LABEL_STYLE) { "Total not sold items" }
                    p class=(CARD_VALUE_STYLE) { (statistics.unsold_items) }
                }
            }
        }
    }
}

/// Renders a page of sale records as a table.
pub(super) fn transactions_table(records: &[SaleRecord]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    }
                }

                tbody
                {
                    @for record in records {
                        tr class=(TABLE_ROW_STYLE) data-sale-id=(record.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (record.id) }
                            td class=(TABLE_CELL_STYLE) { (record.title) }
                            td class=(TABLE_CELL_STYLE) { (record.description) }
                            td class={ (TABLE_CELL_STYLE) " text-right whitespace-nowrap" }
                            {
                                (format_currency(record.price))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (record.category) }
                            }
                            td class=(TABLE_CELL_STYLE) { @if record.sold { "Yes" } @else { "No" } }
                            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
                            {
                                time datetime=(record.date_of_sale.date()) { (record.date_of_sale.date()) }
                            }
                        }
                    }

                    @if records.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="7" class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the pagination indicators as links built by `page_url`.
pub(super) fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
) -> Markup {
    html! {
        nav class="pagination flex justify-center my-4"
        {
            ul class="pagination flex items-center gap-x-2"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::CurrPage(page) => {
                                p aria-current="page" class="block px-3 py-2 font-bold" { (page) }
                            }
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page)) class={ "block px-3 py-2 " (LINK_STYLE) }
                                {
                                    (page)
                                }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="block px-3 py-2" { "..." }
                            }
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_url(*page)) role="button" class={ "block px-3 py-2 " (LINK_STYLE) }
                                {
                                    "Back"
                                }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_url(*page)) role="button" class={ "block px-3 py-2 " (LINK_STYLE) }
                                {
                                    "Next"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
