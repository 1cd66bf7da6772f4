use crate::core::date::normalize_order_date;
use crate::core::ConfigProvider;
use crate::domain::model::{Item, OrderRecord, UNKNOWN_DATE};
use crate::utils::error::{DateError, OrderError, Result, RowError};
use crate::utils::validation;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Pulls the order date and the active item rows out of a saved order page.
pub struct OrderExtractor {
    base_url: Url,
    currency_code: String,
    date_heading: String,
    date_value: String,
    div: Selector,
    item_table: Selector,
    tbody: Selector,
    active_row: Selector,
    cell: Selector,
    link: Selector,
    name: Selector,
    price_new: Selector,
    price_old: Selector,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| OrderError::SelectorError {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Text of the element with every fragment trimmed and glued back together.
fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Removes the currency code and thousands separators, e.g. `JPY 1,000` -> `1000`.
pub fn clean_price(text: &str, currency_code: &str) -> String {
    let without_code = if currency_code.is_empty() {
        text.to_string()
    } else {
        text.replace(currency_code, "")
    };
    without_code.replace(',', "").trim().to_string()
}

impl OrderExtractor {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let selectors = config.selectors();
        let base_url = validation::validate_base_url("source.base_url", config.base_url())?;

        Ok(Self {
            base_url,
            currency_code: config.currency_code().to_string(),
            date_heading: selectors.date_heading.clone(),
            date_value: selectors.date_value.clone(),
            div: compile("div")?,
            item_table: compile(&format!("table.{}", selectors.item_table))?,
            tbody: compile("tbody")?,
            active_row: compile(&format!("tr.{}", selectors.active_row))?,
            cell: compile("td")?,
            link: compile("a[href]")?,
            name: compile(&selectors.name_tag)?,
            price_new: compile(&format!("div.{}", selectors.price_new))?,
            price_old: compile(&format!("div.{}", selectors.price_old))?,
        })
    }

    pub fn parse_document(&self, html: &str) -> OrderRecord {
        let document = Html::parse_document(html);

        let order_date = match self.parse_order_date(&document) {
            Ok(date) => date,
            Err(DateError::SectionMissing) => {
                tracing::warn!("Order date section not found, using '{}'", UNKNOWN_DATE);
                UNKNOWN_DATE.to_string()
            }
            Err(e @ DateError::Unrecognized(_)) => {
                tracing::warn!("{}, using '{}'", e, UNKNOWN_DATE);
                UNKNOWN_DATE.to_string()
            }
        };

        let items = self.parse_items(&document);
        OrderRecord { order_date, items }
    }

    /// The date sits in the first `date_value` div that follows the `date_heading` div.
    pub fn parse_order_date(&self, document: &Html) -> std::result::Result<String, DateError> {
        let mut divs = document.select(&self.div);
        divs.by_ref()
            .find(|div| has_class(div, &self.date_heading))
            .ok_or(DateError::SectionMissing)?;
        let section = divs
            .find(|div| has_class(div, &self.date_value))
            .ok_or(DateError::SectionMissing)?;

        let raw: String = section.text().collect();
        tracing::debug!("Raw order date text: {:?}", raw.trim());
        normalize_order_date(&raw)
    }

    pub fn parse_items(&self, document: &Html) -> Vec<Item> {
        let Some(table) = document.select(&self.item_table).next() else {
            tracing::warn!("Order item table not found");
            return Vec::new();
        };
        let Some(body) = table.select(&self.tbody).next() else {
            tracing::warn!("Order item table has no body");
            return Vec::new();
        };

        let mut items = Vec::new();
        for (index, row) in body.select(&self.active_row).enumerate() {
            match self.parse_item_row(row) {
                Ok(item) => {
                    tracing::debug!(
                        "Row {}: {} ({} / {})",
                        index + 1,
                        item.name,
                        item.disc,
                        item.orig
                    );
                    items.push(item);
                }
                Err(e) if e.is_expected() => {
                    tracing::debug!("Skipping row {}: {}", index + 1, e);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping row {}: {}", index + 1, e);
                }
            }
        }
        items
    }

    pub fn parse_item_row(&self, row: ElementRef) -> std::result::Result<Item, RowError> {
        let cells: Vec<ElementRef> = row.select(&self.cell).collect();
        if cells.len() < 2 {
            return Err(RowError::TooFewCells {
                found: cells.len(),
                expected: 2,
            });
        }

        let details = &cells[1];
        let name_tag = details
            .select(&self.name)
            .next()
            .ok_or(RowError::MissingName)?;
        let href = details
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(RowError::MissingLink)?;

        let name = stripped_text(&name_tag);
        let link = self
            .base_url
            .join(href)
            .map_err(|e| RowError::InvalidLink {
                href: href.to_string(),
                reason: e.to_string(),
            })?
            .to_string();

        let prices = cells.get(2).ok_or(RowError::TooFewCells {
            found: cells.len(),
            expected: 3,
        })?;
        let disc_text = self
            .price_text(prices, &self.price_new)
            .ok_or(RowError::MissingPrice)?;
        let orig_text = self
            .price_text(prices, &self.price_old)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| disc_text.clone());

        Ok(Item {
            name,
            link,
            disc: parse_price(&disc_text)?,
            orig: parse_price(&orig_text)?,
        })
    }

    fn price_text(&self, cell: &ElementRef, selector: &Selector) -> Option<String> {
        let element = cell.select(selector).next()?;
        let text: String = element.text().collect();
        Some(clean_price(&text, &self.currency_code))
    }
}

fn parse_price(text: &str) -> std::result::Result<u64, RowError> {
    text.parse().map_err(|_| RowError::InvalidPrice {
        raw: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::OrderConfig;

    fn extractor() -> OrderExtractor {
        OrderExtractor::new(&OrderConfig::default()).unwrap()
    }

    fn page(date_section: &str, rows: &str) -> String {
        format!(
            r#"<html><body>
<div class="title_f25">Order details</div>
<div class="d-flex align-items-center">{date_section}</div>
<table class="table table-list"><tbody>{rows}</tbody></table>
</body></html>"#
        )
    }

    fn row(class: &str, name: &str, href: &str, prices: &str) -> String {
        format!(
            r#"<tr class="{class}"><td><img src="x.jpg"></td>
<td><a href="{href}"><h5> {name} </h5></a></td>
<td>{prices}</td></tr>"#
        )
    }

    #[test]
    fn test_clean_price() {
        assert_eq!(clean_price("JPY 1,000", "JPY"), "1000");
        assert_eq!(clean_price("\n  12,345 JPY \n", "JPY"), "12345");
        assert_eq!(clean_price(" 1,000", ""), "1000");
    }

    #[test]
    fn test_single_row_without_original_price() {
        let html = page(
            "19 Jan 2026 - 10:00",
            &row("table-active", "Widget", "/item/1", r#"<div class="price-new">JPY 1,000</div>"#),
        );

        let order = extractor().parse_document(&html);

        assert_eq!(order.order_date, "19 Jan, 2026");
        assert_eq!(
            order.items,
            vec![Item {
                name: "Widget".to_string(),
                link: "https://www.suruga-ya.com/item/1".to_string(),
                disc: 1000,
                orig: 1000,
            }]
        );
    }

    #[test]
    fn test_only_active_rows_in_document_order() {
        let rows = [
            row(
                "table-active",
                "First",
                "/item/1",
                r#"<div class="price-new">JPY 800</div><div class="price-old">JPY 1,200</div>"#,
            ),
            row("cancelled", "Gone", "/item/2", r#"<div class="price-new">JPY 500</div>"#),
            row("table-active", "Second", "/item/3", r#"<div class="price-new">JPY 2,500</div>"#),
        ]
        .concat();

        let order = extractor().parse_document(&page("2026/02/05", &rows));

        let names: Vec<&str> = order.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!((order.items[0].disc, order.items[0].orig), (800, 1200));
        assert_eq!(order.order_date, "05 Feb, 2026");
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let rows = [
            r#"<tr class="table-active"><td>only one cell</td></tr>"#.to_string(),
            row("table-active", "No price", "/item/1", "sold out"),
            row("table-active", "Bad price", "/item/2", r#"<div class="price-new">JPY ask</div>"#),
            row(
                "table-active",
                "Bad original",
                "/item/3",
                r#"<div class="price-new">JPY 100</div><div class="price-old">n/a</div>"#,
            ),
            r#"<tr class="table-active"><td></td><td><h5>No link</h5></td><td><div class="price-new">1</div></td></tr>"#.to_string(),
            row("table-active", "Kept", "/item/9", r#"<div class="price-new">JPY 300</div>"#),
        ]
        .concat();

        let order = extractor().parse_document(&page("19 Jan 2026", &rows));

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name, "Kept");
    }

    #[test]
    fn test_row_errors_are_specific() {
        let ex = extractor();
        let html = page(
            "19 Jan 2026",
            &[
                row("table-active", "A", "/item/1", "no price here"),
                row("table-active", "B", "/item/2", r#"<div class="price-new">-5</div>"#),
            ]
            .concat(),
        );
        let document = Html::parse_document(&html);
        let selector = Selector::parse("tr.table-active").unwrap();
        let errors: Vec<RowError> = document
            .select(&selector)
            .map(|r| ex.parse_item_row(r).unwrap_err())
            .collect();

        assert_eq!(errors[0], RowError::MissingPrice);
        assert_eq!(
            errors[1],
            RowError::InvalidPrice {
                raw: "-5".to_string()
            }
        );
    }

    #[test]
    fn test_blank_original_price_falls_back() {
        let html = page(
            "19 Jan 2026",
            &row(
                "table-active",
                "Blank",
                "/item/1",
                r#"<div class="price-new">JPY 450</div><div class="price-old"> JPY </div>"#,
            ),
        );

        let order = extractor().parse_document(&html);
        assert_eq!(order.items[0].orig, 450);
    }

    #[test]
    fn test_unknown_and_missing_dates() {
        let html = page(
            "Sometime soon - 10:00",
            &row("table-active", "Widget", "/item/1", r#"<div class="price-new">1</div>"#),
        );
        let order = extractor().parse_document(&html);
        assert_eq!(order.order_date, UNKNOWN_DATE);
        assert_eq!(order.items.len(), 1);

        let no_section = r#"<div class="align-items-center">19 Jan 2026</div>"#;
        let document = Html::parse_document(no_section);
        assert_eq!(
            extractor().parse_order_date(&document),
            Err(DateError::SectionMissing)
        );
    }

    #[test]
    fn test_date_value_nested_inside_heading() {
        let html = r#"<div class="title_f25">Ordered
<div class="align-items-center"> 2026-03-01 - 09:15 </div></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(extractor().parse_order_date(&document).unwrap(), "01 Mar, 2026");
    }

    #[test]
    fn test_missing_table_gives_no_items() {
        let order = extractor().parse_document("<html><body><p>Nothing</p></body></html>");
        assert!(order.items.is_empty());
        assert_eq!(order.order_date, UNKNOWN_DATE);
    }

    #[test]
    fn test_absolute_links_are_kept() {
        let html = page(
            "19 Jan 2026",
            &row(
                "table-active",
                "Elsewhere",
                "https://www.suruga-ya.com/en/product/123?ref=x",
                r#"<div class="price-new">JPY 10</div>"#,
            ),
        );
        let order = extractor().parse_document(&html);
        assert_eq!(order.items[0].link, "https://www.suruga-ya.com/en/product/123?ref=x");
    }

    #[test]
    fn test_bad_selector_config_is_rejected() {
        let mut config = OrderConfig::default();
        config.selectors.active_row = "!active".to_string();
        assert!(matches!(
            OrderExtractor::new(&config),
            Err(OrderError::SelectorError { .. })
        ));
    }

    #[test]
    fn test_base_url_with_path_is_rejected() {
        let mut config = OrderConfig::default();
        config.source.base_url = "https://www.suruga-ya.com/en".to_string();
        assert!(matches!(
            OrderExtractor::new(&config),
            Err(OrderError::InvalidConfigValueError { ref field, .. }) if field == "source.base_url"
        ));

        config.source.base_url = "https://www.suruga-ya.com/".to_string();
        let html = page(
            "19 Jan 2026",
            &row(
                "table-active",
                "Widget",
                "/product/detail/1",
                r#"<div class="price-new">JPY 10</div>"#,
            ),
        );
        let order = OrderExtractor::new(&config).unwrap().parse_document(&html);
        assert_eq!(order.items[0].link, "https://www.suruga-ya.com/product/detail/1");
    }
}
