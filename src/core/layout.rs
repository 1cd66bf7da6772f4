//! Where every value lands on the order sheet.
//!
//! The block for one order looks like this (first row shown, columns by letter):
//!
//! ```text
//! | A    | B         | E        | F    | G    | H        | O        | P    | R   | S   | T      | U      | V    |
//! | date | item link | Σ H      | disc | orig | G × Q    | Σ H      | rate | GBP | JPY | Σ G    | Σ F    | T-U  |
//! ```
//!
//! Rows after the first carry only the per-item columns (A, B, F, G, H), and the row
//! after the last item holds an `updated on` note in column B.

use crate::domain::model::{CellStyle, CellValue, CellWrite, Item, OrderInputs, OrderRecord, SheetPlan};
use crate::utils::error::Result;
use crate::utils::validation;

/// Last row a worksheet can hold.
pub const MAX_ROW: u32 = 1_048_576;

pub const FOOTER_COLUMN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    EveryRow,
    FirstRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    OrderDate,
    ItemName,
    DiscountPrice,
    OriginalPrice,
    ConvertedPrice,
    ConvertedTotal,
    ConvertedTotalCopy,
    ExchangeRate,
    GbpPaid,
    YenPaid,
    OriginalTotal,
    DiscountTotal,
    DiscountAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    OrderDate,
    ItemLink,
    Disc,
    Orig,
    GbpPaid,
    YenPaid,
    /// `{row}` is the current row, `{first}`/`{last}` bound the item block and
    /// `{adjust}` is the configured yen adjustment.
    Formula(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub column: u16,
    pub role: Role,
    pub scope: Scope,
    pub source: Source,
    pub style: CellStyle,
}

const fn spec(column: u16, role: Role, scope: Scope, source: Source, style: CellStyle) -> ColumnSpec {
    ColumnSpec {
        column,
        role,
        scope,
        source,
        style,
    }
}

pub const ORDER_SHEET_COLUMNS: &[ColumnSpec] = &[
    spec(1, Role::OrderDate, Scope::EveryRow, Source::OrderDate, CellStyle::Plain),
    spec(2, Role::ItemName, Scope::EveryRow, Source::ItemLink, CellStyle::BlueUnderline),
    spec(6, Role::DiscountPrice, Scope::EveryRow, Source::Disc, CellStyle::Blue),
    spec(7, Role::OriginalPrice, Scope::EveryRow, Source::Orig, CellStyle::Strikethrough),
    spec(
        8,
        Role::ConvertedPrice,
        Scope::EveryRow,
        Source::Formula("=$G{row}*$Q${first}"),
        CellStyle::Plain,
    ),
    spec(
        5,
        Role::ConvertedTotal,
        Scope::FirstRow,
        Source::Formula("=SUM($H${first}:$H${last})"),
        CellStyle::Plain,
    ),
    spec(
        15,
        Role::ConvertedTotalCopy,
        Scope::FirstRow,
        Source::Formula("=SUM($H${first}:$H${last})"),
        CellStyle::Plain,
    ),
    spec(
        16,
        Role::ExchangeRate,
        Scope::FirstRow,
        Source::Formula("=$R${first}/($S${first}-{adjust}+$V${first})"),
        CellStyle::Plain,
    ),
    spec(18, Role::GbpPaid, Scope::FirstRow, Source::GbpPaid, CellStyle::Yellow),
    spec(19, Role::YenPaid, Scope::FirstRow, Source::YenPaid, CellStyle::Yellow),
    spec(
        20,
        Role::OriginalTotal,
        Scope::FirstRow,
        Source::Formula("=SUM($G${first}:$G${last})"),
        CellStyle::PastelOrange,
    ),
    spec(
        21,
        Role::DiscountTotal,
        Scope::FirstRow,
        Source::Formula("=SUM($F${first}:$F${last})"),
        CellStyle::PastelOrange,
    ),
    spec(
        22,
        Role::DiscountAmount,
        Scope::FirstRow,
        Source::Formula("=$T${first}-$U${first}"),
        CellStyle::PastelOrange,
    ),
];

pub fn column_for(role: Role) -> Option<&'static ColumnSpec> {
    ORDER_SHEET_COLUMNS.iter().find(|spec| spec.role == role)
}

pub fn render_formula(template: &str, row: u32, first: u32, last: u32, adjust: i64) -> String {
    template
        .replace("{row}", &row.to_string())
        .replace("{first}", &first.to_string())
        .replace("{last}", &last.to_string())
        .replace("{adjust}", &adjust.to_string())
}

pub fn output_file_name(prefix: &str, first_line: u32) -> String {
    format!("{}{}.xlsx", prefix, first_line)
}

/// Lays an order out as a block of cell writes starting at `inputs.first_line`.
pub struct SheetLayout<'a> {
    pub columns: &'a [ColumnSpec],
    pub file_prefix: &'a str,
    pub yen_adjustment: i64,
}

impl<'a> SheetLayout<'a> {
    pub fn new(file_prefix: &'a str, yen_adjustment: i64) -> Self {
        Self {
            columns: ORDER_SHEET_COLUMNS,
            file_prefix,
            yen_adjustment,
        }
    }

    pub fn build_sheet_plan(&self, order: &OrderRecord, inputs: &OrderInputs) -> Result<SheetPlan> {
        let count = u32::try_from(order.items.len()).unwrap_or(u32::MAX);
        let first = inputs.first_line;
        validation::validate_range("first_line", first, 1, MAX_ROW)?;
        // 頁尾列 = first + count，必須仍在工作表範圍內
        let footer_row = u64::from(first) + u64::from(count);
        validation::validate_range("footer_row", footer_row, 1, u64::from(MAX_ROW))?;
        let footer_row = footer_row as u32;
        let last = footer_row - 1;

        let mut cells = Vec::with_capacity(order.items.len() * 5 + self.columns.len() + 1);
        for (offset, item) in order.items.iter().enumerate() {
            let row = first + offset as u32;
            for spec in self.columns {
                if spec.scope == Scope::FirstRow && row != first {
                    continue;
                }
                cells.push(CellWrite {
                    row,
                    column: spec.column,
                    value: self.value_for(spec.source, order, item, inputs, row, first, last),
                    style: spec.style,
                });
            }
        }

        cells.push(CellWrite {
            row: footer_row,
            column: FOOTER_COLUMN,
            value: CellValue::Text(format!("updated on {}", order.order_date)),
            style: CellStyle::Plain,
        });

        Ok(SheetPlan {
            file_name: output_file_name(self.file_prefix, first),
            first_row: first,
            last_row: last,
            footer_row,
            item_count: order.items.len(),
            cells,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn value_for(
        &self,
        source: Source,
        order: &OrderRecord,
        item: &Item,
        inputs: &OrderInputs,
        row: u32,
        first: u32,
        last: u32,
    ) -> CellValue {
        match source {
            Source::OrderDate => CellValue::Text(order.order_date.clone()),
            Source::ItemLink => CellValue::Link {
                url: item.link.clone(),
                text: item.name.clone(),
            },
            Source::Disc => CellValue::Number(item.disc as f64),
            Source::Orig => CellValue::Number(item.orig as f64),
            Source::GbpPaid => CellValue::Number(inputs.gbp_paid),
            Source::YenPaid => CellValue::Number(inputs.yen_paid),
            Source::Formula(template) => {
                CellValue::Formula(render_formula(template, row, first, last, self.yen_adjustment))
            }
        }
    }
}
