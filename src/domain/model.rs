use serde::{Deserialize, Serialize};

pub const UNKNOWN_DATE: &str = "Unknown Date";

/// One purchased line item, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub link: String,
    pub disc: u64,
    pub orig: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: String,
    pub items: Vec<Item>,
}

/// The three numbers typed in by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderInputs {
    pub first_line: u32,
    pub gbp_paid: f64,
    pub yen_paid: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStyle {
    Plain,
    Blue,
    BlueUnderline,
    Strikethrough,
    Yellow,
    PastelOrange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Link { url: String, text: String },
    Formula(String),
}

/// A single cell write. Rows and columns are 1-based, as a spreadsheet user counts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellWrite {
    pub row: u32,
    pub column: u16,
    pub value: CellValue,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPlan {
    pub file_name: String,
    pub first_row: u32,
    pub last_row: u32,
    pub footer_row: u32,
    pub item_count: usize,
    pub cells: Vec<CellWrite>,
}

impl SheetPlan {
    pub fn cell(&self, row: u32, column: u16) -> Option<&CellWrite> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
    }

    pub fn rows(&self) -> Vec<u32> {
        let mut rows: Vec<u32> = self.cells.iter().map(|c| c.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}
