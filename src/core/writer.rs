use crate::domain::model::{CellStyle, CellValue, SheetPlan};
use crate::utils::error::Result;
use rust_xlsxwriter::{Format, FormatUnderline, Url, Workbook, Worksheet};

const BLUE: u32 = 0x0000FF;
const YELLOW: u32 = 0xFFFF00;
const PASTEL_ORANGE: u32 = 0xFFCC99;

struct SheetFormats {
    blue: Format,
    blue_underline: Format,
    strikethrough: Format,
    yellow: Format,
    pastel_orange: Format,
}

impl SheetFormats {
    fn new() -> Self {
        Self {
            blue: Format::new().set_font_color(BLUE),
            blue_underline: Format::new()
                .set_font_color(BLUE)
                .set_underline(FormatUnderline::Single),
            strikethrough: Format::new().set_font_strikethrough(),
            yellow: Format::new().set_background_color(YELLOW),
            pastel_orange: Format::new().set_background_color(PASTEL_ORANGE),
        }
    }

    fn get(&self, style: CellStyle) -> Option<&Format> {
        match style {
            CellStyle::Plain => None,
            CellStyle::Blue => Some(&self.blue),
            CellStyle::BlueUnderline => Some(&self.blue_underline),
            CellStyle::Strikethrough => Some(&self.strikethrough),
            CellStyle::Yellow => Some(&self.yellow),
            CellStyle::PastelOrange => Some(&self.pastel_orange),
        }
    }
}

/// Renders a plan into xlsx bytes. Formulas stay formulas so the
/// spreadsheet recalculates them when opened.
pub fn render_workbook(plan: &SheetPlan) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let formats = SheetFormats::new();

    {
        let worksheet = workbook.add_worksheet();
        for cell in &plan.cells {
            // 1-based -> 0-based
            let row = cell.row - 1;
            let col = cell.column - 1;
            write_cell(worksheet, row, col, &cell.value, formats.get(cell.style))?;
        }
    }

    tracing::debug!(
        "Rendered {} cells for rows {}..={}",
        plan.cells.len(),
        plan.first_row,
        plan.footer_row
    );
    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<()> {
    match (value, format) {
        (CellValue::Text(text), Some(format)) => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
        (CellValue::Text(text), None) => {
            worksheet.write_string(row, col, text)?;
        }
        (CellValue::Number(number), Some(format)) => {
            worksheet.write_number_with_format(row, col, *number, format)?;
        }
        (CellValue::Number(number), None) => {
            worksheet.write_number(row, col, *number)?;
        }
        (CellValue::Link { url, text }, format) => {
            let link = Url::new(url.as_str()).set_text(text.as_str());
            match format {
                Some(format) => worksheet.write_url_with_format(row, col, link, format)?,
                None => worksheet.write_url(row, col, link)?,
            };
        }
        (CellValue::Formula(formula), Some(format)) => {
            worksheet.write_formula_with_format(row, col, formula.as_str(), format)?;
        }
        (CellValue::Formula(formula), None) => {
            worksheet.write_formula(row, col, formula.as_str())?;
        }
    }
    Ok(())
}
