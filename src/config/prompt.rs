//! Console prompts for the three numbers the page does not contain.

use crate::domain::model::OrderInputs;
use crate::utils::error::{OrderError, Result};
use crate::utils::validation;
use std::io::{BufRead, Write};

pub const FIRST_LINE_PROMPT: &str = "Enter [first line number] (e.g. 875): ";
pub const GBP_PROMPT: &str = "Enter [total gbp paid]: ";
pub const YEN_PROMPT: &str = "Enter [total yen paid]: ";

pub fn parse_first_line(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|e| OrderError::InvalidUserInput {
        field: "first_line".to_string(),
        value: trimmed.to_string(),
        reason: format!("{}", e),
    })?;
    validation::validate_range("first_line", value, 1, i64::from(u32::MAX))?;

    Ok(value as u32)
}

/// Amounts may carry thousands separators, e.g. `1,234.56`.
pub fn parse_amount(field: &str, raw: &str) -> Result<f64> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    let value: f64 = cleaned.parse().map_err(|e| OrderError::InvalidUserInput {
        field: field.to_string(),
        value: raw.trim().to_string(),
        reason: format!("{}", e),
    })?;

    if !value.is_finite() {
        return Err(OrderError::InvalidUserInput {
            field: field.to_string(),
            value: raw.trim().to_string(),
            reason: "Amount must be a finite number".to_string(),
        });
    }
    Ok(value)
}

/// Reads answers from any line source, so tests can script the console.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, field: &str, question: &str) -> Result<String> {
        self.writer.write_all(question.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(OrderError::InvalidUserInput {
                field: field.to_string(),
                value: String::new(),
                reason: "No input received".to_string(),
            });
        }
        Ok(line)
    }

    /// 依序取得三個輸入值；命令列已提供的欄位不再詢問
    pub fn collect(
        &mut self,
        first_line: Option<&str>,
        gbp_paid: Option<&str>,
        yen_paid: Option<&str>,
    ) -> Result<OrderInputs> {
        let first_line = match first_line {
            Some(raw) => parse_first_line(raw)?,
            None => parse_first_line(&self.ask("first_line", FIRST_LINE_PROMPT)?)?,
        };
        let gbp_paid = match gbp_paid {
            Some(raw) => parse_amount("gbp_paid", raw)?,
            None => parse_amount("gbp_paid", &self.ask("gbp_paid", GBP_PROMPT)?)?,
        };
        let yen_paid = match yen_paid {
            Some(raw) => parse_amount("yen_paid", raw)?,
            None => parse_amount("yen_paid", &self.ask("yen_paid", YEN_PROMPT)?)?,
        };

        Ok(OrderInputs {
            first_line,
            gbp_paid,
            yen_paid,
        })
    }
}
