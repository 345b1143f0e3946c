//! Interactive quantity input

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::{orders::Demand, products::ProductCatalog};

/// Message shown when a quantity cannot be parsed.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input! Please try again.";

/// Errors reading quantities from the user.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input ended before a quantity was given.
    #[error("input ended while waiting for: {prompt}")]
    EndOfInput {
        /// The unanswered prompt
        prompt: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Prompts until a non-negative integer is entered.
///
/// Anything else prints [`INVALID_INPUT_MESSAGE`] and asks again.
///
/// # Errors
///
/// - [`InputError::EndOfInput`]: input closed before a valid quantity arrived.
/// - [`InputError::Io`]: reading or writing failed.
pub fn prompt_quantity(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> Result<usize, InputError> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();

        if input.read_line(&mut line)? == 0 {
            return Err(InputError::EndOfInput {
                prompt: prompt.trim().to_string(),
            });
        }

        match line.trim().parse::<usize>() {
            Ok(quantity) => return Ok(quantity),
            Err(error) => {
                debug!(input = line.trim(), %error, "rejected quantity");
                writeln!(output, "{INVALID_INPUT_MESSAGE}")?;
            }
        }
    }
}

/// Asks for a quantity of every product in the catalog, in catalog order.
///
/// # Errors
///
/// Returns an [`InputError`] if any prompt cannot be answered.
pub fn collect_demand(
    catalog: &ProductCatalog<'_>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Demand, InputError> {
    let mut demand = Demand::new();

    for product in catalog.iter() {
        let prompt = format!("How many {} do you want? ", product.name);
        let quantity = prompt_quantity(input, output, &prompt)?;

        demand.insert(product.code.clone(), quantity);
    }

    Ok(demand)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_a_valid_quantity() -> TestResult {
        let mut input = Cursor::new("12\n");
        let mut output = Vec::new();

        let quantity = prompt_quantity(&mut input, &mut output, "How many? ")?;

        assert_eq!(quantity, 12);
        assert_eq!(String::from_utf8(output)?, "How many? ");

        Ok(())
    }

    #[test]
    fn reprompts_on_invalid_input() -> TestResult {
        let mut input = Cursor::new("ten\n-3\n2.5\n 4 \n");
        let mut output = Vec::new();

        let quantity = prompt_quantity(&mut input, &mut output, "? ")?;

        assert_eq!(quantity, 4);
        assert_eq!(
            String::from_utf8(output)?,
            format!("? {INVALID_INPUT_MESSAGE}\n").repeat(3) + "? "
        );

        Ok(())
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = Cursor::new("oops\n");
        let mut output = Vec::new();

        let result = prompt_quantity(&mut input, &mut output, "How many? ");

        assert!(matches!(
            result,
            Err(InputError::EndOfInput { prompt }) if prompt == "How many?"
        ));
    }

    #[test]
    fn collects_demand_in_catalog_order() -> TestResult {
        let catalog = ProductCatalog::bakery()?;
        let mut input = Cursor::new("10\n14\n13\n");
        let mut output = Vec::new();

        let demand = collect_demand(&catalog, &mut input, &mut output)?;

        assert_eq!(
            demand,
            Demand::new().with("VS5", 10).with("MB11", 14).with("CF", 13)
        );
        assert!(String::from_utf8(output)?.starts_with("How many Vegemite Scrolls do you want? "));

        Ok(())
    }
}
