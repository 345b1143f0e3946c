//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    orders::{Order, OrderEntry, OrderLine, PackCount},
    pricing::TotalPriceError,
    products::ProductCatalog,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error adding up the order total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How a receipt is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReceiptStyle {
    /// One summary line per product followed by its packs.
    #[default]
    Plain,

    /// A bordered table with an order total.
    Table,
}

/// Printable view of an order.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'r, 'a> {
    order: &'r Order<'a>,
    catalog: &'r ProductCatalog<'a>,
}

impl<'r, 'a> Receipt<'r, 'a> {
    /// Create a receipt for an order placed against `catalog`.
    pub fn new(order: &'r Order<'a>, catalog: &'r ProductCatalog<'a>) -> Self {
        Self { order, catalog }
    }

    /// Writes the receipt in the given style.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written or the total cannot be added up.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        style: ReceiptStyle,
    ) -> Result<(), ReceiptError> {
        match style {
            ReceiptStyle::Plain => self.write_plain(&mut out),
            ReceiptStyle::Table => self.write_table(&mut out),
        }
    }

    /// Products requested in a quantity above zero.
    fn requested_entries(&self) -> impl Iterator<Item = &'r OrderEntry<'a>> {
        self.order
            .entries()
            .iter()
            .filter(|entry| entry.requested() > 0)
    }

    fn write_plain(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        for entry in self.requested_entries() {
            match entry.result() {
                Ok(line) => {
                    writeln!(
                        out,
                        "{} {} {}",
                        entry.requested(),
                        entry.code(),
                        format_money(&line.total())
                    )?;

                    for pack in line.packs() {
                        writeln!(
                            out,
                            "\t{} x {} {}",
                            pack.count(),
                            pack.size(),
                            format_money(&pack.unit_price())
                        )?;
                    }
                }
                Err(error) => {
                    writeln!(
                        out,
                        "{} {} unavailable: {error}",
                        entry.requested(),
                        entry.code()
                    )?;
                }
            }
        }

        Ok(())
    }

    fn write_table(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record([
            "Product",
            "Requested",
            "Shipped",
            "Packs",
            "Unit Price",
            "Line Total",
        ]);

        for entry in self.requested_entries() {
            builder.push_record(self.table_row(entry));
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..3), Alignment::right());
        table.modify(Columns::new(4..6), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}")?;
        writeln!(out, "Total: {}", format_money(&self.order.total()?))?;

        Ok(())
    }

    fn table_row(&self, entry: &OrderEntry<'_>) -> [String; 6] {
        let product = self
            .catalog
            .get(entry.code())
            .map_or_else(|| entry.code().to_string(), |p| format!("{} ({})", p.code, p.name));

        match entry.result() {
            Ok(line) => [
                product,
                entry.requested().to_string(),
                line.shipped().to_string(),
                pack_cells(line, |pack| format!("{} x {}", pack.count(), pack.size())),
                pack_cells(line, |pack| format_money(&pack.unit_price())),
                format_money(&line.total()),
            ],
            Err(error) => [
                product,
                entry.requested().to_string(),
                String::new(),
                format!("unavailable: {error}"),
                String::new(),
                String::new(),
            ],
        }
    }
}

fn pack_cells(line: &OrderLine<'_>, cell: impl Fn(&PackCount<'_>) -> String) -> String {
    line.packs().iter().map(cell).collect::<Vec<_>>().join("\n")
}

/// Formats an amount as symbol and two decimals, e.g. `$17.98`.
pub fn format_money(money: &Money<'_, Currency>) -> String {
    format!("{}{:.2}", money.currency().symbol, money.amount())
}
