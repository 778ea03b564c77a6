use super::ui;
use crate::core::{Fund, NavSnapshot};
use anyhow::{Context, Result, anyhow};
use comfy_table::Cell;

/// Filters applied by the `funds` command.
#[derive(Debug, Default, Clone)]
pub struct FundFilter {
    pub fund_house: Option<String>,
    pub category: Option<String>,
}

impl FundFilter {
    fn matches(&self, fund: &Fund) -> bool {
        self.fund_house
            .as_ref()
            .is_none_or(|house| &fund.fund_house == house)
            && self
                .category
                .as_ref()
                .is_none_or(|category| &fund.category == category)
    }
}

/// Funds in `snapshot` matching `filter`, ordered by scheme code.
pub fn select_funds(snapshot: &NavSnapshot, filter: &FundFilter) -> Vec<Fund> {
    let funds = match &filter.fund_house {
        Some(house) => snapshot.funds_by_house(house),
        None => snapshot.funds(),
    };
    funds.into_iter().filter(|f| filter.matches(f)).collect()
}

fn numbered_list(title: &str, items: &[String]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("#"), ui::header_cell(title)]);
    for (index, item) in items.iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), Cell::new(item)]);
    }
    table.to_string()
}

pub fn categories_table(snapshot: &NavSnapshot) -> String {
    numbered_list("Category", &snapshot.data.categories)
}

pub fn fund_houses_table(snapshot: &NavSnapshot) -> String {
    numbered_list("Fund House", &snapshot.data.fund_houses)
}

pub fn funds_table(funds: &[Fund]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Scheme"),
        ui::header_cell("Fund House"),
        ui::header_cell("NAV"),
        ui::header_cell("Date"),
    ]);

    for fund in funds {
        table.add_row(vec![
            Cell::new(&fund.code),
            Cell::new(&fund.name),
            ui::text_cell(&fund.fund_house),
            ui::price_cell(fund.nav),
            Cell::new(&fund.date),
        ]);
    }
    table.to_string()
}

pub fn fund_details_table(fund: &Fund) -> String {
    let mut table = ui::new_styled_table();
    let rows = [
        ("Scheme Code", ui::text_cell(&fund.code)),
        ("Scheme Name", ui::text_cell(&fund.name)),
        ("Fund House", ui::text_cell(&fund.fund_house)),
        ("Category", ui::text_cell(&fund.category)),
        ("ISIN", ui::text_cell(&fund.isin)),
        ("ISIN Reinvestment", ui::text_cell(&fund.isin_reinvestment)),
        ("Net Asset Value", ui::price_cell(fund.nav)),
        ("Repurchase Value", ui::price_cell(fund.repurchase_value)),
        ("Sale Price", ui::price_cell(fund.sale_price)),
        ("Date", ui::text_cell(&fund.date)),
    ];
    for (label, value) in rows {
        table.add_row(vec![ui::header_cell(label), value]);
    }
    table.to_string()
}

pub fn show_categories(snapshot: &NavSnapshot) {
    println!("{}", categories_table(snapshot));
}

pub fn show_fund_houses(snapshot: &NavSnapshot) {
    println!("{}", fund_houses_table(snapshot));
}

pub fn show_funds(snapshot: &NavSnapshot, filter: &FundFilter, json: bool) -> Result<()> {
    let funds = select_funds(snapshot, filter);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&funds).context("Failed to serialize funds")?
        );
        return Ok(());
    }

    if funds.is_empty() {
        println!("No funds found.");
        return Ok(());
    }
    println!("{}", funds_table(&funds));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} funds, NAV feed loaded at {}",
                funds.len(),
                snapshot.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}

pub fn show_fund(snapshot: &NavSnapshot, code: &str, json: bool) -> Result<()> {
    let fund = snapshot
        .fund(code)
        .ok_or_else(|| anyhow!("Scheme code not found: {code}"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(fund).context("Failed to serialize fund")?
        );
    } else {
        println!("{}", ui::style_text(&fund.name, ui::StyleType::Title));
        println!("{}", fund_details_table(fund));
    }
    Ok(())
}
