use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use quote_spec::{EstimateSummary, LineCategory, estimate, validate_answers, visible_answers};

use crate::config::{WizardConfig, load_answers};

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Answers JSON to price
    #[arg(long, value_name = "PATH")]
    pub answers: PathBuf,
    /// Emit the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: EstimateArgs, config: WizardConfig) -> Result<()> {
    let answers = load_answers(&args.answers)?;
    let report = validate_answers(&config.form, &answers);
    for message in report.messages() {
        tracing::warn!(%message, "answers are not ready for checkout");
    }
    let summary = estimate(&visible_answers(&config.form, &answers), &config.prices).summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

pub fn format_summary(summary: &EstimateSummary) -> String {
    let mut out = String::new();
    for item in &summary.line_items {
        let label = match item.category {
            LineCategory::Service => "service",
            LineCategory::ResidentialArea => "room",
            LineCategory::CommercialArea => "area",
            LineCategory::ExtraService => "extra",
        };
        out.push_str(&format!(
            "{label:<8} {:<16} x{:<3} {:>9}\n",
            item.id, item.quantity, item.amount
        ));
    }
    out.push_str(&format!("Subtotal: {}\n", summary.subtotal));
    if !summary.discount.is_zero() {
        out.push_str(&format!("Discount: -{}\n", summary.discount));
    }
    out.push_str(&format!("Total: {}\n", summary.total));
    out
}
