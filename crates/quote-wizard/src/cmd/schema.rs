use anyhow::Result;
use quote_spec::QuoteForm;

pub fn run() -> Result<()> {
    let schema = schemars::schema_for!(QuoteForm);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
