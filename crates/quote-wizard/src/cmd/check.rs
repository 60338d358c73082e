use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quote_spec::QuestionFlow;

use crate::config::WizardConfig;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Question list JSON to check instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub form: Option<PathBuf>,
}

pub fn run(args: CheckArgs, config: WizardConfig) -> Result<()> {
    let config = match &args.form {
        Some(path) => config.with_form_file(path)?,
        None => config,
    };
    let source = config
        .form_source
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in catalog".to_string());
    let flow = QuestionFlow::new(config.form)
        .with_context(|| format!("question list from {source} is invalid"))?;
    let form = flow.form();
    println!(
        "OK: {} v{} ({} questions, {source})",
        form.id,
        form.version,
        form.questions.len()
    );
    Ok(())
}
