use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use quote_spec::{AnswerMap, QuestionFlow, is_answered};
use serde_json::json;

use crate::config::{WizardConfig, load_answers};

#[derive(Args, Debug, Clone)]
pub struct QuestionsArgs {
    /// Answers JSON used to resolve conditional questions
    #[arg(long, value_name = "PATH")]
    pub answers: Option<PathBuf>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: QuestionsArgs, config: WizardConfig) -> Result<()> {
    let answers = match &args.answers {
        Some(path) => load_answers(path)?,
        None => AnswerMap::new(),
    };
    let flow = QuestionFlow::new(config.form)?;
    let active = flow.active(&answers);

    if args.json {
        let rows = active
            .iter()
            .map(|question| {
                json!({
                    "id": question.id,
                    "type": question.kind.as_str(),
                    "title": question.title,
                    "required": question.required,
                    "answered": answers.contains(&question.id) && is_answered(question, &answers),
                })
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (index, question) in active.iter().enumerate() {
        let marker = if answers.contains(&question.id) && is_answered(question, &answers) {
            "x"
        } else {
            " "
        };
        let required = if question.required { " *" } else { "" };
        println!(
            "[{marker}] {}. {} ({}){required}",
            index + 1,
            question.title,
            question.id
        );
    }
    Ok(())
}
