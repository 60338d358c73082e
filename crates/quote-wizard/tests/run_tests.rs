use std::io::Cursor;

use quote_spec::catalog::ids;
use quote_spec::{
    AnswerMap, AnswerValue, PriceTable, QuoteSubmission, WizardSession, cleaning_quote_form,
};
use quote_wizard::cmd::run::drive;
use rust_decimal::Decimal;

fn drive_script(session: WizardSession, script: &str) -> (anyhow::Result<QuoteSubmission>, String) {
    let mut output = Vec::new();
    let result = drive(
        session,
        &PriceTable::default(),
        Cursor::new(script.to_string()),
        &mut output,
        false,
    );
    (result, String::from_utf8(output).expect("utf8"))
}

#[test]
fn scripted_walkthrough_produces_submission() {
    let session = WizardSession::new(cleaning_quote_form()).unwrap();
    let script = [
        "house",
        "kitchen=1, bedrooms=2",
        "regular_home",
        "ironing",
        "weekly",
        "no",
        "",
        "SW1A 1AA",
        ":done",
    ]
    .join("\n");

    let (result, transcript) = drive_script(session, &script);
    let submission = result.expect("submission");
    assert_eq!(submission.estimate.total, Decimal::new(7650, 2));
    assert_eq!(submission.answers.flag(ids::HAS_PETS), Some(false));
    assert!(!submission.answers.contains(ids::ACCESS_NOTES));
    assert!(transcript.contains("Question 1 of 7: What type of property needs cleaning?"));
    assert!(transcript.contains("Summary:"));
}

#[test]
fn blank_required_answer_is_refused() {
    let session = WizardSession::new(cleaning_quote_form()).unwrap();
    let (result, transcript) = drive_script(session, "\n:quit\n");
    assert!(transcript.contains("An answer is required."));
    assert_eq!(result.unwrap_err().to_string(), "wizard cancelled");
}

#[test]
fn bad_input_is_reported_and_question_repeats() {
    let session = WizardSession::new(cleaning_quote_form()).unwrap();
    let (result, transcript) = drive_script(session, "castle\n");
    assert!(transcript.contains("'castle' is not one of the options"));
    assert!(result.is_err());
}

#[test]
fn back_and_edit_commands_move_the_cursor() {
    let answers = AnswerMap::from_iter([
        (ids::PROPERTY_TYPE, AnswerValue::text("office")),
        (ids::COMMERCIAL_AREAS, AnswerValue::counts([("workspaces", 2)])),
        (ids::SERVICES, AnswerValue::selection(["office_clean"])),
        (ids::FREQUENCY, AnswerValue::text("one_time")),
        (ids::HAS_PETS, AnswerValue::Flag(false)),
        (ids::POSTCODE, AnswerValue::text("EC1A 1BB")),
    ]);
    let session = WizardSession::resume(cleaning_quote_form(), answers).unwrap();
    assert!(session.is_complete());

    let script = [
        ":back",
        ":edit frequency",
        "",
        ":edit residential_areas",
        ":edit frequency",
        "monthly",
        ":done",
        "",
        "",
        "",
        ":done",
    ]
    .join("\n");
    let (result, transcript) = drive_script(session, &script);
    assert!(transcript.contains("Question 8 of 8"));
    assert!(transcript.contains("questions can only be edited from the summary"));
    assert!(transcript.contains("'residential_areas' is not part of the active question list"));
    assert!(transcript.contains("Question 5 of 8"));
    assert!(transcript.contains("Answer the remaining questions first."));

    let submission = result.expect("submission");
    assert_eq!(submission.answers.text(ids::FREQUENCY), Some("monthly"));
    // (40 + 2 * 20) * 0.95
    assert_eq!(submission.estimate.total, Decimal::new(7600, 2));
}

#[test]
fn end_of_input_at_summary_submits() {
    let answers = AnswerMap::from_iter([
        (ids::PROPERTY_TYPE, AnswerValue::text("custom:boathouse")),
        (ids::SERVICES, AnswerValue::selection(["deep_clean"])),
        (ids::FREQUENCY, AnswerValue::text("one_time")),
        (ids::HAS_PETS, AnswerValue::Flag(true)),
        (ids::POSTCODE, AnswerValue::text("N1 9GU")),
    ]);
    let session = WizardSession::resume(cleaning_quote_form(), answers).unwrap();
    let (result, transcript) = drive_script(session, "");
    assert!(transcript.contains("boathouse (custom)"));
    assert_eq!(result.unwrap().estimate.total, Decimal::new(5500, 2));
}

#[test]
fn json_mode_emits_one_payload_per_step() {
    let session = WizardSession::new(cleaning_quote_form()).unwrap();
    let mut output = Vec::new();
    let result = drive(
        session,
        &PriceTable::default(),
        Cursor::new("apartment\n".to_string()),
        &mut output,
        true,
    );
    assert!(result.is_err());
    let transcript = String::from_utf8(output).unwrap();
    let payloads = transcript
        .lines()
        .map(|line| line.trim_start_matches("> "))
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str::<serde_json::Value>(&line).expect("json payload"))
        .collect::<Vec<_>>();
    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0]["current_question_id"], ids::PROPERTY_TYPE);
    assert_eq!(payloads[1]["current_question_id"], ids::RESIDENTIAL_AREAS);
    assert_eq!(payloads[1]["status"], "need_input");
}
