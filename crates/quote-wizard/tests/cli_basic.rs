use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

const HOUSE_ANSWERS: &str = r#"{
  "property_type": "house",
  "residential_areas": { "kitchen": 1, "bedrooms": 2 },
  "services": ["regular_home"],
  "extra_services": ["ironing"],
  "frequency": "weekly",
  "has_pets": false,
  "access_notes": null,
  "postcode": "SW1A 1AA"
}"#;

fn wizard() -> Command {
    let mut cmd = Command::cargo_bin("quote-wizard").expect("bin");
    cmd.env_remove("QUOTE_WIZARD_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn check_accepts_builtin_catalog() {
    wizard()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: cleaning-quote v1.0.0 (9 questions"));
}

#[test]
fn check_names_the_broken_question() {
    let temp = TempDir::new().unwrap();
    let form = temp.child("form.json");
    form.write_str(
        r#"{
          "id": "broken",
          "title": "Broken",
          "version": "0.1.0",
          "questions": [
            { "id": "rooms", "type": "counter_group", "title": "Rooms", "options": [],
              "visible_if": { "depends_on": "site", "equals": "home" } },
            { "id": "site", "type": "single_select", "title": "Site",
              "options": [ { "value": "home", "label": "Home" } ] }
          ]
        }"#,
    )
    .unwrap();

    wizard()
        .args(["check", "--form"])
        .arg(form.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("rooms"));
}

#[test]
fn estimate_prints_discounted_total() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("answers.json");
    answers.write_str(HOUSE_ANSWERS).unwrap();

    wizard()
        .args(["estimate", "--answers"])
        .arg(answers.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal: 90.00"))
        .stdout(predicate::str::contains("Discount: -13.50"))
        .stdout(predicate::str::contains("Total: 76.50"));
}

#[test]
fn estimate_json_uses_config_prices() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("answers.json");
    answers.write_str(HOUSE_ANSWERS).unwrap();
    let config = temp.child("wizard.toml");
    config
        .write_str("[prices]\nresidential_unit_rate = 20\n")
        .unwrap();

    let output = wizard()
        .arg("--config")
        .arg(config.path())
        .args(["estimate", "--json", "--answers"])
        .arg(answers.path())
        .output()
        .expect("run estimate");
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    // (30 + 60 + 15) * 0.85
    assert_eq!(summary["total"], "89.25");
    assert_eq!(summary["line_items"].as_array().map(Vec::len), Some(4));
}

#[test]
fn estimate_ignores_answers_to_hidden_questions() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("answers.json");
    answers
        .write_str(
            r#"{
              "property_type": "office",
              "residential_areas": { "bedrooms": 3 },
              "commercial_areas": { "workspaces": 2 },
              "services": ["office_clean"]
            }"#,
        )
        .unwrap();

    wizard()
        .args(["estimate", "--answers"])
        .arg(answers.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 80.00"))
        .stdout(predicate::str::contains("bedrooms").not());
}

#[test]
fn questions_follow_property_type() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("answers.json");
    answers.write_str(r#"{ "property_type": "office" }"#).unwrap();

    wizard()
        .args(["questions", "--answers"])
        .arg(answers.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(commercial_areas)"))
        .stdout(predicate::str::contains("(residential_areas)").not())
        .stdout(predicate::str::contains("[x] 1."));
}

#[test]
fn run_resumes_complete_answers_and_writes_submission() {
    let temp = TempDir::new().unwrap();
    let answers = temp.child("answers.json");
    answers.write_str(HOUSE_ANSWERS).unwrap();
    let out = temp.child("out/quote.json");

    wizard()
        .args(["run", "--answers"])
        .arg(answers.path())
        .arg("--out")
        .arg(out.path())
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Summary:"));

    out.assert(predicate::path::exists());
    let submission: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
    assert_eq!(submission["form_id"], "cleaning-quote");
    assert_eq!(submission["estimate"]["total"], "76.50");
    assert_eq!(submission["answers"]["postcode"], "SW1A 1AA");
}

#[test]
fn run_fails_when_input_ends_early() {
    wizard()
        .arg("run")
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn schema_describes_questions() {
    wizard()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"questions\""));
}
