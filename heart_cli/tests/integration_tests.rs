//! Integration tests for the heartrisk binary.
//!
//! These tests verify end-to-end behavior including:
//! - Startup model loading (and refusal to start without all four models)
//! - Flag-driven prediction and dry runs
//! - Routing to the selected model
//! - Interactive form and batch CSV input

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("heartrisk"))
}

fn zero_weights() -> Vec<f64> {
    vec![0.0; 13]
}

/// Write four artifacts that each key on a different feature:
/// - logistic regression: high risk above age 50
/// - SVM: high risk above cholesterol 300
/// - decision tree: high risk for thalassemia code > 2
/// - random forest: high risk for chest pain code > 2 (asymptomatic)
fn write_models(dir: &Path) {
    let mut lr = zero_weights();
    lr[0] = 0.1;
    fs::write(
        dir.join("L_model"),
        serde_json::json!({
            "kind": "logistic_regression",
            "coefficients": lr,
            "intercept": -5.0
        })
        .to_string(),
    )
    .expect("Failed to write L_model");

    let mut sv = zero_weights();
    sv[4] = 1.0;
    fs::write(
        dir.join("svm_model"),
        serde_json::json!({
            "kind": "support_vector_machine",
            "kernel": {"type": "linear"},
            "support_vectors": [sv],
            "dual_coefficients": [1.0],
            "intercept": -300.0
        })
        .to_string(),
    )
    .expect("Failed to write svm_model");

    fs::write(
        dir.join("DT_model"),
        serde_json::json!({
            "kind": "decision_tree",
            "nodes": [
                {"split": {"feature": 12, "threshold": 2.5, "left": 1, "right": 2}},
                {"leaf": {"value": [20.0, 3.0]}},
                {"leaf": {"value": [4.0, 25.0]}}
            ]
        })
        .to_string(),
    )
    .expect("Failed to write DT_model");

    let tree = serde_json::json!({
        "nodes": [
            {"split": {"feature": 2, "threshold": 2.5, "left": 1, "right": 2}},
            {"leaf": {"value": [9.0, 1.0]}},
            {"leaf": {"value": [1.0, 9.0]}}
        ]
    });
    fs::write(
        dir.join("RF_model"),
        serde_json::json!({
            "kind": "random_forest",
            "trees": [tree.clone(), tree]
        })
        .to_string(),
    )
    .expect("Failed to write RF_model");
}

/// Temp dir holding a models directory and a config file pointing at it
struct TestEnv {
    _temp_dir: TempDir,
    models_dir: PathBuf,
    config_path: PathBuf,
}

fn setup_env() -> TestEnv {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let models_dir = temp_dir.path().join("models");
    fs::create_dir_all(&models_dir).expect("Failed to create models dir");
    write_models(&models_dir);

    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!("[models]\ndir = {:?}\n", models_dir.display().to_string()),
    )
    .expect("Failed to write config");

    TestEnv {
        _temp_dir: temp_dir,
        models_dir,
        config_path,
    }
}

fn predict(env: &TestEnv) -> Command {
    let mut cmd = cli();
    cmd.arg("--config").arg(&env.config_path).arg("predict");
    cmd
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Heart disease risk prediction"));
}

#[test]
fn test_predict_defaults_low_risk() {
    let env = setup_env();

    predict(&env)
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Risk"))
        .stdout(predicate::str::contains("Logistic Regression"))
        .stdout(predicate::str::contains(
            "You appear to be healthy. Keep maintaining your lifestyle!",
        ));
}

#[test]
fn test_predict_high_risk() {
    let env = setup_env();

    predict(&env)
        .args(["--age", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High Risk"))
        .stdout(predicate::str::contains(
            "Please consult a healthcare provider.",
        ));
}

#[test]
fn test_dry_run_shows_encoded_vector() {
    let env = setup_env();

    predict(&env)
        .args([
            "--sex",
            "Male",
            "--chest-pain-type",
            "Asymptomatic",
            "--fbs",
            "No",
            "--exang",
            "No",
            "--model",
            "Random Forest",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[45, 1, 3, 120, 200, 0, 0, 150, 0, 1.0, 0, 0, 1]",
        ))
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Risk").not());
}

#[test]
fn test_dry_run_reversible_defect() {
    let env = setup_env();

    predict(&env)
        .args(["--thal", "Reversible Defect", "--sex", "Female", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[45, 0, 0, 120, 200, 1, 0, 150, 1, 1.0, 0, 0, 3]",
        ));
}

#[test]
fn test_dry_run_shows_exact_oldpeak() {
    let env = setup_env();

    predict(&env)
        .args(["--oldpeak", "1.25", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(", 1.25, "));
}

#[test]
fn test_each_model_is_routed() {
    let env = setup_env();

    // Only the decision tree looks at thalassemia
    predict(&env)
        .args(["--thal", "Reversible Defect", "--model", "Decision Tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High Risk"));
    predict(&env)
        .args(["--thal", "Reversible Defect", "--model", "Logistic Regression"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Risk"));

    // Only the SVM looks at cholesterol
    predict(&env)
        .args(["--chol", "350", "--model", "svm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High Risk"));
    predict(&env)
        .args(["--chol", "350", "--model", "rf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low Risk"));

    // Only the forest looks at chest pain
    predict(&env)
        .args(["--cp", "Asymptomatic", "--model", "Random Forest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High Risk"));
}

#[test]
fn test_out_of_range_rejected() {
    let env = setup_env();

    predict(&env)
        .args(["--age", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("age must be between 20 and 100"));

    predict(&env)
        .args(["--oldpeak", "6.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("oldpeak"));
}

#[test]
fn test_unknown_label_rejected() {
    let env = setup_env();

    predict(&env)
        .args(["--sex", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sex label"));

    predict(&env)
        .args(["--model", "Gradient Boosting"])
        .assert()
        .failure();

    predict(&env)
        .args(["--exang", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown exercise_angina label"));
}

#[test]
fn test_missing_model_prevents_startup() {
    let env = setup_env();
    fs::remove_file(env.models_dir.join("RF_model")).expect("Failed to remove RF_model");

    // Even a prediction with another model cannot run
    predict(&env)
        .args(["--model", "Logistic Regression"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RF_model"))
        .stdout(predicate::str::contains("Risk").not());
}

#[test]
fn test_models_dir_override() {
    let env = setup_env();
    let empty_config = env.models_dir.join("empty.toml");
    fs::write(&empty_config, "").expect("Failed to write config");

    cli()
        .arg("--config")
        .arg(&empty_config)
        .arg("--models-dir")
        .arg(&env.models_dir)
        .args(["predict", "--age", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("High Risk"));
}

#[test]
fn test_config_default_model() {
    let env = setup_env();
    let config = format!(
        "{}\n[prediction]\ndefault_model = \"Decision Tree\"\n",
        fs::read_to_string(&env.config_path).expect("Failed to read config")
    );
    fs::write(&env.config_path, config).expect("Failed to write config");

    predict(&env)
        .args(["--thal", "Fixed Defect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decision Tree"))
        .stdout(predicate::str::contains("Low Risk"));
}

#[test]
fn test_form_with_defaults() {
    let env = setup_env();

    // 13 fields + model + confirm
    cli()
        .arg("--config")
        .arg(&env.config_path)
        .write_stdin("\n".repeat(15))
        .assert()
        .success()
        .stdout(predicate::str::contains("Age [20-100] (45)"))
        .stdout(predicate::str::contains("Select Model"))
        .stdout(predicate::str::contains("Low Risk"));
}

#[test]
fn test_form_answers_and_model_choice() {
    let env = setup_env();
    // age, sex, cp, bp, chol, fbs, ecg, hr, exang, oldpeak, slope, ca, thal, model, confirm
    let answers = "58\n\n4\n\n\n\n\n\n\n\n\n\n\n4\n\n";

    cli()
        .arg("--config")
        .arg(&env.config_path)
        .arg("form")
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Random Forest"))
        .stdout(predicate::str::contains("High Risk"));
}

#[test]
fn test_form_quit_makes_no_prediction() {
    let env = setup_env();
    let answers = format!("{}q\n", "\n".repeat(14));

    cli()
        .arg("--config")
        .arg(&env.config_path)
        .arg("form")
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("No prediction made"))
        .stdout(predicate::str::contains("Low Risk").not());
}

#[test]
fn test_form_closed_input_makes_no_prediction() {
    let env = setup_env();

    // Fields and model answered, then input ends without the trigger
    cli()
        .arg("--config")
        .arg(&env.config_path)
        .arg("form")
        .write_stdin("\n".repeat(14))
        .assert()
        .success()
        .stdout(predicate::str::contains("No prediction made"))
        .stdout(predicate::str::contains("Low Risk").not());
}

#[test]
fn test_batch_predicts_each_row() {
    let env = setup_env();
    let csv_path = env.models_dir.join("patients.csv");
    fs::write(
        &csv_path,
        "age,sex,chest_pain_type,resting_bp,cholesterol,fasting_blood_sugar,resting_ecg,max_heart_rate,exercise_angina,oldpeak,st_slope,major_vessels,thalassemia\n\
         45,Male,Asymptomatic,120,200,No,Normal,150,No,1.0,Upsloping,0,Normal\n\
         67,Female,Typical Angina,160,286,Yes,Left Ventricular Hypertrophy,108,Yes,1.5,Flat,3,Normal\n\
         39,Female,Atypical Angina,118,219,No,Normal,140,No,1.2,Flat,0,Reversible Defect\n",
    )
    .expect("Failed to write CSV");

    cli()
        .arg("--config")
        .arg(&env.config_path)
        .arg("batch")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Assessed 3 patients (1 high risk, 2 low risk)"));
}

#[test]
fn test_batch_rejects_out_of_range_row() {
    let env = setup_env();
    let csv_path = env.models_dir.join("patients.csv");
    fs::write(
        &csv_path,
        "age,sex,chest_pain_type,resting_bp,cholesterol,fasting_blood_sugar,resting_ecg,max_heart_rate,exercise_angina,oldpeak,st_slope,major_vessels,thalassemia\n\
         12,Male,Asymptomatic,120,200,No,Normal,150,No,1.0,Upsloping,0,Normal\n",
    )
    .expect("Failed to write CSV");

    cli()
        .arg("--config")
        .arg(&env.config_path)
        .arg("batch")
        .arg(&csv_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidRow"));
}
