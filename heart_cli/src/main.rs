use clap::{Args, Parser, Subcommand};
use heart_core::schema::{
    parse_in_range, AGE_RANGE, CHOLESTEROL_RANGE, MAJOR_VESSELS_RANGE, MAX_HEART_RATE_RANGE,
    OLDPEAK_RANGE, RESTING_BP_RANGE,
};
use heart_core::*;
use std::io;
use std::path::{Path, PathBuf};

mod form;

use form::Form;

#[derive(Parser)]
#[command(name = "heartrisk")]
#[command(about = "Heart disease risk prediction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override models directory
    #[arg(long, global = true)]
    models_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the health form interactively (default)
    Form {
        /// Preselected model
        #[arg(long)]
        model: Option<ModelKind>,
    },

    /// Predict risk from answers given as flags
    Predict {
        #[command(flatten)]
        patient: PatientArgs,

        /// Logistic Regression, Support Vector Machine, Decision Tree or Random Forest
        #[arg(long)]
        model: Option<ModelKind>,

        /// Dry run - show the encoded features without predicting
        #[arg(long)]
        dry_run: bool,
    },

    /// Predict risk for every patient in a CSV file
    Batch {
        /// CSV file with one patient per row
        file: PathBuf,

        #[arg(long)]
        model: Option<ModelKind>,
    },
}

/// Form answers as flags; defaults match the interactive form
#[derive(Args)]
struct PatientArgs {
    /// Age in years (20-100)
    #[arg(long, default_value_t = 45, value_parser = parse_age)]
    age: u32,

    /// Male or Female
    #[arg(long, default_value_t = Sex::default())]
    sex: Sex,

    /// Typical Angina, Atypical Angina, Non-anginal Pain or Asymptomatic
    #[arg(long, alias = "cp", default_value_t = ChestPainType::default())]
    chest_pain_type: ChestPainType,

    /// Resting blood pressure in mm Hg (80-200)
    #[arg(long, alias = "trestbps", default_value_t = 120, value_parser = parse_resting_bp)]
    resting_bp: u32,

    /// Serum cholesterol in mg/dl (100-600)
    #[arg(long, alias = "chol", default_value_t = 200, value_parser = parse_cholesterol)]
    cholesterol: u32,

    /// Fasting blood sugar above 120 mg/dl (Yes or No)
    #[arg(long, alias = "fbs", default_value_t = YesNo::default(), value_parser = parse_fasting_blood_sugar)]
    fasting_blood_sugar: YesNo,

    /// Normal, ST-T Wave Abnormality or Left Ventricular Hypertrophy
    #[arg(long, alias = "restecg", default_value_t = RestingEcg::default())]
    resting_ecg: RestingEcg,

    /// Maximum heart rate achieved (60-220)
    #[arg(long, alias = "thalach", default_value_t = 150, value_parser = parse_max_heart_rate)]
    max_heart_rate: u32,

    /// Exercise induced angina (Yes or No)
    #[arg(long, alias = "exang", default_value_t = YesNo::default(), value_parser = parse_exercise_angina)]
    exercise_angina: YesNo,

    /// ST depression induced by exercise (0.0-6.0)
    #[arg(long, default_value_t = 1.0, value_parser = parse_oldpeak)]
    oldpeak: f64,

    /// Upsloping, Flat or Downsloping
    #[arg(long, alias = "slope", default_value_t = StSlope::default())]
    st_slope: StSlope,

    /// Number of major vessels colored by fluoroscopy (0-3)
    #[arg(long, alias = "ca", default_value_t = 0, value_parser = parse_major_vessels)]
    major_vessels: u32,

    /// Normal, Fixed Defect or Reversible Defect
    #[arg(long, alias = "thal", default_value_t = Thalassemia::default())]
    thalassemia: Thalassemia,
}

impl From<PatientArgs> for PatientInput {
    fn from(args: PatientArgs) -> Self {
        PatientInput {
            age: args.age,
            sex: args.sex,
            chest_pain_type: args.chest_pain_type,
            resting_bp: args.resting_bp,
            cholesterol: args.cholesterol,
            fasting_blood_sugar: args.fasting_blood_sugar,
            resting_ecg: args.resting_ecg,
            max_heart_rate: args.max_heart_rate,
            exercise_angina: args.exercise_angina,
            oldpeak: args.oldpeak,
            st_slope: args.st_slope,
            major_vessels: args.major_vessels,
            thalassemia: args.thalassemia,
        }
    }
}

fn parse_age(s: &str) -> Result<u32> {
    parse_in_range(Feature::Age, s, &AGE_RANGE)
}

fn parse_resting_bp(s: &str) -> Result<u32> {
    parse_in_range(Feature::RestingBp, s, &RESTING_BP_RANGE)
}

fn parse_cholesterol(s: &str) -> Result<u32> {
    parse_in_range(Feature::Cholesterol, s, &CHOLESTEROL_RANGE)
}

fn parse_fasting_blood_sugar(s: &str) -> Result<YesNo> {
    YesNo::parse_for(Feature::FastingBloodSugar.name(), s)
}

fn parse_exercise_angina(s: &str) -> Result<YesNo> {
    YesNo::parse_for(Feature::ExerciseAngina.name(), s)
}

fn parse_max_heart_rate(s: &str) -> Result<u32> {
    parse_in_range(Feature::MaxHeartRate, s, &MAX_HEART_RATE_RANGE)
}

fn parse_oldpeak(s: &str) -> Result<f64> {
    parse_in_range(Feature::Oldpeak, s, &OLDPEAK_RANGE)
}

fn parse_major_vessels(s: &str) -> Result<u32> {
    parse_in_range(Feature::MajorVessels, s, &MAJOR_VESSELS_RANGE)
}

fn main() -> Result<()> {
    // Initialize logging
    heart_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.models_dir {
        config.models.dir = dir;
    }

    // All four models load before any input is taken; a missing one is fatal
    let registry = ModelRegistry::load(&config.models)?;
    let default_model = config.prediction.default_model;
    tracing::debug!(default_model = %default_model, "Registry ready");

    match cli.command {
        Some(Commands::Form { model }) => cmd_form(&registry, model.unwrap_or(default_model)),
        Some(Commands::Predict {
            patient,
            model,
            dry_run,
        }) => cmd_predict(
            &registry,
            &PatientInput::from(patient),
            model.unwrap_or(default_model),
            dry_run,
        ),
        Some(Commands::Batch { file, model }) => {
            cmd_batch(&registry, &file, model.unwrap_or(default_model))
        }
        None => {
            // Default to the interactive form
            cmd_form(&registry, default_model)
        }
    }
}

fn cmd_form(registry: &ModelRegistry, default_model: ModelKind) -> Result<()> {
    println!("Heart Disease Risk Prediction");
    println!("Enter your health details below to predict your heart disease risk.");
    println!("Press Enter to keep the value in parentheses.");
    println!();

    let stdin = io::stdin();
    let mut form = Form::new(stdin.lock(), io::stdout());

    let patient = form.patient(&PatientInput::default())?;
    let model = form.model(default_model)?;

    if !form.confirm()? {
        println!("\nNo prediction made.");
        return Ok(());
    }

    let assessment = assess_risk(registry, model, &patient)?;
    display_assessment(&assessment);
    Ok(())
}

fn cmd_predict(
    registry: &ModelRegistry,
    patient: &PatientInput,
    model: ModelKind,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        println!("\n  Model: {}", model);
        println!("  Encoded features: {}", encode(patient));
        println!("\n[Dry run - no prediction made]");
        return Ok(());
    }

    let assessment = assess_risk(registry, model, patient)?;
    display_assessment(&assessment);
    Ok(())
}

fn cmd_batch(registry: &ModelRegistry, file: &Path, model: ModelKind) -> Result<()> {
    let patients = read_patients(file)?;
    tracing::info!(count = patients.len(), model = %model, "Running batch");

    if patients.is_empty() {
        println!("No patients found in {}", file.display());
        return Ok(());
    }

    println!("\n  Model: {}", model);
    println!();

    let mut high_risk = 0;
    for (i, patient) in patients.iter().enumerate() {
        let assessment = assess_risk(registry, model, patient)?;
        if assessment.verdict == Verdict::HighRisk {
            high_risk += 1;
        }
        println!("  {:>4}  {}", i + 1, assessment.verdict);
    }

    println!();
    println!(
        "✓ Assessed {} patients ({} high risk, {} low risk)",
        patients.len(),
        high_risk,
        patients.len() - high_risk
    );
    Ok(())
}

fn display_assessment(assessment: &RiskAssessment) {
    let marker = match assessment.verdict {
        Verdict::HighRisk => "⚠",
        Verdict::LowRisk => "✓",
    };

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  RISK PREDICTION · {}", assessment.model);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} {}: {}",
        marker,
        assessment.verdict.headline(),
        assessment.verdict.advice()
    );
    println!();
}
