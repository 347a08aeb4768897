//! Interactive terminal form.
//!
//! Every question shows its default; an empty answer (or end of input) keeps
//! it. Invalid answers are reported and asked again.

use heart_core::schema::{
    parse_in_range, AGE_RANGE, CHOLESTEROL_RANGE, MAJOR_VESSELS_RANGE, MAX_HEART_RATE_RANGE,
    OLDPEAK_RANGE, RESTING_BP_RANGE,
};
use heart_core::{Categorical, Feature, ModelKind, PatientInput, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

pub struct Form<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Form<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one trimmed line; `None` at end of input
    fn read_answer(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn numeric<T>(&mut self, feature: Feature, range: &RangeInclusive<T>, default: T) -> Result<T>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        loop {
            // Precision only affects floats: oldpeak shows as [0.0-6.0] (1.0)
            write!(
                self.output,
                "{} [{:.1}-{:.1}] ({:.1}): ",
                feature.label(),
                range.start(),
                range.end(),
                default
            )?;

            let answer = match self.read_answer()? {
                Some(answer) if !answer.is_empty() => answer,
                _ => return Ok(default),
            };

            match parse_in_range(feature, &answer, range) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "  ! {}", e)?,
            }
        }
    }

    /// One categorical form field; unknown labels name the field
    fn field_choice<T>(&mut self, feature: Feature, default: T) -> Result<T>
    where
        T: Categorical + Display,
    {
        self.choice(feature.label(), feature.name(), default)
    }

    fn choice<T>(&mut self, title: &str, field: &'static str, default: T) -> Result<T>
    where
        T: Categorical + Display,
    {
        loop {
            writeln!(self.output, "{}", title)?;
            for (i, option) in T::ALL.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, option)?;
            }
            write!(self.output, "> ({}): ", default)?;

            let answer = match self.read_answer()? {
                Some(answer) if !answer.is_empty() => answer,
                _ => return Ok(default),
            };

            // Accept either the option number or its label
            if let Ok(n) = answer.parse::<usize>() {
                if let Some(option) = n.checked_sub(1).and_then(|i| T::ALL.get(i)) {
                    return Ok(*option);
                }
                writeln!(self.output, "  ! Choose 1-{}", T::ALL.len())?;
                continue;
            }

            match T::parse_label(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "  ! {}", e.for_field(field))?,
            }
        }
    }

    /// Ask for all 13 fields in schema order
    pub fn patient(&mut self, defaults: &PatientInput) -> Result<PatientInput> {
        Ok(PatientInput {
            age: self.numeric(Feature::Age, &AGE_RANGE, defaults.age)?,
            sex: self.field_choice(Feature::Sex, defaults.sex)?,
            chest_pain_type: self.field_choice(Feature::ChestPainType, defaults.chest_pain_type)?,
            resting_bp: self.numeric(Feature::RestingBp, &RESTING_BP_RANGE, defaults.resting_bp)?,
            cholesterol: self.numeric(
                Feature::Cholesterol,
                &CHOLESTEROL_RANGE,
                defaults.cholesterol,
            )?,
            fasting_blood_sugar: self
                .field_choice(Feature::FastingBloodSugar, defaults.fasting_blood_sugar)?,
            resting_ecg: self.field_choice(Feature::RestingEcg, defaults.resting_ecg)?,
            max_heart_rate: self.numeric(
                Feature::MaxHeartRate,
                &MAX_HEART_RATE_RANGE,
                defaults.max_heart_rate,
            )?,
            exercise_angina: self
                .field_choice(Feature::ExerciseAngina, defaults.exercise_angina)?,
            oldpeak: self.numeric(Feature::Oldpeak, &OLDPEAK_RANGE, defaults.oldpeak)?,
            st_slope: self.field_choice(Feature::StSlope, defaults.st_slope)?,
            major_vessels: self.numeric(
                Feature::MajorVessels,
                &MAJOR_VESSELS_RANGE,
                defaults.major_vessels,
            )?,
            thalassemia: self.field_choice(Feature::Thalassemia, defaults.thalassemia)?,
        })
    }

    pub fn model(&mut self, default: ModelKind) -> Result<ModelKind> {
        self.choice("Select Model", ModelKind::FIELD, default)
    }

    /// Wait for the explicit predict action.
    ///
    /// `false` means the user quit or input ended before they pressed Enter.
    pub fn confirm(&mut self) -> Result<bool> {
        writeln!(self.output, "─────────────────────────────────────────")?;
        writeln!(self.output, "Press Enter to predict risk")?;
        writeln!(self.output, "  'q' + Enter to quit")?;
        write!(self.output, "> ")?;

        match self.read_answer()? {
            Some(answer) => Ok(!answer.eq_ignore_ascii_case("q")),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heart_core::{ChestPainType, Sex, Thalassemia};
    use std::io::Cursor;

    fn form(input: &str) -> Form<Cursor<Vec<u8>>, Vec<u8>> {
        Form::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(form: &Form<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&form.output).to_string()
    }

    #[test]
    fn test_empty_answers_keep_defaults() {
        let mut form = form(&"\n".repeat(13));
        let patient = form.patient(&PatientInput::default()).unwrap();
        assert_eq!(patient, PatientInput::default());
    }

    #[test]
    fn test_end_of_input_keeps_defaults() {
        let mut form = form("");
        let patient = form.patient(&PatientInput::default()).unwrap();
        assert_eq!(patient, PatientInput::default());
        assert_eq!(form.model(ModelKind::RandomForest).unwrap(), ModelKind::RandomForest);
    }

    #[test]
    fn test_answers_by_number_and_label() {
        // age, sex, cp, bp, chol, fbs, ecg, hr, exang, oldpeak, slope, ca, thal
        let answers = "63\n2\nAsymptomatic\n145\n233\nno\n1\n150\nn\n2.3\n3\n0\nreversible defect\n";
        let mut form = form(answers);

        let patient = form.patient(&PatientInput::default()).unwrap();

        assert_eq!(patient.age, 63);
        assert_eq!(patient.sex, Sex::Female);
        assert_eq!(patient.chest_pain_type, ChestPainType::Asymptomatic);
        assert_eq!(patient.oldpeak, 2.3);
        assert_eq!(patient.thalassemia, Thalassemia::ReversibleDefect);
    }

    #[test]
    fn test_invalid_answer_is_asked_again() {
        let mut form = form("150\nabc\n70\n");
        let age = form.numeric(Feature::Age, &AGE_RANGE, 45).unwrap();

        assert_eq!(age, 70);
        let out = output(&form);
        assert!(out.contains("age must be between 20 and 100, got 150"));
        assert!(out.contains("age must be a number"));
    }

    #[test]
    fn test_choice_number_out_of_range() {
        let mut form = form("9\n4\n");
        let model = form.model(ModelKind::default()).unwrap();

        assert_eq!(model, ModelKind::RandomForest);
        assert!(output(&form).contains("Choose 1-4"));
    }

    #[test]
    fn test_confirm() {
        assert!(form("\n").confirm().unwrap());
        assert!(!form("q\n").confirm().unwrap());
        assert!(!form("Q\n").confirm().unwrap());
    }

    #[test]
    fn test_confirm_at_end_of_input_does_not_predict() {
        assert!(!form("").confirm().unwrap());

        // Every field answered, but input closes before the trigger
        let mut form = form(&"\n".repeat(14));
        form.patient(&PatientInput::default()).unwrap();
        form.model(ModelKind::default()).unwrap();
        assert!(!form.confirm().unwrap());
    }

    #[test]
    fn test_unknown_yes_no_names_field() {
        let mut form = form("maybe\nno\n");
        let answer = form
            .field_choice(Feature::ExerciseAngina, heart_core::YesNo::Yes)
            .unwrap();

        assert_eq!(answer, heart_core::YesNo::No);
        assert!(output(&form).contains("Unknown exercise_angina label: \"maybe\""));
    }

    #[test]
    fn test_float_prompt_shows_one_decimal() {
        let mut form = form("\n");
        let oldpeak = form.numeric(Feature::Oldpeak, &OLDPEAK_RANGE, 1.0).unwrap();

        assert_eq!(oldpeak, 1.0);
        assert!(output(&form).contains("[0.0-6.0] (1.0): "));
    }

    #[test]
    fn test_integer_prompt_has_no_decimals() {
        let mut form = form("\n");
        form.numeric(Feature::Age, &AGE_RANGE, 45).unwrap();

        assert!(output(&form).contains("Age [20-100] (45): "));
    }

    #[test]
    fn test_choice_lists_options() {
        let mut form = form("\n");
        form.field_choice(Feature::RestingEcg, heart_core::RestingEcg::Normal)
            .unwrap();

        let out = output(&form);
        assert!(out.contains("1) Normal"));
        assert!(out.contains("2) ST-T Wave Abnormality"));
        assert!(out.contains("3) Left Ventricular Hypertrophy"));
    }
}
