//! Profile validation and body-mass index.

use crate::{Error, Result, UserProfile};

/// BMI bands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl UserProfile {
    /// Check the profile before it is saved
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Profile("name must not be empty".into()));
        }
        if !(1..=120).contains(&self.age) {
            return Err(Error::Profile(format!("age {} is out of range", self.age)));
        }
        if !(self.height > 0.0) {
            return Err(Error::Profile("height must be positive".into()));
        }
        if !(self.weight > 0.0) {
            return Err(Error::Profile("weight must be positive".into()));
        }
        Ok(())
    }

    /// Body-mass index rounded to one decimal, None without a usable height
    pub fn bmi(&self) -> Option<f64> {
        if self.height <= 0.0 {
            return None;
        }
        let meters = self.height / 100.0;
        let bmi = self.weight / (meters * meters);
        Some((bmi * 10.0).round() / 10.0)
    }

    pub fn bmi_category(&self) -> Option<BmiCategory> {
        self.bmi().map(BmiCategory::from_bmi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FitnessGoal, FitnessLevel, Gender};
    use chrono::NaiveDate;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Alex".into(),
            age: 28,
            gender: Gender::Other,
            height: 180.0,
            weight: 81.0,
            fitness_goal: FitnessGoal::Endurance,
            fitness_level: FitnessLevel::Advanced,
            created_at: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_bmi() {
        let p = profile();
        // 81 / 1.8² = 25.0
        assert_eq!(p.bmi(), Some(25.0));
        assert_eq!(p.bmi_category(), Some(BmiCategory::Overweight));
    }

    #[test]
    fn test_bmi_bands() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_validate() {
        assert!(profile().validate().is_ok());

        let mut p = profile();
        p.name = "  ".into();
        assert!(matches!(p.validate(), Err(Error::Profile(_))));

        let mut p = profile();
        p.age = 0;
        assert!(p.validate().is_err());

        let mut p = profile();
        p.weight = 0.0;
        assert!(p.validate().is_err());

        let mut p = profile();
        p.height = f64::NAN;
        assert!(p.validate().is_err());
    }
}
