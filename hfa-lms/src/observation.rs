use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::HfaError;

/// Sex of the subject. Each sex has its own reference table.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = HfaError;

    /// Accepts the English labels plus the Indonesian form labels
    /// ("Laki-laki" / "Perempuan") used by the screening sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "boy" | "boys" | "laki-laki" | "l" => Ok(Sex::Male),
            "female" | "f" | "girl" | "girls" | "perempuan" | "p" => Ok(Sex::Female),
            other => Err(HfaError::UnknownSex(other.to_string())),
        }
    }
}

/// A single height measurement of one subject.
///
/// `observation_date` is always explicit; callers that want "today" must
/// read the clock themselves and pass it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub birth_date: NaiveDate,
    pub observation_date: NaiveDate,
    pub sex: Sex,
    pub height_cm: f64,
}

impl Observation {
    pub fn new(birth_date: NaiveDate, observation_date: NaiveDate, sex: Sex, height_cm: f64) -> Self {
        Observation {
            birth_date,
            observation_date,
            sex,
            height_cm,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Sex;
    use crate::error::HfaError;

    #[test]
    fn test_sex_from_str() {
        assert_eq!("male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("Laki-laki".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" Perempuan ".parse::<Sex>().unwrap(), Sex::Female);
    }

    #[test]
    fn test_sex_from_str_unknown() {
        let err = "x".parse::<Sex>().unwrap_err();
        assert!(matches!(err, HfaError::UnknownSex(ref s) if s == "x"));
    }

    #[test]
    fn test_sex_display_round_trips() {
        for sex in [Sex::Male, Sex::Female] {
            assert_eq!(sex.to_string().parse::<Sex>().unwrap(), sex);
        }
    }
}
