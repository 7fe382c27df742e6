use serde::{Serialize, Serializer};

use super::error::HoursError;

/// A wall-clock time: 4-digit 24-hour digits (0000-2359) paired with the
/// display string the data store carries for it (e.g. "11:00AM").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDay {
    digits: u16,
    display: String,
}

impl TimeOfDay {
    /// Parses a zero-padded digit string like "1100". Rejects anything
    /// that does not denote a real wall-clock time.
    pub fn new(time_digits: &str, display: &str) -> Result<Self, HoursError> {
        if time_digits.len() != 4 || !time_digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(HoursError::InvalidTimeDigits(time_digits.to_string()));
        }
        let digits: u16 = time_digits
            .parse()
            .map_err(|_| HoursError::InvalidTimeDigits(time_digits.to_string()))?;
        if digits / 100 > 23 || digits % 100 > 59 {
            return Err(HoursError::InvalidTimeDigits(time_digits.to_string()));
        }
        Ok(Self {
            digits,
            display: display.to_string(),
        })
    }

    pub fn digits(&self) -> u16 {
        self.digits
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

// Responses carry only the display form; the digits are an evaluation
// detail.
impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_valid_digits() {
        let time = TimeOfDay::new("1100", "11:00AM").unwrap();
        assert_eq!(time.digits(), 1100);
        assert_eq!(time.display(), "11:00AM");
    }

    #[test]
    fn test_accepts_day_boundaries() {
        assert_eq!(TimeOfDay::new("0000", "12:00AM").unwrap().digits(), 0);
        assert_eq!(TimeOfDay::new("2359", "11:59PM").unwrap().digits(), 2359);
    }

    #[test]
    fn test_rejects_out_of_range_hours() {
        assert_eq!(
            TimeOfDay::new("2400", "24:00"),
            Err(HoursError::InvalidTimeDigits("2400".to_string()))
        );
    }

    #[test]
    fn test_rejects_out_of_range_minutes() {
        assert!(TimeOfDay::new("1160", "11:60AM").is_err());
        assert!(TimeOfDay::new("0999", "9:99AM").is_err());
    }

    #[test]
    fn test_rejects_non_numeric_and_wrong_width() {
        assert!(TimeOfDay::new("11am", "11am").is_err());
        assert!(TimeOfDay::new("130", "1:30AM").is_err());
        assert!(TimeOfDay::new("01300", "1:30PM").is_err());
        assert!(TimeOfDay::new("", "").is_err());
    }

    #[test]
    fn test_serializes_as_display_string() {
        let time = TimeOfDay::new("1500", "3:00PM").unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"3:00PM\"");
    }
}
