use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Password complexity policy. At most one policy should be marked as the
/// default; the default policy is the one enforced on password changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PasswordPolicy {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub min_length: i32,
    pub max_length: i32,
    pub min_upper_char: i32,
    pub min_lower_char: i32,
    pub min_number: i32,
    pub min_special_char: i32,
    pub default_policy: bool,
    pub disabled: bool,
    pub created_at: NaiveDateTime,
}

impl PasswordPolicy {
    /// Checks a candidate password against this policy.
    pub fn check(&self, password: &str) -> Result<(), String> {
        let length = password.chars().count() as i32;
        if length < self.min_length {
            return Err(format!(
                "password must be at least {} characters long",
                self.min_length
            ));
        }
        if self.max_length > 0 && length > self.max_length {
            return Err(format!(
                "password must be at most {} characters long",
                self.max_length
            ));
        }
        let upper = password.chars().filter(|c| c.is_uppercase()).count() as i32;
        let lower = password.chars().filter(|c| c.is_lowercase()).count() as i32;
        let digits = password.chars().filter(|c| c.is_ascii_digit()).count() as i32;
        let special = password
            .chars()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
            .count() as i32;
        if upper < self.min_upper_char {
            return Err(format!(
                "password must contain at least {} uppercase characters",
                self.min_upper_char
            ));
        }
        if lower < self.min_lower_char {
            return Err(format!(
                "password must contain at least {} lowercase characters",
                self.min_lower_char
            ));
        }
        if digits < self.min_number {
            return Err(format!(
                "password must contain at least {} digits",
                self.min_number
            ));
        }
        if special < self.min_special_char {
            return Err(format!(
                "password must contain at least {} special characters",
                self.min_special_char
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewPasswordPolicy {
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub min_length: i32,
    #[validate(range(min = 0))]
    pub max_length: i32,
    #[serde(default)]
    pub min_upper_char: i32,
    #[serde(default)]
    pub min_lower_char: i32,
    #[serde(default)]
    pub min_number: i32,
    #[serde(default)]
    pub min_special_char: i32,
    #[serde(default)]
    pub default_policy: bool,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UpdatePasswordPolicy {
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 0))]
    pub min_length: i32,
    #[validate(range(min = 0))]
    pub max_length: i32,
    #[serde(default)]
    pub min_upper_char: i32,
    #[serde(default)]
    pub min_lower_char: i32,
    #[serde(default)]
    pub min_number: i32,
    #[serde(default)]
    pub min_special_char: i32,
    #[serde(default)]
    pub default_policy: bool,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchPasswordPolicy {
    pub code: Option<String>,
    pub name: Option<String>,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub min_upper_char: Option<i32>,
    pub min_lower_char: Option<i32>,
    pub min_number: Option<i32>,
    pub min_special_char: Option<i32>,
    pub default_policy: Option<bool>,
    pub disabled: Option<bool>,
}

impl PatchPasswordPolicy {
    pub fn apply(self, current: &PasswordPolicy) -> UpdatePasswordPolicy {
        UpdatePasswordPolicy {
            code: self.code.unwrap_or_else(|| current.code.clone()),
            name: self.name.unwrap_or_else(|| current.name.clone()),
            min_length: self.min_length.unwrap_or(current.min_length),
            max_length: self.max_length.unwrap_or(current.max_length),
            min_upper_char: self.min_upper_char.unwrap_or(current.min_upper_char),
            min_lower_char: self.min_lower_char.unwrap_or(current.min_lower_char),
            min_number: self.min_number.unwrap_or(current.min_number),
            min_special_char: self.min_special_char.unwrap_or(current.min_special_char),
            default_policy: self.default_policy.unwrap_or(current.default_policy),
            disabled: self.disabled.unwrap_or(current.disabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn policy() -> PasswordPolicy {
        PasswordPolicy {
            id: Uuid::new_v4(),
            code: "default".into(),
            name: "Default".into(),
            min_length: 8,
            max_length: 64,
            min_upper_char: 1,
            min_lower_char: 1,
            min_number: 1,
            min_special_char: 0,
            default_policy: true,
            disabled: false,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn accepts_conforming_password() {
        assert!(policy().check("Sufficient1").is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let err = policy().check("Ab1").unwrap_err();
        assert!(err.contains("at least 8"));
    }

    #[test]
    fn rejects_missing_character_classes() {
        assert!(policy().check("lowercase1only").is_err());
        assert!(policy().check("NODIGITSHERE").is_err());
    }
}
