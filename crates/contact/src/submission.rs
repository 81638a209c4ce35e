use std::{borrow::Cow, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{CompanySize, Field};

/// Contact request sent by the site to `/api/contact`.
///
/// Blank optional fields travel as empty strings. The same struct doubles as
/// the form draft; `page_url` stays empty until the form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSubmission {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    pub last_name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email address is invalid")
    )]
    pub email: String,
    pub phone: String,
    pub company: String,
    #[validate(custom(function = "validate_company_size"))]
    pub company_size: String,
    pub title: String,
    pub message: String,
    pub page_url: String,
}

impl ContactSubmission {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Company => &self.company,
            Field::CompanySize => &self.company_size,
            Field::Title => &self.title,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Company => &mut self.company,
            Field::CompanySize => &mut self.company_size,
            Field::Title => &mut self.title,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn company_size(&self) -> Option<CompanySize> {
        CompanySize::from_str(&self.company_size).ok()
    }
}

fn validate_company_size(company_size: &str) -> Result<(), ValidationError> {
    if company_size.is_empty() || CompanySize::from_str(company_size).is_ok() {
        return Ok(());
    }

    let mut error = ValidationError::new("invalid_company_size");
    error.message = Some(Cow::from("Company size must be one of the listed ranges"));
    Err(error)
}
