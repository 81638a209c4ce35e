use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantArray};

/// Head-count buckets offered by the company size selector.
///
/// `Display`/`AsRef<str>` give the canonical stored value, [`CompanySize::label`]
/// the text shown to the visitor.
#[derive(
    EnumString,
    Display,
    VariantArray,
    IntoStaticStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    #[strum(serialize = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    #[strum(serialize = "11-50")]
    Small,
    #[serde(rename = "51-200")]
    #[strum(serialize = "51-200")]
    Medium,
    #[serde(rename = "201-500")]
    #[strum(serialize = "201-500")]
    Large,
    #[serde(rename = "501-1000")]
    #[strum(serialize = "501-1000")]
    XLarge,
    #[serde(rename = "1001-5000")]
    #[strum(serialize = "1001-5000")]
    Enterprise,
    #[serde(rename = "5001+")]
    #[strum(serialize = "5001+")]
    Global,
}

impl CompanySize {
    pub fn value(&self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanySize::Micro => "1-10 employees",
            CompanySize::Small => "11-50 employees",
            CompanySize::Medium => "51-200 employees",
            CompanySize::Large => "201-500 employees",
            CompanySize::XLarge => "501-1000 employees",
            CompanySize::Enterprise => "1001-5000 employees",
            CompanySize::Global => "5001+ employees",
        }
    }

    /// `(value, label)` pairs in selector order.
    pub fn options() -> impl Iterator<Item = (&'static str, &'static str)> {
        CompanySize::VARIANTS.iter().map(|size| (size.value(), size.label()))
    }
}

/// User editable fields of the contact form. `pageUrl` is filled in on submit
/// and has no entry here.
#[derive(EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    CompanySize,
    Title,
    Message,
}
