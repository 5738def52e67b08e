//! Household profile and related types.
//!
//! A [`HouseholdProfile`] is the applicant-side input to the eligibility
//! cascade. It is built fresh for every evaluation and never persisted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::region::is_recognized_state_code;

/// A source of household income or public assistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitSource {
    /// Wages from an employer.
    Employment,
    /// Self-employment income.
    SelfEmployment,
    /// Social Security retirement or disability benefits.
    SocialSecurity,
    /// Supplemental Security Income.
    Ssi,
    /// Temporary Assistance for Needy Families.
    Tanf,
    /// Medicaid.
    Medicaid,
    /// Supplemental Nutrition Assistance Program.
    Snap,
    /// Unemployment insurance.
    Unemployment,
    /// Pension or retirement plan income.
    Pension,
    /// Any other source.
    Other,
}

impl BenefitSource {
    /// Returns true if membership in this program is a means-tested benefit
    /// that qualifies a household for a fee waiver on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use fee_waiver_engine::models::BenefitSource;
    ///
    /// assert!(BenefitSource::Snap.is_means_tested());
    /// assert!(!BenefitSource::Pension.is_means_tested());
    /// ```
    pub fn is_means_tested(self) -> bool {
        matches!(
            self,
            BenefitSource::Ssi | BenefitSource::Tanf | BenefitSource::Medicaid | BenefitSource::Snap
        )
    }

    /// Returns the program name as shown to applicants.
    pub fn label(self) -> &'static str {
        match self {
            BenefitSource::Employment => "Employment",
            BenefitSource::SelfEmployment => "Self-employment",
            BenefitSource::SocialSecurity => "Social Security",
            BenefitSource::Ssi => "SSI",
            BenefitSource::Tanf => "TANF",
            BenefitSource::Medicaid => "Medicaid",
            BenefitSource::Snap => "SNAP",
            BenefitSource::Unemployment => "Unemployment",
            BenefitSource::Pension => "Pension",
            BenefitSource::Other => "Other",
        }
    }

    /// Returns the wire name of this source.
    pub fn as_str(self) -> &'static str {
        match self {
            BenefitSource::Employment => "employment",
            BenefitSource::SelfEmployment => "self_employment",
            BenefitSource::SocialSecurity => "social_security",
            BenefitSource::Ssi => "ssi",
            BenefitSource::Tanf => "tanf",
            BenefitSource::Medicaid => "medicaid",
            BenefitSource::Snap => "snap",
            BenefitSource::Unemployment => "unemployment",
            BenefitSource::Pension => "pension",
            BenefitSource::Other => "other",
        }
    }
}

/// Military service status of the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilitaryStatus {
    /// Currently serving on active duty or in the Selected Reserve.
    Active,
    /// Honorably separated from service.
    Veteran,
    /// No qualifying service.
    #[default]
    None,
}

impl MilitaryStatus {
    /// Returns the wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            MilitaryStatus::Active => "active",
            MilitaryStatus::Veteran => "veteran",
            MilitaryStatus::None => "none",
        }
    }
}

/// The financial and circumstantial profile of an applicant's household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    /// Number of people in the household, including the applicant.
    pub size: u32,
    /// Annual household income in whole dollars.
    pub annual_income: u64,
    /// Income and benefit sources reported by the household.
    #[serde(default)]
    pub benefit_flags: BTreeSet<BenefitSource>,
    /// Whether the applicant is currently homeless.
    #[serde(default)]
    pub is_homeless: bool,
    /// Whether the household has extraordinary expenses.
    #[serde(default)]
    pub has_extraordinary_expenses: bool,
    /// Annual extraordinary expenses in whole dollars.
    #[serde(default)]
    pub extraordinary_expense_amount: Option<u64>,
    /// Military service status of the applicant.
    #[serde(default)]
    pub military_status: MilitaryStatus,
    /// Two-letter USPS state or territory code.
    pub state_code: String,
}

impl HouseholdProfile {
    /// Creates a household with no benefits, expenses, or military service.
    ///
    /// # Examples
    ///
    /// ```
    /// use fee_waiver_engine::models::HouseholdProfile;
    ///
    /// let household = HouseholdProfile::new(1, 15_000, "CA");
    /// assert_eq!(household.size, 1);
    /// assert!(household.benefit_flags.is_empty());
    /// ```
    pub fn new(size: u32, annual_income: u64, state_code: impl Into<String>) -> Self {
        Self {
            size,
            annual_income,
            benefit_flags: BTreeSet::new(),
            is_homeless: false,
            has_extraordinary_expenses: false,
            extraordinary_expense_amount: None,
            military_status: MilitaryStatus::None,
            state_code: state_code.into(),
        }
    }

    /// Returns the means-tested benefits this household receives, in a stable order.
    pub fn means_tested_benefits(&self) -> Vec<BenefitSource> {
        self.benefit_flags
            .iter()
            .copied()
            .filter(|source| source.is_means_tested())
            .collect()
    }

    /// Returns the extraordinary expenses that count against income.
    ///
    /// Zero when the household does not claim extraordinary expenses, or
    /// claims them without an amount.
    pub fn extraordinary_expenses(&self) -> u64 {
        if self.has_extraordinary_expenses {
            self.extraordinary_expense_amount.unwrap_or(0)
        } else {
            0
        }
    }

    /// Returns true if the applicant is active duty or a veteran.
    pub fn has_military_service(&self) -> bool {
        matches!(
            self.military_status,
            MilitaryStatus::Active | MilitaryStatus::Veteran
        )
    }

    /// Checks the profile against the constraints the HTTP layer enforces.
    ///
    /// The eligibility cascade accepts any profile. This check is the
    /// stricter boundary: household size must be at least 1 and the state
    /// code must be a recognized state, DC, or territory.
    pub fn validate(&self) -> EngineResult<()> {
        if self.size == 0 {
            return Err(EngineError::InvalidHousehold {
                field: "size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if !is_recognized_state_code(&self.state_code) {
            return Err(EngineError::InvalidHousehold {
                field: "state_code".to_string(),
                message: format!("'{}' is not a recognized state or territory", self.state_code),
            });
        }

        Ok(())
    }
}
