//! Request types for the Fee Waiver Eligibility Engine API.

use serde::{Deserialize, Serialize};

use crate::models::{BenefitSource, HouseholdProfile, MilitaryStatus, PathwayId};

/// Request body for the `/eligibility` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// The household being evaluated.
    pub household: HouseholdRequest,
    /// The pathway the household is applying for.
    pub pathway_id: PathwayId,
}

/// Household information in an eligibility request.
///
/// Benefit sources arrive as a list and may repeat; they are collapsed into
/// a set on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdRequest {
    /// Number of people in the household.
    pub size: u32,
    /// Annual household income in whole dollars.
    pub annual_income: u64,
    /// Reported income and benefit sources.
    #[serde(default)]
    pub benefit_flags: Vec<BenefitSource>,
    /// Whether the applicant is currently homeless.
    #[serde(default)]
    pub is_homeless: bool,
    /// Whether the household claims extraordinary expenses.
    #[serde(default)]
    pub has_extraordinary_expenses: bool,
    /// Annual extraordinary expenses in whole dollars.
    #[serde(default)]
    pub extraordinary_expense_amount: Option<u64>,
    /// Military service status.
    #[serde(default)]
    pub military_status: MilitaryStatus,
    /// Two-letter state or territory code.
    pub state_code: String,
}

impl From<HouseholdRequest> for HouseholdProfile {
    fn from(req: HouseholdRequest) -> Self {
        HouseholdProfile {
            size: req.size,
            annual_income: req.annual_income,
            benefit_flags: req.benefit_flags.into_iter().collect(),
            is_homeless: req.is_homeless,
            has_extraordinary_expenses: req.has_extraordinary_expenses,
            extraordinary_expense_amount: req.extraordinary_expense_amount,
            military_status: req.military_status,
            state_code: req.state_code.trim().to_ascii_uppercase(),
        }
    }
}

/// Query parameters for the `/guidelines` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineQuery {
    /// Number of people in the household.
    pub household_size: u32,
    /// Two-letter state or territory code.
    pub state_code: String,
}
