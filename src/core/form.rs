//! Registration wizard steps and their flat form records

use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use crate::core::validation::filters;
use crate::core::validation::rules::RuleTable;
use crate::core::validation::validators::validate_fields;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const OWNER_PROFILE_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "email",
    "phone",
    "address",
    "city",
    "state",
    "zipCode",
    "emergencyContactName",
    "emergencyPhone",
    "emergencyRelationship",
];

const HORSE_INFO_FIELDS: &[&str] = &[
    "horseName",
    "breed",
    "age",
    "color",
    "markings",
    "medicalNotes",
];

const FACILITY_INFO_FIELDS: &[&str] = &[
    "barnName",
    "stallCount",
    "cameraCount",
    "installationType",
    "clinicName",
    "vetName",
    "vetPhone",
];

const CARD_FIELDS: &[&str] = &[
    "paymentMethod",
    "cardholderName",
    "cardNumber",
    "expiryDate",
    "cvv",
    "billingZip",
];

const ACH_FIELDS: &[&str] = &[
    "paymentMethod",
    "accountHolderName",
    "routingNumber",
    "accountNumber",
    "accountType",
];

/// Fields never written into a draft snapshot
pub const SECRET_FIELDS: &[&str] = &["cardNumber", "cvv", "routingNumber", "accountNumber"];

/// One page of the registration wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormStep {
    OwnerProfile,
    HorseInfo,
    FacilityInfo,
    Payment,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::OwnerProfile,
        FormStep::HorseInfo,
        FormStep::FacilityInfo,
        FormStep::Payment,
    ];

    /// URL segment for this step
    pub fn slug(&self) -> &'static str {
        match self {
            FormStep::OwnerProfile => "owner-profile",
            FormStep::HorseInfo => "horse-info",
            FormStep::FacilityInfo => "facility-info",
            FormStep::Payment => "payment",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.slug() == slug)
    }

    /// Key the browser stores this step's draft under
    pub fn storage_key(&self) -> &'static str {
        match self {
            FormStep::Payment => "registerPaymentFormData",
            _ => "registrationData",
        }
    }

    pub fn next(&self) -> Option<FormStep> {
        match self {
            FormStep::OwnerProfile => Some(FormStep::HorseInfo),
            FormStep::HorseInfo => Some(FormStep::FacilityInfo),
            FormStep::FacilityInfo => Some(FormStep::Payment),
            FormStep::Payment => None,
        }
    }

    /// Every field this step can carry
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            FormStep::OwnerProfile => OWNER_PROFILE_FIELDS.to_vec(),
            FormStep::HorseInfo => HORSE_INFO_FIELDS.to_vec(),
            FormStep::FacilityInfo => FACILITY_INFO_FIELDS.to_vec(),
            FormStep::Payment => {
                let mut fields = CARD_FIELDS.to_vec();
                fields.extend(ACH_FIELDS.iter().filter(|f| !CARD_FIELDS.contains(f)));
                fields
            }
        }
    }

    /// The fields that must validate for this step given the current data
    ///
    /// The payment step checks either card or ACH fields, never both.
    pub fn fields_for(&self, data: &FormData) -> &'static [&'static str] {
        match self {
            FormStep::OwnerProfile => OWNER_PROFILE_FIELDS,
            FormStep::HorseInfo => HORSE_INFO_FIELDS,
            FormStep::FacilityInfo => FACILITY_INFO_FIELDS,
            FormStep::Payment => match data.payment_method() {
                PaymentMethod::Card => CARD_FIELDS,
                PaymentMethod::Ach => ACH_FIELDS,
            },
        }
    }
}

/// How the customer pays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Ach,
}

/// Flat record of one wizard step's inputs, in entry order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: IndexMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Trimmed string form of a field, `None` when absent or blank
    pub fn get_str(&self, field: &str) -> Option<String> {
        self.get(field)
            .map(FieldValue::to_trimmed_string)
            .filter(|s| !s.is_empty())
    }

    pub fn get_u32(&self, field: &str) -> Option<u32> {
        self.get(field)
            .and_then(FieldValue::as_integer)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.shift_remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn payment_method(&self) -> PaymentMethod {
        match self.get_str("paymentMethod").as_deref() {
            Some("ach") => PaymentMethod::Ach,
            _ => PaymentMethod::Card,
        }
    }

    /// Apply each field's filter
    pub fn normalized(self) -> Self {
        self.fields
            .into_iter()
            .map(|(field, value)| {
                let filtered = filters::filter_for(&field)(value);
                (field, filtered)
            })
            .collect()
    }

    /// Validate the fields belonging to `step`
    pub fn validate(&self, table: &RuleTable, step: FormStep) -> Result<(), ValidationError> {
        validate_fields(table, step.fields_for(self).iter().copied(), |f| self.get(f))
    }

    /// Draft of this step's fields for browser storage, secrets removed
    pub fn snapshot(&self, step: FormStep) -> Value {
        let allowed = step.fields();
        let draft: serde_json::Map<String, Value> = self
            .iter()
            .filter(|(field, _)| allowed.contains(field) && !SECRET_FIELDS.contains(field))
            .filter_map(|(field, value)| {
                serde_json::to_value(value)
                    .ok()
                    .map(|json| (field.to_string(), json))
            })
            .collect();
        Value::Object(draft)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Validate one wizard step of `data` against `table`
pub fn validate_form(
    table: &RuleTable,
    step: FormStep,
    data: &FormData,
) -> Result<(), ValidationError> {
    data.validate(table, step)
}
