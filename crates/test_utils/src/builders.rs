//! Test Data Builders
//!
//! Builders with sensible defaults so tests specify only the fields they
//! care about.

use core_kernel::Money;
use domain_claims::{ClaimSubmission, ProcessorOptions};

use crate::fixtures::MoneyFixtures;

/// Builder for claim submissions
pub struct ClaimSubmissionBuilder {
    hospital_id: String,
    hospital_name: String,
    patient_name: String,
    payer_name: String,
    claimed_amount: Money,
    total_bill_amount: Money,
    processor_options: ProcessorOptions,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    pub fn new() -> Self {
        Self {
            hospital_id: "HOSP-1".to_string(),
            hospital_name: "City Care".to_string(),
            patient_name: "R. Iyer".to_string(),
            payer_name: "Acme Health".to_string(),
            claimed_amount: MoneyFixtures::small_claim(),
            total_bill_amount: MoneyFixtures::small_bill(),
            processor_options: ProcessorOptions::default(),
        }
    }

    pub fn with_hospital(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.hospital_id = id.into();
        self.hospital_name = name.into();
        self
    }

    pub fn with_claimed_amount(mut self, amount: Money) -> Self {
        self.claimed_amount = amount;
        self
    }

    pub fn with_total_bill_amount(mut self, amount: Money) -> Self {
        self.total_bill_amount = amount;
        self
    }

    pub fn with_processor_options(mut self, options: ProcessorOptions) -> Self {
        self.processor_options = options;
        self
    }

    pub fn build(self) -> ClaimSubmission {
        ClaimSubmission {
            hospital_id: self.hospital_id,
            hospital_name: self.hospital_name,
            patient_name: self.patient_name,
            payer_name: self.payer_name,
            claimed_amount: self.claimed_amount,
            total_bill_amount: self.total_bill_amount,
            processor_options: self.processor_options,
        }
    }
}
