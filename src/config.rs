use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{BillingError, Result};

/// billing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    pub tuition: TuitionSchedule,
    pub reconciliation: ReconciliationConfig,
}

/// per-unit tuition rates by scholarship classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuitionSchedule {
    pub regular_per_unit: Money,
    pub scholar_per_unit: Money,
}

/// tolerances applied when attributing payment increments to installments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// absolute slack, in currency units, when comparing an increment
    /// against an installment amount
    pub tolerance: Money,
}

impl BillingConfig {
    /// standard configuration: ₱800/unit regular, ₱500/unit scholar,
    /// one peso of reconciliation tolerance
    pub fn standard() -> Self {
        Self {
            tuition: TuitionSchedule {
                regular_per_unit: Money::from_major(800),
                scholar_per_unit: Money::from_major(500),
            },
            reconciliation: ReconciliationConfig {
                tolerance: Money::from_major(1),
            },
        }
    }

    /// validate rate ordering and signs
    pub fn validate(&self) -> Result<()> {
        if !self.tuition.regular_per_unit.is_positive()
            || !self.tuition.scholar_per_unit.is_positive()
        {
            return Err(BillingError::InvalidConfiguration {
                message: "per-unit rates must be positive".to_string(),
            });
        }

        if self.tuition.scholar_per_unit >= self.tuition.regular_per_unit {
            return Err(BillingError::InvalidConfiguration {
                message: "scholar rate must be below the regular rate".to_string(),
            });
        }

        if self.reconciliation.tolerance.is_negative() {
            return Err(BillingError::InvalidConfiguration {
                message: "reconciliation tolerance cannot be negative".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config_is_valid() {
        assert!(BillingConfig::standard().validate().is_ok());
    }

    #[test]
    fn test_scholar_rate_must_be_lower() {
        let mut config = BillingConfig::standard();
        config.tuition.scholar_per_unit = config.tuition.regular_per_unit;
        assert!(config.validate().is_err());
    }
}
