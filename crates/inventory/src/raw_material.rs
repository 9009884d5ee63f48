use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoflex_core::{DomainError, DomainResult, Entity, RawMaterialId, required_text};

/// Entity: RawMaterial.
///
/// Stock is a non-negative exact decimal (kg, m, units, ... the catalog does not
/// track units of measure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterial {
    id: RawMaterialId,
    code: String,
    name: String,
    stock_quantity: Decimal,
}

/// Unvalidated input for creating or updating a raw material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterialDraft {
    pub code: String,
    pub name: String,
    pub stock_quantity: Decimal,
}

impl RawMaterial {
    /// Build a validated raw material. Code and name are trimmed.
    pub fn new(id: RawMaterialId, draft: RawMaterialDraft) -> DomainResult<Self> {
        let (code, name, stock_quantity) = validate(draft)?;
        Ok(Self {
            id,
            code,
            name,
            stock_quantity,
        })
    }

    /// Replace every mutable field, keeping the identity.
    pub fn update(&mut self, draft: RawMaterialDraft) -> DomainResult<()> {
        let (code, name, stock_quantity) = validate(draft)?;
        self.code = code;
        self.name = name;
        self.stock_quantity = stock_quantity;
        Ok(())
    }

    pub fn id_typed(&self) -> RawMaterialId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock_quantity(&self) -> Decimal {
        self.stock_quantity
    }
}

impl Entity for RawMaterial {
    type Id = RawMaterialId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate(draft: RawMaterialDraft) -> DomainResult<(String, String, Decimal)> {
    let code = required_text("code", &draft.code)?;
    let name = required_text("name", &draft.name)?;
    if draft.stock_quantity < Decimal::ZERO {
        return Err(DomainError::validation("stock quantity cannot be negative"));
    }
    Ok((code, name, draft.stock_quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft(code: &str, name: &str, stock: Decimal) -> RawMaterialDraft {
        RawMaterialDraft {
            code: code.to_string(),
            name: name.to_string(),
            stock_quantity: stock,
        }
    }

    #[test]
    fn new_trims_code_and_name() {
        let rm = RawMaterial::new(RawMaterialId::new(), draft(" RM010 ", " Steel Sheet ", dec!(200.000)))
            .unwrap();
        assert_eq!(rm.code(), "RM010");
        assert_eq!(rm.name(), "Steel Sheet");
        assert_eq!(rm.stock_quantity(), dec!(200));
    }

    #[test]
    fn zero_stock_is_allowed() {
        let rm = RawMaterial::new(RawMaterialId::new(), draft("RM1", "Glue", Decimal::ZERO)).unwrap();
        assert!(rm.stock_quantity().is_zero());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let err = RawMaterial::new(RawMaterialId::new(), draft("RM1", "Glue", dec!(-0.001))).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("negative")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn blank_code_is_rejected() {
        let err = RawMaterial::new(RawMaterialId::new(), draft("  ", "Glue", dec!(1))).unwrap_err();
        assert_eq!(err, DomainError::validation("code cannot be empty"));
    }

    #[test]
    fn update_keeps_identity_and_leaves_state_on_error() {
        let id = RawMaterialId::new();
        let mut rm = RawMaterial::new(id, draft("RM1", "Glue", dec!(5))).unwrap();

        rm.update(draft("RM1-B", "Epoxy", dec!(7.5))).unwrap();
        assert_eq!(rm.id_typed(), id);
        assert_eq!(rm.code(), "RM1-B");
        assert_eq!(rm.stock_quantity(), dec!(7.5));

        let before = rm.clone();
        assert!(rm.update(draft("RM1-B", "", dec!(1))).is_err());
        assert_eq!(rm, before);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: any non-negative stock with a non-blank code/name is accepted verbatim.
            #[test]
            fn non_negative_stock_round_trips(
                code in "[A-Z]{2}[0-9]{1,5}",
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                milli in 0i64..10_000_000_000i64
            ) {
                let stock = Decimal::new(milli, 3);
                let rm = RawMaterial::new(RawMaterialId::new(), draft(&code, &name, stock)).unwrap();
                prop_assert_eq!(rm.stock_quantity(), stock);
                prop_assert_eq!(rm.code(), code.as_str());
            }
        }
    }
}
