use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoflex_core::{DomainError, DomainResult, Entity, ProductId, required_text};

/// Entity: Product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    code: String,
    name: String,
    /// Monetary value of one produced unit.
    price: Decimal,
}

/// Unvalidated input for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub price: Decimal,
}

impl Product {
    /// Build a validated product. Code and name are trimmed; price must be positive.
    pub fn new(id: ProductId, draft: ProductDraft) -> DomainResult<Self> {
        let (code, name, price) = validate(draft)?;
        Ok(Self {
            id,
            code,
            name,
            price,
        })
    }

    /// Replace every mutable field, keeping the identity.
    pub fn update(&mut self, draft: ProductDraft) -> DomainResult<()> {
        let (code, name, price) = validate(draft)?;
        self.code = code;
        self.name = name;
        self.price = price;
        Ok(())
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate(draft: ProductDraft) -> DomainResult<(String, String, Decimal)> {
    let code = required_text("code", &draft.code)?;
    let name = required_text("name", &draft.name)?;
    if draft.price <= Decimal::ZERO {
        return Err(DomainError::validation("price must be positive"));
    }
    Ok((code, name, draft.price))
}
