//! [`Record`] implementation for [`ServiceArea`].

use super::AreaError;
use crate::model::{is_valid_amount, AreaDraft, AreaFilter, AreaId, AreaPatch, ServiceArea};
use async_trait::async_trait;
use grocer_store::Record;

/// Upper-cases and trims a postal code for storage and lookup.
pub fn normalize_postal_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn is_valid_postal_code(code: &str) -> bool {
    (3..=10).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

fn check_fee(fee: f64) -> Result<f64, AreaError> {
    if is_valid_amount(fee) {
        Ok(fee)
    } else {
        Err(AreaError::InvalidFee(fee))
    }
}

#[async_trait]
impl Record for ServiceArea {
    type Id = AreaId;
    type Draft = AreaDraft;
    type Patch = AreaPatch;
    type Filter = AreaFilter;
    type Action = ();
    type Outcome = ();
    type Context = ();
    type Error = AreaError;

    fn from_draft(id: AreaId, draft: AreaDraft) -> Result<Self, AreaError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(AreaError::EmptyName);
        }
        let postal_code = normalize_postal_code(&draft.postal_code);
        if !is_valid_postal_code(&postal_code) {
            return Err(AreaError::InvalidPostalCode(draft.postal_code));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            postal_code,
            delivery_fee: check_fee(draft.delivery_fee)?,
            active: true,
        })
    }

    fn matches(&self, filter: &AreaFilter) -> bool {
        match filter {
            AreaFilter::PostalCode(code) => self.postal_code == normalize_postal_code(code),
            AreaFilter::Active => self.active,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.postal_code.clone())
    }

    async fn on_update(&mut self, patch: AreaPatch, _ctx: &()) -> Result<(), AreaError> {
        if let Some(name) = patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AreaError::EmptyName);
            }
            self.name = name.to_string();
        }
        if let Some(fee) = patch.delivery_fee {
            self.delivery_fee = check_fee(fee)?;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), AreaError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(postal_code: &str, fee: f64) -> AreaDraft {
        AreaDraft {
            name: "Indiranagar".into(),
            postal_code: postal_code.into(),
            delivery_fee: fee,
        }
    }

    #[test]
    fn test_postal_code_normalized_and_matched() {
        let area = ServiceArea::from_draft(AreaId(1), draft(" sw1a 1aa", 30.0)).unwrap();
        assert_eq!(area.postal_code, "SW1A 1AA");
        assert!(area.matches(&AreaFilter::PostalCode("sw1a 1aa ".into())));
        assert_eq!(area.unique_key().as_deref(), Some("SW1A 1AA"));
    }

    #[test]
    fn test_rejects_negative_fee_and_bad_code() {
        assert_eq!(
            ServiceArea::from_draft(AreaId(1), draft("560038", -1.0)),
            Err(AreaError::InvalidFee(-1.0))
        );
        assert_eq!(
            ServiceArea::from_draft(AreaId(1), draft("56-0038", 10.0)),
            Err(AreaError::InvalidPostalCode("56-0038".into()))
        );
    }
}
