//! [`Record`] implementation for [`Offer`]. Codes are normalized to upper case before the
//! store checks them for uniqueness.

use super::OfferError;
use crate::model::{
    is_valid_amount, normalize_code, Offer, OfferDraft, OfferFilter, OfferId, OfferPatch,
};
use async_trait::async_trait;
use chrono::Utc;
use grocer_store::Record;

const MAX_DISCOUNT_PERCENT: u8 = 90;

fn check_discount(percent: u8) -> Result<u8, OfferError> {
    if (1..=MAX_DISCOUNT_PERCENT).contains(&percent) {
        Ok(percent)
    } else {
        Err(OfferError::InvalidDiscount(percent))
    }
}

fn check_minimum(min_order: f64) -> Result<f64, OfferError> {
    if is_valid_amount(min_order) {
        Ok(min_order)
    } else {
        Err(OfferError::InvalidMinimum(min_order))
    }
}

fn is_valid_code(code: &str) -> bool {
    (3..=20).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}

#[async_trait]
impl Record for Offer {
    type Id = OfferId;
    type Draft = OfferDraft;
    type Patch = OfferPatch;
    type Filter = OfferFilter;
    type Action = ();
    type Outcome = ();
    type Context = ();
    type Error = OfferError;

    fn from_draft(id: OfferId, draft: OfferDraft) -> Result<Self, OfferError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(OfferError::EmptyTitle);
        }
        let code = normalize_code(&draft.code);
        if !is_valid_code(&code) {
            return Err(OfferError::InvalidCode(draft.code));
        }
        Ok(Self {
            id,
            title: title.to_string(),
            description: draft.description,
            code,
            discount_percent: check_discount(draft.discount_percent)?,
            min_order: check_minimum(draft.min_order)?,
            active: true,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &OfferFilter) -> bool {
        match filter {
            OfferFilter::Active => self.active,
            OfferFilter::Code(code) => self.code == normalize_code(code),
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    async fn on_update(&mut self, patch: OfferPatch, _ctx: &()) -> Result<(), OfferError> {
        if let Some(title) = patch.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(OfferError::EmptyTitle);
            }
            self.title = title.to_string();
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(percent) = patch.discount_percent {
            self.discount_percent = check_discount(percent)?;
        }
        if let Some(min_order) = patch.min_order {
            self.min_order = check_minimum(min_order)?;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), OfferError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(code: &str, percent: u8) -> OfferDraft {
        OfferDraft {
            title: "Monsoon sale".into(),
            description: None,
            code: code.into(),
            discount_percent: percent,
            min_order: 200.0,
        }
    }

    #[test]
    fn test_code_is_normalized() {
        let offer = Offer::from_draft(OfferId(1), draft(" rain15 ", 15)).unwrap();
        assert_eq!(offer.code, "RAIN15");
        assert!(offer.active);
        assert!(offer.matches(&OfferFilter::Code("Rain15".into())));
    }

    #[test]
    fn test_discount_bounds() {
        assert_eq!(
            Offer::from_draft(OfferId(1), draft("ZERO", 0)),
            Err(OfferError::InvalidDiscount(0))
        );
        assert_eq!(
            Offer::from_draft(OfferId(1), draft("GREEDY", 91)),
            Err(OfferError::InvalidDiscount(91))
        );
        assert!(Offer::from_draft(OfferId(1), draft("MAX", 90)).is_ok());
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(
            Offer::from_draft(OfferId(1), draft("10% OFF", 10)),
            Err(OfferError::InvalidCode("10% OFF".into()))
        );
    }
}
