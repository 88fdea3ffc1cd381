//! Transaction builders and validation for the ledger.
//!
//! Provides a [`TransactionBuilder`] that enforces the entity contract of
//! each entry type: a player side must name the player, while world and
//! void sides carry no id. Builders validate inputs before producing a
//! [`LedgerEntry`].

use chrono::Utc;

use foodgame_types::{
    EntityType, LedgerEntry, LedgerEntryId, LedgerEntryType, MarketId, PlayerId, Resource,
};

use crate::LedgerError;

// ---------------------------------------------------------------------------
// Transaction builder
// ---------------------------------------------------------------------------

/// Builder for constructing validated [`LedgerEntry`] values.
///
/// Enforces that every entry has a strictly positive quantity and the
/// correct source/destination entity types for the given
/// [`LedgerEntryType`].
///
/// # Examples
///
/// ```
/// use foodgame_ledger::TransactionBuilder;
/// use foodgame_types::{LedgerEntryType, PlayerId, Resource};
///
/// let entry = TransactionBuilder::new(1, LedgerEntryType::Production, Resource::Coins)
///     .from_world()
///     .to_player(PlayerId::named("alice"))
///     .quantity(5)
///     .reason("ENERGY_TO_COINS".to_owned())
///     .build();
///
/// assert!(entry.is_ok());
/// ```
#[derive(Debug)]
pub struct TransactionBuilder {
    day: u64,
    entry_type: LedgerEntryType,
    resource: Resource,
    from_entity: Option<PlayerId>,
    from_entity_type: Option<EntityType>,
    to_entity: Option<PlayerId>,
    to_entity_type: Option<EntityType>,
    quantity: Option<i64>,
    reason: Option<String>,
    reference_id: Option<MarketId>,
}

impl TransactionBuilder {
    /// Start building a ledger entry for the given day, entry type, and
    /// resource.
    pub const fn new(day: u64, entry_type: LedgerEntryType, resource: Resource) -> Self {
        Self {
            day,
            entry_type,
            resource,
            from_entity: None,
            from_entity_type: None,
            to_entity: None,
            to_entity_type: None,
            quantity: None,
            reason: None,
            reference_id: None,
        }
    }

    /// Set a player as the source (debit side).
    #[must_use]
    pub fn from_player(mut self, player: PlayerId) -> Self {
        self.from_entity = Some(player);
        self.from_entity_type = Some(EntityType::Player);
        self
    }

    /// Set the world as the source.
    #[must_use]
    pub fn from_world(mut self) -> Self {
        self.from_entity = None;
        self.from_entity_type = Some(EntityType::World);
        self
    }

    /// Set a player as the destination (credit side).
    #[must_use]
    pub fn to_player(mut self, player: PlayerId) -> Self {
        self.to_entity = Some(player);
        self.to_entity_type = Some(EntityType::Player);
        self
    }

    /// Set the void as the destination.
    #[must_use]
    pub fn to_void(mut self) -> Self {
        self.to_entity = None;
        self.to_entity_type = Some(EntityType::Void);
        self
    }

    /// Set the quantity of resource transferred.
    #[must_use]
    pub const fn quantity(mut self, qty: i64) -> Self {
        self.quantity = Some(qty);
        self
    }

    /// Set the human-readable reason for the transfer.
    #[must_use]
    pub fn reason(mut self, reason: String) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Link the entry to a market listing.
    #[must_use]
    pub const fn reference_id(mut self, id: MarketId) -> Self {
        self.reference_id = Some(id);
        self
    }

    /// Validate inputs and produce a [`LedgerEntry`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroQuantity`] if the quantity is zero.
    /// Returns [`LedgerError::NegativeQuantity`] if the quantity is negative.
    /// Returns [`LedgerError::MissingField`] if required fields are not set.
    /// Returns [`LedgerError::InvalidEntityType`] if the from/to entity types
    /// do not match the expected types for the entry type.
    pub fn build(self) -> Result<LedgerEntry, LedgerError> {
        let quantity = self.quantity.ok_or(LedgerError::MissingField("quantity"))?;
        let reason = self.reason.ok_or(LedgerError::MissingField("reason"))?;

        if quantity == 0 {
            return Err(LedgerError::ZeroQuantity);
        }
        if quantity < 0 {
            return Err(LedgerError::NegativeQuantity { quantity });
        }

        validate_entity_types(
            self.entry_type,
            self.from_entity_type,
            self.to_entity_type,
        )?;

        Ok(LedgerEntry {
            id: LedgerEntryId::new(),
            day: self.day,
            entry_type: self.entry_type,
            from_entity: self.from_entity,
            from_entity_type: self.from_entity_type,
            to_entity: self.to_entity,
            to_entity_type: self.to_entity_type,
            resource: self.resource,
            quantity,
            reason,
            reference_id: self.reference_id,
            created_at: Utc::now(),
        })
    }
}

/// Validate that the from/to entity types match the contract for the
/// given [`LedgerEntryType`].
fn validate_entity_types(
    entry_type: LedgerEntryType,
    from_type: Option<EntityType>,
    to_type: Option<EntityType>,
) -> Result<(), LedgerError> {
    let (expected_from, expected_to) = expected_entity_types(entry_type);

    if from_type != Some(expected_from) {
        return Err(LedgerError::InvalidEntityType {
            entry_type,
            side: "from",
            expected: format!("{expected_from:?}"),
            actual: format!("{from_type:?}"),
        });
    }

    if to_type != Some(expected_to) {
        return Err(LedgerError::InvalidEntityType {
            entry_type,
            side: "to",
            expected: format!("{expected_to:?}"),
            actual: format!("{to_type:?}"),
        });
    }

    Ok(())
}

/// Return the expected (from, to) entity types for each [`LedgerEntryType`].
pub const fn expected_entity_types(entry_type: LedgerEntryType) -> (EntityType, EntityType) {
    match entry_type {
        LedgerEntryType::EnergySpend
        | LedgerEntryType::Upkeep
        | LedgerEntryType::SkillPurchase => (EntityType::Player, EntityType::Void),
        LedgerEntryType::Production | LedgerEntryType::AuctionPayout => {
            (EntityType::World, EntityType::Player)
        }
        LedgerEntryType::MarketSale => (EntityType::Player, EntityType::Player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> PlayerId {
        PlayerId::named(name)
    }

    #[test]
    fn builder_produces_valid_entry() {
        let result = TransactionBuilder::new(1, LedgerEntryType::MarketSale, Resource::Food)
            .from_player(player("a"))
            .to_player(player("b"))
            .quantity(5)
            .reason("MARKET_SALE".to_owned())
            .build();

        assert!(result.is_ok());
        if let Ok(e) = result {
            assert_eq!(e.day, 1);
            assert_eq!(e.entry_type, LedgerEntryType::MarketSale);
            assert_eq!(e.resource, Resource::Food);
            assert_eq!(e.quantity, 5);
            assert_eq!(e.from_entity, Some(player("a")));
        }
    }

    #[test]
    fn zero_quantity_rejected() {
        let result = TransactionBuilder::new(1, LedgerEntryType::Upkeep, Resource::Food)
            .from_player(player("a"))
            .to_void()
            .quantity(0)
            .reason("UPKEEP".to_owned())
            .build();

        assert!(matches!(result, Err(LedgerError::ZeroQuantity)));
    }

    #[test]
    fn negative_quantity_rejected() {
        let result = TransactionBuilder::new(1, LedgerEntryType::Upkeep, Resource::Food)
            .from_player(player("a"))
            .to_void()
            .quantity(-3)
            .reason("UPKEEP".to_owned())
            .build();

        assert!(matches!(
            result,
            Err(LedgerError::NegativeQuantity { quantity: -3 })
        ));
    }

    #[test]
    fn wrong_entity_type_rejected() {
        // Production comes from the world, not a player.
        let result = TransactionBuilder::new(1, LedgerEntryType::Production, Resource::Food)
            .from_player(player("a"))
            .to_player(player("a"))
            .quantity(5)
            .reason("ENERGY_TO_FOOD".to_owned())
            .build();

        assert!(matches!(
            result,
            Err(LedgerError::InvalidEntityType { side: "from", .. })
        ));
    }

    #[test]
    fn missing_destination_rejected() {
        let result = TransactionBuilder::new(1, LedgerEntryType::EnergySpend, Resource::Energy)
            .from_player(player("a"))
            .quantity(1)
            .reason("ENERGY_TO_FOOD".to_owned())
            .build();

        assert!(matches!(
            result,
            Err(LedgerError::InvalidEntityType { side: "to", .. })
        ));
    }

    #[test]
    fn missing_quantity_rejected() {
        let result = TransactionBuilder::new(1, LedgerEntryType::MarketSale, Resource::Coins)
            .from_player(player("a"))
            .to_player(player("b"))
            .reason("MARKET_SALE".to_owned())
            .build();

        assert!(matches!(result, Err(LedgerError::MissingField("quantity"))));
    }

    #[test]
    fn reference_id_is_kept() {
        let listing = MarketId::new();
        let result = TransactionBuilder::new(1, LedgerEntryType::MarketSale, Resource::Coins)
            .from_player(player("a"))
            .to_player(player("b"))
            .quantity(2)
            .reason("MARKET_SALE".to_owned())
            .reference_id(listing)
            .build();

        assert_eq!(result.ok().and_then(|e| e.reference_id), Some(listing));
    }
}
