//! Trading rules: who may trade with whom, at what price, for how much.

use std::cmp::Ordering;

use matchbook_types::{Client, EntrySizes, Price, Side};

/// Same firm and same firm client — the same beneficial owner.
#[must_use]
pub fn same_firm_and_same_firm_client(client: &Client, other: &Client) -> bool {
    client == other
}

/// Same firm with either side missing a firm client id: attribution is
/// ambiguous at the firm level, which blocks the match.
#[must_use]
pub fn same_firm_but_possible_firm_against_client(client: &Client, other: &Client) -> bool {
    client.firm_id == other.firm_id
        && (client.firm_client_id.is_none() || other.firm_client_id.is_none())
}

/// A pair that must never trade against each other.
#[must_use]
pub fn is_wash_trade(aggressor: &Client, passive: &Client) -> bool {
    same_firm_and_same_firm_client(aggressor, passive)
        || same_firm_but_possible_firm_against_client(aggressor, passive)
}

/// Whether the aggressor's price reaches the passive's, per side
/// direction. With both prices present the cross holds iff
/// `sign × cmp ≤ 0`; with exactly one absent a trade price is always
/// determinable; with both absent there is none.
#[must_use]
pub fn price_has_crossed(
    aggressor_side: Side,
    aggressor: Option<Price>,
    passive: Option<Price>,
) -> bool {
    match (aggressor, passive) {
        (Some(a), Some(p)) => signed_compare(aggressor_side, a, p) <= 0,
        (None, None) => false,
        _ => true,
    }
}

/// The price a trade between these two would execute at: the passive's
/// price when set (the incoming order takes the resting price), else the
/// aggressor's. `None` when both prices are present but do not cross, or
/// when neither carries a price.
#[must_use]
pub fn find_trade_price(
    aggressor_side: Side,
    aggressor: Option<Price>,
    passive: Option<Price>,
) -> Option<Price> {
    match (aggressor, passive) {
        (Some(a), Some(p)) => (signed_compare(aggressor_side, a, p) <= 0).then_some(p),
        (a, p) => p.or(a),
    }
}

/// The executable size of a match.
#[must_use]
pub fn trade_size(aggressor: &EntrySizes, passive: &EntrySizes) -> u64 {
    aggressor.available.min(passive.available)
}

fn signed_compare(side: Side, a: Price, b: Price) -> i32 {
    let cmp = match a.cmp(&b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    };
    side.sign() * cmp
}
