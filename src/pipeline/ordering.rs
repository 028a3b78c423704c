//! Fixed display orders for grouped results
//!
//! Aggregations return label-ordered maps. Charts want ports in boarding
//! order and decks from the top of the ship down, so callers re-order here.

use std::collections::BTreeMap;

use super::group::GroupKey;
use super::passenger::{Port, UNKNOWN_DECK};

/// Place labels listed in `order` first (in that order), then the rest in
/// label order.
pub fn order_by<T: Clone>(map: &BTreeMap<String, T>, order: &[&str]) -> Vec<(String, T)> {
    let mut ordered: Vec<(String, T)> = order
        .iter()
        .filter_map(|label| map.get(*label).map(|v| (label.to_string(), v.clone())))
        .collect();

    ordered.extend(
        map.iter()
            .filter(|(label, _)| !order.contains(&label.as_str()))
            .map(|(label, v)| (label.clone(), v.clone())),
    );

    ordered
}

/// Southampton, Cherbourg, Queenstown
pub fn order_by_ports<T: Clone>(map: &BTreeMap<String, T>) -> Vec<(String, T)> {
    let order: Vec<&str> = Port::BOARDING_ORDER.iter().map(|p| p.code()).collect();
    order_by(map, &order)
}

/// Deck letters top to bottom, unknown last
pub fn order_by_decks<T: Clone>(map: &BTreeMap<String, T>) -> Vec<(String, T)> {
    let mut ordered: Vec<(String, T)> = map
        .iter()
        .map(|(label, v)| (label.clone(), v.clone()))
        .collect();
    ordered.sort_by_key(|(label, _)| (label == UNKNOWN_DECK, label.clone()));
    ordered
}

/// Display order appropriate for the key
pub fn order_for_key<T: Clone>(key: &GroupKey, map: &BTreeMap<String, T>) -> Vec<(String, T)> {
    match key {
        GroupKey::Embarked => order_by_ports(map),
        GroupKey::Deck => order_by_decks(map),
        _ => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    }
}
