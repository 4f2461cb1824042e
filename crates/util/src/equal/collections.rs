//! Map and set comparison.
//!
//! Entries are first paired by key identity (SameValueZero). Object keys
//! left over on both sides are then paired by deep equality, each entry of
//! the right-hand side being used at most once.

use super::deep_equal::{compare_slot, Comparator, Pending};
use crate::error::Error;
use replica_value::{Value, ValueMap, ValueSet};

impl Comparator {
    pub(super) fn compare_maps(
        &mut self,
        a: &ValueMap,
        b: &ValueMap,
        depth: usize,
        pending: &mut Pending,
    ) -> Result<bool, Error> {
        if a.len() != b.len() {
            return Ok(false);
        }

        let mut unmatched: Vec<(&Value, &Value)> = Vec::new();
        for (map_key, key, value_a) in a.iter_keyed() {
            match b.get_by_key(map_key) {
                Some(value_b) => {
                    if !compare_slot(value_a, value_b, depth, pending) {
                        return Ok(false);
                    }
                }
                None if map_key.is_reference() => unmatched.push((key, value_a)),
                None => return Ok(false),
            }
        }
        if unmatched.is_empty() {
            return Ok(true);
        }

        let mut candidates: Vec<(&Value, &Value)> = b
            .iter_keyed()
            .filter(|(map_key, _, _)| map_key.is_reference() && a.get_by_key(map_key).is_none())
            .map(|(_, key, value)| (key, value))
            .collect();
        for (key_a, value_a) in unmatched {
            let mut found = None;
            for (i, (key_b, value_b)) in candidates.iter().enumerate() {
                if self.sub_equal(key_a, key_b, depth)? && self.sub_slot_equal(value_a, value_b, depth)? {
                    found = Some(i);
                    break;
                }
            }
            match found {
                Some(i) => {
                    candidates.swap_remove(i);
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    pub(super) fn compare_sets(&mut self, a: &ValueSet, b: &ValueSet, depth: usize) -> Result<bool, Error> {
        if a.len() != b.len() {
            return Ok(false);
        }

        let mut unmatched: Vec<&Value> = Vec::new();
        for (map_key, member) in a.iter_keyed() {
            if b.contains_key(map_key) {
                continue;
            }
            if !map_key.is_reference() {
                return Ok(false);
            }
            unmatched.push(member);
        }
        if unmatched.is_empty() {
            return Ok(true);
        }

        let mut candidates: Vec<&Value> = b
            .iter_keyed()
            .filter(|(map_key, _)| map_key.is_reference() && !a.contains_key(map_key))
            .map(|(_, member)| member)
            .collect();
        for member in unmatched {
            let mut found = None;
            for (i, candidate) in candidates.iter().enumerate() {
                if self.sub_equal(member, candidate, depth)? {
                    found = Some(i);
                    break;
                }
            }
            match found {
                Some(i) => {
                    candidates.swap_remove(i);
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}
