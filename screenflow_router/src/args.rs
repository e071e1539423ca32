// Copyright 2026 the Screenflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen arguments: an ordered key/value payload with typed accessors.
//!
//! ## Overview
//!
//! [`Args`] is what travels with a screen through a transaction: caller data,
//! deep-link extras, and the reserved result-request payload all share the
//! same map. Keys are unique strings; inserting under an existing key
//! replaces the previous value, and [`Args::merge`] applies a whole map with
//! the incoming side winning on conflicts (the rule deep-link injection
//! relies on).

use alloc::collections::BTreeMap;
use alloc::string::String;

/// A single argument value.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Nested map, used for structured payloads such as the reserved
    /// result-request entry.
    Map(Args),
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Args> for ArgValue {
    fn from(v: Args) -> Self {
        Self::Map(v)
    }
}

/// Key/value arguments attached to a screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args(BTreeMap<String, ArgValue>);

impl Args {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        self.0.remove(key)
    }

    /// Returns the raw value under `key`.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    /// Returns the string under `key`, if it is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer under `key`, if it is one.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(ArgValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean under `key`, if it is one.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(ArgValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float under `key`, if it is one.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(ArgValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns the nested map under `key`, if it is one.
    pub fn get_map(&self, key: &str) -> Option<&Args> {
        match self.0.get(key) {
            Some(ArgValue::Map(m)) => Some(m),
            _ => None,
        }
    }

    /// Applies every entry of `other` onto this payload. Incoming keys win
    /// on conflict.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
