// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Key Value storage
//!
//! A very simple, typed key-value store used to pass auxiliary iteration
//! data to observers without forcing every value through `Display`.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// A value stored in a [`KV`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum KvValue {
    /// Floating point value
    Float(f64),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value
    Uint(u64),
    /// Boolean value
    Bool(bool),
    /// String value
    Str(String),
}

impl fmt::Display for KvValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KvValue::Float(x) => write!(f, "{}", x),
            KvValue::Int(x) => write!(f, "{}", x),
            KvValue::Uint(x) => write!(f, "{}", x),
            KvValue::Bool(x) => write!(f, "{}", x),
            KvValue::Str(x) => write!(f, "{}", x),
        }
    }
}

impl KvValue {
    /// Returns the value as `f64` if this is a `Float`
    pub fn get_float(&self) -> Option<f64> {
        match self {
            KvValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the value as `i64` if this is an `Int`
    pub fn get_int(&self) -> Option<i64> {
        match self {
            KvValue::Int(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the value as `u64` if this is a `Uint`
    pub fn get_uint(&self) -> Option<u64> {
        match self {
            KvValue::Uint(x) => Some(*x),
            _ => None,
        }
    }
}

macro_rules! kv_from_num {
    ($t:ty, $variant:ident, $cast:ty) => {
        impl From<$t> for KvValue {
            fn from(x: $t) -> Self {
                KvValue::$variant(x as $cast)
            }
        }
    };
}

kv_from_num!(f64, Float, f64);
kv_from_num!(f32, Float, f64);
kv_from_num!(i64, Int, i64);
kv_from_num!(i32, Int, i64);
kv_from_num!(u64, Uint, u64);
kv_from_num!(u32, Uint, u64);
kv_from_num!(usize, Uint, u64);

impl From<bool> for KvValue {
    fn from(x: bool) -> Self {
        KvValue::Bool(x)
    }
}

impl From<String> for KvValue {
    fn from(x: String) -> Self {
        KvValue::Str(x)
    }
}

impl From<&str> for KvValue {
    fn from(x: &str) -> Self {
        KvValue::Str(x.to_string())
    }
}

/// A simple, ordered-by-insertion key-value store.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct KV {
    /// The actual key value storage
    pub kv: HashMap<String, KvValue>,
}

impl fmt::Display for KV {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "KV")?;
        for (key, val) in self.kv.iter() {
            writeln!(f, "   {}: {}", key, val)?;
        }
        Ok(())
    }
}

impl KV {
    /// Constructor
    pub fn new() -> Self {
        KV { kv: HashMap::new() }
    }

    /// Insert a key-value pair
    pub fn insert<T: Into<String>>(&mut self, key: T, val: impl Into<KvValue>) -> &mut Self {
        self.kv.insert(key.into(), val.into());
        self
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&KvValue> {
        self.kv.get(key)
    }

    /// Merge another `KV` into `self`, consuming both.
    #[must_use]
    pub fn merge(mut self, other: KV) -> Self {
        self.kv.extend(other.kv);
        self
    }
}

impl std::iter::FromIterator<(&'static str, KvValue)> for KV {
    fn from_iter<I: IntoIterator<Item = (&'static str, KvValue)>>(iter: I) -> Self {
        let mut c = KV::new();
        for (k, v) in iter {
            c.insert(k, v);
        }
        c
    }
}

impl std::iter::Extend<(&'static str, KvValue)> for KV {
    fn extend<I: IntoIterator<Item = (&'static str, KvValue)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(argmin_kv, KV);

    #[test]
    fn insert_and_get() {
        let mut kv = KV::new();
        kv.insert("iter", 3u64);
        kv.insert("cost", 1.5f64);
        assert_eq!(kv.get("iter").unwrap().get_uint(), Some(3));
        assert_eq!(kv.get("cost").unwrap().get_float(), Some(1.5));
    }

    #[test]
    fn merge_combines_keys() {
        let mut a = KV::new();
        a.insert("a", 1u64);
        let mut b = KV::new();
        b.insert("b", 2u64);
        let merged = a.merge(b);
        assert_eq!(merged.get("a").unwrap().get_uint(), Some(1));
        assert_eq!(merged.get("b").unwrap().get_uint(), Some(2));
    }
}
