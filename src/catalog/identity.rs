use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric item definition index, unique per catalog entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Defindex(pub u32);

impl fmt::Display for Defindex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Defindex {
    fn from(value: u32) -> Self {
        Defindex(value)
    }
}

/// An item referenced either by defindex or by display name.
///
/// Callers routinely hold whichever form the item description gave them, so
/// every resolver operation accepts both. Text made only of ASCII digits is
/// treated as a defindex.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemRef<'a> {
    Defindex(Defindex),
    Name(&'a str),
}

/// An enum attribute referenced either by code or by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnumValue<'a> {
    Code(u32),
    Name(&'a str),
}

impl<'a> ItemRef<'a> {
    pub fn parse(value: &'a str) -> Self {
        match parse_code(value) {
            Some(code) => ItemRef::Defindex(Defindex(code)),
            None => ItemRef::Name(value),
        }
    }
}

impl<'a> From<&'a str> for ItemRef<'a> {
    fn from(value: &'a str) -> Self {
        ItemRef::parse(value)
    }
}

impl From<Defindex> for ItemRef<'_> {
    fn from(value: Defindex) -> Self {
        ItemRef::Defindex(value)
    }
}

impl From<u32> for ItemRef<'_> {
    fn from(value: u32) -> Self {
        ItemRef::Defindex(Defindex(value))
    }
}

impl<'a> EnumValue<'a> {
    pub fn parse(value: &'a str) -> Self {
        match parse_code(value) {
            Some(code) => EnumValue::Code(code),
            None => EnumValue::Name(value),
        }
    }
}

impl<'a> From<&'a str> for EnumValue<'a> {
    fn from(value: &'a str) -> Self {
        EnumValue::parse(value)
    }
}

impl From<u32> for EnumValue<'_> {
    fn from(value: u32) -> Self {
        EnumValue::Code(value)
    }
}

/// Parse text matching `^\d+$` that fits in a `u32`.
///
/// Signs, whitespace and decimals are rejected so names such as `"+1"` stay
/// names.
pub(crate) fn parse_code(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
