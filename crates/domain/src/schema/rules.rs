//! Typing rule table: which value type and unit each sensor type id admits.
//!
//! The codes are part of the device typing protocol shared with the
//! registry and must stay bit-exact. Changing them is a protocol revision.

use self::Constraint::{Exact, Range};
use super::ValueType;
use super::ValueType::{Bool, Float, Int, Raw};

/// Constraint on a single integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Only this code is allowed.
    Exact(u32),
    /// Any code in `min..=max` is allowed.
    Range(u32, u32),
}

impl Constraint {
    /// Whether `code` satisfies the constraint.
    #[must_use]
    pub const fn admits(self, code: u32) -> bool {
        match self {
            Self::Exact(expected) => code == expected,
            Self::Range(min, max) => min <= code && code <= max,
        }
    }
}

/// Value type and unit constraints for one sensor type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub value_type: Constraint,
    pub unit: Constraint,
}

impl Rule {
    const fn new(value_type: ValueType, unit: Constraint) -> Self {
        Self {
            value_type: Constraint::Exact(value_type.code()),
            unit,
        }
    }
}

/// Look up the rule for `type_id`; `None` for unknown type ids.
#[must_use]
#[allow(clippy::match_same_arms)]
pub const fn rule_for(type_id: u32) -> Option<Rule> {
    let rule = match type_id {
        0x0000 => Rule::new(Raw, Exact(0)),        // none
        0x0001 => Rule::new(Int, Range(1, 3)),     // voltage
        0x0002 => Rule::new(Int, Range(1, 2)),     // current
        0x0003 => Rule::new(Int, Exact(1)),        // resistance
        0x0004 => Rule::new(Int, Range(1, 3)),     // power
        0x0005 => Rule::new(Int, Range(1, 3)),     // temperature
        0x0006 => Rule::new(Int, Exact(1)),        // relative humidity
        0x0007 => Rule::new(Int, Range(1, 3)),     // luminosity
        0x0008 => Rule::new(Int, Range(1, 3)),     // time
        0x0009 => Rule::new(Int, Range(1, 4)),     // mass
        0x000A => Rule::new(Int, Range(1, 3)),     // pressure
        0x000B => Rule::new(Int, Range(1, 4)),     // distance
        0x000C => Rule::new(Float, Range(1, 2)),   // angle
        0x000D => Rule::new(Float, Range(1, 4)),   // volume
        0x000E => Rule::new(Float, Range(1, 3)),   // area
        0x000F => Rule::new(Float, Exact(1)),      // rain
        0x0010 => Rule::new(Float, Exact(1)),      // density
        0x0011 => Rule::new(Float, Exact(1)),      // latitude
        0x0012 => Rule::new(Float, Exact(1)),      // longitude
        0x0013 => Rule::new(Int, Range(1, 4)),     // speed
        0x0014 => Rule::new(Float, Range(1, 6)),   // volume flow
        0x0015 => Rule::new(Int, Range(1, 6)),     // energy
        0xFFF0 => Rule::new(Bool, Exact(0)),       // presence
        0xFFF1 => Rule::new(Bool, Exact(0)),       // switch
        0xFFF2 => Rule::new(Raw, Exact(0)),        // command
        0xFF10 => Rule::new(Int, Exact(0)),        // analog
        0xFFFF => Rule::new(Raw, Exact(0)),        // invalid
        _ => return None,
    };
    Some(rule)
}

/// Whether `value_type` is legal for `type_id`. Unknown type ids never are.
#[must_use]
pub fn is_valid_value_type(type_id: u32, value_type: u32) -> bool {
    rule_for(type_id).is_some_and(|rule| rule.value_type.admits(value_type))
}

/// Whether `unit` is legal for `type_id`. Unknown type ids never are.
#[must_use]
pub fn is_valid_unit(type_id: u32, unit: u32) -> bool {
    rule_for(type_id).is_some_and(|rule| rule.unit.admits(unit))
}
