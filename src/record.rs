//! Consumption record entity.

use std::fmt;
use std::fmt::Display;

/// A single consumed item.
///
/// Records are passive data: nothing in the crate mutates one after
/// construction, so collections of them can be shared freely between the
/// search, sort and drain components.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    /// Item name.
    pub name: String,
    /// Consumed quantity.
    pub quantity: u32,
    /// Days remaining until expiry.
    pub expiry: u32,
}

impl Record {
    /// Creates a new record.
    pub fn new(name: impl Into<String>, quantity: u32, expiry: u32) -> Self {
        Record {
            name: name.into(),
            quantity,
            expiry,
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | qty: {} | expiry: {}d", self.name, self.quantity, self.expiry)
    }
}

#[cfg(test)]
mod test {
    use super::Record;

    #[test]
    fn test_display() {
        let record = Record::new("Reagent A", 12, 7);
        assert_eq!(record.to_string(), "Reagent A | qty: 12 | expiry: 7d");
    }
}
