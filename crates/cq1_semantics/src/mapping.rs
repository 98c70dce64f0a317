// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The mapping scope: names bound to values at analysis time. Holds the
// default `q` and `b` registers, the builtin axis/boolean names, and
// whatever `map` statements bind. Lookup is case-insensitive and
// shadowing by rebinding is allowed.

use hashbrown::HashMap;

use crate::error::ErrorKind;
use crate::values::Value;

#[derive(Clone, Debug, Default)]
pub struct MappingTable {
    table: HashMap<String, Value>,
}

impl MappingTable {
    pub fn new() -> MappingTable {
        MappingTable {
            table: HashMap::new(),
        }
    }

    /// Binds `name` to `value`, replacing any previous binding of the same
    /// (case-insensitive) name.
    pub fn add(&mut self, name: &str, value: Value) {
        self.table.insert(name.to_lowercase(), value);
    }

    /// Looks a name up, returning a copy of the bound value.
    pub fn resolve(&self, name: &str) -> Result<Value, ErrorKind> {
        self.table
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| ErrorKind::NameResolutionFailure {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::ConstInt;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = MappingTable::new();
        table.add("Ancilla", ConstInt::new(3).to_value());
        assert!(table.resolve("ancilla").is_ok());
        assert!(table.resolve("ANCILLA").is_ok());
        assert!(matches!(
            table.resolve("other"),
            Err(ErrorKind::NameResolutionFailure { .. })
        ));
    }

    #[test]
    fn test_rebinding_shadows() {
        let mut table = MappingTable::new();
        table.add("x", ConstInt::new(1).to_value());
        table.add("X", ConstInt::new(2).to_value());
        assert_eq!(table.resolve("x").unwrap(), ConstInt::new(2).to_value());
        assert_eq!(table.len(), 1);
    }
}
