use std::rc::Rc;

use fnv::FnvHashMap;

/// Maps symbols to distinct integers, so symbolic values can be compared and counted like
/// integers.
///
/// The table only grows. Once interned, a symbol keeps its integer for the lifetime of the table.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    ids: FnvHashMap<Rc<str>, i64>,
}

impl SymbolTable {
    /// Get the integer for `symbol`, interning it if it is new.
    pub fn intern(&mut self, symbol: &str) -> i64 {
        if let Some(&id) = self.ids.get(symbol) {
            return id;
        }

        let id = self.ids.len() as i64;
        let _ = self.ids.insert(Rc::from(symbol), id);
        id
    }

    /// Get the integer for `symbol` if it was interned before.
    pub fn get(&self, symbol: &str) -> Option<i64> {
        self.ids.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
