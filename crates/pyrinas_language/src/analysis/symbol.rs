//! Symbol table entries (spec §3 Data Model, §4.3 Pass 1).

use std::collections::HashMap;

use crate::ty::Ty;

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSig {
    pub name: String,
    pub params: Vec<Ty>,
    pub return_type: Ty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Variable { ty: Ty },
    Function { params: Vec<Ty>, return_type: Ty },
    Struct { fields: Vec<(String, Ty)>, methods: Vec<MethodSig> },
    Enum { members: Vec<(String, i64)> },
    Interface { methods: Vec<MethodSig> },
}

impl Symbol {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Variable { .. } => "variable",
            Symbol::Function { .. } => "function",
            Symbol::Struct { .. } => "struct",
            Symbol::Enum { .. } => "enum",
            Symbol::Interface { .. } => "interface",
        }
    }

    pub fn as_struct(&self) -> Option<(&[(String, Ty)], &[MethodSig])> {
        match self {
            Symbol::Struct { fields, methods } => Some((fields, methods)),
            _ => Option::None,
        }
    }

    pub fn field_type(&self, field: &str) -> Option<&Ty> {
        self.as_struct()?.0.iter().find(|(name, _)| name == field).map(|(_, ty)| ty)
    }
}

/// Top-level declarations discovered in Pass 1 (spec §4.3): functions,
/// structs, enums, and interfaces, keyed by name. Populated once and then
/// read-only for the rest of the pipeline.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    /// Declaration order, since the C emitter needs structs/enums emitted
    /// in source order for forward-reference-free output (spec §4.4).
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: Symbol) {
        let name = name.into();
        if !self.symbols.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.symbols.insert(name, symbol);
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn iter_in_order(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.order.iter().map(move |name| (name, &self.symbols[name]))
    }
}
