//! Symbol table for one assembly run.
//!
//! Labels, variables and constants live in separate namespaces. Variables
//! and constants share a single data pointer, so they are interleaved in
//! the data segment in the order they are first resolved.
use std::collections::HashMap;

use super::error::AsmError;
use super::lexer::ADDRESS_MARKER;

/// First address of the code segment.
pub const CODE_START: u32 = 0;

/// First address of the data segment.
pub const DATA_START: u32 = 100;

/// Highest address a 7-bit field can hold.
pub const MAX_ADDRESS: u32 = (1 << 7) - 1;

#[derive(Debug)]
pub struct SymbolTable {
    labels: HashMap<String, u32>,
    variables: HashMap<String, u32>,
    constants: HashMap<String, u32>,
    data_pointer: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            labels: HashMap::new(),
            variables: HashMap::new(),
            constants: HashMap::new(),
            data_pointer: DATA_START,
        }
    }

    /// Binds a label to a code address. Labels may only be defined once.
    pub fn define_label(&mut self, name: &str, address: u32, line: usize) -> Result<(), AsmError> {
        if self.labels.contains_key(name) {
            return Err(AsmError::DuplicateLabel { label: name.to_string(), line });
        }
        debug!("label `{}` bound to @{}", name, address);
        self.labels.insert(name.to_string(), address);
        Ok(())
    }

    pub fn label(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    pub fn resolve_or_allocate_variable(&mut self, name: &str) -> u32 {
        Self::resolve_or_allocate(&mut self.variables, &mut self.data_pointer, name)
    }

    /// Constants are keyed by their decimal text.
    pub fn resolve_or_allocate_constant(&mut self, digits: &str) -> u32 {
        Self::resolve_or_allocate(&mut self.constants, &mut self.data_pointer, digits)
    }

    fn resolve_or_allocate(map: &mut HashMap<String, u32>, data_pointer: &mut u32, name: &str) -> u32 {
        if let Some(&address) = map.get(name) {
            return address;
        }
        let address = *data_pointer;
        *data_pointer += 1;
        debug!("`{}` allocated at @{}", name, address);
        map.insert(name.to_string(), address);
        address
    }

    /// Resolves an operand token to a memory address, allocating data
    /// slots for new variables and constants.
    ///
    /// The order is fixed: labels first, then decimal constants, then
    /// explicit `@` addresses, and anything else is a variable.
    pub fn resolve(&mut self, token: &str, line: usize) -> Result<u32, AsmError> {
        if let Some(address) = self.label(token) {
            return Ok(address);
        }

        if is_decimal(token) {
            return Ok(self.resolve_or_allocate_constant(token));
        }

        if token.contains(ADDRESS_MARKER) {
            return explicit_address(token, line);
        }

        Ok(self.resolve_or_allocate_variable(token))
    }

    pub fn labels(&self) -> Vec<(&str, u32)> {
        sorted_by_address(&self.labels)
    }

    pub fn variables(&self) -> Vec<(&str, u32)> {
        sorted_by_address(&self.variables)
    }

    pub fn constants(&self) -> Vec<(&str, u32)> {
        sorted_by_address(&self.constants)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

pub fn is_decimal(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Strips the address markers and clamps the value to MAX_ADDRESS.
/// Out of range addresses are truncated, not rejected.
fn explicit_address(token: &str, line: usize) -> Result<u32, AsmError> {
    let digits = token.replace(ADDRESS_MARKER, "");
    if !is_decimal(&digits) {
        return Err(AsmError::InvalidLiteral { token: token.to_string(), line });
    }
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    if value > MAX_ADDRESS as u64 {
        debug!("line {}: address {} clamped to @{}", line, token, MAX_ADDRESS);
    }
    Ok(value.min(MAX_ADDRESS as u64) as u32)
}

fn sorted_by_address(map: &HashMap<String, u32>) -> Vec<(&str, u32)> {
    let mut entries: Vec<(&str, u32)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by_key(|&(name, address)| (address, name));
    entries
}
