use soroban_sdk::{symbol_short, Symbol};

pub const ADMIN_KEY: Symbol = symbol_short!("admin");
pub const INITIALIZED_KEY: Symbol = symbol_short!("init");
