/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;
