// Application layer: use cases and the ports they depend on

pub mod enrich_use_case;
pub mod ports;
