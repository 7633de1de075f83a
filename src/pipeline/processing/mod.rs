// Pure transform steps. Nothing in here touches files, network or the database.

pub mod enrich;
pub mod genres;
pub mod title;
