// Values and ordering
// -------------------
pub mod value;

// Problems and capabilities
// -------------------------
pub mod problem;
pub mod search;

// Strategies
// ----------
pub mod algorithms;

#[cfg(test)]
pub(crate) mod test_fixtures;
