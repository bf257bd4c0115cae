pub mod copy_reports;
pub mod health;
pub mod validate_object;

#[cfg(test)]
pub(crate) mod testing;
