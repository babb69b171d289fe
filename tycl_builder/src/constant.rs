pub(crate) const END_OF_OPTIONS: &str = "--";
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: &str = "-";
pub(crate) const VALUE_DELIMITER: char = '=';
