pub mod blank_util;
pub mod date_util;
pub mod validate;
