pub(crate) mod cell_data;
pub mod forecast;
pub mod warnings;
