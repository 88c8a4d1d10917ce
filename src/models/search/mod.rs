pub mod date_range;
pub mod search_query;
pub mod search_result;
