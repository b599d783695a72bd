pub mod feature_extractor;
pub mod metric;
pub mod metric_result;
pub mod metric_table;
