pub mod aggregate;
pub mod exec;
pub mod output;

pub use aggregate::{aggregate, try_aggregate, Aggregation};
pub use exec::{build_aggregation, exec_render, exec_stats};
pub use output::{output_json, output_ndjson, output_punchcard};
