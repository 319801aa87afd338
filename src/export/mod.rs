//! Export planning and the external geometry exporter

pub mod script;
pub mod plan;
pub mod exporter;

pub use script::{ExportScript, RegionExport};
pub use plan::{group_file_name, ExportPlan, PlanBuilder};
pub use exporter::{GeometryExporter, MinewaysExporter};
