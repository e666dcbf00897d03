use econ_compare::DatasetStats;
use econ_model::NormalizationReport;
use econ_output::WrittenRun;

/// Outcome of `econ run`.
#[derive(Debug)]
pub struct RunResult {
    pub input: std::path::PathBuf,
    pub reference_year: i32,
    pub stats: DatasetStats,
    pub report: NormalizationReport,
    /// `None` on a dry run.
    pub written: Option<WrittenRun>,
}
