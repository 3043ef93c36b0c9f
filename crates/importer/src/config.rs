use crate::{
    catalog::merge::{InactivePolicy, MergePolicy},
    files::{self, host_name},
};
use clap::Args;
use log::LevelFilter;
use std::path::PathBuf;

/// Flags every populate program accepts
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Log at debug level
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Show row progress and remaining time on stderr
    #[arg(long, short = 'p')]
    pub progress: bool,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Directory holding the latest query extracts
    #[arg(long, env = "QUERIES_DIR", default_value = "./latest_queries")]
    pub queries_dir: PathBuf,
}

/// Flags of `populate-courses`
#[derive(Args, Debug, Clone)]
pub struct CourseArgs {
    /// Leave out courses that are not active and schedulable
    #[arg(long)]
    pub skip_inactive: bool,

    /// Departments whose courses are never imported
    #[arg(long = "skip-department", default_values = ["PEES-BKL", "SOC-YRK", "JOUR-GRD"])]
    pub skip_departments: Vec<String>,

    /// Disciplines whose courses are never imported
    #[arg(long = "skip-discipline", default_values = ["JOUR"])]
    pub skip_disciplines: Vec<String>,

    /// Where anomalies and the run summary are written
    #[arg(long, default_value = "populate_courses.log")]
    pub log_file: PathBuf,
}

impl CourseArgs {
    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy {
            skip_departments: self.skip_departments.iter().cloned().collect(),
            skip_disciplines: self.skip_disciplines.iter().cloned().collect(),
            inactive: if self.skip_inactive {
                InactivePolicy::Skip
            } else {
                InactivePolicy::Retain
            },
        }
    }
}

/// Flags of the two transfer-rule programs
#[derive(Args, Debug, Clone)]
pub struct RuleArgs {
    /// Write the list of course ids the rules reference but the catalog lacks
    #[arg(long, short = 'g')]
    pub generate: bool,

    /// Print totals when done
    #[arg(long, short = 'r')]
    pub report: bool,

    /// Rules extract; defaults to the latest one in the queries directory
    #[arg(long)]
    pub rules_file: Option<PathBuf>,

    /// Exclusion list; defaults to `known_bad_ids.<host>.log`
    #[arg(long)]
    pub known_bad_ids: Option<PathBuf>,

    /// Anomaly log; defaults to `conflicts.<host>.log`
    #[arg(long)]
    pub conflicts_log: Option<PathBuf>,
}

impl RuleArgs {
    pub fn rules_file(&self, common: &CommonArgs) -> Result<PathBuf, crate::error::ImportError> {
        match &self.rules_file {
            Some(path) => Ok(path.clone()),
            None => files::latest_extract(&common.queries_dir, files::TRANSFER_RULES_PREFIX),
        }
    }

    pub fn known_bad_ids(&self) -> PathBuf {
        self.known_bad_ids
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("known_bad_ids.{}.log", host_name())))
    }

    pub fn conflicts_log(&self) -> PathBuf {
        self.conflicts_log
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("conflicts.{}.log", host_name())))
    }
}

/// Initializes `env_logger`.
///
/// `RUST_LOG` is honored unless `debug` forces the debug level; without either the
/// level is `info`.
pub fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
