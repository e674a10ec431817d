//! Loading the four demographic tables
//!
//! Tables are read once per session from Parquet or CSV files and adapted to
//! the schemas in [`crate::schema`]. After loading they are never modified.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::{RecordBatch, RecordBatchReader};
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::DashboardConfig;
use crate::error::{DemographyError, Result};
use crate::schema::{TableKind, adapt_record_batch, check_sex_values, check_unique_keys};
use crate::utils::logging::{
    create_load_progress_bar, finish_and_clear, log_operation_complete, log_operation_start,
    log_warning,
};

/// Number of rows sampled when inferring a CSV schema
const CSV_INFERENCE_ROWS: usize = 1000;

/// On-disk formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Csv,
}

impl TableFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("parquet" | "pq") => Ok(Self::Parquet),
            Some("csv") => Ok(Self::Csv),
            _ => Err(DemographyError::InvalidValue {
                field: "table file extension".to_string(),
                value: path.display().to_string(),
            }),
        }
    }
}

/// The four tables of one dashboard session
#[derive(Debug, Clone)]
pub struct DemographyTables {
    /// Population by region, sex, age bracket and year
    pub population: RecordBatch,
    /// Mean and median age by region, sex and year
    pub averages: RecordBatch,
    /// Births and deaths per year, wide format
    pub births_deaths: RecordBatch,
    /// Deaths by year, sex, age at death and cause
    pub causes: RecordBatch,
}

impl DemographyTables {
    /// Load every table named in the configuration
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let inputs = [
            (TableKind::Population, &config.population_path),
            (TableKind::PopulationAverages, &config.averages_path),
            (TableKind::BirthsDeaths, &config.births_deaths_path),
            (TableKind::CausesOfDeath, &config.causes_path),
        ];

        let pb = create_load_progress_bar(inputs.len() as u64, config.show_progress);
        let mut loaded = Vec::with_capacity(inputs.len());
        for (kind, path) in inputs {
            pb.set_message(kind.name());
            loaded.push(read_table(path, kind)?);
            pb.inc(1);
        }
        finish_and_clear(&pb);

        let [population, averages, births_deaths, causes]: [RecordBatch; 4] = loaded
            .try_into()
            .map_err(|_| DemographyError::schema("tables", "expected four tables"))?;

        // read_table already adapted each batch
        Self {
            population,
            averages,
            births_deaths,
            causes,
        }
        .validated(config.check_unique_keys)
    }

    /// Build the tables from batches already in memory
    ///
    /// Batches are adapted and validated exactly as when read from disk.
    pub fn from_batches(
        population: RecordBatch,
        averages: RecordBatch,
        births_deaths: RecordBatch,
        causes: RecordBatch,
        check_keys: bool,
    ) -> Result<Self> {
        Self {
            population: adapt_record_batch(&population, TableKind::Population)?,
            averages: adapt_record_batch(&averages, TableKind::PopulationAverages)?,
            births_deaths: adapt_record_batch(&births_deaths, TableKind::BirthsDeaths)?,
            causes: adapt_record_batch(&causes, TableKind::CausesOfDeath)?,
        }
        .validated(check_keys)
    }

    /// Check value domains and keys of tables in their canonical schema
    fn validated(self, check_keys: bool) -> Result<Self> {
        for kind in TableKind::ALL {
            let batch = self.get(kind);
            check_sex_values(batch, kind)?;
            if check_keys {
                check_unique_keys(batch, kind)?;
            }
            if batch.num_rows() == 0 {
                log_warning(&format!("Table '{kind}' is empty"), None);
            }
        }
        Ok(self)
    }

    /// The batch holding `kind`
    #[must_use]
    pub fn get(&self, kind: TableKind) -> &RecordBatch {
        match kind {
            TableKind::Population => &self.population,
            TableKind::PopulationAverages => &self.averages,
            TableKind::BirthsDeaths => &self.births_deaths,
            TableKind::CausesOfDeath => &self.causes,
        }
    }
}

/// Read one table file and adapt it to the schema of `kind`
pub fn read_table(path: &Path, kind: TableKind) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start(&format!("Reading {kind} table from"), path);

    let (schema, batches) = match TableFormat::from_path(path)? {
        TableFormat::Parquet => read_parquet_batches(path, kind)?,
        TableFormat::Csv => read_csv_batches(path)?,
    };

    let combined = concat_batches(&schema, &batches)?;
    let adapted = adapt_record_batch(&combined, kind)?;

    log_operation_complete("read", path, adapted.num_rows(), Some(start.elapsed()));
    Ok(adapted)
}

/// Read a Parquet file, projecting to the columns of `kind` when present
fn read_parquet_batches(path: &Path, kind: TableKind) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let file_schema = builder.schema().clone();
    let projection: Vec<usize> = kind
        .schema()
        .fields()
        .iter()
        .filter_map(|f| file_schema.index_of(f.name()).ok())
        .collect();

    let builder = if projection.is_empty() {
        log_warning("No expected columns found, reading all columns", Some(path));
        builder
    } else {
        let mask = ProjectionMask::roots(builder.parquet_schema(), projection);
        builder.with_projection(mask)
    };

    let reader = builder.build()?;
    let schema = reader.schema();
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}

/// Read a CSV file with a header row, inferring column types
fn read_csv_batches(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>)> {
    let mut file = File::open(path)?;
    let format = Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, Some(CSV_INFERENCE_ROWS))?;
    file.rewind()?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((schema, batches))
}
