use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open the data file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' is missing from the data file")]
    MissingColumn(String),

    #[error("Invalid value in column '{column}' on line {line}: {message}")]
    InvalidRow {
        line: u64,
        column: String,
        message: String,
    },

    #[error("The data file does not form a valid dataset: {0}")]
    Dataset(#[from] core_types::CoreError),
}
