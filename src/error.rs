#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] rust_xlsxwriter::XlsxError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    #[error("Container not found: {0}")]
    ContainerNotFound(String),
}
