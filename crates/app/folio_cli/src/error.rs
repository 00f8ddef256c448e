use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Json::{:?}: {}", .0, .0)]
    Json(#[from] serde_json::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("{}", .0)]
    Chat(#[from] folio_core::ChatError),

    #[error("{}", .0)]
    DemoTable(#[from] folio_core::demo::DemoTableError),

    #[error("{}", .0)]
    Transport(#[from] folio_core::backend::TransportError),
}
