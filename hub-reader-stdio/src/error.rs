use hub_reader_types::HubResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StdioErr {
    #[error("IO Error: {0}")]
    IoError(std::io::Error),
}

pub type StdioResult<T> = HubResult<T, StdioErr>;
