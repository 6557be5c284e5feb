use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversionError>;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to parse Prisma DMMF: {0}")]
    Parse(String),

    #[error("Unknown scalar type: {0}")]
    UnknownScalarType(String),
}
