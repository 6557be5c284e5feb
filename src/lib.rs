pub mod converter;
pub mod error;
pub mod imports;
pub mod options;
pub mod schema;

pub use converter::SchemaConverter;
pub use error::{ConversionError, Result};
pub use options::ConverterOptions;
pub use schema::{DmmfJsonParser, Schema, SchemaParser};

/// Convert a Prisma DMMF JSON document to Python type definitions
pub fn convert_schema(dmmf_json: &str) -> Result<String> {
    convert_schema_with_options(dmmf_json, ConverterOptions::default())
}

/// Convert a Prisma DMMF JSON document with custom formatting options
pub fn convert_schema_with_options(dmmf_json: &str, options: ConverterOptions) -> Result<String> {
    convert_schema_with_parser(&DmmfJsonParser, dmmf_json, options)
}

/// Parse `input` with any [`SchemaParser`] and convert the result
pub fn convert_schema_with_parser<P: SchemaParser + ?Sized>(
    parser: &P,
    input: &str,
    options: ConverterOptions,
) -> Result<String> {
    let schema = parser.parse(input)?;

    let converter = SchemaConverter::with_options(options);
    converter.convert(&schema)
}
