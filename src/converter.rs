use crate::error::{ConversionError, Result};
use crate::imports::ImportCollector;
use crate::options::ConverterOptions;
use crate::schema::{Enum, Field, FieldKind, Model, Schema};
use tracing::debug;

pub const HEADER: &str = "# Generated by prisma-to-python - https://github.com/jmsv/prisma-to-python#readme
# Do not edit this file directly!";

/// Python type produced for a Prisma scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PythonScalar {
    Str,
    Int,
    Bool,
    Datetime,
    Any,
}

impl PythonScalar {
    pub fn as_str(self) -> &'static str {
        match self {
            PythonScalar::Str => "str",
            PythonScalar::Int => "int",
            PythonScalar::Bool => "bool",
            PythonScalar::Datetime => "datetime",
            PythonScalar::Any => "Any",
        }
    }

    /// `(module, symbol)` the type has to be imported from, if any.
    pub fn import(self) -> Option<(&'static str, &'static str)> {
        match self {
            PythonScalar::Datetime => Some(("datetime", "datetime")),
            PythonScalar::Any => Some(("typing", "Any")),
            PythonScalar::Str | PythonScalar::Int | PythonScalar::Bool => None,
        }
    }
}

/// Map a Prisma scalar type name to its Python counterpart.
pub fn python_scalar(scalar: &str) -> Result<PythonScalar> {
    match scalar {
        "String" => Ok(PythonScalar::Str),
        "Int" => Ok(PythonScalar::Int),
        "Boolean" => Ok(PythonScalar::Bool),
        "DateTime" => Ok(PythonScalar::Datetime),
        "Json" => Ok(PythonScalar::Any),
        other => Err(ConversionError::UnknownScalarType(other.to_string())),
    }
}

/// Convert an enum value name to an UPPER_SNAKE_CASE member name.
///
/// Names that are already uppercase are kept as-is. Otherwise every ASCII
/// uppercase letter gets an underscore in front of it, so `ABTest` becomes
/// `_A_B_TEST`.
pub fn camel_to_upper_snake(name: &str) -> String {
    if name == name.to_uppercase() {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out.to_uppercase()
}

/// Converts a [`Schema`] into a Python module of `Enum` and `TypedDict`
/// classes.
pub struct SchemaConverter {
    options: ConverterOptions,
}

impl SchemaConverter {
    pub fn new() -> Self {
        Self::with_options(ConverterOptions::default())
    }

    pub fn with_options(options: ConverterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn convert(&self, schema: &Schema) -> Result<String> {
        let mut imports = ImportCollector::new();

        // Registration order decides import order: enums, models, then types.
        let enums = self.convert_enums(&schema.enums, &mut imports);
        let models = self.convert_models(&schema.models, &mut imports)?;
        let types = self.convert_models(&schema.types, &mut imports)?;

        debug!(
            enums = schema.enums.len(),
            models = schema.models.len(),
            types = schema.types.len(),
            import_modules = imports.len(),
            "converted schema"
        );

        Ok(format!(
            "{HEADER}\n\n{}\n\n# Enums\n\n{enums}\n\n# Types\n\n{types}\n\n# Models\n\n{models}\n",
            imports.render()
        ))
    }

    fn convert_enums(&self, enums: &[Enum], imports: &mut ImportCollector) -> String {
        enums
            .iter()
            .map(|e| {
                let members = e
                    .values
                    .iter()
                    .map(|v| {
                        let line = format!("{} = \"{}\"", camel_to_upper_snake(&v.name), v.name);
                        self.options.indent(&line, 1)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                imports.add("enum", "Enum");
                format!("class {}(str, Enum):\n{}", e.name, members)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn convert_models(&self, models: &[Model], imports: &mut ImportCollector) -> Result<String> {
        let mut declarations = Vec::with_capacity(models.len());

        for model in models {
            let mut lines = Vec::with_capacity(model.fields.len());
            for field in &model.fields {
                if let Some(line) = self.convert_field(field, imports)? {
                    lines.push(line);
                }
            }

            imports.add("typing", "TypedDict");
            declarations.push(format!(
                "class {}(TypedDict):\n{}",
                model.name,
                lines.join("\n")
            ));
        }

        Ok(declarations.join("\n\n"))
    }

    /// Render one attribute line, or `None` for relation fields.
    fn convert_field(
        &self,
        field: &Field,
        imports: &mut ImportCollector,
    ) -> Result<Option<String>> {
        let mut ty = match &field.kind {
            FieldKind::Relation { .. } => return Ok(None),
            FieldKind::Scalar { scalar } => {
                let scalar = python_scalar(scalar)?;
                if let Some((module, symbol)) = scalar.import() {
                    imports.add(module, symbol);
                }
                scalar.as_str().to_string()
            }
            FieldKind::Reference { target } => target.clone(),
        };

        if field.is_list {
            ty = format!("list[{}]", ty);
        }
        if !field.is_required {
            ty = format!("Optional[{}]", ty);
            imports.add("typing", "Optional");
        }

        let line = format!("{}: {}", field.output_name(), ty);
        Ok(Some(self.options.indent(&line, 1)))
    }
}

impl Default for SchemaConverter {
    fn default() -> Self {
        Self::new()
    }
}
