//! SDL fragment parsing and validation.
//!
//! A fragment is the SDL snippet attached to a single declaration. It must
//! parse, contain exactly one definition, and that definition must be a
//! non-extension type of the kind the declaration expects.

use async_graphql_parser::types::{
    self as ast, InputValueDefinition, TypeKind, TypeSystemDefinition,
};
use async_graphql_value::ConstValue;

use crate::error::FragmentError;
use crate::type_ref::TypeRef;

/// The type kinds a declaration can expect its fragment to define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Object,
    InputObject,
    Enum,
    Scalar,
}

impl DefinitionKind {
    /// Returns the SDL keyword for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "type",
            Self::InputObject => "input",
            Self::Enum => "enum",
            Self::Scalar => "scalar",
        }
    }

    /// Returns a human readable name for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Object => "an object type",
            Self::InputObject => "an input object type",
            Self::Enum => "an enum type",
            Self::Scalar => "a scalar type",
        }
    }
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub default_value: Option<ConstValue>,
}

/// An output field of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub ty: TypeRef,
}

impl FieldDefinition {
    /// Finds an argument by its declared name.
    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
}

/// Kind-specific contents of a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentBody {
    Object(Vec<FieldDefinition>),
    InputObject(Vec<InputValue>),
    Enum(Vec<EnumValue>),
    Scalar,
}

/// A validated single-type SDL fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub name: String,
    pub description: Option<String>,
    pub body: FragmentBody,
}

impl Fragment {
    /// Returns the kind of type this fragment defines.
    pub fn kind(&self) -> DefinitionKind {
        match self.body {
            FragmentBody::Object(_) => DefinitionKind::Object,
            FragmentBody::InputObject(_) => DefinitionKind::InputObject,
            FragmentBody::Enum(_) => DefinitionKind::Enum,
            FragmentBody::Scalar => DefinitionKind::Scalar,
        }
    }

    /// Returns the output fields in declaration order. Empty for non-object kinds.
    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.body {
            FragmentBody::Object(fields) => fields,
            _ => &[],
        }
    }

    /// Finds an output field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().iter().find(|field| field.name == name)
    }
}

/// Parses `raw` and checks that it defines exactly one type of `expected` kind.
///
/// # Errors
///
/// - [`FragmentError::Syntax`] if `raw` is not valid SDL
/// - [`FragmentError::TypeCount`] if it holds zero or several definitions
/// - [`FragmentError::NotATypeDefinition`] / [`FragmentError::WrongKind`] if
///   the single definition is not a type of the expected kind
/// - [`FragmentError::Extension`] for `extend` definitions
pub fn parse_fragment(raw: &str, expected: DefinitionKind) -> Result<Fragment, FragmentError> {
    // The parser rejects empty documents as a syntax error; an empty fragment
    // simply defines no types.
    if raw.trim().is_empty() {
        return Err(FragmentError::TypeCount { count: 0 });
    }

    let mut document = async_graphql_parser::parse_schema(raw)?;
    if document.definitions.len() != 1 {
        return Err(FragmentError::TypeCount {
            count: document.definitions.len(),
        });
    }

    let definition = match document.definitions.remove(0) {
        TypeSystemDefinition::Type(definition) => definition.node,
        TypeSystemDefinition::Schema(_) => {
            return Err(FragmentError::NotATypeDefinition {
                expected: expected.describe(),
                found: "schema",
            });
        }
        TypeSystemDefinition::Directive(_) => {
            return Err(FragmentError::NotATypeDefinition {
                expected: expected.describe(),
                found: "directive",
            });
        }
    };

    let name = definition.name.node.to_string();
    let found = type_kind_keyword(&definition.kind);
    if definition.extend {
        return Err(FragmentError::Extension { kind: found, name });
    }

    let body = match (definition.kind, expected) {
        (TypeKind::Object(object), DefinitionKind::Object) => FragmentBody::Object(
            object
                .fields
                .into_iter()
                .map(|field| convert_field(field.node))
                .collect(),
        ),
        (TypeKind::InputObject(input), DefinitionKind::InputObject) => FragmentBody::InputObject(
            input
                .fields
                .into_iter()
                .map(|field| convert_input_value(field.node))
                .collect(),
        ),
        (TypeKind::Enum(enum_type), DefinitionKind::Enum) => FragmentBody::Enum(
            enum_type
                .values
                .into_iter()
                .map(|value| EnumValue {
                    name: value.node.value.node.to_string(),
                    description: value.node.description.map(|d| d.node),
                })
                .collect(),
        ),
        (TypeKind::Scalar, DefinitionKind::Scalar) => FragmentBody::Scalar,
        _ => {
            return Err(FragmentError::WrongKind {
                expected: expected.describe(),
                found,
                name,
            });
        }
    };

    Ok(Fragment {
        name,
        description: definition.description.map(|d| d.node),
        body,
    })
}

fn type_kind_keyword(kind: &TypeKind) -> &'static str {
    match kind {
        TypeKind::Scalar => "scalar",
        TypeKind::Object(_) => "type",
        TypeKind::Interface(_) => "interface",
        TypeKind::Union(_) => "union",
        TypeKind::Enum(_) => "enum",
        TypeKind::InputObject(_) => "input",
    }
}

fn convert_field(field: ast::FieldDefinition) -> FieldDefinition {
    FieldDefinition {
        name: field.name.node.to_string(),
        description: field.description.map(|d| d.node),
        arguments: field
            .arguments
            .into_iter()
            .map(|arg| convert_input_value(arg.node))
            .collect(),
        ty: TypeRef::from(&field.ty.node),
    }
}

fn convert_input_value(value: InputValueDefinition) -> InputValue {
    InputValue {
        name: value.name.node.to_string(),
        description: value.description.map(|d| d.node),
        ty: TypeRef::from(&value.ty.node),
        default_value: value.default_value.map(|v| v.node),
    }
}
