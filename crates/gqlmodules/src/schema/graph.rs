//! The merged type graph behind an executable schema.
//!
//! [`SchemaGraph`] collects the declarations handed to the assembler plus
//! everything they require, fuses the `Mutation` contributions into one
//! type, and indexes resolver bindings by `(type, field)`.

use std::fmt;

use gqlmodules_sdl::{Fragment, FragmentBody, print_document};
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::declaration::{
    Declaration, DeclarationKind, Requirement, ScalarValidator, TypeDeclaration,
};
use crate::dependencies;
use crate::error::DeclarationError;
use crate::resolver::ResolverBinding;

const QUERY: &str = "Query";
const MUTATION: &str = "Mutation";

/// One GraphQL type of the assembled schema.
pub struct TypeNode {
    kind: DeclarationKind,
    fragment: Fragment,
    owners: Vec<String>,
    aliases: IndexMap<String, String>,
    scalar_validator: Option<ScalarValidator>,
}

impl TypeNode {
    fn new(declaration: &TypeDeclaration) -> Self {
        Self {
            kind: declaration.kind(),
            fragment: declaration.fragment().clone(),
            owners: vec![declaration.owner().to_string()],
            aliases: declaration.aliases().clone(),
            scalar_validator: declaration.scalar_validator().cloned(),
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.fragment.name
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Returns the declarations that contributed to this type.
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Returns the parent value key a field reads from when it has no resolver.
    pub fn parent_key<'a>(&'a self, field_name: &'a str) -> &'a str {
        self.aliases.get(field_name).map_or(field_name, String::as_str)
    }

    pub(crate) fn scalar_validator(&self) -> Option<&ScalarValidator> {
        self.scalar_validator.as_ref()
    }

    /// Appends the fields of another `Mutation` contribution.
    fn merge(&mut self, declaration: &TypeDeclaration) -> Result<(), DeclarationError> {
        let FragmentBody::Object(fields) = &mut self.fragment.body else {
            return Err(DeclarationError::DuplicateType {
                type_name: self.fragment.name.clone(),
                first: self.owners[0].clone(),
                second: declaration.owner().to_string(),
            });
        };

        for field in declaration.fields() {
            if fields.iter().any(|existing| existing.name == field.name) {
                return Err(DeclarationError::DuplicateField {
                    owner: declaration.owner().to_string(),
                    type_name: MUTATION.to_string(),
                    field_name: field.name.clone(),
                });
            }
            fields.push(field.clone());
        }

        if self.fragment.description.is_none() {
            self.fragment.description = declaration.fragment().description.clone();
        }
        self.aliases.extend(
            declaration
                .aliases()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.owners.push(declaration.owner().to_string());
        Ok(())
    }
}

/// Merged types, resolver bindings and SDL document of a schema.
pub struct SchemaGraph {
    types: IndexMap<String, TypeNode>,
    bindings: IndexMap<(String, String), ResolverBinding>,
    document: String,
}

impl SchemaGraph {
    /// Builds the graph from the given declarations and their requirements.
    ///
    /// # Errors
    ///
    /// Fails unless exactly one `Query` declaration is present, on duplicate
    /// resolver bindings, duplicate `Mutation` fields, conflicting
    /// declarations of the same type name, and deferred requirements that
    /// no collected declaration satisfies.
    pub fn from_declarations<'a>(
        declarations: impl IntoIterator<Item = &'a Declaration>,
    ) -> Result<Self, DeclarationError> {
        let closure = dependencies::walk(declarations.into_iter().map(Requirement::from));
        let collected = closure.declarations();

        let query_count = collected
            .iter()
            .filter(|d| d.kind() == DeclarationKind::Query)
            .count();
        if query_count != 1 {
            return Err(DeclarationError::QueryCount { count: query_count });
        }

        let mut types: IndexMap<String, TypeNode> = IndexMap::with_capacity(collected.len());
        let mut bindings = IndexMap::new();

        for declaration in collected {
            trace!(
                owner = %declaration.owner(),
                type_name = %declaration.name(),
                "Collecting declaration"
            );

            for binding in declaration.bindings() {
                let key = (binding.type_name.clone(), binding.field_name.clone());
                if bindings.contains_key(&key) {
                    return Err(DeclarationError::DuplicateBinding {
                        type_name: key.0,
                        field_name: key.1,
                    });
                }
                bindings.insert(key, binding.clone());
            }

            match types.entry(declaration.name().to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(TypeNode::new(declaration));
                }
                Entry::Occupied(mut entry) if entry.key() == MUTATION => {
                    entry.get_mut().merge(declaration)?;
                }
                Entry::Occupied(entry) => {
                    return Err(DeclarationError::DuplicateType {
                        type_name: entry.key().clone(),
                        first: entry.get().owners[0].clone(),
                        second: declaration.owner().to_string(),
                    });
                }
            }
        }

        for declaration in collected {
            for requirement in declaration.requirements() {
                if let Requirement::Deferred(type_name) = requirement {
                    if !types.contains_key(type_name) {
                        return Err(DeclarationError::UnresolvedDeferred {
                            owner: declaration.owner().to_string(),
                            type_name: type_name.clone(),
                        });
                    }
                }
            }
        }

        types.sort_by(|a, _, b, _| root_rank(a).cmp(&root_rank(b)));
        let document = print_document(types.values().map(TypeNode::fragment));

        debug!(
            types = types.len(),
            bindings = bindings.len(),
            "Schema graph merged"
        );

        Ok(Self {
            types,
            bindings,
            document,
        })
    }

    /// Returns the merged SDL document.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Iterates over types: `Query`, then `Mutation`, then the rest in
    /// collection order.
    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.values()
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeNode> {
        self.types.get(type_name)
    }

    pub fn has_mutation(&self) -> bool {
        self.types.contains_key(MUTATION)
    }

    pub fn binding(&self, type_name: &str, field_name: &str) -> Option<&ResolverBinding> {
        self.bindings
            .get(&(type_name.to_string(), field_name.to_string()))
    }

    pub fn bindings(&self) -> impl Iterator<Item = &ResolverBinding> {
        self.bindings.values()
    }
}

impl fmt::Debug for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeNode")
            .field("kind", &self.kind)
            .field("name", &self.fragment.name)
            .field("owners", &self.owners)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SchemaGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaGraph")
            .field("types", &self.types.values().collect::<Vec<_>>())
            .field("bindings", &self.bindings.values().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn root_rank(type_name: &str) -> u8 {
    match type_name {
        QUERY => 0,
        MUTATION => 1,
        _ => 2,
    }
}
