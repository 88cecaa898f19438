//! Dependency closure over declaration requirements.
//!
//! Declarations list the types they use through [`Requirement`]s. A type name
//! referenced by a field is satisfied when some declaration reachable through
//! those requirements (directly or transitively) declares that exact name, or
//! when the name was required as a deferred type.

use std::collections::HashSet;
use std::sync::Arc;

use crate::declaration::{Declaration, Requirement, TypeDeclaration};

/// The transitive set of declarations reachable through requirements.
#[derive(Debug, Clone, Default)]
pub struct DependencyClosure {
    /// Reachable declarations in depth-first discovery order.
    declarations: Vec<Declaration>,
    /// Names of declared and deferred types.
    names: HashSet<String>,
    deferred: Vec<String>,
}

impl DependencyClosure {
    /// Returns `true` if a type of this name is declared or deferred in the closure.
    pub fn satisfies(&self, type_name: &str) -> bool {
        self.names.contains(type_name)
    }

    /// Returns the reachable declarations in discovery order.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Returns the deferred type names met during the walk.
    pub fn deferred(&self) -> &[String] {
        &self.deferred
    }

    /// Returns `true` if this exact declaration is part of the closure.
    pub fn contains(&self, declaration: &TypeDeclaration) -> bool {
        self.declarations
            .iter()
            .any(|d| std::ptr::eq(Arc::as_ptr(d), declaration))
    }
}

/// Computes the closure of a declaration, including the declaration itself.
pub fn resolve_closure(declaration: &Declaration) -> DependencyClosure {
    walk([Requirement::Declared(Arc::clone(declaration))])
}

/// Computes the closure of a list of requirements.
pub fn resolve_requirements(requirements: &[Requirement]) -> DependencyClosure {
    walk(requirements.iter().cloned())
}

/// Depth-first walk over requirement graphs, visiting each declaration once.
pub(crate) fn walk(roots: impl IntoIterator<Item = Requirement>) -> DependencyClosure {
    let mut closure = DependencyClosure::default();
    let mut visited: HashSet<*const TypeDeclaration> = HashSet::new();

    let mut stack: Vec<Requirement> = roots.into_iter().collect();
    stack.reverse();

    while let Some(requirement) = stack.pop() {
        match requirement {
            Requirement::Deferred(name) => {
                if !closure.deferred.contains(&name) {
                    closure.deferred.push(name.clone());
                }
                closure.names.insert(name);
            }
            Requirement::Declared(declaration) => {
                if !visited.insert(Arc::as_ptr(&declaration)) {
                    continue;
                }
                closure.names.insert(declaration.name().to_string());
                stack.extend(declaration.requirements().iter().rev().cloned());
                closure.declarations.push(declaration);
            }
        }
    }

    closure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{ObjectType, deferred};

    fn object(owner: &str, schema: &str, requires: Vec<Requirement>) -> Declaration {
        ObjectType::new(owner)
            .schema(schema)
            .requires(requires)
            .build()
            .unwrap()
    }

    #[test]
    fn test_transitive_closure() {
        let c = object("CType", "type C { value: Int }", vec![]);
        let b = object("BType", "type B { c: C }", vec![Requirement::from(&c)]);
        let a = object("AType", "type A { b: B }", vec![Requirement::from(&b)]);

        let closure = resolve_closure(&a);
        let names: Vec<_> = closure.declarations().iter().map(|d| d.name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(closure.satisfies("C"));
        assert!(!closure.satisfies("D"));
        assert!(closure.contains(&c));
    }

    #[test]
    fn test_shared_dependency_visited_once() {
        let shared = object("SharedType", "type Shared { id: ID }", vec![]);
        let left = object("LeftType", "type Left { s: Shared }", vec![Requirement::from(&shared)]);
        let right = object("RightType", "type Right { s: Shared }", vec![Requirement::from(&shared)]);

        let closure = resolve_requirements(&[Requirement::from(&left), Requirement::from(&right)]);
        assert_eq!(closure.declarations().len(), 3);
    }

    #[test]
    fn test_mutual_requirement_through_deferred_type() {
        let user = object(
            "UserType",
            "type User { group: Group }",
            vec![deferred("Group")],
        );
        let group = object(
            "GroupType",
            "type Group { members: [User!]! }",
            vec![Requirement::from(&user)],
        );

        let closure = resolve_closure(&group);
        assert!(closure.satisfies("User"));
        assert!(closure.satisfies("Group"));
        assert_eq!(closure.deferred(), ["Group"]);
    }

    #[test]
    fn test_unused_requirements_are_allowed() {
        let unused = object("UnusedType", "type Unused { id: ID }", vec![]);
        let query = object(
            "QueryType",
            "type Query { hello: String }",
            vec![Requirement::from(&unused)],
        );

        assert!(resolve_closure(&query).satisfies("Unused"));
    }
}
