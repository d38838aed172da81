//! Declarations collected from IDL text before name resolution.

use std::collections::HashMap;

/// A type expression as written in a member or typedef declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Basic type by its canonical rosidl name (`"double"`, `"int32"`, ...).
    Primitive(&'static str),
    /// A named type, e.g. `["geometry_msgs", "msg", "Point"]` or `["Point"]`.
    Scoped(Vec<String>),
    /// `sequence<T>` / `sequence<T, N>`.
    Sequence {
        elem: Box<TypeExpr>,
        max_len: Option<usize>,
    },
    /// `string` / `string<N>`.
    String(Option<usize>),
    /// `wstring` / `wstring<N>`.
    WString(Option<usize>),
}

/// `T name;` or `T name[N];`, inside a struct or as a typedef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub fixed_len: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub full_name: Vec<String>,
    pub members: Vec<MemberDecl>,
}

/// `typedef T alias[N];`; the member's name is the alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedefDecl {
    pub full_name: Vec<String>,
    pub target: MemberDecl,
}

/// Everything declared in one IDL file or bundle.
#[derive(Debug, Clone, Default)]
pub struct ParsedIdl {
    /// Structs in declaration order.
    pub structs: Vec<StructDecl>,
    /// Enum name → variant names.
    pub enums: HashMap<Vec<String>, Vec<String>>,
    pub typedefs: HashMap<Vec<String>, TypedefDecl>,
}

impl ParsedIdl {
    pub fn has_struct(&self, name: &[String]) -> bool {
        self.structs.iter().any(|s| s.full_name == name)
    }

    pub fn merge(&mut self, other: ParsedIdl) {
        for s in other.structs {
            match self.structs.iter_mut().find(|e| e.full_name == s.full_name) {
                Some(existing) => *existing = s,
                None => self.structs.push(s),
            }
        }
        self.enums.extend(other.enums);
        self.typedefs.extend(other.typedefs);
    }
}
