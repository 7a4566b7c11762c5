pub mod declaration;
pub mod position;

pub use declaration::{
    ClassDeclaration, Declaration, Decorator, ImportDeclaration, VariableDeclaration,
    VariableKind, base_type_name,
};
pub use position::{Position, Span};
