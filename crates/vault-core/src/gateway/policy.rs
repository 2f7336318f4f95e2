//! The access decision table.
//!
//! | Method | Class      | Admin         | Guest                      |
//! |--------|------------|---------------|----------------------------|
//! | PUT    | upload     | Allow(Put)    | Forbidden "Guest cannot upload" |
//! | GET    | file       | Allow(Get)    | Allow(Get)                 |
//! | DELETE | file       | Allow(Delete) | Forbidden "Forbidden"      |
//! | GET    | collection | Allow(List)   | Allow(List)                |
//!
//! Every other combination is `Unmatched`.

use crate::auth::Role;
use crate::gateway::ResourceClass;
use http::Method;

/// Store operation a request is allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Put,
    Get,
    Delete,
    List,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Put => "PutObject",
            Operation::Get => "GetObject",
            Operation::Delete => "DeleteObject",
            Operation::List => "ListObjects",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(Operation),
    /// Recognized request, role lacks permission. Carries the response body.
    Forbidden(&'static str),
    /// Not a recognized (method, class) pair.
    Unmatched,
    /// No usable identity; the client must be challenged.
    Unauthenticated,
}

/// The operation a (method, class) pair would attempt, independent of role.
pub fn operation_for(method: &Method, class: ResourceClass) -> Option<Operation> {
    match (method, class) {
        (&Method::PUT, ResourceClass::Upload) => Some(Operation::Put),
        (&Method::GET, ResourceClass::File) => Some(Operation::Get),
        (&Method::DELETE, ResourceClass::File) => Some(Operation::Delete),
        (&Method::GET, ResourceClass::Collection) => Some(Operation::List),
        _ => None,
    }
}

pub fn evaluate(method: &Method, class: ResourceClass, role: Role) -> Decision {
    let operation = match role {
        Role::Unauthenticated => return Decision::Unauthenticated,
        Role::Admin | Role::Guest => match operation_for(method, class) {
            Some(op) => op,
            None => return Decision::Unmatched,
        },
    };

    match (operation, role) {
        (_, Role::Admin) => Decision::Allow(operation),
        (Operation::Get | Operation::List, Role::Guest) => Decision::Allow(operation),
        (Operation::Put, Role::Guest) => Decision::Forbidden("Guest cannot upload"),
        (Operation::Delete, Role::Guest) => Decision::Forbidden("Forbidden"),
        (_, Role::Unauthenticated) => Decision::Unauthenticated,
    }
}
