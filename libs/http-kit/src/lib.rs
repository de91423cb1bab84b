//! HTTP plumbing shared by the clinic modules: RFC 9457 problems, the view sink,
//! request-id propagation and the standard middleware stack.

pub mod problem;
pub mod request_id;
pub mod stack;
pub mod view;
pub mod web;

pub use problem::{Problem, ProblemResponse, ValidationError};
pub use stack::{with_standard_layers, StackOptions};
pub use view::{FieldError, GlobalError, Redirect, View, ViewDocument, ViewResponse};
