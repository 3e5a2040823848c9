//! # ide-client
//!
//! Request side of the GraphQL IDE.
//!
//! For every outgoing operation the [`RequestDispatcher`] decides whether
//! the document is introspection-class and which [`CredentialMode`] to use,
//! then hands the request to a [`Transport`]. The dispatcher is stateless
//! and reentrant; tracking in-flight work is the caller's job.

pub mod classify;
pub mod credentials;
pub mod dispatcher;
pub mod document;
pub mod introspection;
pub mod operation;
pub mod transport;

pub use classify::{classify, is_introspection};
pub use credentials::{
    BasicAuthProvider, CredentialMode, CredentialProvider, NONCE_HEADER, SessionCredentials,
    credential_mode, providers_from_config,
};
pub use dispatcher::{DispatchPlan, RequestDispatcher};
pub use document::{merge_fragments, prettify};
pub use introspection::INTROSPECTION_QUERY;
pub use operation::OperationRequest;
pub use transport::{HttpTransport, Transport};
