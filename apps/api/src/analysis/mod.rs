// Analysis pipeline: intake → text extraction → CV validation → feedback generation.
// All model calls go through llm_client, never directly to the API.

pub mod extract;
pub mod feedback;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod upload;
pub mod validator;
