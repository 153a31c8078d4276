// Parsers for free-form AI endpoint output

pub mod ai_response;

pub use ai_response::{
    chat_reply, document_analysis, draft_tasks, normalize, NormalizedResponse, ResponseShape,
};
