// Server-rendered review page: upload form, loading and error states, feedback views.

pub mod handlers;
pub mod state;
pub mod view;
