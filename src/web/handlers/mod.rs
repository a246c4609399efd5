//! Request handlers for the web layer.

pub mod answer;
pub mod api;
pub mod auth;
pub mod question;

pub use answer::*;
pub use api::*;
pub use auth::*;
pub use question::{
    question_create, question_create_form, question_delete, question_detail, question_list,
    question_modify, question_modify_form,
};
