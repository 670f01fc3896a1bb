/// Error types for mesh construction and boundary input
use thiserror::Error;

/// A structural problem with base geometry, detected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("face {face} references vertex {index}, but the mesh has only {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Input rejected at the boundary between the host UI and the mesh model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field}: value {value} is not a finite number")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field}: cannot parse {text:?} as a number")]
    InvalidNumber { field: &'static str, text: String },
    #[error("syntax error near {near:?}")]
    Syntax { near: String },
}
